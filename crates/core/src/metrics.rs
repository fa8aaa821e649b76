use tracing::{debug, warn};

use crate::answers::AnswerMap;
use crate::domain::sleep::{roles, SleepData, SleepOnset, SleepParameters};
use crate::graph::QuestionGraph;
use crate::time::TimeOfDay;

/// Derives the four sleep metrics from a validated morning answer set.
/// Best-effort by contract: metrics are advisory and must never block a
/// submission, so incomplete data degrades to zeros instead of erroring.
pub fn calculate(graph: &QuestionGraph, answers: &AnswerMap) -> SleepParameters {
    let data = extract_sleep_data(graph, answers);
    if !data.is_complete() {
        warn!(
            went_to_bed = ?data.went_to_bed,
            got_up = ?data.got_up,
            "missing bed or rise time, returning zeroed sleep parameters"
        );
        return SleepParameters::ZERO;
    }

    let tib = calculate_tib(&data);
    let sol = calculate_sol(&data);
    let tst = calculate_tst(&data, tib, sol);
    SleepParameters { sol, waso: data.waso_minutes, tib, tst }
}

/// Maps each answered question's fixed `order` to its sleep role.
/// Unmapped orders are ignored. WASO is the one place a malformed value
/// substitutes a default: its absence legitimately means "did not wake".
pub fn extract_sleep_data(graph: &QuestionGraph, answers: &AnswerMap) -> SleepData {
    let mut data = SleepData::default();
    for question in graph.active_questions() {
        let Some(answer) = answers.get(&question.id) else { continue };
        match question.order {
            roles::WENT_TO_BED => data.went_to_bed = answer.time(),
            roles::LIGHT_OFF => data.light_off = answer.time(),
            roles::FELL_ASLEEP_AFTER => {
                data.fell_asleep_after = Some(parse_onset(answer));
            }
            roles::WAKE_MINUTES => {
                data.waso_minutes = answer.number().unwrap_or_else(|| {
                    warn!(answer = ?answer, "could not parse WASO, defaulting to 0");
                    0.0
                });
            }
            roles::WOKE_UP => data.woke_up = answer.time(),
            roles::GOT_UP => data.got_up = answer.time(),
            _ => {}
        }
    }
    debug!(?data, "extracted sleep data");
    data
}

fn parse_onset(answer: &crate::answers::AnswerValue) -> SleepOnset {
    if let Some(time) = answer.time() {
        return SleepOnset::Clock(time);
    }
    match answer.number() {
        Some(minutes) => SleepOnset::Minutes(minutes),
        None => {
            warn!(answer = ?answer, "could not parse sleep onset, treating as 0 minutes");
            SleepOnset::Minutes(0.0)
        }
    }
}

/// Time in bed: went-to-bed until got-up, midnight-aware.
fn calculate_tib(data: &SleepData) -> f64 {
    match (data.went_to_bed, data.got_up) {
        (Some(bed), Some(up)) => bed.minutes_until(up) as f64,
        _ => 0.0,
    }
}

/// Sleep onset latency. With a light-off time the moment of falling
/// asleep is light-off plus the onset minutes; without one the onset
/// minutes stand on their own.
fn calculate_sol(data: &SleepData) -> f64 {
    let sol = match (data.went_to_bed, data.light_off, data.fell_asleep_after) {
        (Some(bed), Some(light_off), Some(onset)) => {
            let fell_asleep = asleep_clock_time(light_off, onset);
            bed.minutes_until(fell_asleep) as f64
        }
        _ => data.fell_asleep_after.map(|onset| onset.minutes()).unwrap_or(0.0),
    };
    ensure_non_negative(sol, "SOL")
}

/// Total sleep time: falling asleep until waking when all three inputs
/// exist, otherwise the TIB - SOL - WASO fallback.
fn calculate_tst(data: &SleepData, tib: f64, sol: f64) -> f64 {
    let tst = match (data.light_off, data.fell_asleep_after, data.woke_up) {
        (Some(light_off), Some(onset), Some(woke_up)) => {
            let fell_asleep = asleep_clock_time(light_off, onset);
            fell_asleep.minutes_until(woke_up) as f64
        }
        _ => tib - sol - data.waso_minutes,
    };
    ensure_non_negative(tst, "TST")
}

fn asleep_clock_time(light_off: TimeOfDay, onset: SleepOnset) -> TimeOfDay {
    light_off.add_minutes(onset.minutes().max(0.0) as u32)
}

fn ensure_non_negative(value: f64, name: &str) -> f64 {
    if value < 0.0 {
        warn!(name, value, "clamping negative sleep metric to 0");
        0.0
    } else {
        value
    }
}
