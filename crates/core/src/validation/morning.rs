use crate::answers::{AnswerMap, AnswerValue};
use crate::config::EngineConfig;
use crate::domain::question::{Question, QuestionType};
use crate::domain::sleep::roles;
use crate::graph::QuestionGraph;
use crate::time::TimeOfDay;
use crate::validation::ValidationError;

/// Morning business rules, checked in a fixed order with the first
/// failure returned. Runs after the base stage, so individual answers are
/// already shape-valid; a cross-check whose inputs fail to parse here is
/// skipped rather than re-reported.
pub fn validate(
    graph: &QuestionGraph,
    answers: &mut AnswerMap,
    config: &EngineConfig,
) -> Result<(), ValidationError> {
    auto_fill_wake_minutes(graph, answers, config);
    check_light_off_after_bed(graph, answers)?;
    check_up_after_waking(graph, answers)?;
    check_night_wake_pair(graph, answers, config)?;
    check_sleep_onset_after_bed(graph, answers)?;
    Ok(())
}

/// Documented convenience default: "did not wake" with no minutes-awake
/// answer means zero minutes awake. Only absence is filled in; a present
/// answer is never rewritten.
fn auto_fill_wake_minutes(graph: &QuestionGraph, answers: &mut AnswerMap, config: &EngineConfig) {
    let woke = graph.find_by_order_and_type(roles::WOKE_DURING_NIGHT, QuestionType::SingleChoice);
    let minutes = graph.find_by_order_and_type(roles::WAKE_MINUTES, QuestionType::Numeric);
    let (Some(woke), Some(minutes)) = (woke, minutes) else { return };

    let said_no = answers
        .get(&woke.id)
        .and_then(|answer| answer.option_id())
        .is_some_and(|option| option == config.wake_no_option);
    if said_no && !answers.contains_key(&minutes.id) {
        answers.insert(minutes.id.clone(), AnswerValue::Number(0.0));
    }
}

fn check_light_off_after_bed(
    graph: &QuestionGraph,
    answers: &AnswerMap,
) -> Result<(), ValidationError> {
    let Some((went_to_bed, light_off)) = answered_time_pair(
        graph,
        answers,
        roles::WENT_TO_BED,
        roles::LIGHT_OFF,
    ) else {
        return Ok(());
    };
    if light_off < went_to_bed {
        return Err(ValidationError::LightOffBeforeBed { light_off, went_to_bed });
    }
    Ok(())
}

fn check_up_after_waking(
    graph: &QuestionGraph,
    answers: &AnswerMap,
) -> Result<(), ValidationError> {
    let Some((woke_up, got_up)) =
        answered_time_pair(graph, answers, roles::WOKE_UP, roles::GOT_UP)
    else {
        return Ok(());
    };
    if got_up < woke_up {
        return Err(ValidationError::UpBeforeWake { got_up, woke_up });
    }
    Ok(())
}

/// "Woke during night" drives its numeric companions: "yes" requires both
/// the wake count and the minutes awake, with a non-zero minute count
/// whenever the user woke at least once; "no" requires exactly zero
/// minutes awake.
fn check_night_wake_pair(
    graph: &QuestionGraph,
    answers: &AnswerMap,
    config: &EngineConfig,
) -> Result<(), ValidationError> {
    let woke = graph.find_by_order_and_type(roles::WOKE_DURING_NIGHT, QuestionType::SingleChoice);
    let count = graph.find_by_order_and_type(roles::WAKE_COUNT, QuestionType::Numeric);
    let minutes = graph.find_by_order_and_type(roles::WAKE_MINUTES, QuestionType::Numeric);
    let (Some(woke), Some(count), Some(minutes)) = (woke, count, minutes) else {
        return Ok(());
    };
    let Some(selected) = answers.get(&woke.id).and_then(|answer| answer.option_id()) else {
        return Ok(());
    };

    if selected == config.wake_yes_option {
        let (Some(count_answer), Some(minutes_answer)) =
            (answers.get(&count.id), answers.get(&minutes.id))
        else {
            return Err(ValidationError::NightWakeDetailsMissing);
        };
        if let (Some(times), Some(awake)) = (count_answer.integer(), minutes_answer.integer()) {
            if times >= 1 && awake == 0 {
                return Err(ValidationError::NightWakeMinutesZero { times });
            }
        }
    } else if selected == config.wake_no_option {
        if let Some(value) = answers.get(&minutes.id).and_then(|answer| answer.integer()) {
            if value != 0 {
                return Err(ValidationError::NoWakeMinutesNotZero { value });
            }
        }
    }
    Ok(())
}

/// The sleep-onset answer comes in two forms: a clock time (must not lie
/// before going to bed) or a minute count (must not be negative).
fn check_sleep_onset_after_bed(
    graph: &QuestionGraph,
    answers: &AnswerMap,
) -> Result<(), ValidationError> {
    let bed_question =
        graph.find_by_order_and_type(roles::WENT_TO_BED, QuestionType::TimePicker);
    let onset_question = graph.find_by_order(roles::FELL_ASLEEP_AFTER);
    let (Some(bed_question), Some(onset_question)) = (bed_question, onset_question) else {
        return Ok(());
    };
    let Some(went_to_bed) = answers.get(&bed_question.id).and_then(|answer| answer.time()) else {
        return Ok(());
    };
    let Some(onset_answer) = answers.get(&onset_question.id) else {
        return Ok(());
    };

    match onset_question.kind {
        QuestionType::TimePicker => {
            if let Some(fell_asleep) = onset_answer.time() {
                if fell_asleep < went_to_bed {
                    return Err(ValidationError::AsleepBeforeBed { fell_asleep, went_to_bed });
                }
            }
        }
        QuestionType::Numeric => {
            if let Some(minutes) = onset_answer.integer() {
                if minutes < 0 {
                    return Err(ValidationError::NegativeSleepLatency { minutes });
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn answered_time_pair(
    graph: &QuestionGraph,
    answers: &AnswerMap,
    first_order: u32,
    second_order: u32,
) -> Option<(TimeOfDay, TimeOfDay)> {
    let first = graph.find_by_order_and_type(first_order, QuestionType::TimePicker)?;
    let second = graph.find_by_order_and_type(second_order, QuestionType::TimePicker)?;
    let first_time = answered_time(answers, first)?;
    let second_time = answered_time(answers, second)?;
    Some((first_time, second_time))
}

fn answered_time(answers: &AnswerMap, question: &Question) -> Option<TimeOfDay> {
    answers.get(&question.id).and_then(|answer| answer.time())
}
