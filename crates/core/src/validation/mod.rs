pub mod evening;
pub mod morning;
pub mod types;

use thiserror::Error;

use crate::answers::AnswerMap;
use crate::config::EngineConfig;
use crate::domain::questionnaire::QuestionnaireKind;
use crate::graph::QuestionGraph;
use crate::time::TimeOfDay;

/// Whether a failure is about one answer's shape or about a
/// cross-question business rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationKind {
    Structural,
    Semantic,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("answer for '{question}' must be at most {limit} characters, you entered {length}")]
    TextTooLong { question: String, limit: usize, length: usize },
    #[error("answer for '{question}' must contain at least one character")]
    TextBlank { question: String },
    #[error("invalid numeric value for question '{question}'")]
    InvalidNumber { question: String },
    #[error("value for '{question}' must be at least {min}, you entered {value}")]
    BelowMinimum { question: String, min: i64, value: f64 },
    #[error("value for '{question}' must be at most {max}, you entered {value}")]
    AboveMaximum { question: String, max: i64, value: f64 },
    #[error("value for '{question}' cannot be negative, you entered {value}")]
    NegativeValue { question: String, value: f64 },
    #[error("invalid time format for question '{question}', expected HH:MM")]
    InvalidTime { question: String },
    #[error("time for '{question}' must be no earlier than {min}, you entered {value}")]
    TimeBeforeMinimum { question: String, min: TimeOfDay, value: TimeOfDay },
    #[error("time for '{question}' must be no later than {max}, you entered {value}")]
    TimeAfterMaximum { question: String, max: TimeOfDay, value: TimeOfDay },
    #[error("question '{question}' has no options")]
    NoOptions { question: String },
    #[error("invalid option for question '{question}'")]
    UnknownOption { question: String },
    #[error("at least one selection is required for question '{question}'")]
    EmptySelection { question: String },
    #[error("expected a list of selections for question '{question}'")]
    NotASelectionList { question: String },
    #[error("custom text is required for the 'other' option in question '{question}'")]
    OtherTextMissing { question: String },
    #[error("the light cannot go off ({light_off}) before going to bed ({went_to_bed})")]
    LightOffBeforeBed { light_off: TimeOfDay, went_to_bed: TimeOfDay },
    #[error("you cannot get up ({got_up}) before waking ({woke_up})")]
    UpBeforeWake { got_up: TimeOfDay, woke_up: TimeOfDay },
    #[error("waking during the night requires both how many times and how many minutes awake")]
    NightWakeDetailsMissing,
    #[error("waking {times} times during the night requires awake minutes greater than zero")]
    NightWakeMinutesZero { times: i64 },
    #[error("not waking during the night requires awake minutes of zero, you entered {value}")]
    NoWakeMinutesNotZero { value: i64 },
    #[error("you cannot fall asleep ({fell_asleep}) before going to bed ({went_to_bed})")]
    AsleepBeforeBed { fell_asleep: TimeOfDay, went_to_bed: TimeOfDay },
    #[error("minutes to fall asleep cannot be negative, you entered {minutes}")]
    NegativeSleepLatency { minutes: i64 },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationKind {
        match self {
            Self::TextTooLong { .. }
            | Self::TextBlank { .. }
            | Self::InvalidNumber { .. }
            | Self::BelowMinimum { .. }
            | Self::AboveMaximum { .. }
            | Self::NegativeValue { .. }
            | Self::InvalidTime { .. }
            | Self::TimeBeforeMinimum { .. }
            | Self::TimeAfterMaximum { .. }
            | Self::NoOptions { .. }
            | Self::UnknownOption { .. }
            | Self::EmptySelection { .. }
            | Self::NotASelectionList { .. }
            | Self::OtherTextMissing { .. } => ValidationKind::Structural,
            Self::LightOffBeforeBed { .. }
            | Self::UpBeforeWake { .. }
            | Self::NightWakeDetailsMissing
            | Self::NightWakeMinutesZero { .. }
            | Self::NoWakeMinutesNotZero { .. }
            | Self::AsleepBeforeBed { .. }
            | Self::NegativeSleepLatency { .. } => ValidationKind::Semantic,
        }
    }
}

/// Two-stage pipeline over a full answer set: a base stage shared by every
/// questionnaire kind, then the kind's own business rules. Fails on the
/// first violation so the caller can surface one actionable message.
///
/// Returns an augmented copy of the answers (the morning stage may inject
/// a documented default); the caller's map is never mutated.
pub fn validate_answers(
    graph: &QuestionGraph,
    kind: QuestionnaireKind,
    answers: &AnswerMap,
    config: &EngineConfig,
) -> Result<AnswerMap, ValidationError> {
    validate_base(graph, answers, config)?;

    let mut augmented = answers.clone();
    match kind {
        QuestionnaireKind::Morning => morning::validate(graph, &mut augmented, config)?,
        QuestionnaireKind::Evening => evening::validate(graph, &augmented, config)?,
    }
    Ok(augmented)
}

/// Runs the matching type validator over every present answer of every
/// reachable active question. A conditional child whose triggering option
/// was not selected is skipped even if an answer is present for it, and a
/// reachable question with no answer is not flagged here: completeness is
/// a cross-question concern owned by the kind-specific stage.
fn validate_base(
    graph: &QuestionGraph,
    answers: &AnswerMap,
    config: &EngineConfig,
) -> Result<(), ValidationError> {
    for question in graph.active_questions() {
        if !graph.is_reachable(&question.id, answers) {
            continue;
        }
        if let Some(answer) = answers.get(&question.id) {
            types::validate_answer(question, answer, config)?;
        }
    }
    Ok(())
}
