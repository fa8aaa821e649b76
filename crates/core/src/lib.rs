pub mod answers;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod flow;
pub mod graph;
pub mod metrics;
pub mod schedule;
pub mod time;
pub mod validation;

pub use answers::{AnswerMap, AnswerValue};
pub use config::{ConfigError, EngineConfig};
pub use domain::question::{
    ConditionalChild, Language, LocalizedText, OptionId, Question, QuestionId, QuestionOption,
    QuestionType, QuestionUpdate,
};
pub use domain::questionnaire::{
    Questionnaire, QuestionnaireId, QuestionnaireKind, ResolvedQuestionnaire,
};
pub use domain::response::{Response, ResponseId, UserId};
pub use domain::sleep::{SleepData, SleepOnset, SleepParameters};
pub use engine::ResponseEngine;
pub use errors::DomainError;
pub use flow::NextQuestion;
pub use graph::QuestionGraph;
pub use schedule::DayWindow;
pub use time::{ParseTimeError, TimeOfDay};
pub use validation::{validate_answers, ValidationError, ValidationKind};
