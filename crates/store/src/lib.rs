pub mod fixtures;
pub mod repositories;
pub mod service;

pub use fixtures::{seed_default_questionnaires, SeedSummary};
pub use repositories::{
    InMemoryQuestionRepository, InMemoryQuestionnaireRepository, InMemoryResponseRepository,
    QuestionFilter, QuestionRepository, QuestionnaireRepository, RepositoryError,
    ResponseRepository,
};
pub use service::{ResponseService, ServiceError};
