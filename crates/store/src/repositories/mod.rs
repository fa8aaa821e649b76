use async_trait::async_trait;
use thiserror::Error;

use somna_core::domain::question::{Question, QuestionId};
use somna_core::domain::questionnaire::{Questionnaire, QuestionnaireId, QuestionnaireKind};
use somna_core::domain::response::{Response, ResponseId, UserId};
use somna_core::schedule::DayWindow;

pub mod memory;

pub use memory::{
    InMemoryQuestionRepository, InMemoryQuestionnaireRepository, InMemoryResponseRepository,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Whether soft-deleted questions are part of a listing. Deleted
/// questions stay resolvable for stored responses; only the active flow
/// drops them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionFilter {
    ActiveOnly,
    IncludingDeleted,
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError>;

    /// Questions of a questionnaire in ascending `order`.
    async fn list_for_questionnaire(
        &self,
        questionnaire_id: &QuestionnaireId,
        filter: QuestionFilter,
    ) -> Result<Vec<Question>, RepositoryError>;

    async fn save(&self, question: Question) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait QuestionnaireRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &QuestionnaireId,
    ) -> Result<Option<Questionnaire>, RepositoryError>;

    async fn find_by_kind(
        &self,
        kind: QuestionnaireKind,
    ) -> Result<Option<Questionnaire>, RepositoryError>;

    /// At most one questionnaire exists per kind; it is created lazily on
    /// first access.
    async fn get_or_create_by_kind(
        &self,
        kind: QuestionnaireKind,
    ) -> Result<Questionnaire, RepositoryError>;
}

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    async fn find_by_id(&self, id: &ResponseId) -> Result<Option<Response>, RepositoryError>;

    /// True when the user already submitted this questionnaire inside the
    /// given day window.
    async fn exists_in_window(
        &self,
        user_id: &UserId,
        questionnaire_id: &QuestionnaireId,
        window: DayWindow,
    ) -> Result<bool, RepositoryError>;

    async fn save(&self, response: Response) -> Result<(), RepositoryError>;
}
