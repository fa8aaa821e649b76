use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answers::AnswerMap;
use crate::domain::questionnaire::{QuestionnaireId, QuestionnaireKind};
use crate::domain::sleep::SleepParameters;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub String);

impl ResponseId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// One user's submission of a questionnaire. Created at most once per
/// user per kind per Copenhagen calendar day; never mutated afterwards
/// except to refresh the sleep parameter snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub user_id: UserId,
    pub questionnaire_id: QuestionnaireId,
    pub kind: QuestionnaireKind,
    pub answers: AnswerMap,
    pub sleep_parameters: Option<SleepParameters>,
    pub created_at: DateTime<Utc>,
}

impl Response {
    pub fn new(
        user_id: UserId,
        questionnaire_id: QuestionnaireId,
        kind: QuestionnaireKind,
        answers: AnswerMap,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ResponseId::generate(),
            user_id,
            questionnaire_id,
            kind,
            answers,
            sleep_parameters: None,
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.0.is_empty() {
            return Err(DomainError::InvariantViolation("response requires a user id".to_owned()));
        }
        if self.questionnaire_id.0.is_empty() {
            return Err(DomainError::InvariantViolation(
                "response requires a questionnaire id".to_owned(),
            ));
        }
        if self.answers.is_empty() {
            return Err(DomainError::InvariantViolation(
                "response requires at least one answer".to_owned(),
            ));
        }
        Ok(())
    }
}
