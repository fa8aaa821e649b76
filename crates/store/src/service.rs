use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use somna_core::answers::AnswerMap;
use somna_core::domain::question::{Language, QuestionId};
use somna_core::domain::questionnaire::{
    Questionnaire, QuestionnaireId, QuestionnaireKind, ResolvedQuestionnaire,
};
use somna_core::domain::response::{Response, ResponseId, UserId};
use somna_core::domain::sleep::SleepParameters;
use somna_core::engine::ResponseEngine;
use somna_core::errors::DomainError;
use somna_core::flow::NextQuestion;
use somna_core::graph::QuestionGraph;
use somna_core::validation::ValidationError;

use crate::repositories::{
    QuestionFilter, QuestionRepository, QuestionnaireRepository, RepositoryError,
    ResponseRepository,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("questionnaire `{0}` not found")]
    QuestionnaireNotFound(String),
    #[error("response `{0}` not found")]
    ResponseNotFound(String),
    #[error("this questionnaire was already answered today")]
    AlreadySubmitted,
    #[error("sleep parameters can only be calculated for the morning questionnaire")]
    NotAMorningResponse,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Response lifecycle orchestration over the repositories: resolve the
/// questionnaire reference, enforce one submission per local day, run
/// the engine, persist. The duplicate check runs before validation so a
/// second same-day attempt fails fast regardless of its content.
pub struct ResponseService {
    engine: ResponseEngine,
    questions: Arc<dyn QuestionRepository>,
    questionnaires: Arc<dyn QuestionnaireRepository>,
    responses: Arc<dyn ResponseRepository>,
}

impl ResponseService {
    pub fn new(
        engine: ResponseEngine,
        questions: Arc<dyn QuestionRepository>,
        questionnaires: Arc<dyn QuestionnaireRepository>,
        responses: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self { engine, questions, questionnaires, responses }
    }

    /// A questionnaire reference may be a kind literal (`morning` or
    /// `evening`), a stored questionnaire id, or an id only discoverable
    /// through a question's owning-questionnaire field.
    pub async fn resolve_questionnaire(
        &self,
        reference: &str,
    ) -> Result<ResolvedQuestionnaire, ServiceError> {
        let questionnaire = self.resolve(reference).await?;
        Ok(ResolvedQuestionnaire { id: questionnaire.id, kind: questionnaire.kind })
    }

    async fn resolve(&self, reference: &str) -> Result<Questionnaire, ServiceError> {
        if let Ok(kind) = reference.parse::<QuestionnaireKind>() {
            return Ok(self.questionnaires.get_or_create_by_kind(kind).await?);
        }
        let id = QuestionnaireId(reference.to_owned());
        if let Some(questionnaire) = self.questionnaires.find_by_id(&id).await? {
            return Ok(questionnaire);
        }
        // Stale reference: the questionnaire document is gone but its
        // questions still point at the owner.
        let orphans =
            self.questions.list_for_questionnaire(&id, QuestionFilter::IncludingDeleted).await?;
        if let Some(first) = orphans.first() {
            if let Some(questionnaire) =
                self.questionnaires.find_by_id(&first.questionnaire_id).await?
            {
                debug!(reference, resolved = %questionnaire.id.0, "resolved questionnaire via its questions");
                return Ok(questionnaire);
            }
        }
        Err(ServiceError::QuestionnaireNotFound(reference.to_owned()))
    }

    /// Deleted questions stay in the graph so stored answers remain
    /// resolvable; the flow and validation paths skip them on their own.
    async fn load_graph(&self, questionnaire_id: &QuestionnaireId) -> Result<QuestionGraph, ServiceError> {
        let questions = self
            .questions
            .list_for_questionnaire(questionnaire_id, QuestionFilter::IncludingDeleted)
            .await?;
        Ok(QuestionGraph::new(questions))
    }

    pub async fn submit(
        &self,
        user_id: UserId,
        questionnaire: &str,
        answers: &AnswerMap,
        submitted_at: DateTime<Utc>,
    ) -> Result<Response, ServiceError> {
        let questionnaire = self.resolve(questionnaire).await?;

        let window = self.engine.day_window(submitted_at);
        if self.responses.exists_in_window(&user_id, &questionnaire.id, window).await? {
            return Err(ServiceError::AlreadySubmitted);
        }

        let graph = self.load_graph(&questionnaire.id).await?;
        let response =
            self.engine.build_response(&graph, &questionnaire, user_id, answers, submitted_at)?;
        self.responses.save(response.clone()).await?;
        info!(response = %response.id.0, kind = %questionnaire.kind, "stored response");
        Ok(response)
    }

    pub async fn next_question(
        &self,
        questionnaire: &str,
        current_question_id: &QuestionId,
        answers: &AnswerMap,
        language: Language,
    ) -> Result<NextQuestion, ServiceError> {
        let questionnaire = self.resolve(questionnaire).await?;
        let graph = self.load_graph(&questionnaire.id).await?;
        Ok(self.engine.next_question(
            &graph,
            Some(questionnaire.kind),
            current_question_id,
            answers,
            language,
        )?)
    }

    /// Recomputes the sleep parameter snapshot on a stored morning
    /// response, so calculation corrections reach old data. Evening
    /// responses never carry sleep parameters.
    pub async fn recalculate_sleep(
        &self,
        response_id: &ResponseId,
    ) -> Result<SleepParameters, ServiceError> {
        let mut response = self
            .responses
            .find_by_id(response_id)
            .await?
            .ok_or_else(|| ServiceError::ResponseNotFound(response_id.0.clone()))?;
        if response.kind != QuestionnaireKind::Morning {
            return Err(ServiceError::NotAMorningResponse);
        }

        let graph = self.load_graph(&response.questionnaire_id).await?;
        let parameters = self.engine.sleep_parameters(&graph, &response.answers);
        response.sleep_parameters = Some(parameters);
        self.responses.save(response).await?;
        Ok(parameters)
    }
}
