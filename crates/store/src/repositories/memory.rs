use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use somna_core::domain::question::{Question, QuestionId};
use somna_core::domain::questionnaire::{Questionnaire, QuestionnaireId, QuestionnaireKind};
use somna_core::domain::response::{Response, ResponseId, UserId};
use somna_core::schedule::DayWindow;

use super::{
    QuestionFilter, QuestionRepository, QuestionnaireRepository, RepositoryError,
    ResponseRepository,
};

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<String, Question>>,
}

#[async_trait::async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError> {
        let questions = self.questions.read().await;
        Ok(questions.get(&id.0).cloned())
    }

    async fn list_for_questionnaire(
        &self,
        questionnaire_id: &QuestionnaireId,
        filter: QuestionFilter,
    ) -> Result<Vec<Question>, RepositoryError> {
        let questions = self.questions.read().await;
        let mut listed: Vec<Question> = questions
            .values()
            .filter(|question| &question.questionnaire_id == questionnaire_id)
            .filter(|question| match filter {
                QuestionFilter::ActiveOnly => !question.is_deleted(),
                QuestionFilter::IncludingDeleted => true,
            })
            .cloned()
            .collect();
        listed.sort_by_key(|question| question.order);
        Ok(listed)
    }

    async fn save(&self, question: Question) -> Result<(), RepositoryError> {
        let mut questions = self.questions.write().await;
        questions.insert(question.id.0.clone(), question);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionnaireRepository {
    questionnaires: RwLock<HashMap<String, Questionnaire>>,
}

#[async_trait::async_trait]
impl QuestionnaireRepository for InMemoryQuestionnaireRepository {
    async fn find_by_id(
        &self,
        id: &QuestionnaireId,
    ) -> Result<Option<Questionnaire>, RepositoryError> {
        let questionnaires = self.questionnaires.read().await;
        Ok(questionnaires.get(&id.0).cloned())
    }

    async fn find_by_kind(
        &self,
        kind: QuestionnaireKind,
    ) -> Result<Option<Questionnaire>, RepositoryError> {
        let questionnaires = self.questionnaires.read().await;
        Ok(questionnaires.values().find(|q| q.kind == kind).cloned())
    }

    async fn get_or_create_by_kind(
        &self,
        kind: QuestionnaireKind,
    ) -> Result<Questionnaire, RepositoryError> {
        let mut questionnaires = self.questionnaires.write().await;
        if let Some(existing) = questionnaires.values().find(|q| q.kind == kind) {
            return Ok(existing.clone());
        }
        let created = Questionnaire {
            id: QuestionnaireId(Uuid::new_v4().to_string()),
            kind,
            name: match kind {
                QuestionnaireKind::Morning => "Morgenskema".to_owned(),
                QuestionnaireKind::Evening => "Aftenskema".to_owned(),
            },
        };
        questionnaires.insert(created.id.0.clone(), created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct InMemoryResponseRepository {
    responses: RwLock<HashMap<String, Response>>,
}

#[async_trait::async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn find_by_id(&self, id: &ResponseId) -> Result<Option<Response>, RepositoryError> {
        let responses = self.responses.read().await;
        Ok(responses.get(&id.0).cloned())
    }

    async fn exists_in_window(
        &self,
        user_id: &UserId,
        questionnaire_id: &QuestionnaireId,
        window: DayWindow,
    ) -> Result<bool, RepositoryError> {
        let responses = self.responses.read().await;
        Ok(responses.values().any(|response| {
            &response.user_id == user_id
                && &response.questionnaire_id == questionnaire_id
                && window.contains(response.created_at)
        }))
    }

    async fn save(&self, response: Response) -> Result<(), RepositoryError> {
        let mut responses = self.responses.write().await;
        responses.insert(response.id.0.clone(), response);
        Ok(())
    }
}
