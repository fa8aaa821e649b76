use chrono::{DateTime, Utc};
use tracing::debug;

use crate::answers::AnswerMap;
use crate::config::EngineConfig;
use crate::domain::question::{Language, QuestionId};
use crate::domain::questionnaire::{Questionnaire, QuestionnaireKind};
use crate::domain::response::{Response, UserId};
use crate::domain::sleep::SleepParameters;
use crate::errors::DomainError;
use crate::flow::{self, NextQuestion};
use crate::graph::QuestionGraph;
use crate::metrics;
use crate::schedule::DayWindow;
use crate::validation::{self, ValidationError};

/// Stateless facade over validation, flow resolution and the sleep
/// calculation. Holds only policy; every call takes the question graph
/// and answers explicitly, so one engine serves any number of
/// questionnaires concurrently.
#[derive(Clone, Debug, Default)]
pub struct ResponseEngine {
    config: EngineConfig,
}

impl ResponseEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the structural pass and the kind's semantic pass. On success
    /// returns the augmented answer map (auto-filled companions included);
    /// the caller's map is never touched.
    pub fn validate(
        &self,
        graph: &QuestionGraph,
        kind: QuestionnaireKind,
        answers: &AnswerMap,
    ) -> Result<AnswerMap, ValidationError> {
        validation::validate_answers(graph, kind, answers, &self.config)
    }

    /// Resolves the question to show after `current_question_id`. The
    /// answers given so far are validated first when the kind is known;
    /// flow decisions then run over the augmented map, so an auto-filled
    /// wake-minutes answer is visible to the skip rules.
    pub fn next_question(
        &self,
        graph: &QuestionGraph,
        kind: Option<QuestionnaireKind>,
        current_question_id: &QuestionId,
        answers: &AnswerMap,
        language: Language,
    ) -> Result<NextQuestion, ValidationError> {
        let augmented = match kind {
            Some(kind) => validation::validate_answers(graph, kind, answers, &self.config)?,
            None => answers.clone(),
        };
        Ok(flow::next_question(
            graph,
            kind,
            current_question_id,
            &augmented,
            language,
            &self.config,
        ))
    }

    /// Validates a full submission and assembles the response entity.
    /// Morning submissions get a sleep parameter snapshot; evening ones
    /// never carry one.
    pub fn build_response(
        &self,
        graph: &QuestionGraph,
        questionnaire: &Questionnaire,
        user_id: UserId,
        answers: &AnswerMap,
        submitted_at: DateTime<Utc>,
    ) -> Result<Response, DomainError> {
        let augmented = self.validate(graph, questionnaire.kind, answers)?;
        let mut response = Response::new(
            user_id,
            questionnaire.id.clone(),
            questionnaire.kind,
            augmented,
            submitted_at,
        );
        if questionnaire.kind == QuestionnaireKind::Morning {
            response.sleep_parameters = Some(metrics::calculate(graph, &response.answers));
        }
        response.validate()?;
        debug!(response = %response.id.0, kind = %questionnaire.kind, "built response");
        Ok(response)
    }

    /// Recomputes the sleep metrics from stored answers, e.g. after the
    /// question set was corrected. Best-effort like the original
    /// calculation: bad data degrades to zeros.
    pub fn sleep_parameters(&self, graph: &QuestionGraph, answers: &AnswerMap) -> SleepParameters {
        metrics::calculate(graph, answers)
    }

    /// The configured-timezone calendar day containing `moment`, used for
    /// the one-response-per-day rule.
    pub fn day_window(&self, moment: DateTime<Utc>) -> DayWindow {
        DayWindow::containing(moment, self.config.timezone)
    }
}
