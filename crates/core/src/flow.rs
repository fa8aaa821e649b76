use tracing::{debug, warn};

use crate::answers::AnswerMap;
use crate::config::EngineConfig;
use crate::domain::question::{Language, Question, QuestionId, QuestionType};
use crate::domain::questionnaire::QuestionnaireKind;
use crate::domain::sleep::roles;
use crate::graph::QuestionGraph;

/// Flow resolution outcome. Running out of candidates is a normal
/// terminal state, not an error, so polling is always safe.
#[derive(Clone, Debug, PartialEq)]
pub enum NextQuestion {
    Show(Question),
    Complete,
}

impl NextQuestion {
    pub fn question(&self) -> Option<&Question> {
        match self {
            Self::Show(question) => Some(question),
            Self::Complete => None,
        }
    }
}

/// Walks the root questions by ascending order strictly past the current
/// question, asking the kind's policy whether each candidate should be
/// shown. An unresolvable current id means the questionnaire is complete.
/// The shown question is localized; the stored entity is untouched.
pub fn next_question(
    graph: &QuestionGraph,
    kind: Option<QuestionnaireKind>,
    current_question_id: &QuestionId,
    answers: &AnswerMap,
    language: Language,
    config: &EngineConfig,
) -> NextQuestion {
    let Some(current) = graph.get(current_question_id) else {
        debug!(current = %current_question_id.0, "current question not found, treating as complete");
        return NextQuestion::Complete;
    };

    let current_order = current.order;
    for candidate in graph.root_questions() {
        if candidate.order <= current_order {
            continue;
        }
        if should_show(graph, kind, candidate, answers, config) {
            return NextQuestion::Show(candidate.localized(language));
        }
        debug!(candidate = %candidate.id.0, order = candidate.order, "skipping flow candidate");
    }
    NextQuestion::Complete
}

/// Per-kind show/skip policy over a root candidate.
fn should_show(
    graph: &QuestionGraph,
    kind: Option<QuestionnaireKind>,
    candidate: &Question,
    answers: &AnswerMap,
    config: &EngineConfig,
) -> bool {
    match kind {
        Some(QuestionnaireKind::Morning) => {
            morning_should_show(graph, candidate, answers, config)
        }
        // Evening conditional children are rendered client-side; the
        // engine only walks roots.
        Some(QuestionnaireKind::Evening) => !graph.is_conditional_child(&candidate.id),
        None => {
            warn!(candidate = %candidate.id.0, "unknown questionnaire kind, showing every candidate");
            true
        }
    }
}

/// The wake-count/wake-minutes pair hangs off "woke during night": hidden
/// until that question answers "yes".
fn morning_should_show(
    graph: &QuestionGraph,
    candidate: &Question,
    answers: &AnswerMap,
    config: &EngineConfig,
) -> bool {
    let is_wake_detail = (candidate.order == roles::WAKE_COUNT
        || candidate.order == roles::WAKE_MINUTES)
        && candidate.kind == QuestionType::Numeric;
    if !is_wake_detail {
        return true;
    }
    let Some(woke) =
        graph.find_by_order_and_type(roles::WOKE_DURING_NIGHT, QuestionType::SingleChoice)
    else {
        return true;
    };
    match answers.get(&woke.id).and_then(|answer| answer.option_id()) {
        Some(option) => option != config.wake_no_option,
        None => false,
    }
}
