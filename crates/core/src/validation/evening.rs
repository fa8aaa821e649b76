use crate::answers::AnswerMap;
use crate::config::EngineConfig;
use crate::graph::QuestionGraph;
use crate::validation::ValidationError;

/// No evening-specific rules exist today; the hook keeps the kind stage
/// extensible without touching the base pipeline.
pub fn validate(
    _graph: &QuestionGraph,
    _answers: &AnswerMap,
    _config: &EngineConfig,
) -> Result<(), ValidationError> {
    Ok(())
}
