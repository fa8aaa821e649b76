use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::question::QuestionId;
use crate::time::TimeOfDay;

/// One raw answer as it arrives over the wire: a bare scalar for simple
/// answers, a `{optionId, customText}` object for "other"-option choices,
/// or an array of either for multi-choice questions. Validators work
/// against the accessors below and never need to know which shape the
/// client sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Selection {
        #[serde(rename = "optionId")]
        option_id: String,
        #[serde(rename = "customText", skip_serializing_if = "Option::is_none")]
        custom_text: Option<String>,
    },
    Many(Vec<AnswerValue>),
}

pub type AnswerMap = BTreeMap<QuestionId, AnswerValue>;

impl AnswerValue {
    pub fn selection(option_id: impl Into<String>) -> Self {
        Self::Selection { option_id: option_id.into(), custom_text: None }
    }

    pub fn other_selection(option_id: impl Into<String>, custom_text: impl Into<String>) -> Self {
        Self::Selection { option_id: option_id.into(), custom_text: Some(custom_text.into()) }
    }

    /// Numeric value, accepting numbers and numeric-looking strings.
    /// `None` is a parse failure for the caller to report, not a default.
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(raw) => raw.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        self.number().map(|value| value as i64)
    }

    pub fn time(&self) -> Option<TimeOfDay> {
        match self {
            Self::Text(raw) => raw.parse().ok(),
            _ => None,
        }
    }

    /// Option identifier of a choice answer, whether the client sent a bare
    /// id or the structured "other" payload.
    pub fn option_id(&self) -> Option<&str> {
        match self {
            Self::Text(raw) => Some(raw.as_str()),
            Self::Selection { option_id, .. } => Some(option_id.as_str()),
            _ => None,
        }
    }

    /// Present only for the structured "other" payload.
    pub fn custom_text(&self) -> Option<&str> {
        match self {
            Self::Selection { custom_text, .. } => custom_text.as_deref(),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[AnswerValue]> {
        match self {
            Self::Many(items) => Some(items),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(raw) => Some(raw.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}
