use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionnaireId(pub String);

/// Which survey a question set belongs to. Exactly one questionnaire
/// exists per kind; the kind selects the validation and flow policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireKind {
    Morning,
    Evening,
}

impl QuestionnaireKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
        }
    }
}

impl fmt::Display for QuestionnaireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionnaireKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "morning" => Ok(Self::Morning),
            "evening" => Ok(Self::Evening),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: QuestionnaireId,
    pub kind: QuestionnaireKind,
    pub name: String,
}

/// Outcome of turning a caller-supplied questionnaire reference (kind
/// literal or stored id) into a concrete questionnaire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedQuestionnaire {
    pub id: QuestionnaireId,
    pub kind: QuestionnaireKind,
}
