use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::time::TimeOfDay;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    SingleChoice,
    MultiChoice,
    Numeric,
    Slider,
    TimePicker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Da,
    En,
}

/// Display text stored in two language variants plus the pre-bilingual
/// single field some seeded questions still carry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub da: Option<String>,
    pub en: Option<String>,
    pub legacy: Option<String>,
}

impl LocalizedText {
    pub fn bilingual(da: impl Into<String>, en: impl Into<String>) -> Self {
        Self { da: Some(da.into()), en: Some(en.into()), legacy: None }
    }

    pub fn exact(text: impl Into<String>) -> Self {
        Self { da: None, en: None, legacy: Some(text.into()) }
    }

    pub fn is_empty(&self) -> bool {
        self.resolve(Language::Da).is_none() && self.resolve(Language::En).is_none()
    }

    /// Requested language first, then the other language, then the legacy
    /// single-text field.
    pub fn resolve(&self, language: Language) -> Option<&str> {
        fn non_blank(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|text| !text.is_empty())
        }
        let (requested, other) = match language {
            Language::Da => (&self.da, &self.en),
            Language::En => (&self.en, &self.da),
        };
        non_blank(requested).or_else(|| non_blank(other)).or_else(|| non_blank(&self.legacy))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCode {
    Green,
    Yellow,
    Red,
}

/// Advisor-facing color thresholds. Presentation only: nothing in the
/// validation or flow paths reads these.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorThresholds {
    pub green_min: Option<i64>,
    pub green_max: Option<i64>,
    pub yellow_min: Option<i64>,
    pub yellow_max: Option<i64>,
    pub red_min: Option<i64>,
    pub red_max: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub text: LocalizedText,
    #[serde(default)]
    pub is_other: bool,
    pub color: Option<ColorCode>,
}

impl QuestionOption {
    pub fn new(id: impl Into<String>, text: LocalizedText) -> Self {
        Self { id: OptionId(id.into()), text, is_other: false, color: None }
    }

    pub fn other(id: impl Into<String>, text: LocalizedText) -> Self {
        Self { id: OptionId(id.into()), text, is_other: true, color: None }
    }

    pub fn localized(&self, language: Language) -> QuestionOption {
        let mut option = self.clone();
        option.text = LocalizedText::exact(self.text.resolve(language).unwrap_or_default());
        option
    }
}

/// Directed edge from a parent question's option to a child question that
/// only becomes visible when that option was selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalChild {
    pub option_id: OptionId,
    pub child_id: QuestionId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub questionnaire_id: crate::domain::questionnaire::QuestionnaireId,
    pub text: LocalizedText,
    pub kind: QuestionType,
    pub locked: bool,
    pub order: u32,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub conditional_children: Vec<ConditionalChild>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub min_time: Option<TimeOfDay>,
    pub max_time: Option<TimeOfDay>,
    pub color_thresholds: Option<ColorThresholds>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn can_be_edited(&self) -> bool {
        !self.locked && !self.is_deleted()
    }

    fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.locked {
            return Err(DomainError::QuestionLocked { id: self.id.clone() });
        }
        if self.is_deleted() {
            return Err(DomainError::QuestionDeleted { id: self.id.clone() });
        }
        Ok(())
    }

    /// Display label for error messages, independent of caller language.
    pub fn label(&self) -> &str {
        self.text.resolve(Language::Da).unwrap_or("")
    }

    pub fn option_by_id(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.id.0 == option_id)
    }

    /// Copy of this question rendered into one concrete language. The
    /// stored entity is never mutated.
    pub fn localized(&self, language: Language) -> Question {
        let mut question = self.clone();
        question.text = LocalizedText::exact(self.text.resolve(language).unwrap_or_default());
        question.options =
            self.options.iter().map(|option| option.localized(language)).collect();
        question
    }

    /// Idempotent: a second add of the same `(option, child)` pair is a
    /// no-op rather than a duplicate edge.
    pub fn add_conditional_child(
        &mut self,
        option_id: OptionId,
        child_id: QuestionId,
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;
        let exists = self
            .conditional_children
            .iter()
            .any(|edge| edge.option_id == option_id && edge.child_id == child_id);
        if !exists {
            self.conditional_children.push(ConditionalChild { option_id, child_id });
        }
        Ok(())
    }

    /// Removing a non-existent edge is not an error.
    pub fn remove_conditional_child(
        &mut self,
        option_id: &OptionId,
        child_id: &QuestionId,
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.conditional_children
            .retain(|edge| !(edge.option_id == *option_id && edge.child_id == *child_id));
        Ok(())
    }

    /// Reorders the edges for one option, leaving edges for other options
    /// untouched. Unknown child ids become fresh edges, matching how the
    /// admin client submits a full desired ordering.
    pub fn reorder_conditional_children(
        &mut self,
        option_id: &OptionId,
        ordered_child_ids: &[QuestionId],
    ) -> Result<(), DomainError> {
        self.ensure_editable()?;
        let mut reordered: Vec<ConditionalChild> = self
            .conditional_children
            .iter()
            .filter(|edge| edge.option_id != *option_id)
            .cloned()
            .collect();
        for child_id in ordered_child_ids {
            reordered.push(ConditionalChild {
                option_id: option_id.clone(),
                child_id: child_id.clone(),
            });
        }
        self.conditional_children = reordered;
        Ok(())
    }

    /// Applies an admin edit. Conditional children are only replaced when
    /// the update explicitly carries them; `None` keeps the existing edges.
    pub fn update_from(&mut self, update: QuestionUpdate) -> Result<(), DomainError> {
        self.ensure_editable()?;
        if let Some(text) = update.text {
            self.text = text;
        }
        self.kind = update.kind;
        self.order = update.order;
        self.options = update.options;
        self.min_value = update.min_value;
        self.max_value = update.max_value;
        self.min_time = update.min_time;
        self.max_time = update.max_time;
        self.color_thresholds = update.color_thresholds;
        if let Some(children) = update.conditional_children {
            self.conditional_children = children;
        }
        Ok(())
    }

    pub fn soft_delete(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_editable()?;
        self.deleted_at = Some(now);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.questionnaire_id.0.is_empty() {
            return Err(DomainError::InvariantViolation(
                "question must belong to a questionnaire".to_owned(),
            ));
        }
        if self.text.is_empty() {
            return Err(DomainError::InvariantViolation(
                "question text is required in at least one language".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionUpdate {
    pub text: Option<LocalizedText>,
    pub kind: QuestionType,
    pub order: u32,
    pub options: Vec<QuestionOption>,
    pub conditional_children: Option<Vec<ConditionalChild>>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub min_time: Option<TimeOfDay>,
    pub max_time: Option<TimeOfDay>,
    pub color_thresholds: Option<ColorThresholds>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::domain::questionnaire::QuestionnaireId;
    use crate::errors::DomainError;

    use super::{Language, LocalizedText, OptionId, Question, QuestionId, QuestionType};

    fn question() -> Question {
        Question {
            id: QuestionId("q-6".to_owned()),
            questionnaire_id: QuestionnaireId("morning".to_owned()),
            text: LocalizedText::bilingual("Vågnede du i løbet af natten?", "Did you wake up during the night?"),
            kind: QuestionType::SingleChoice,
            locked: false,
            order: 6,
            options: Vec::new(),
            conditional_children: Vec::new(),
            min_value: None,
            max_value: None,
            min_time: None,
            max_time: None,
            color_thresholds: None,
            deleted_at: None,
        }
    }

    #[test]
    fn adding_the_same_edge_twice_keeps_one_edge() {
        let mut question = question();
        let option = OptionId("wake_yes".to_owned());
        let child = QuestionId("q-7".to_owned());

        question.add_conditional_child(option.clone(), child.clone()).expect("first add");
        question.add_conditional_child(option.clone(), child.clone()).expect("second add");

        assert_eq!(question.conditional_children.len(), 1);
    }

    #[test]
    fn removing_a_missing_edge_is_a_no_op() {
        let mut question = question();
        question
            .remove_conditional_child(&OptionId("wake_yes".to_owned()), &QuestionId("q-7".to_owned()))
            .expect("remove on empty edge list");
        assert!(question.conditional_children.is_empty());
    }

    #[test]
    fn reorder_keeps_edges_for_other_options() {
        let mut question = question();
        let yes = OptionId("wake_yes".to_owned());
        let no = OptionId("wake_no".to_owned());
        question.add_conditional_child(yes.clone(), QuestionId("q-7".to_owned())).expect("add");
        question.add_conditional_child(yes.clone(), QuestionId("q-8".to_owned())).expect("add");
        question.add_conditional_child(no.clone(), QuestionId("q-12".to_owned())).expect("add");

        question
            .reorder_conditional_children(
                &yes,
                &[QuestionId("q-8".to_owned()), QuestionId("q-7".to_owned())],
            )
            .expect("reorder");

        let yes_children: Vec<&str> = question
            .conditional_children
            .iter()
            .filter(|edge| edge.option_id == yes)
            .map(|edge| edge.child_id.0.as_str())
            .collect();
        assert_eq!(yes_children, vec!["q-8", "q-7"]);
        assert!(question.conditional_children.iter().any(|edge| edge.option_id == no));
    }

    #[test]
    fn locked_questions_reject_mutation() {
        let mut question = question();
        question.locked = true;

        let error = question
            .add_conditional_child(OptionId("wake_yes".to_owned()), QuestionId("q-7".to_owned()))
            .expect_err("locked question must reject edits");
        assert!(matches!(error, DomainError::QuestionLocked { .. }));
    }

    #[test]
    fn deleted_questions_reject_mutation() {
        let mut question = question();
        question.soft_delete(Utc::now()).expect("delete");

        let error = question.soft_delete(Utc::now()).expect_err("already deleted");
        assert!(matches!(error, DomainError::QuestionDeleted { .. }));
    }

    #[test]
    fn localization_prefers_requested_then_other_then_legacy() {
        let bilingual = LocalizedText::bilingual("da tekst", "en text");
        assert_eq!(bilingual.resolve(Language::En), Some("en text"));
        assert_eq!(bilingual.resolve(Language::Da), Some("da tekst"));

        let danish_only = LocalizedText { da: Some("kun dansk".to_owned()), en: None, legacy: None };
        assert_eq!(danish_only.resolve(Language::En), Some("kun dansk"));

        let legacy_only = LocalizedText::exact("gammel tekst");
        assert_eq!(legacy_only.resolve(Language::En), Some("gammel tekst"));
    }

    #[test]
    fn localization_skips_blank_variants() {
        let blank_requested = LocalizedText {
            da: Some(String::new()),
            en: None,
            legacy: Some("gammel tekst".to_owned()),
        };
        assert_eq!(blank_requested.resolve(Language::Da), Some("gammel tekst"));

        let all_blank =
            LocalizedText { da: Some(String::new()), en: Some(String::new()), legacy: None };
        assert_eq!(all_blank.resolve(Language::Da), None);
        assert!(all_blank.is_empty());
    }

    #[test]
    fn localized_copy_does_not_mutate_the_original() {
        let question = question();
        let rendered = question.localized(Language::En);

        assert_eq!(rendered.text.legacy.as_deref(), Some("Did you wake up during the night?"));
        assert_eq!(question.text.en.as_deref(), Some("Did you wake up during the night?"));
        assert!(question.text.legacy.is_none());
    }
}
