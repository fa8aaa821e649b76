use crate::answers::AnswerValue;
use crate::config::EngineConfig;
use crate::domain::question::{Question, QuestionType};
use crate::validation::ValidationError;

/// One validator per question type, dispatched by `match` on the type
/// tag. Nothing here coerces invalid input to a default.
pub fn validate_answer(
    question: &Question,
    answer: &AnswerValue,
    config: &EngineConfig,
) -> Result<(), ValidationError> {
    match question.kind {
        QuestionType::Text => validate_text(question, answer, config),
        QuestionType::Numeric | QuestionType::Slider => validate_numeric(question, answer),
        QuestionType::TimePicker => validate_time(question, answer),
        QuestionType::SingleChoice => validate_single_choice(question, answer),
        QuestionType::MultiChoice => validate_multi_choice(question, answer),
    }
}

fn validate_text(
    question: &Question,
    answer: &AnswerValue,
    config: &EngineConfig,
) -> Result<(), ValidationError> {
    let text = match answer {
        AnswerValue::Text(raw) => raw.clone(),
        AnswerValue::Number(value) => value.to_string(),
        _ => String::new(),
    };

    if question.order == config.free_text_order {
        let length = text.chars().count();
        if length > config.max_text_length {
            return Err(ValidationError::TextTooLong {
                question: question.label().to_owned(),
                limit: config.max_text_length,
                length,
            });
        }
    }

    if text.trim().is_empty() {
        return Err(ValidationError::TextBlank { question: question.label().to_owned() });
    }
    Ok(())
}

fn validate_numeric(question: &Question, answer: &AnswerValue) -> Result<(), ValidationError> {
    let value = answer.number().ok_or_else(|| ValidationError::InvalidNumber {
        question: question.label().to_owned(),
    })?;

    if let Some(min) = question.min_value {
        if value < min as f64 {
            return Err(ValidationError::BelowMinimum {
                question: question.label().to_owned(),
                min,
                value,
            });
        }
    }
    if let Some(max) = question.max_value {
        if value > max as f64 {
            return Err(ValidationError::AboveMaximum {
                question: question.label().to_owned(),
                max,
                value,
            });
        }
    }
    // No declared minimum still means no negatives.
    if question.min_value.is_none() && value < 0.0 {
        return Err(ValidationError::NegativeValue {
            question: question.label().to_owned(),
            value,
        });
    }
    Ok(())
}

fn validate_time(question: &Question, answer: &AnswerValue) -> Result<(), ValidationError> {
    let time = answer.time().ok_or_else(|| ValidationError::InvalidTime {
        question: question.label().to_owned(),
    })?;

    if let Some(min) = question.min_time {
        if time < min {
            return Err(ValidationError::TimeBeforeMinimum {
                question: question.label().to_owned(),
                min,
                value: time,
            });
        }
    }
    if let Some(max) = question.max_time {
        if time > max {
            return Err(ValidationError::TimeAfterMaximum {
                question: question.label().to_owned(),
                max,
                value: time,
            });
        }
    }
    Ok(())
}

fn validate_single_choice(
    question: &Question,
    answer: &AnswerValue,
) -> Result<(), ValidationError> {
    if question.options.is_empty() {
        return Err(ValidationError::NoOptions { question: question.label().to_owned() });
    }
    validate_selection(question, answer)
}

fn validate_multi_choice(question: &Question, answer: &AnswerValue) -> Result<(), ValidationError> {
    if question.options.is_empty() {
        return Err(ValidationError::NoOptions { question: question.label().to_owned() });
    }
    let items = answer.items().ok_or_else(|| ValidationError::NotASelectionList {
        question: question.label().to_owned(),
    })?;
    if items.is_empty() {
        return Err(ValidationError::EmptySelection { question: question.label().to_owned() });
    }
    for item in items {
        validate_selection(question, item)?;
    }
    Ok(())
}

/// One selected value: must resolve to a declared option, and an
/// "is-other" option demands a non-blank custom text companion.
fn validate_selection(question: &Question, answer: &AnswerValue) -> Result<(), ValidationError> {
    let option_id = answer
        .option_id()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ValidationError::UnknownOption { question: question.label().to_owned() })?;

    let option = question.option_by_id(option_id).ok_or_else(|| ValidationError::UnknownOption {
        question: question.label().to_owned(),
    })?;

    if option.is_other {
        let has_text =
            answer.custom_text().is_some_and(|text| !text.trim().is_empty());
        if !has_text {
            return Err(ValidationError::OtherTextMissing {
                question: question.label().to_owned(),
            });
        }
    }
    Ok(())
}
