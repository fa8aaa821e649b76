//! End-to-end walk of the seeded morning questionnaire: flow resolution
//! question by question, submission with the sleep snapshot, and the
//! one-per-day rule.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use somna_core::answers::{AnswerMap, AnswerValue};
use somna_core::config::EngineConfig;
use somna_core::domain::question::Language;
use somna_core::domain::response::UserId;
use somna_core::engine::ResponseEngine;
use somna_core::flow::NextQuestion;

use somna_store::fixtures::{seed_default_questionnaires, SeedSummary};
use somna_store::repositories::{
    InMemoryQuestionRepository, InMemoryQuestionnaireRepository, InMemoryResponseRepository,
};
use somna_store::service::{ResponseService, ServiceError};

async fn seeded_service() -> (ResponseService, SeedSummary) {
    let questions = Arc::new(InMemoryQuestionRepository::default());
    let questionnaires = Arc::new(InMemoryQuestionnaireRepository::default());
    let responses = Arc::new(InMemoryResponseRepository::default());
    let seed = seed_default_questionnaires(questionnaires.as_ref(), questions.as_ref())
        .await
        .expect("seed");
    let service = ResponseService::new(
        ResponseEngine::new(EngineConfig::default()),
        questions,
        questionnaires,
        responses,
    );
    (service, seed)
}

fn at(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("timestamp")
}

#[tokio::test]
async fn a_full_morning_walk_ends_in_a_stored_response() {
    let (service, seed) = seeded_service().await;

    // Answers accumulate in presentation order; "slept through" hides the
    // wake-count/wake-minutes pair.
    let sequence: Vec<(u32, AnswerValue)> = vec![
        (1, AnswerValue::from("med_no")),
        (2, AnswerValue::from("Så fjernsyn og læste lidt")),
        (3, AnswerValue::from("22:30")),
        (4, AnswerValue::from("23:00")),
        (5, AnswerValue::from("15")),
        (6, AnswerValue::from("wake_no")),
        (9, AnswerValue::from("06:45")),
        (10, AnswerValue::from("07:00")),
        (11, AnswerValue::Number(3.0)),
    ];

    let mut answers = AnswerMap::new();
    let mut visited = Vec::new();
    for (order, value) in &sequence {
        answers.insert(seed.question_id(*order), value.clone());
        let next = service
            .next_question("morning", &seed.question_id(*order), &answers, Language::Da)
            .await
            .expect("flow step");
        match next {
            NextQuestion::Show(question) => visited.push(question.order),
            NextQuestion::Complete => visited.push(0),
        }
    }
    // After 6 ("wake_no") the flow jumps straight to 9; after 11 it ends.
    assert_eq!(visited, vec![2, 3, 4, 5, 6, 9, 10, 11, 0]);

    let response = service
        .submit(UserId("user-1".to_owned()), "morning", &answers, at("2026-03-02T06:10:00Z"))
        .await
        .expect("submit");

    let parameters = response.sleep_parameters.expect("morning snapshot");
    // In bed 22:30-07:00; asleep 23:15-06:45; slept through.
    assert_eq!(parameters.tib, 510.0);
    assert_eq!(parameters.sol, 45.0);
    assert_eq!(parameters.waso, 0.0);
    assert_eq!(parameters.tst, 450.0);

    // The hidden pair was auto-filled, not left dangling.
    assert_eq!(response.answers.get(&seed.question_id(8)), Some(&AnswerValue::Number(0.0)));
}

#[tokio::test]
async fn the_same_day_only_accepts_one_submission_per_kind() {
    let (service, seed) = seeded_service().await;
    let mut answers = AnswerMap::new();
    answers.insert(seed.question_id(3), AnswerValue::from("22:00"));
    answers.insert(seed.question_id(10), AnswerValue::from("07:00"));

    service
        .submit(UserId("user-1".to_owned()), "morning", &answers, at("2026-03-02T07:00:00Z"))
        .await
        .expect("first submission");

    let duplicate = service
        .submit(UserId("user-1".to_owned()), "morning", &answers, at("2026-03-02T22:30:00Z"))
        .await
        .expect_err("same local day");
    assert!(matches!(duplicate, ServiceError::AlreadySubmitted));

    // A different user and the evening questionnaire are unaffected.
    service
        .submit(UserId("user-2".to_owned()), "morning", &answers, at("2026-03-02T08:00:00Z"))
        .await
        .expect("other user");
    let mut evening_answers = AnswerMap::new();
    evening_answers.insert(seed.question_id(2), AnswerValue::from("ok"));
    service
        .submit(UserId("user-1".to_owned()), "evening", &evening_answers, at("2026-03-02T21:00:00Z"))
        .await
        .expect("other kind");
}
