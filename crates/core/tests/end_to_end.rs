//! Exercises the public API as a library consumer would: build a graph,
//! validate a full morning answer set, resolve the flow, and check the
//! derived sleep metrics.

use chrono::Utc;

use somna_core::{
    AnswerMap, AnswerValue, ConditionalChild, EngineConfig, Language, LocalizedText, NextQuestion,
    OptionId, Question, QuestionGraph, QuestionId, QuestionOption, QuestionType, Questionnaire,
    QuestionnaireId, QuestionnaireKind, ResponseEngine, UserId, ValidationError, ValidationKind,
};

fn question(order: u32, kind: QuestionType) -> Question {
    Question {
        id: QuestionId(format!("q-{order}")),
        questionnaire_id: QuestionnaireId("morning".to_owned()),
        text: LocalizedText::bilingual(format!("da {order}"), format!("en {order}")),
        kind,
        locked: true,
        order,
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

fn morning_graph() -> QuestionGraph {
    let mut woke = question(6, QuestionType::SingleChoice);
    woke.options = vec![
        QuestionOption::new("wake_no", LocalizedText::bilingual("Nej", "No")),
        QuestionOption::new("wake_yes", LocalizedText::bilingual("Ja", "Yes")),
    ];
    woke.conditional_children = vec![
        ConditionalChild {
            option_id: OptionId("wake_yes".to_owned()),
            child_id: QuestionId("q-7".to_owned()),
        },
        ConditionalChild {
            option_id: OptionId("wake_yes".to_owned()),
            child_id: QuestionId("q-8".to_owned()),
        },
    ];
    QuestionGraph::new(vec![
        question(3, QuestionType::TimePicker),
        question(4, QuestionType::TimePicker),
        question(5, QuestionType::Numeric),
        woke,
        question(7, QuestionType::Numeric),
        question(8, QuestionType::Numeric),
        question(9, QuestionType::TimePicker),
        question(10, QuestionType::TimePicker),
    ])
}

fn answers() -> AnswerMap {
    let mut map = AnswerMap::new();
    map.insert(QuestionId("q-3".to_owned()), AnswerValue::from("22:00"));
    map.insert(QuestionId("q-4".to_owned()), AnswerValue::from("22:15"));
    map.insert(QuestionId("q-5".to_owned()), AnswerValue::from("20"));
    map.insert(QuestionId("q-6".to_owned()), AnswerValue::from("wake_yes"));
    map.insert(QuestionId("q-7".to_owned()), AnswerValue::Number(1.0));
    map.insert(QuestionId("q-8".to_owned()), AnswerValue::Number(10.0));
    map.insert(QuestionId("q-9".to_owned()), AnswerValue::from("07:00"));
    map.insert(QuestionId("q-10".to_owned()), AnswerValue::from("07:30"));
    map
}

#[test]
fn a_valid_morning_produces_the_documented_metrics() {
    let engine = ResponseEngine::new(EngineConfig::default());
    let questionnaire = Questionnaire {
        id: QuestionnaireId("morning".to_owned()),
        kind: QuestionnaireKind::Morning,
        name: "Morgenskema".to_owned(),
    };

    let response = engine
        .build_response(
            &morning_graph(),
            &questionnaire,
            UserId("user-1".to_owned()),
            &answers(),
            Utc::now(),
        )
        .expect("valid morning submission");

    let parameters = response.sleep_parameters.expect("morning snapshot");
    assert_eq!(parameters.sol, 35.0);
    assert_eq!(parameters.tib, 570.0);
    assert_eq!(parameters.waso, 10.0);
    assert_eq!(parameters.tst, 505.0);
}

#[test]
fn the_flow_walks_roots_and_ends_in_the_terminal_sentinel() {
    let engine = ResponseEngine::new(EngineConfig::default());
    let graph = morning_graph();
    let map = answers();

    let next = engine
        .next_question(
            &graph,
            Some(QuestionnaireKind::Morning),
            &QuestionId("q-6".to_owned()),
            &map,
            Language::En,
        )
        .expect("valid answers so far");
    let shown = next.question().expect("a root follows q-6");
    assert_eq!(shown.order, 9);
    assert_eq!(shown.text.legacy.as_deref(), Some("en 9"));

    let done = engine
        .next_question(
            &graph,
            Some(QuestionnaireKind::Morning),
            &QuestionId("q-10".to_owned()),
            &map,
            Language::En,
        )
        .expect("valid answers so far");
    assert_eq!(done, NextQuestion::Complete);
}

#[test]
fn structural_errors_surface_before_semantic_ones() {
    let engine = ResponseEngine::new(EngineConfig::default());
    let mut map = answers();
    // Both a malformed time and an inconsistent ordering are present; the
    // shape problem wins.
    map.insert(QuestionId("q-9".to_owned()), AnswerValue::from("late"));
    map.insert(QuestionId("q-4".to_owned()), AnswerValue::from("21:00"));

    let error = engine
        .validate(&morning_graph(), QuestionnaireKind::Morning, &map)
        .expect_err("malformed time");
    assert!(matches!(error, ValidationError::InvalidTime { .. }));
    assert_eq!(error.kind(), ValidationKind::Structural);
}
