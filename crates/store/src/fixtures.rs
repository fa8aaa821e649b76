//! Seed data for the two questionnaires. The morning set is the fixed
//! sleep-diary sequence the validation and sleep calculation are built
//! around; the evening questionnaire starts empty and is shaped by
//! advisors.

use somna_core::domain::question::{
    ConditionalChild, LocalizedText, OptionId, Question, QuestionId, QuestionOption, QuestionType,
};
use somna_core::domain::questionnaire::{Questionnaire, QuestionnaireKind};

use crate::repositories::{QuestionRepository, QuestionnaireRepository, RepositoryError};

pub struct SeedSummary {
    pub morning: Questionnaire,
    pub evening: Questionnaire,
    pub question_count: usize,
}

impl SeedSummary {
    /// Id of the seeded morning question at `order`. The conditional
    /// child of question 1 has its own id, `morning-q1-type`.
    pub fn question_id(&self, order: u32) -> QuestionId {
        QuestionId(format!("morning-q{order}"))
    }
}

pub async fn seed_default_questionnaires(
    questionnaires: &dyn QuestionnaireRepository,
    questions: &dyn QuestionRepository,
) -> Result<SeedSummary, RepositoryError> {
    let morning = questionnaires.get_or_create_by_kind(QuestionnaireKind::Morning).await?;
    let evening = questionnaires.get_or_create_by_kind(QuestionnaireKind::Evening).await?;

    let seeded = morning_questions(&morning);
    let question_count = seeded.len();
    for question in seeded {
        questions.save(question).await?;
    }
    Ok(SeedSummary { morning, evening, question_count })
}

fn morning_questions(morning: &Questionnaire) -> Vec<Question> {
    let base = |order: u32, kind: QuestionType, text: LocalizedText| Question {
        id: QuestionId(format!("morning-q{order}")),
        questionnaire_id: morning.id.clone(),
        text,
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
    };

    let mut q1 = base(
        1,
        QuestionType::SingleChoice,
        LocalizedText::bilingual(
            "Tog du nogen form for medicin eller kosttilskud for at hjælpe dig med at sove?",
            "Did you take any form of medicine or dietary supplements to help you sleep?",
        ),
    );
    q1.options = vec![
        QuestionOption::new("med_no", LocalizedText::bilingual("Nej", "No")),
        QuestionOption::new("med_yes", LocalizedText::bilingual("Ja", "Yes")),
    ];
    q1.conditional_children = vec![ConditionalChild {
        option_id: OptionId("med_yes".to_owned()),
        child_id: QuestionId("morning-q1-type".to_owned()),
    }];

    // Shares order 1 with its parent; only reachable through `med_yes`.
    let mut q1_type = base(
        1,
        QuestionType::MultiChoice,
        LocalizedText::bilingual(
            "Hvilken type medicin eller kosttilskud?",
            "What type of medicine or dietary supplement?",
        ),
    );
    q1_type.id = QuestionId("morning-q1-type".to_owned());
    q1_type.options = vec![
        QuestionOption::new(
            "med_sleeping_pill",
            LocalizedText::bilingual("Sovemedicin", "Sleeping medication"),
        ),
        QuestionOption::new(
            "med_melatonin",
            LocalizedText::bilingual("Melatonin piller", "Melatonin pills"),
        ),
        QuestionOption::other("med_other", LocalizedText::bilingual("Andet", "Other")),
    ];

    let q2 = base(
        2,
        QuestionType::Text,
        LocalizedText::bilingual(
            "Hvad foretog du dig de sidste par timer inden du gik i seng?",
            "What did you do in the last few hours before going to bed?",
        ),
    );
    let q3 = base(
        3,
        QuestionType::TimePicker,
        LocalizedText::bilingual("I går gik jeg i seng klokken:", "Yesterday I went to bed at:"),
    );
    let q4 = base(
        4,
        QuestionType::TimePicker,
        LocalizedText::bilingual("Jeg slukkede lyset klokken:", "I turned off the light at:"),
    );
    let q5 = base(
        5,
        QuestionType::Numeric,
        LocalizedText::bilingual(
            "Efter jeg slukkede lyset, sov jeg ca. efter (minutter):",
            "After I turned off the light, I fell asleep approximately after (minutes):",
        ),
    );

    let mut q6 = base(
        6,
        QuestionType::SingleChoice,
        LocalizedText::bilingual("Vågnede du i løbet af natten?", "Did you wake up during the night?"),
    );
    q6.options = vec![
        QuestionOption::new("wake_no", LocalizedText::bilingual("Nej", "No")),
        QuestionOption::new("wake_yes", LocalizedText::bilingual("Ja", "Yes")),
    ];
    q6.conditional_children = vec![
        ConditionalChild {
            option_id: OptionId("wake_yes".to_owned()),
            child_id: QuestionId("morning-q7".to_owned()),
        },
        ConditionalChild {
            option_id: OptionId("wake_yes".to_owned()),
            child_id: QuestionId("morning-q8".to_owned()),
        },
    ];

    let q7 = base(
        7,
        QuestionType::Numeric,
        LocalizedText::bilingual("Hvor mange gange?", "How many times?"),
    );
    let q8 = base(
        8,
        QuestionType::Numeric,
        LocalizedText::bilingual("Hvor mange minutter?", "How many minutes?"),
    );
    let q9 = base(
        9,
        QuestionType::TimePicker,
        LocalizedText::bilingual("I morges vågnede jeg klokken?", "This morning I woke up at:"),
    );
    let q10 = base(
        10,
        QuestionType::TimePicker,
        LocalizedText::bilingual("Og jeg stod op klokken?", "And I got out of bed at:"),
    );

    let mut q11 = base(
        11,
        QuestionType::Slider,
        LocalizedText::bilingual(
            "Et par timer efter jeg stod op følte jeg mig? (1–5)",
            "A few hours after I got up, I felt? (1–5)",
        ),
    );
    q11.min_value = Some(1);
    q11.max_value = Some(5);

    vec![q1, q1_type, q2, q3, q4, q5, q6, q7, q8, q9, q10, q11]
}
