//! Integration tests for form-builder

use std::time::Duration;

use form_builder::{
    Direction, FormBuilder, FormBuilderError, NO_ANSWER, Question, QuestionKind, Responses,
    TestFrontend, TestFrontendError, locale,
};

fn texts(session: &FormBuilder) -> Vec<&str> {
    session
        .questions()
        .iter()
        .map(|q| q.text.as_str())
        .collect()
}

#[test]
fn test_adding_questions_keeps_insertion_order() {
    let mut session = FormBuilder::new();
    session
        .run(
            TestFrontend::new()
                .add_question("Nombre", QuestionKind::Text)
                .add_question("Edad", QuestionKind::Number)
                .add_question("Nacimiento", QuestionKind::Date)
                .add_question("Comentarios", QuestionKind::Paragraph),
        )
        .unwrap();

    assert_eq!(
        texts(&session),
        ["Nombre", "Edad", "Nacimiento", "Comentarios"]
    );
    assert!(!session.controller().is_modal_open());
}

#[test]
fn test_editing_replaces_only_that_question() {
    let mut session = FormBuilder::new();
    session
        .run(
            TestFrontend::new()
                .add_question("a", QuestionKind::Text)
                .add_question("b", QuestionKind::Text)
                .add_question("c", QuestionKind::Text),
        )
        .unwrap();
    let before: Vec<Question> = session.questions().to_vec();

    session.run(TestFrontend::new().rename("b", "B")).unwrap();

    let after = session.questions();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1].id, before[1].id);
    assert_eq!(after[1].text, "B");
}

#[test]
fn test_blank_question_is_rejected() {
    let mut session = FormBuilder::new();
    let err = session
        .run(
            TestFrontend::new()
                .add_question("Nombre", QuestionKind::Text)
                .add_question("   ", QuestionKind::Text),
        )
        .unwrap_err();

    let FormBuilderError::Frontend(err) = err else {
        panic!("expected frontend error");
    };
    let err = err.downcast::<TestFrontendError>().unwrap();
    assert!(matches!(
        err,
        TestFrontendError::Editor {
            step: 1,
            source: FormBuilderError::EmptyQuestionText
        }
    ));
    assert_eq!(texts(&session), ["Nombre"]);
    assert!(!session.controller().is_modal_open());
}

#[test]
fn test_moves_at_bounds_are_noops() {
    let mut session = FormBuilder::new();
    session
        .run(
            TestFrontend::new()
                .add_question("a", QuestionKind::Text)
                .add_question("b", QuestionKind::Text)
                .add_question("c", QuestionKind::Text)
                .move_question("a", Direction::Up)
                .move_question("c", Direction::Down),
        )
        .unwrap();
    assert_eq!(texts(&session), ["a", "b", "c"]);

    session
        .run(TestFrontend::new().move_question("c", Direction::Up))
        .unwrap();
    assert_eq!(texts(&session), ["a", "c", "b"]);

    session
        .run(TestFrontend::new().move_question("c", Direction::Down))
        .unwrap();
    assert_eq!(texts(&session), ["a", "b", "c"]);
}

#[test]
fn test_validation_keys_answers_by_id() {
    let mut session = FormBuilder::with_questions(vec![
        Question::new(1, "Name", QuestionKind::Text),
        Question::new(2, "Age", QuestionKind::Number),
    ]);
    session
        .run(
            TestFrontend::new()
                .fill("Name", "Ann")
                .fill("Age", "30")
                .validate(),
        )
        .unwrap();

    let expected: Responses = [("1", "Ann"), ("2", "30")].into_iter().collect();
    assert_eq!(session.controller().responses(), &expected);
    assert!(session.controller().is_response_modal_open());
    assert!(session.response_modal().is_open());
    assert_eq!(session.response_modal().title(), locale::RESPONSES_TITLE);
}

#[test]
fn test_summary_uses_placeholder() {
    let mut session = FormBuilder::new();
    session
        .run(
            TestFrontend::new()
                .add_question("Nombre", QuestionKind::Text)
                .add_choice_question("Color", QuestionKind::Select, ["Rojo", "Azul"])
                .add_question("Noticias", QuestionKind::Switch)
                .fill("Nombre", "Ana")
                .validate(),
        )
        .unwrap();

    let summary = session.controller().response_summary();
    let lines: Vec<_> = summary.iter().map(|e| (e.text, e.answer)).collect();
    assert_eq!(
        lines,
        [("Nombre", "Ana"), ("Color", NO_ANSWER), ("Noticias", "false")]
    );
}

#[test]
fn test_choice_questions_round_through_preview() {
    let mut session = FormBuilder::new();
    session
        .run(
            TestFrontend::new()
                .add_choice_question("Talla", QuestionKind::Radio, ["S", " M ", "  ", "L"])
                .fill("Talla", "M")
                .validate(),
        )
        .unwrap();

    let question = &session.questions()[0];
    assert_eq!(question.options, ["S", "M", "L"]);
    assert_eq!(session.controller().responses().get(question.id), Some("M"));
}

#[test]
fn test_rejected_fill_value() {
    let mut session = FormBuilder::new();
    let err = session
        .run(
            TestFrontend::new()
                .add_choice_question("Talla", QuestionKind::Select, ["S"])
                .fill("Talla", "XL"),
        )
        .unwrap_err();
    assert!(err.to_string().contains("XL"));
}

#[test]
fn test_unknown_label() {
    let mut session = FormBuilder::new();
    let err = session
        .run(TestFrontend::new().fill("Nada", "x"))
        .unwrap_err();
    assert!(err.to_string().contains("Nada"));
}

#[test]
fn test_second_validation_replaces_responses() {
    let mut session = FormBuilder::new();
    session
        .run(
            TestFrontend::new()
                .add_question("a", QuestionKind::Text)
                .add_question("b", QuestionKind::Text)
                .fill("a", "1")
                .fill("b", "2")
                .validate()
                .close_responses()
                .fill("b", "")
                .validate(),
        )
        .unwrap();

    let b = session.questions()[1].id;
    assert_eq!(session.controller().responses().answer_or_placeholder(b), NO_ANSWER);
    assert_eq!(session.controller().responses().len(), 2);
}

#[test]
fn test_response_modal_stays_rendered_when_reopened_quickly() {
    let mut session = FormBuilder::new();
    session
        .run(
            TestFrontend::new()
                .add_question("a", QuestionKind::Text)
                .validate()
                .close_responses()
                .wait(Duration::from_millis(100))
                .validate()
                .wait(Duration::from_millis(500)),
        )
        .unwrap();
    assert!(session.response_modal().is_rendered());
    assert!(session.response_modal().is_open());

    session
        .run(
            TestFrontend::new()
                .close_responses()
                .wait(Duration::from_millis(300)),
        )
        .unwrap();
    assert!(!session.response_modal().is_rendered());
}

#[test]
fn test_stale_options_survive_kind_switch() {
    let mut session = FormBuilder::new();
    session
        .run(
            TestFrontend::new()
                .add_choice_question("Color", QuestionKind::Select, ["Rojo"])
                .with_step(form_builder::Step::EditQuestion {
                    label: "Color".into(),
                    text: None,
                    kind: Some(QuestionKind::Text),
                    add_options: Vec::new(),
                    required: Some(true),
                }),
        )
        .unwrap();

    let question = &session.questions()[0];
    assert_eq!(question.kind, QuestionKind::Text);
    assert_eq!(question.options, ["Rojo"]);
    assert!(question.visible_options().is_empty());
    assert!(question.required);
}
