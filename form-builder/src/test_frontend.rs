//! Test frontend for driving sessions without user interaction.
//!
//! `TestFrontend` replays a script of steps against a session, going through
//! the same editor, preview and controller operations a user would trigger.
//!
//! # Example
//!
//! ```rust
//! use form_builder::{FormBuilder, QuestionKind, TestFrontend};
//!
//! let mut session = FormBuilder::new();
//! session
//!     .run(
//!         TestFrontend::new()
//!             .add_question("Name", QuestionKind::Text)
//!             .add_question("Age", QuestionKind::Number)
//!             .fill("Name", "Ann")
//!             .fill("Age", "30")
//!             .validate(),
//!     )
//!     .unwrap();
//!
//! let summary = session.controller().response_summary();
//! assert_eq!(summary[0].answer, "Ann");
//! assert_eq!(summary[1].answer, "30");
//! ```

use std::time::{Duration, Instant};

use crate::{Direction, FormBuilder, FormBuilderError, FormFrontend, QuestionKind};

/// One scripted user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Open the editor for a new question, fill it in and submit.
    AddQuestion {
        text: String,
        kind: QuestionKind,
        options: Vec<String>,
        required: bool,
    },
    /// Open the editor on the question labelled `label`, apply the changes and submit.
    EditQuestion {
        label: String,
        text: Option<String>,
        kind: Option<QuestionKind>,
        add_options: Vec<String>,
        required: Option<bool>,
    },
    /// Move the question labelled `label` one step.
    MoveQuestion { label: String, direction: Direction },
    /// Enter a value into the control of the question labelled `label`.
    Fill { label: String, value: String },
    /// Press the validate button.
    Validate,
    /// Close the response modal.
    CloseResponses,
    /// Let time pass (modal timers).
    Wait(Duration),
}

/// A frontend that replays pre-configured steps.
#[derive(Debug, Clone, Default)]
pub struct TestFrontend {
    steps: Vec<Step>,
}

/// Error type for TestFrontend.
#[derive(Debug, thiserror::Error)]
pub enum TestFrontendError {
    #[error("No question labelled '{0}'")]
    UnknownQuestion(String),

    #[error("Value '{value}' rejected by the control of '{label}'")]
    RejectedValue { label: String, value: String },

    #[error("Editor rejected step {step}: {source}")]
    Editor {
        step: usize,
        #[source]
        source: FormBuilderError,
    },
}

impl TestFrontend {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a raw step.
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Add a question without options.
    pub fn add_question(self, text: impl Into<String>, kind: QuestionKind) -> Self {
        self.with_step(Step::AddQuestion {
            text: text.into(),
            kind,
            options: Vec::new(),
            required: false,
        })
    }

    /// Add a required question without options.
    pub fn add_required_question(self, text: impl Into<String>, kind: QuestionKind) -> Self {
        self.with_step(Step::AddQuestion {
            text: text.into(),
            kind,
            options: Vec::new(),
            required: true,
        })
    }

    /// Add a question with options (typed into the option buffer one by one).
    pub fn add_choice_question<I, S>(
        self,
        text: impl Into<String>,
        kind: QuestionKind,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_step(Step::AddQuestion {
            text: text.into(),
            kind,
            options: options.into_iter().map(Into::into).collect(),
            required: false,
        })
    }

    /// Rename the question labelled `label`.
    pub fn rename(self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_step(Step::EditQuestion {
            label: label.into(),
            text: Some(text.into()),
            kind: None,
            add_options: Vec::new(),
            required: None,
        })
    }

    /// Move the question labelled `label`.
    pub fn move_question(self, label: impl Into<String>, direction: Direction) -> Self {
        self.with_step(Step::MoveQuestion {
            label: label.into(),
            direction,
        })
    }

    /// Fill the control of the question labelled `label`.
    pub fn fill(self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_step(Step::Fill {
            label: label.into(),
            value: value.into(),
        })
    }

    /// Press the validate button.
    pub fn validate(self) -> Self {
        self.with_step(Step::Validate)
    }

    /// Close the response modal.
    pub fn close_responses(self) -> Self {
        self.with_step(Step::CloseResponses)
    }

    /// Let `duration` pass.
    pub fn wait(self, duration: Duration) -> Self {
        self.with_step(Step::Wait(duration))
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl FormFrontend for TestFrontend {
    type Error = TestFrontendError;

    fn run(&self, session: &mut FormBuilder) -> Result<(), Self::Error> {
        let mut now = Instant::now();
        session.sync(now);

        for (idx, step) in self.steps.iter().enumerate() {
            match step {
                Step::AddQuestion {
                    text,
                    kind,
                    options,
                    required,
                } => {
                    session.open_new_question();
                    let editor = session.editor_mut();
                    editor.set_text(text.as_str());
                    editor.set_kind(*kind);
                    editor.set_required(*required);
                    for option in options {
                        editor.set_new_option(option.as_str());
                        editor.commit_new_option();
                    }
                    submit(session, idx)?;
                }
                Step::EditQuestion {
                    label,
                    text,
                    kind,
                    add_options,
                    required,
                } => {
                    let index = position_of(session, label)?;
                    session.start_editing(index);
                    let editor = session.editor_mut();
                    if let Some(text) = text {
                        editor.set_text(text.as_str());
                    }
                    if let Some(kind) = kind {
                        editor.set_kind(*kind);
                    }
                    for option in add_options {
                        editor.add_option(option);
                    }
                    if let Some(required) = required {
                        editor.set_required(*required);
                    }
                    submit(session, idx)?;
                }
                Step::MoveQuestion { label, direction } => {
                    let index = position_of(session, label)?;
                    session.move_question(index, *direction);
                }
                Step::Fill { label, value } => {
                    let index = position_of(session, label)?;
                    let question = session.questions()[index].clone();
                    if !session.preview_mut().fill(&question, value) {
                        return Err(TestFrontendError::RejectedValue {
                            label: label.clone(),
                            value: value.clone(),
                        });
                    }
                }
                Step::Validate => session.validate_preview(),
                Step::CloseResponses => session.close_responses(),
                Step::Wait(duration) => now += *duration,
            }
            session.sync(now);
        }

        Ok(())
    }
}

fn submit(session: &mut FormBuilder, step: usize) -> Result<(), TestFrontendError> {
    session.submit_editor().map_err(|source| {
        session.cancel_editor();
        TestFrontendError::Editor { step, source }
    })
}

fn position_of(session: &FormBuilder, label: &str) -> Result<usize, TestFrontendError> {
    session
        .questions()
        .iter()
        .position(|question| question.text == label)
        .ok_or_else(|| TestFrontendError::UnknownQuestion(label.to_string()))
}
