//! # form-builder
//!
//! Build dynamic forms interactively. Frontend-agnostic.
//!
//! A session holds an ordered list of questions of seven kinds (text, number,
//! date, select, switch, radio, paragraph). Questions are created and changed
//! through an editor that works on a draft, reordered by adjacent swaps, and
//! rendered as a fillable preview whose answers are captured on validation.
//!
//! ## Usage
//!
//! ```rust
//! use form_builder::{FormBuilder, QuestionKind};
//! use std::time::Instant;
//!
//! let mut session = FormBuilder::new();
//!
//! session.open_new_question();
//! session.editor_mut().set_text("Color favorito");
//! session.editor_mut().set_kind(QuestionKind::Radio);
//! session.editor_mut().add_option("Rojo");
//! session.editor_mut().add_option("Azul");
//! session.submit_editor().unwrap();
//! session.sync(Instant::now());
//!
//! let question = session.questions()[0].clone();
//! session.preview_mut().fill(&question, "Azul");
//! session.validate_preview();
//!
//! assert_eq!(session.controller().responses().get(question.id), Some("Azul"));
//! ```
//!
//! ## Components
//!
//! - [`Controller`] - owns the question list, the edited question and modal flags
//! - [`QuestionEditor`] - draft editing, including the option list
//! - [`FormPreview`] - one input control per question, answer capture
//! - [`ModalShell`] - overlay state with a delayed unmount
//! - [`FormBuilder`] - all of the above wired together
//!
//! ## Frontends
//!
//! Frontends implement [`FormFrontend`]:
//! - `form-builder-ratatui` - interactive terminal UI
//! - [`TestFrontend`] - scripted replay for tests

// Re-export all types from form-builder-types
pub use form_builder_types::*;

mod ids;
pub use ids::IdGenerator;

pub mod locale;

mod preview;
pub use preview::{Control, FormPreview, PreviewAction, PreviewField};

mod controller;
pub use controller::{Controller, SummaryEntry};

mod editor;
pub use editor::{EditorMode, QuestionEditor};

mod modal;
pub use modal::{DEFAULT_GRACE_PERIOD, DeferredUnmount, ModalPhase, ModalShell};

mod session;
pub use session::FormBuilder;

mod frontend;
pub use frontend::FormFrontend;

// Test frontend for driving sessions without user interaction
mod test_frontend;
pub use test_frontend::{Step, TestFrontend, TestFrontendError};
