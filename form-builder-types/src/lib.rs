//! Core types for the form-builder crate.
//!
//! This crate provides the foundational types for building dynamic forms:
//! - `Question`, `QuestionId` and `QuestionKind` - A single form field definition
//! - `Direction` and `swap_adjacent` - Adjacent reordering shared by questions and options
//! - `Responses` - Answers captured from one validation of the form
//! - `FormBuilderError` - The error type shared by the core crate and its frontends

mod direction;
pub use direction::{Direction, swap_adjacent};

mod question;
pub use question::{ParseQuestionKindError, Question, QuestionId, QuestionKind};

mod responses;
pub use responses::{NO_ANSWER, Responses};

mod error;
pub use error::FormBuilderError;
