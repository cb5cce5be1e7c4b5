/// Error type for form-builder operations.
#[derive(Debug, thiserror::Error)]
pub enum FormBuilderError {
    /// The question text is empty after trimming; the editor refuses to submit.
    #[error("Question text must not be empty")]
    EmptyQuestionText,

    /// Frontend-specific failure (I/O, terminal setup, scripted step failure, etc.)
    #[error("Frontend error: {0}")]
    Frontend(#[from] anyhow::Error),
}

impl FormBuilderError {
    /// Create a frontend error from any error type.
    pub fn frontend(err: impl Into<anyhow::Error>) -> Self {
        Self::Frontend(err.into())
    }

    /// Check if this error is the blocked-submission case.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::EmptyQuestionText)
    }
}
