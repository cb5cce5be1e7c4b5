use crate::{FormBuilder, FormBuilderError};

/// Trait for frontends that let a user drive a form-building session.
///
/// Frontends decide how to present the session (terminal UI, scripted
/// replay, etc.) and return once the user is done.
pub trait FormFrontend {
    /// The error type for this frontend.
    type Error: Into<anyhow::Error>;

    /// Drive `session` until the user quits.
    fn run(&self, session: &mut FormBuilder) -> Result<(), Self::Error>;
}

impl FormBuilder {
    /// Hand this session to `frontend` until it returns.
    pub fn run<F: FormFrontend>(&mut self, frontend: F) -> Result<(), FormBuilderError> {
        tracing::info!(questions = self.questions().len(), "session started");
        let result = frontend.run(self).map_err(FormBuilderError::frontend);
        tracing::info!(questions = self.questions().len(), "session finished");
        result
    }
}
