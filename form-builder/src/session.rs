//! The composed application: controller, editor, preview and both modals.

use std::time::{Duration, Instant};

use crate::{
    Controller, Direction, FormBuilderError, FormPreview, IdGenerator, ModalShell, Question,
    QuestionEditor, locale,
};

/// A complete form-building session.
///
/// Frontends read state through the accessors and feed user actions through
/// the operations; `sync` must run once per frame (or after each batch of
/// operations) to propagate modal flags and preview controls.
#[derive(Debug, Clone)]
pub struct FormBuilder {
    controller: Controller,
    editor: QuestionEditor,
    preview: FormPreview,
    editor_modal: ModalShell,
    response_modal: ModalShell,
    ids: IdGenerator,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormBuilder {
    /// An empty session with the default modal grace period.
    pub fn new() -> Self {
        let mut ids = IdGenerator::new();
        let editor = QuestionEditor::new(&mut ids);
        Self {
            controller: Controller::new(),
            editor,
            preview: FormPreview::new(),
            editor_modal: ModalShell::new(locale::ADD_QUESTION_TITLE),
            response_modal: ModalShell::new(locale::RESPONSES_TITLE),
            ids,
        }
    }

    /// Start from existing questions.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let mut session = Self::new();
        for question in &questions {
            session.ids.observe(question.id);
        }
        session.preview.sync(&questions);
        session.controller = Controller::with_questions(questions);
        session
    }

    /// Set how long closed modals stay rendered (builder style).
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.editor_modal = self.editor_modal.with_grace_period(grace);
        self.response_modal = self.response_modal.with_grace_period(grace);
        self
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn questions(&self) -> &[Question] {
        self.controller.questions()
    }

    pub fn editor(&self) -> &QuestionEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut QuestionEditor {
        &mut self.editor
    }

    pub fn preview(&self) -> &FormPreview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut FormPreview {
        &mut self.preview
    }

    pub fn editor_modal(&self) -> &ModalShell {
        &self.editor_modal
    }

    pub fn response_modal(&self) -> &ModalShell {
        &self.response_modal
    }

    /// The "add new question" button.
    pub fn open_new_question(&mut self) {
        self.controller.open_new_question_modal();
        self.editor.load(None, &mut self.ids);
    }

    /// The edit affordance of the question at `index`.
    pub fn start_editing(&mut self, index: usize) {
        if let Some(action) = self.preview.edit(self.controller.questions(), index) {
            self.controller.apply(action);
            self.editor
                .load(self.controller.editing_question(), &mut self.ids);
        }
    }

    /// Submit the editor. Blank text leaves everything as it was.
    pub fn submit_editor(&mut self) -> Result<(), FormBuilderError> {
        let controller = &mut self.controller;
        self.editor
            .submit(|question| controller.add_or_update_question(question))?;
        self.preview.sync(self.controller.questions());
        Ok(())
    }

    /// Cancel the editor; the draft is dropped.
    pub fn cancel_editor(&mut self) {
        let controller = &mut self.controller;
        self.editor.cancel(|| controller.close_modal());
    }

    /// Close whichever modal is on top, as its close affordance would.
    ///
    /// Follows the controller flags, so it works before the shells are synced.
    pub fn close_top_modal(&mut self) {
        if self.controller.is_response_modal_open() {
            self.controller.close_response_modal();
        } else if self.controller.is_modal_open() {
            self.controller.close_modal();
        }
    }

    /// The move affordance of the question at `index`.
    pub fn move_question(&mut self, index: usize, direction: Direction) {
        let action = self.preview.move_question(index, direction);
        self.controller.apply(action);
        self.preview.sync(self.controller.questions());
    }

    /// The validate affordance: capture answers and open the response modal.
    pub fn validate_preview(&mut self) {
        let action = self.preview.validate(self.controller.questions());
        self.controller.apply(action);
    }

    /// Hide the responses.
    pub fn close_responses(&mut self) {
        self.controller.close_response_modal();
    }

    /// Propagate controller state into the modals and the preview, and let
    /// pending modal timers fire.
    pub fn sync(&mut self, now: Instant) {
        self.editor_modal.set_title(self.controller.editor_title());
        self.editor_modal
            .set_open(self.controller.is_modal_open(), now);
        self.editor_modal.tick(now);
        self.response_modal
            .set_open(self.controller.is_response_modal_open(), now);
        self.response_modal.tick(now);
        self.preview.sync(self.controller.questions());
    }
}
