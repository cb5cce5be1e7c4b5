//! Draft editing for one question, including its option list.

use crate::{
    Direction, FormBuilderError, IdGenerator, Question, QuestionKind, locale, swap_adjacent,
};

/// Whether the editor creates a new question or changes an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit,
}

/// Holds an uncommitted question and the "new option" input buffer.
#[derive(Debug, Clone)]
pub struct QuestionEditor {
    draft: Question,
    new_option: String,
    mode: EditorMode,
}

impl QuestionEditor {
    /// An editor with a blank draft.
    pub fn new(ids: &mut IdGenerator) -> Self {
        Self {
            draft: Question::blank(ids.next_id()),
            new_option: String::new(),
            mode: EditorMode::Add,
        }
    }

    /// Seed the draft from `editing`, or reset it to a blank question with a
    /// fresh id when there is nothing to edit.
    pub fn load(&mut self, editing: Option<&Question>, ids: &mut IdGenerator) {
        match editing {
            Some(question) => {
                self.draft = question.clone();
                self.mode = EditorMode::Edit;
            }
            None => {
                self.draft = Question::blank(ids.next_id());
                self.mode = EditorMode::Add;
            }
        }
        self.new_option.clear();
        tracing::debug!(id = %self.draft.id, mode = ?self.mode, "editor loaded");
    }

    pub fn draft(&self) -> &Question {
        &self.draft
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn new_option(&self) -> &str {
        &self.new_option
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    /// Mutable access to the label, for character-wise editing.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.draft.text
    }

    /// Change the kind. Options are kept, even for non-choice kinds.
    pub fn set_kind(&mut self, kind: QuestionKind) {
        self.draft.kind = kind;
    }

    /// Step to the previous/next kind of [`QuestionKind::ALL`], wrapping around.
    pub fn cycle_kind(&mut self, direction: Direction) {
        let len = QuestionKind::ALL.len();
        let pos = self.draft.kind.position();
        let next = match direction {
            Direction::Up => (pos + len - 1) % len,
            Direction::Down => (pos + 1) % len,
        };
        self.set_kind(QuestionKind::ALL[next]);
    }

    pub fn set_required(&mut self, required: bool) {
        self.draft.required = required;
    }

    pub fn set_new_option(&mut self, value: impl Into<String>) {
        self.new_option = value.into();
    }

    /// Mutable access to the option buffer, for character-wise editing.
    pub fn new_option_mut(&mut self) -> &mut String {
        &mut self.new_option
    }

    /// Whether the option list is shown (choice kinds only).
    pub fn shows_options(&self) -> bool {
        self.draft.kind.is_choice()
    }

    /// Append `value` trimmed, unless it is blank. Duplicates are allowed.
    pub fn add_option(&mut self, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.draft.options.push(trimmed.to_string());
        true
    }

    /// Add the buffer content as an option; the buffer is cleared once added.
    pub fn commit_new_option(&mut self) -> bool {
        let value = std::mem::take(&mut self.new_option);
        if self.add_option(&value) {
            true
        } else {
            self.new_option = value;
            false
        }
    }

    /// Delete the option at `index`; later options shift down.
    pub fn remove_option(&mut self, index: usize) {
        if index < self.draft.options.len() {
            self.draft.options.remove(index);
        }
    }

    /// Swap the option at `index` with its neighbor in `direction`.
    pub fn move_option(&mut self, index: usize, direction: Direction) {
        swap_adjacent(&mut self.draft.options, index, direction);
    }

    /// Whether the option at `index` can move in `direction`.
    pub fn can_move_option(&self, index: usize, direction: Direction) -> bool {
        direction.neighbor(index, self.draft.options.len()).is_some()
    }

    /// Hand the draft to `on_submit`, unless its text is blank.
    pub fn submit(&self, on_submit: impl FnOnce(Question)) -> Result<(), FormBuilderError> {
        if !self.draft.has_text() {
            tracing::warn!(id = %self.draft.id, "submission blocked: empty question text");
            return Err(FormBuilderError::EmptyQuestionText);
        }
        on_submit(self.draft.clone());
        Ok(())
    }

    /// Leave without submitting.
    pub fn cancel(&self, on_cancel: impl FnOnce()) {
        on_cancel();
    }

    /// Label of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Add => locale::SUBMIT_NEW,
            EditorMode::Edit => locale::SUBMIT_EDIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> QuestionEditor {
        QuestionEditor::new(&mut IdGenerator::new())
    }

    #[test]
    fn blank_draft_defaults() {
        let editor = editor();
        assert!(editor.draft().text.is_empty());
        assert_eq!(editor.draft().kind, QuestionKind::Text);
        assert!(editor.draft().options.is_empty());
        assert!(!editor.draft().required);
        assert_eq!(editor.mode(), EditorMode::Add);
    }

    #[test]
    fn blank_text_never_submits() {
        let mut editor = editor();
        for text in ["", "   ", "\t\n"] {
            editor.set_text(text);
            let mut called = false;
            let result = editor.submit(|_| called = true);
            assert!(matches!(result, Err(FormBuilderError::EmptyQuestionText)));
            assert!(!called);
        }
    }

    #[test]
    fn submit_hands_over_full_draft() {
        let mut editor = editor();
        editor.set_text("Color");
        editor.set_kind(QuestionKind::Radio);
        editor.add_option("Red");
        editor.set_required(true);

        let mut submitted = None;
        editor.submit(|q| submitted = Some(q)).unwrap();
        let submitted = submitted.unwrap();
        assert_eq!(submitted.text, "Color");
        assert_eq!(submitted.kind, QuestionKind::Radio);
        assert_eq!(submitted.options, ["Red"]);
        assert!(submitted.required);
        assert_eq!(submitted.id, editor.draft().id);
    }

    #[test]
    fn options_add_remove() {
        let mut editor = editor();
        assert!(!editor.add_option("   "));
        assert!(editor.draft().options.is_empty());

        editor.add_option("Red");
        editor.add_option(" Blue ");
        assert_eq!(editor.draft().options, ["Red", "Blue"]);

        editor.remove_option(0);
        assert_eq!(editor.draft().options, ["Blue"]);
        editor.remove_option(5);
        assert_eq!(editor.draft().options, ["Blue"]);
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut editor = editor();
        editor.add_option("Red");
        editor.add_option("Red");
        assert_eq!(editor.draft().options, ["Red", "Red"]);
    }

    #[test]
    fn commit_clears_buffer_only_on_success() {
        let mut editor = editor();
        editor.set_new_option("  ");
        assert!(!editor.commit_new_option());
        assert_eq!(editor.new_option(), "  ");

        editor.set_new_option(" Green");
        assert!(editor.commit_new_option());
        assert_eq!(editor.new_option(), "");
        assert_eq!(editor.draft().options, ["Green"]);
    }

    #[test]
    fn options_move_within_bounds() {
        let mut editor = editor();
        for option in ["a", "b", "c"] {
            editor.add_option(option);
        }
        editor.move_option(0, Direction::Up);
        editor.move_option(2, Direction::Down);
        assert_eq!(editor.draft().options, ["a", "b", "c"]);

        editor.move_option(0, Direction::Down);
        assert_eq!(editor.draft().options, ["b", "a", "c"]);
        assert!(!editor.can_move_option(0, Direction::Up));
        assert!(editor.can_move_option(0, Direction::Down));
        assert!(!editor.can_move_option(2, Direction::Down));
    }

    #[test]
    fn switching_kind_keeps_options() {
        let mut editor = editor();
        editor.set_kind(QuestionKind::Select);
        editor.add_option("Red");
        assert!(editor.shows_options());

        editor.set_kind(QuestionKind::Number);
        assert!(!editor.shows_options());
        editor.set_kind(QuestionKind::Radio);
        assert_eq!(editor.draft().options, ["Red"]);
    }

    #[test]
    fn load_for_edit_and_reset() {
        let mut ids = IdGenerator::new();
        let mut editor = QuestionEditor::new(&mut ids);
        let existing = Question::new(42, "Age", QuestionKind::Number);

        editor.set_new_option("pending");
        editor.load(Some(&existing), &mut ids);
        assert_eq!(editor.draft(), &existing);
        assert_eq!(editor.mode(), EditorMode::Edit);
        assert_eq!(editor.submit_label(), locale::SUBMIT_EDIT);
        assert!(editor.new_option().is_empty());

        let old_id = editor.draft().id;
        editor.load(None, &mut ids);
        assert_ne!(editor.draft().id, old_id);
        assert!(editor.draft().text.is_empty());
        assert_eq!(editor.submit_label(), locale::SUBMIT_NEW);
    }

    #[test]
    fn cycling_kinds_wraps() {
        let mut editor = editor();
        editor.cycle_kind(Direction::Up);
        assert_eq!(editor.draft().kind, QuestionKind::Paragraph);
        editor.cycle_kind(Direction::Down);
        assert_eq!(editor.draft().kind, QuestionKind::Text);
        editor.cycle_kind(Direction::Down);
        assert_eq!(editor.draft().kind, QuestionKind::Number);
    }

    #[test]
    fn cancel_calls_back() {
        let editor = editor();
        let mut cancelled = false;
        editor.cancel(|| cancelled = true);
        assert!(cancelled);
    }
}
