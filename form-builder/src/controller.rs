//! Owner of the authoritative question list and modal flags.

use crate::{
    Direction, PreviewAction, Question, QuestionId, Responses, locale, swap_adjacent,
};

/// One line of the response summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry<'a> {
    pub id: QuestionId,
    pub text: &'a str,
    /// The captured answer, or the "no answer" placeholder.
    pub answer: &'a str,
}

/// Application state: the questions of the form, the question being edited,
/// which modals are open, and the last captured responses.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    questions: Vec<Question>,
    editing_question: Option<Question>,
    modal_open: bool,
    response_modal_open: bool,
    responses: Responses,
}

impl Controller {
    /// Empty form, nothing being edited, both modals closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing list of questions.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn editing_question(&self) -> Option<&Question> {
        self.editing_question.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn is_response_modal_open(&self) -> bool {
        self.response_modal_open
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Append `question`, or, while editing, replace the edited question with it.
    ///
    /// Closes the editor afterwards.
    pub fn add_or_update_question(&mut self, question: Question) {
        match self.editing_question.as_ref().map(|editing| editing.id) {
            Some(editing_id) => {
                tracing::debug!(id = %editing_id, "updating question");
                for slot in self.questions.iter_mut().filter(|q| q.id == editing_id) {
                    *slot = question.clone();
                }
            }
            None => {
                tracing::debug!(id = %question.id, "adding question");
                self.questions.push(question);
            }
        }
        self.close_modal();
    }

    /// Open the editor on `question`.
    pub fn start_editing(&mut self, question: Question) {
        tracing::debug!(id = %question.id, "editing question");
        self.editing_question = Some(question);
        self.modal_open = true;
    }

    /// Open the editor for a new question.
    pub fn open_new_question_modal(&mut self) {
        self.editing_question = None;
        self.modal_open = true;
    }

    /// Close the editor and forget the edited question. Safe to call repeatedly.
    pub fn close_modal(&mut self) {
        self.editing_question = None;
        self.modal_open = false;
    }

    /// Swap the question at `index` with its neighbor in `direction`.
    ///
    /// No-op when the neighbor does not exist.
    pub fn move_question(&mut self, index: usize, direction: Direction) {
        if swap_adjacent(&mut self.questions, index, direction) {
            tracing::debug!(index, ?direction, "moved question");
        }
    }

    /// Store the captured answers and show them.
    pub fn on_form_validated(&mut self, responses: Responses) {
        tracing::debug!(answers = responses.len(), "responses stored");
        self.responses = responses;
        self.response_modal_open = true;
    }

    /// Hide the responses. The stored answers are kept.
    pub fn close_response_modal(&mut self) {
        self.response_modal_open = false;
    }

    /// Dispatch a request coming from the preview.
    pub fn apply(&mut self, action: PreviewAction) {
        match action {
            PreviewAction::Edit(question) => self.start_editing(question),
            PreviewAction::Move { index, direction } => self.move_question(index, direction),
            PreviewAction::Validated(responses) => self.on_form_validated(responses),
        }
    }

    /// Title of the editor modal.
    pub fn editor_title(&self) -> &'static str {
        if self.editing_question.is_some() {
            locale::EDIT_QUESTION_TITLE
        } else {
            locale::ADD_QUESTION_TITLE
        }
    }

    /// Every question with its answer, ordered by id.
    ///
    /// The question list itself is not reordered.
    pub fn response_summary(&self) -> Vec<SummaryEntry<'_>> {
        let mut entries: Vec<_> = self
            .questions
            .iter()
            .map(|question| SummaryEntry {
                id: question.id,
                text: &question.text,
                answer: self.responses.answer_or_placeholder(question.id),
            })
            .collect();
        entries.sort_by_key(|entry| entry.id);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NO_ANSWER, QuestionKind};

    fn q(id: u64, text: &str) -> Question {
        Question::new(id, text, QuestionKind::Text)
    }

    fn ids(controller: &Controller) -> Vec<u64> {
        controller.questions().iter().map(|q| q.id.get()).collect()
    }

    fn three() -> Controller {
        Controller::with_questions(vec![q(1, "a"), q(2, "b"), q(3, "c")])
    }

    #[test]
    fn starts_empty_and_closed() {
        let controller = Controller::new();
        assert!(controller.questions().is_empty());
        assert!(controller.editing_question().is_none());
        assert!(!controller.is_modal_open());
        assert!(!controller.is_response_modal_open());
        assert!(controller.responses().is_empty());
    }

    #[test]
    fn adds_in_insertion_order() {
        let mut controller = Controller::new();
        for (id, text) in [(1, "Name"), (2, "Age"), (3, "City")] {
            controller.open_new_question_modal();
            controller.add_or_update_question(q(id, text));
        }
        assert_eq!(ids(&controller), [1, 2, 3]);
        assert!(!controller.is_modal_open());
    }

    #[test]
    fn update_replaces_only_the_edited_question() {
        let mut controller = three();
        controller.start_editing(q(2, "b"));
        assert!(controller.is_modal_open());
        assert_eq!(controller.editor_title(), locale::EDIT_QUESTION_TITLE);

        controller.add_or_update_question(q(2, "B!").with_required(true));

        let texts: Vec<_> = controller.questions().iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["a", "B!", "c"]);
        assert!(controller.questions()[1].required);
        assert!(controller.editing_question().is_none());
        assert!(!controller.is_modal_open());
    }

    #[test]
    fn new_question_modal_forgets_edit() {
        let mut controller = three();
        controller.start_editing(q(1, "a"));
        controller.open_new_question_modal();
        assert!(controller.editing_question().is_none());
        assert_eq!(controller.editor_title(), locale::ADD_QUESTION_TITLE);

        controller.add_or_update_question(q(4, "d"));
        assert_eq!(ids(&controller), [1, 2, 3, 4]);
    }

    #[test]
    fn close_is_idempotent() {
        let mut controller = three();
        controller.start_editing(q(3, "c"));
        controller.close_modal();
        controller.close_modal();
        assert!(!controller.is_modal_open());
        assert!(controller.editing_question().is_none());
        assert_eq!(ids(&controller), [1, 2, 3]);
    }

    #[test]
    fn moves_are_noops_at_the_ends() {
        let mut controller = three();
        controller.move_question(0, Direction::Up);
        controller.move_question(2, Direction::Down);
        assert_eq!(ids(&controller), [1, 2, 3]);
    }

    #[test]
    fn move_up_then_down_restores_order() {
        let mut controller = three();
        controller.move_question(2, Direction::Up);
        assert_eq!(ids(&controller), [1, 3, 2]);
        controller.move_question(1, Direction::Down);
        assert_eq!(ids(&controller), [1, 2, 3]);
    }

    #[test]
    fn validation_replaces_responses_and_opens_modal() {
        let mut controller = three();
        let first: Responses = [("1", "x"), ("2", "y")].into_iter().collect();
        controller.apply(PreviewAction::Validated(first));
        assert!(controller.is_response_modal_open());

        let second: Responses = [("3", "z")].into_iter().collect();
        controller.on_form_validated(second.clone());
        assert_eq!(controller.responses(), &second);

        controller.close_response_modal();
        assert!(!controller.is_response_modal_open());
        assert_eq!(controller.responses(), &second);
    }

    #[test]
    fn summary_is_ordered_by_id_with_placeholder() {
        let mut controller = Controller::with_questions(vec![q(5, "Age"), q(2, "Name")]);
        controller.on_form_validated([("2", "Ann"), ("5", "")].into_iter().collect());

        let summary = controller.response_summary();
        assert_eq!(summary[0].text, "Name");
        assert_eq!(summary[0].answer, "Ann");
        assert_eq!(summary[1].text, "Age");
        assert_eq!(summary[1].answer, NO_ANSWER);
        assert_eq!(ids(&controller), [5, 2]);
    }

    #[test]
    fn preview_actions_dispatch() {
        let mut controller = three();
        controller.apply(PreviewAction::Move {
            index: 0,
            direction: Direction::Down,
        });
        assert_eq!(ids(&controller), [2, 1, 3]);

        controller.apply(PreviewAction::Edit(q(3, "c")));
        assert_eq!(controller.editing_question().map(|q| q.id.get()), Some(3));
    }
}
