//! Runtime of the assembled form: one input control per question, answer
//! capture, and the callbacks the preview sends back to the controller.

use crate::{Direction, Question, QuestionId, QuestionKind, Responses};

/// Maximum length of a date value (`AAAA-MM-DD`).
const DATE_LEN: usize = 10;

/// Something the preview asks its owner to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewAction {
    /// Open the editor for this question.
    Edit(Question),
    /// Move the question at `index` one step in `direction`.
    Move { index: usize, direction: Direction },
    /// The user validated the form; these are the captured answers.
    Validated(Responses),
}

/// Current value of one rendered input control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Text(String),
    Paragraph(String),
    Number(String),
    Date(String),
    /// Index of the chosen option, if any.
    Select(Option<usize>),
    Switch(bool),
    /// Index of the chosen option, if any.
    Radio(Option<usize>),
}

impl Control {
    /// A fresh, empty control for the given kind.
    pub fn for_kind(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Text => Self::Text(String::new()),
            QuestionKind::Number => Self::Number(String::new()),
            QuestionKind::Date => Self::Date(String::new()),
            QuestionKind::Select => Self::Select(None),
            QuestionKind::Switch => Self::Switch(false),
            QuestionKind::Radio => Self::Radio(None),
            QuestionKind::Paragraph => Self::Paragraph(String::new()),
        }
    }

    /// The question kind this control answers.
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::Text(_) => QuestionKind::Text,
            Self::Paragraph(_) => QuestionKind::Paragraph,
            Self::Number(_) => QuestionKind::Number,
            Self::Date(_) => QuestionKind::Date,
            Self::Select(_) => QuestionKind::Select,
            Self::Switch(_) => QuestionKind::Switch,
            Self::Radio(_) => QuestionKind::Radio,
        }
    }

    /// The typed text, for textual controls.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Paragraph(s) | Self::Number(s) | Self::Date(s) => Some(s),
            Self::Select(_) | Self::Switch(_) | Self::Radio(_) => None,
        }
    }

    /// The chosen option index, for choice controls.
    pub fn chosen(&self) -> Option<usize> {
        match self {
            Self::Select(chosen) | Self::Radio(chosen) => *chosen,
            _ => None,
        }
    }

    /// Check whether `c` may be inserted at character position `at`.
    pub fn accepts(&self, at: usize, c: char) -> bool {
        match self {
            Self::Text(_) => !c.is_control(),
            Self::Paragraph(_) => c == '\n' || !c.is_control(),
            Self::Number(s) => match c {
                '0'..='9' => !(at == 0 && s.starts_with('-')),
                '-' => at == 0 && !s.starts_with('-'),
                '.' => !(at == 0 && s.starts_with('-')) && !s.contains('.'),
                _ => false,
            },
            Self::Date(s) => (c.is_ascii_digit() || c == '-') && s.chars().count() < DATE_LEN,
            Self::Select(_) | Self::Switch(_) | Self::Radio(_) => false,
        }
    }

    /// Insert `c` at character position `at` if the control accepts it.
    pub fn insert_char(&mut self, at: usize, c: char) -> bool {
        if !self.accepts(at, c) {
            return false;
        }
        match self {
            Self::Text(s) | Self::Paragraph(s) | Self::Number(s) | Self::Date(s) => {
                let byte_idx = byte_index(s, at);
                s.insert(byte_idx, c);
                true
            }
            Self::Select(_) | Self::Switch(_) | Self::Radio(_) => false,
        }
    }

    /// Remove the character at position `at`, if any.
    pub fn remove_char(&mut self, at: usize) -> bool {
        match self {
            Self::Text(s) | Self::Paragraph(s) | Self::Number(s) | Self::Date(s) => {
                if at >= s.chars().count() {
                    return false;
                }
                let byte_idx = byte_index(s, at);
                s.remove(byte_idx);
                true
            }
            Self::Select(_) | Self::Switch(_) | Self::Radio(_) => false,
        }
    }

    /// Flip a switch. Other controls are unaffected.
    pub fn toggle(&mut self) {
        if let Self::Switch(on) = self {
            *on = !*on;
        }
    }

    /// Choose option `index` of a choice control. Out-of-range indices are ignored.
    pub fn choose(&mut self, index: usize, option_count: usize) {
        if index >= option_count {
            return;
        }
        if let Self::Select(chosen) | Self::Radio(chosen) = self {
            *chosen = Some(index);
        }
    }

    /// Set the value from a string, the way a user would enter it.
    ///
    /// Textual controls replace their text (filtered through `accepts`),
    /// choice controls pick the option equal to `value`, switches accept
    /// `"true"` / `"false"`. Returns whether the value was accepted as a whole.
    pub fn set_from_str(&mut self, value: &str, options: &[String]) -> bool {
        match self {
            Self::Text(_) | Self::Paragraph(_) | Self::Number(_) | Self::Date(_) => {
                let mut fresh = Self::for_kind(self.kind());
                for (at, c) in value.chars().enumerate() {
                    if !fresh.insert_char(at, c) {
                        return false;
                    }
                }
                *self = fresh;
                true
            }
            Self::Switch(on) => match value {
                "true" => {
                    *on = true;
                    true
                }
                "false" => {
                    *on = false;
                    true
                }
                _ => false,
            },
            Self::Select(chosen) | Self::Radio(chosen) => {
                match options.iter().position(|option| option == value) {
                    Some(idx) => {
                        *chosen = Some(idx);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// The answer recorded for this control, or `None` when a choice control
    /// has nothing chosen.
    pub fn answer(&self, options: &[String]) -> Option<String> {
        match self {
            Self::Text(s) | Self::Paragraph(s) | Self::Number(s) | Self::Date(s) => Some(s.clone()),
            Self::Switch(on) => Some(on.to_string()),
            Self::Select(chosen) | Self::Radio(chosen) => {
                chosen.and_then(|idx| options.get(idx)).cloned()
            }
        }
    }
}

/// Byte offset of character position `at` (clamped to the end).
fn byte_index(s: &str, at: usize) -> usize {
    s.char_indices().nth(at).map(|(i, _)| i).unwrap_or(s.len())
}

/// A control bound to the question it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewField {
    pub id: QuestionId,
    pub control: Control,
}

/// The fillable form, one control per question in list order.
#[derive(Debug, Clone, Default)]
pub struct FormPreview {
    fields: Vec<PreviewField>,
}

impl FormPreview {
    /// Create a preview with no controls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a preview with fresh controls for `questions`.
    pub fn for_questions(questions: &[Question]) -> Self {
        let mut preview = Self::new();
        preview.sync(questions);
        preview
    }

    /// Rebuild the controls to match `questions`.
    ///
    /// A control keeps its value while its question keeps both its id and its
    /// kind. Choices that no longer point at an existing option are cleared.
    pub fn sync(&mut self, questions: &[Question]) {
        let mut previous = std::mem::take(&mut self.fields);
        self.fields = questions
            .iter()
            .map(|question| {
                let kept = previous
                    .iter()
                    .position(|field| {
                        field.id == question.id && field.control.kind() == question.kind
                    })
                    .map(|idx| previous.swap_remove(idx).control);
                let mut control = kept.unwrap_or_else(|| Control::for_kind(question.kind));
                if let Control::Select(chosen) | Control::Radio(chosen) = &mut control
                    && chosen.is_some_and(|idx| idx >= question.options.len())
                {
                    *chosen = None;
                }
                PreviewField {
                    id: question.id,
                    control,
                }
            })
            .collect();
    }

    /// All controls, in form order.
    pub fn fields(&self) -> &[PreviewField] {
        &self.fields
    }

    /// The control answering question `id`.
    pub fn control(&self, id: QuestionId) -> Option<&Control> {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| &field.control)
    }

    /// Mutable access to the control answering question `id`.
    pub fn control_mut(&mut self, id: QuestionId) -> Option<&mut Control> {
        self.fields
            .iter_mut()
            .find(|field| field.id == id)
            .map(|field| &mut field.control)
    }

    /// Enter `value` into the control of `question`.
    pub fn fill(&mut self, question: &Question, value: &str) -> bool {
        match self.control_mut(question.id) {
            Some(control) => control.set_from_str(value, &question.options),
            None => false,
        }
    }

    /// The edit affordance of the question at `index`.
    pub fn edit(&self, questions: &[Question], index: usize) -> Option<PreviewAction> {
        questions.get(index).cloned().map(PreviewAction::Edit)
    }

    /// The move affordance of the question at `index`.
    pub fn move_question(&self, index: usize, direction: Direction) -> PreviewAction {
        PreviewAction::Move { index, direction }
    }

    /// Capture the current value of every control, keyed by question id.
    pub fn collect_responses(&self, questions: &[Question]) -> Responses {
        let mut responses = Responses::new();
        for question in questions {
            let fresh;
            let control = match self.control(question.id) {
                Some(control) if control.kind() == question.kind => control,
                _ => {
                    fresh = Control::for_kind(question.kind);
                    &fresh
                }
            };
            if let Some(answer) = control.answer(&question.options) {
                responses.insert(question.id, answer);
            }
        }
        responses
    }

    /// The validate affordance: capture all answers for the owner.
    pub fn validate(&self, questions: &[Question]) -> PreviewAction {
        let responses = self.collect_responses(questions);
        tracing::debug!(answers = responses.len(), "form validated");
        PreviewAction::Validated(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_and_age() -> Vec<Question> {
        vec![
            Question::new(1, "Name", QuestionKind::Text),
            Question::new(2, "Age", QuestionKind::Number),
        ]
    }

    #[test]
    fn validate_keys_answers_by_id() {
        let questions = name_and_age();
        let mut preview = FormPreview::for_questions(&questions);
        assert!(preview.fill(&questions[0], "Ann"));
        assert!(preview.fill(&questions[1], "30"));

        let PreviewAction::Validated(responses) = preview.validate(&questions) else {
            panic!("expected Validated");
        };
        let expected: Responses = [("1", "Ann"), ("2", "30")].into_iter().collect();
        assert_eq!(responses, expected);
    }

    #[test]
    fn one_control_per_question_in_order() {
        let questions = vec![
            Question::new(3, "c", QuestionKind::Radio),
            Question::new(1, "a", QuestionKind::Switch),
            Question::new(2, "b", QuestionKind::Paragraph),
        ];
        let preview = FormPreview::for_questions(&questions);
        let kinds: Vec<_> = preview.fields().iter().map(|f| f.control.kind()).collect();
        assert_eq!(
            kinds,
            vec![QuestionKind::Radio, QuestionKind::Switch, QuestionKind::Paragraph]
        );
    }

    #[test]
    fn sync_keeps_values_across_reorder() {
        let mut questions = name_and_age();
        let mut preview = FormPreview::for_questions(&questions);
        preview.fill(&questions[0], "Ann");

        questions.swap(0, 1);
        preview.sync(&questions);
        assert_eq!(preview.fields()[1].id, QuestionId::new(1));
        assert_eq!(
            preview.control(QuestionId::new(1)).and_then(Control::text),
            Some("Ann")
        );
    }

    #[test]
    fn sync_resets_control_when_kind_changes() {
        let mut questions = name_and_age();
        let mut preview = FormPreview::for_questions(&questions);
        preview.fill(&questions[0], "Ann");

        questions[0].kind = QuestionKind::Switch;
        preview.sync(&questions);
        assert_eq!(
            preview.control(QuestionId::new(1)),
            Some(&Control::Switch(false))
        );
    }

    #[test]
    fn sync_clears_stale_choice() {
        let mut questions =
            vec![Question::new(1, "Color", QuestionKind::Select).with_options(["Red", "Blue"])];
        let mut preview = FormPreview::for_questions(&questions);
        assert!(preview.fill(&questions[0], "Blue"));

        questions[0].options.pop();
        preview.sync(&questions);
        assert_eq!(preview.control(QuestionId::new(1)), Some(&Control::Select(None)));
    }

    #[test]
    fn choice_answers_are_option_text() {
        let questions = vec![
            Question::new(1, "Color", QuestionKind::Select).with_options(["Red", "Blue"]),
            Question::new(2, "Size", QuestionKind::Radio).with_options(["S", "M"]),
            Question::new(3, "News", QuestionKind::Switch),
        ];
        let mut preview = FormPreview::for_questions(&questions);
        preview.control_mut(QuestionId::new(1)).unwrap().choose(1, 2);
        preview.control_mut(QuestionId::new(3)).unwrap().toggle();

        let responses = preview.collect_responses(&questions);
        assert_eq!(responses.get(QuestionId::new(1)), Some("Blue"));
        assert_eq!(responses.get(QuestionId::new(2)), None);
        assert_eq!(responses.get(QuestionId::new(3)), Some("true"));
    }

    #[test]
    fn empty_text_is_still_captured() {
        let questions = name_and_age();
        let preview = FormPreview::for_questions(&questions);
        let responses = preview.collect_responses(&questions);
        assert_eq!(responses.get(QuestionId::new(1)), Some(""));
    }

    #[test]
    fn number_control_filters_input() {
        let mut control = Control::for_kind(QuestionKind::Number);
        assert!(control.insert_char(0, '-'));
        assert!(!control.insert_char(1, '-'));
        assert!(control.insert_char(1, '4'));
        assert!(control.insert_char(2, '.'));
        assert!(!control.insert_char(3, '.'));
        assert!(!control.insert_char(3, 'x'));
        assert!(!control.insert_char(0, '7'));
        assert_eq!(control.text(), Some("-4."));
    }

    #[test]
    fn number_control_keeps_sign_first() {
        let mut control = Control::for_kind(QuestionKind::Number);
        assert!(control.set_from_str("-5", &[]));
        assert!(!control.insert_char(0, '.'));
        assert!(control.insert_char(1, '.'));
        assert_eq!(control.text(), Some("-.5"));
    }

    #[test]
    fn date_control_is_bounded() {
        let mut control = Control::for_kind(QuestionKind::Date);
        assert!(control.set_from_str("2024-05-17", &[]));
        assert!(!control.insert_char(10, '1'));
        assert!(!control.set_from_str("17/05/2024", &[]));
        assert_eq!(control.text(), Some("2024-05-17"));
    }

    #[test]
    fn text_editing_is_char_based() {
        let mut control = Control::for_kind(QuestionKind::Text);
        control.set_from_str("Año", &[]);
        assert!(control.insert_char(2, 'x'));
        assert_eq!(control.text(), Some("Añxo"));
        assert!(control.remove_char(1));
        assert_eq!(control.text(), Some("Axo"));
        assert!(!control.remove_char(3));
    }

    #[test]
    fn edit_and_move_affordances() {
        let questions = name_and_age();
        let preview = FormPreview::for_questions(&questions);
        assert_eq!(
            preview.edit(&questions, 1),
            Some(PreviewAction::Edit(questions[1].clone()))
        );
        assert_eq!(preview.edit(&questions, 2), None);
        assert_eq!(
            preview.move_question(1, Direction::Up),
            PreviewAction::Move {
                index: 1,
                direction: Direction::Up
            }
        );
    }
}
