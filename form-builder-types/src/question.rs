use std::fmt;
use std::str::FromStr;

/// Identifier of a question, unique within a session.
///
/// The decimal string form is the key under which the question's answer is
/// stored in `Responses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Create an id from its raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for QuestionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A single question in a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Stable identifier, assigned when the draft is created.
    pub id: QuestionId,

    /// The label shown next to the input control.
    pub text: String,

    /// The kind of question (determines the input control).
    pub kind: QuestionKind,

    /// Options for choice kinds, in display order.
    ///
    /// Kept even when the kind is not a choice kind, so switching the kind
    /// away and back does not lose them.
    pub options: Vec<String>,

    /// Shown as a marker next to the label. Never blocks validation.
    pub required: bool,
}

impl Question {
    /// Create a blank question with the given id: empty text, kind text,
    /// no options, not required.
    pub fn blank(id: impl Into<QuestionId>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            kind: QuestionKind::default(),
            options: Vec::new(),
            required: false,
        }
    }

    /// Create a question with the given label and kind.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            text: text.into(),
            kind,
            ..Self::blank(id)
        }
    }

    /// Set the options (builder style).
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the question as required (builder style).
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Check whether the label is non-empty after trimming.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// The options that are actually rendered: all of them for choice kinds,
    /// none otherwise.
    pub fn visible_options(&self) -> &[String] {
        if self.kind.is_choice() {
            &self.options
        } else {
            &[]
        }
    }
}

/// The kind of question, determining the input control used to answer it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    /// Single-line free text.
    #[default]
    Text,

    /// Numeric input.
    Number,

    /// Calendar date (`AAAA-MM-DD`).
    Date,

    /// Dropdown; pick one of the options.
    Select,

    /// On/off toggle.
    Switch,

    /// Radio group; pick one of the options.
    Radio,

    /// Multi-line free text.
    Paragraph,
}

impl QuestionKind {
    /// All kinds, in the order the editor offers them.
    pub const ALL: [QuestionKind; 7] = [
        Self::Text,
        Self::Number,
        Self::Date,
        Self::Select,
        Self::Switch,
        Self::Radio,
        Self::Paragraph,
    ];

    /// Check if this kind picks from a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }

    /// Check if this kind is answered by typing text.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Number | Self::Date | Self::Paragraph
        )
    }

    /// The machine name, e.g. `"select"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
            Self::Switch => "switch",
            Self::Radio => "radio",
            Self::Paragraph => "paragraph",
        }
    }

    /// The label shown in the type selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Texto",
            Self::Number => "Número",
            Self::Date => "Fecha",
            Self::Select => "Selección",
            Self::Switch => "Switch",
            Self::Radio => "Radio Button",
            Self::Paragraph => "Párrafo",
        }
    }

    /// Position in `ALL`.
    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| kind == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown question kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown question kind: {0}")]
pub struct ParseQuestionKindError(pub String);

impl FromStr for QuestionKind {
    type Err = ParseQuestionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseQuestionKindError(s.to_string()))
    }
}
