//! Focus, cursor and key handling for the terminal frontend.
//!
//! Input is routed to the topmost open layer: the response modal, then the
//! editor modal, then the main screen. Layers are chosen from the controller
//! flags so that a key arriving right after an open/close acts on the new
//! layer even before the modal shells are synced.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use form_builder::{Direction, FormBuilder, QuestionId, QuestionKind, locale};
use std::collections::HashMap;

/// Focusable elements of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainFocus {
    AddButton,
    /// The preview control of the question at this index.
    Field(usize),
    ValidateButton,
}

/// Focusable elements of the editor modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditorFocus {
    Text,
    Kind,
    Required,
    NewOption,
    /// The option at this index of the draft.
    Option(usize),
    Submit,
    Cancel,
}

/// Which layer receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layer {
    Main,
    Editor,
    Responses,
}

impl Layer {
    pub(crate) fn of(session: &FormBuilder) -> Self {
        let controller = session.controller();
        if controller.is_response_modal_open() {
            Self::Responses
        } else if controller.is_modal_open() {
            Self::Editor
        } else {
            Self::Main
        }
    }
}

/// Interaction state that lives only in the terminal frontend.
#[derive(Debug)]
pub(crate) struct UiState {
    pub(crate) main_focus: MainFocus,
    pub(crate) editor_focus: EditorFocus,
    /// Character position inside the focused text input.
    pub(crate) cursor: usize,
    /// Highlighted option per choice control.
    highlights: HashMap<QuestionId, usize>,
    /// Shown under the question text input after a rejected submit.
    pub(crate) editor_error: Option<&'static str>,
    /// Vertical scroll of the preview, in rows.
    pub(crate) scroll_offset: usize,
    /// First option shown in the editor's option list.
    pub(crate) option_scroll: usize,
    /// Vertical scroll of the response list, in rows.
    pub(crate) response_scroll: u16,
    quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub(crate) fn new() -> Self {
        Self {
            main_focus: MainFocus::AddButton,
            editor_focus: EditorFocus::Text,
            cursor: 0,
            highlights: HashMap::new(),
            editor_error: None,
            scroll_offset: 0,
            option_scroll: 0,
            response_scroll: 0,
            quit: false,
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.quit
    }

    /// Highlighted option of the choice control answering `id`.
    pub(crate) fn highlight(&self, id: QuestionId) -> usize {
        self.highlights.get(&id).copied().unwrap_or(0)
    }

    /// Handle one key press.
    pub(crate) fn handle_key(&mut self, session: &mut FormBuilder, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        match Layer::of(session) {
            Layer::Responses => self.handle_responses_key(session, key),
            Layer::Editor => self.handle_editor_key(session, key),
            Layer::Main => self.handle_main_key(session, key),
        }
        self.clamp(session);
    }

    /// Keep focus and cursor inside what currently exists.
    pub(crate) fn clamp(&mut self, session: &FormBuilder) {
        let count = session.questions().len();
        self.main_focus = match self.main_focus {
            MainFocus::Field(i) if i >= count => {
                if count == 0 {
                    MainFocus::AddButton
                } else {
                    MainFocus::Field(count - 1)
                }
            }
            MainFocus::ValidateButton if count == 0 => MainFocus::AddButton,
            other => other,
        };

        let editor = session.editor();
        let options = editor.draft().options.len();
        self.editor_focus = match self.editor_focus {
            EditorFocus::NewOption | EditorFocus::Option(_) if !editor.shows_options() => {
                EditorFocus::Kind
            }
            EditorFocus::Option(i) if i >= options => {
                if options == 0 {
                    EditorFocus::NewOption
                } else {
                    EditorFocus::Option(options - 1)
                }
            }
            other => other,
        };

        let len = self.focused_text(session).map_or(0, |text| text.chars().count());
        self.cursor = self.cursor.min(len);
    }

    /// Text of the focused input of the active layer, if it is textual.
    pub(crate) fn focused_text<'a>(&self, session: &'a FormBuilder) -> Option<&'a str> {
        match Layer::of(session) {
            Layer::Responses => None,
            Layer::Editor => match self.editor_focus {
                EditorFocus::Text => Some(session.editor().draft().text.as_str()),
                EditorFocus::NewOption => Some(session.editor().new_option()),
                _ => None,
            },
            Layer::Main => match self.main_focus {
                MainFocus::Field(i) => {
                    let question = session.questions().get(i)?;
                    session.preview().control(question.id)?.text()
                }
                _ => None,
            },
        }
    }

    fn cursor_to_end(&mut self, session: &FormBuilder) {
        self.cursor = self
            .focused_text(session)
            .map_or(0, |text| text.chars().count());
    }

    fn main_focus_order(session: &FormBuilder) -> Vec<MainFocus> {
        let count = session.questions().len();
        let mut order = vec![MainFocus::AddButton];
        order.extend((0..count).map(MainFocus::Field));
        if count > 0 {
            order.push(MainFocus::ValidateButton);
        }
        order
    }

    fn editor_focus_order(session: &FormBuilder) -> Vec<EditorFocus> {
        let editor = session.editor();
        let mut order = vec![EditorFocus::Text, EditorFocus::Kind, EditorFocus::Required];
        if editor.shows_options() {
            order.push(EditorFocus::NewOption);
            order.extend((0..editor.draft().options.len()).map(EditorFocus::Option));
        }
        order.extend([EditorFocus::Submit, EditorFocus::Cancel]);
        order
    }

    fn focus_main(&mut self, session: &FormBuilder, forward: bool) {
        self.main_focus = step(&Self::main_focus_order(session), self.main_focus, forward);
        self.cursor_to_end(session);
    }

    fn focus_editor(&mut self, session: &FormBuilder, forward: bool) {
        self.editor_focus = step(
            &Self::editor_focus_order(session),
            self.editor_focus,
            forward,
        );
        self.cursor_to_end(session);
    }

    // Main screen

    fn handle_main_key(&mut self, session: &mut FormBuilder, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('n') if ctrl => self.open_new_question(session),
            KeyCode::Char('e') if ctrl => self.edit_focused(session),
            KeyCode::F(2) => self.edit_focused(session),
            KeyCode::F(10) => self.validate(session),
            KeyCode::Up if ctrl || alt => self.move_focused(session, Direction::Up),
            KeyCode::Down if ctrl || alt => self.move_focused(session, Direction::Down),
            KeyCode::BackTab | KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus_main(session, false);
            }
            KeyCode::Tab | KeyCode::Down => self.focus_main(session, true),
            KeyCode::BackTab | KeyCode::Up => self.focus_main(session, false),
            KeyCode::Enter => match self.main_focus {
                MainFocus::AddButton => self.open_new_question(session),
                MainFocus::ValidateButton => self.validate(session),
                MainFocus::Field(index) => self.enter_on_field(session, index),
            },
            KeyCode::Char(c) if !ctrl => {
                if let MainFocus::Field(index) = self.main_focus {
                    self.type_into_field(session, index, c);
                }
            }
            KeyCode::Left => self.left_on_field(session),
            KeyCode::Right => self.right_on_field(session),
            KeyCode::Backspace => {
                if let Some(id) = self.focused_question_id(session)
                    && self.cursor > 0
                    && let Some(control) = session.preview_mut().control_mut(id)
                    && control.remove_char(self.cursor - 1)
                {
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if let Some(id) = self.focused_question_id(session)
                    && let Some(control) = session.preview_mut().control_mut(id)
                {
                    control.remove_char(self.cursor);
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor_to_end(session),
            _ => {}
        }
    }

    fn focused_question_id(&self, session: &FormBuilder) -> Option<QuestionId> {
        match self.main_focus {
            MainFocus::Field(i) => session.questions().get(i).map(|q| q.id),
            _ => None,
        }
    }

    fn open_new_question(&mut self, session: &mut FormBuilder) {
        session.open_new_question();
        self.reset_editor(session);
    }

    fn edit_focused(&mut self, session: &mut FormBuilder) {
        if let MainFocus::Field(index) = self.main_focus {
            session.start_editing(index);
            self.reset_editor(session);
        }
    }

    fn reset_editor(&mut self, session: &FormBuilder) {
        self.editor_focus = EditorFocus::Text;
        self.editor_error = None;
        self.option_scroll = 0;
        self.cursor_to_end(session);
    }

    fn validate(&mut self, session: &mut FormBuilder) {
        if session.questions().is_empty() {
            return;
        }
        session.validate_preview();
        self.response_scroll = 0;
    }

    fn move_focused(&mut self, session: &mut FormBuilder, direction: Direction) {
        let MainFocus::Field(index) = self.main_focus else {
            return;
        };
        let target = direction.neighbor(index, session.questions().len());
        session.move_question(index, direction);
        if let Some(target) = target {
            self.main_focus = MainFocus::Field(target);
        }
    }

    fn enter_on_field(&mut self, session: &mut FormBuilder, index: usize) {
        let Some(kind) = session.questions().get(index).map(|q| q.kind) else {
            return;
        };
        match kind {
            QuestionKind::Paragraph => self.type_into_field(session, index, '\n'),
            QuestionKind::Switch | QuestionKind::Select | QuestionKind::Radio => {
                self.type_into_field(session, index, ' ');
            }
            QuestionKind::Text | QuestionKind::Number | QuestionKind::Date => {
                self.focus_main(session, true);
            }
        }
    }

    fn type_into_field(&mut self, session: &mut FormBuilder, index: usize, c: char) {
        let Some(question) = session.questions().get(index) else {
            return;
        };
        let (id, kind, option_count) = (question.id, question.kind, question.options.len());
        let highlight = self.highlight(id);
        let Some(control) = session.preview_mut().control_mut(id) else {
            return;
        };

        match kind {
            QuestionKind::Switch => {
                if c == ' ' {
                    control.toggle();
                }
            }
            QuestionKind::Select | QuestionKind::Radio => {
                if c == ' ' {
                    control.choose(highlight, option_count);
                } else if let Some(digit) = c.to_digit(10)
                    && digit > 0
                    && (digit as usize) <= option_count
                {
                    let choice = digit as usize - 1;
                    control.choose(choice, option_count);
                    self.highlights.insert(id, choice);
                }
            }
            QuestionKind::Text
            | QuestionKind::Number
            | QuestionKind::Date
            | QuestionKind::Paragraph => {
                if control.insert_char(self.cursor, c) {
                    self.cursor += 1;
                }
            }
        }
    }

    fn left_on_field(&mut self, session: &FormBuilder) {
        self.shift_on_field(session, Direction::Up);
    }

    fn right_on_field(&mut self, session: &FormBuilder) {
        self.shift_on_field(session, Direction::Down);
    }

    /// Move the highlight of a choice control, or the cursor of a text input.
    fn shift_on_field(&mut self, session: &FormBuilder, direction: Direction) {
        let MainFocus::Field(index) = self.main_focus else {
            return;
        };
        let Some(question) = session.questions().get(index) else {
            return;
        };

        if question.kind.is_choice() {
            let count = question.options.len();
            if count == 0 {
                return;
            }
            let current = self.highlight(question.id).min(count - 1);
            let next = match direction {
                Direction::Up => (current + count - 1) % count,
                Direction::Down => (current + 1) % count,
            };
            self.highlights.insert(question.id, next);
        } else {
            let len = self
                .focused_text(session)
                .map_or(0, |text| text.chars().count());
            self.cursor = match direction {
                Direction::Up => self.cursor.saturating_sub(1),
                Direction::Down => (self.cursor + 1).min(len),
            };
        }
    }

    // Editor modal

    fn handle_editor_key(&mut self, session: &mut FormBuilder, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => self.cancel_editor(session),
            KeyCode::Char('s') if ctrl => self.submit_editor(session),
            KeyCode::Up if ctrl || alt => self.move_focused_option(session, Direction::Up),
            KeyCode::Down if ctrl || alt => self.move_focused_option(session, Direction::Down),
            KeyCode::BackTab | KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus_editor(session, false);
            }
            KeyCode::Tab | KeyCode::Down => self.focus_editor(session, true),
            KeyCode::BackTab | KeyCode::Up => self.focus_editor(session, false),
            KeyCode::Left => match self.editor_focus {
                EditorFocus::Kind => session.editor_mut().cycle_kind(Direction::Up),
                _ => self.cursor = self.cursor.saturating_sub(1),
            },
            KeyCode::Right => match self.editor_focus {
                EditorFocus::Kind => session.editor_mut().cycle_kind(Direction::Down),
                _ => {
                    let len = self
                        .focused_text(session)
                        .map_or(0, |text| text.chars().count());
                    self.cursor = (self.cursor + 1).min(len);
                }
            },
            KeyCode::Enter => match self.editor_focus {
                EditorFocus::Text | EditorFocus::Submit => self.submit_editor(session),
                EditorFocus::Kind => self.focus_editor(session, true),
                EditorFocus::Required => toggle_required(session),
                EditorFocus::NewOption => {
                    if session.editor_mut().commit_new_option() {
                        self.cursor = 0;
                    }
                }
                EditorFocus::Option(_) => {}
                EditorFocus::Cancel => self.cancel_editor(session),
            },
            KeyCode::Char(' ') if self.editor_focus == EditorFocus::Required => {
                toggle_required(session);
            }
            KeyCode::Char(' ') if self.editor_focus == EditorFocus::Kind => {
                session.editor_mut().cycle_kind(Direction::Down);
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(buffer) = editor_buffer(self.editor_focus, session) {
                    insert_at(buffer, self.cursor, c);
                    self.cursor += 1;
                    if self.editor_focus == EditorFocus::Text {
                        self.editor_error = None;
                    }
                }
            }
            KeyCode::Backspace | KeyCode::Delete
                if matches!(self.editor_focus, EditorFocus::Option(_)) =>
            {
                if let EditorFocus::Option(index) = self.editor_focus {
                    session.editor_mut().remove_option(index);
                }
            }
            KeyCode::Backspace => {
                if self.cursor > 0
                    && let Some(buffer) = editor_buffer(self.editor_focus, session)
                    && remove_at(buffer, self.cursor - 1)
                {
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if let Some(buffer) = editor_buffer(self.editor_focus, session) {
                    remove_at(buffer, self.cursor);
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor_to_end(session),
            _ => {}
        }
    }

    fn move_focused_option(&mut self, session: &mut FormBuilder, direction: Direction) {
        let EditorFocus::Option(index) = self.editor_focus else {
            return;
        };
        let editor = session.editor_mut();
        if editor.can_move_option(index, direction) {
            editor.move_option(index, direction);
            if let Some(target) = direction.neighbor(index, editor.draft().options.len()) {
                self.editor_focus = EditorFocus::Option(target);
            }
        }
    }

    fn submit_editor(&mut self, session: &mut FormBuilder) {
        match session.submit_editor() {
            Ok(()) => {
                self.editor_error = None;
                self.cursor_to_end(session);
            }
            Err(err) if err.is_empty_text() => {
                self.editor_error = Some(locale::FIELD_REQUIRED);
                self.editor_focus = EditorFocus::Text;
                self.cursor_to_end(session);
            }
            Err(err) => tracing::error!(error = %err, "editor submission failed"),
        }
    }

    fn cancel_editor(&mut self, session: &mut FormBuilder) {
        session.cancel_editor();
        self.editor_error = None;
        self.cursor_to_end(session);
    }

    // Response modal

    fn handle_responses_key(&mut self, session: &mut FormBuilder, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                session.close_top_modal();
                self.cursor_to_end(session);
            }
            KeyCode::Up => self.response_scroll = self.response_scroll.saturating_sub(1),
            KeyCode::Down => self.response_scroll = self.response_scroll.saturating_add(1),
            KeyCode::PageUp => self.response_scroll = self.response_scroll.saturating_sub(10),
            KeyCode::PageDown => self.response_scroll = self.response_scroll.saturating_add(10),
            _ => {}
        }
    }
}

/// Neighbor of `current` in `order`, staying put at either end.
fn step<T: Copy + PartialEq>(order: &[T], current: T, forward: bool) -> T {
    let Some(pos) = order.iter().position(|item| *item == current) else {
        return order.first().copied().unwrap_or(current);
    };
    let next = if forward {
        (pos + 1).min(order.len() - 1)
    } else {
        pos.saturating_sub(1)
    };
    order[next]
}

fn toggle_required(session: &mut FormBuilder) {
    let required = session.editor().draft().required;
    session.editor_mut().set_required(!required);
}

/// The editor string behind a textual focus.
fn editor_buffer(focus: EditorFocus, session: &mut FormBuilder) -> Option<&mut String> {
    match focus {
        EditorFocus::Text => Some(session.editor_mut().text_mut()),
        EditorFocus::NewOption => Some(session.editor_mut().new_option_mut()),
        _ => None,
    }
}

fn byte_index(s: &str, at: usize) -> usize {
    s.char_indices().nth(at).map_or(s.len(), |(i, _)| i)
}

fn insert_at(s: &mut String, at: usize, c: char) {
    let idx = byte_index(s, at);
    s.insert(idx, c);
}

fn remove_at(s: &mut String, at: usize) -> bool {
    if at >= s.chars().count() {
        return false;
    }
    let idx = byte_index(s, at);
    s.remove(idx);
    true
}
