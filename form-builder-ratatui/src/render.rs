//! Drawing of the main screen, the preview controls and the modal overlays.

use crate::{
    Theme,
    state::{EditorFocus, Layer, MainFocus, UiState},
};
use form_builder::{
    Control, Direction, FormBuilder, ModalShell, NO_ANSWER, Question, QuestionKind, locale,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as Axis, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Wrap,
    },
};

const MAIN_HELP: &str =
    "Tab: Siguiente  Ctrl+N: Nueva  F2: Editar  Ctrl+↑/↓: Mover  F10: Validar  Esc: Salir";
const EDITOR_HELP: &str =
    "Tab: Siguiente  ←/→: Tipo  Espacio: Marcar  Ctrl+↑/↓: Mover opción  Supr: Quitar  Esc: Cancelar";
const RESPONSES_HELP: &str = "↑/↓: Desplazar  Enter/Esc: Cerrar";

/// Rows of a paragraph control, borders included.
const PARAGRAPH_HEIGHT: usize = 5;

/// Rows of the editor modal besides the option list: text, error, kind,
/// required, option input and buttons, plus the modal border.
const EDITOR_ROWS_WITH_OPTIONS: u16 = 3 + 1 + 3 + 1 + 3 + 3 + 2;

/// The option list never grows taller than this; longer lists scroll.
const MAX_OPTION_ROWS: usize = 8;

/// Draw the whole screen.
pub(crate) fn draw(
    frame: &mut Frame,
    session: &FormBuilder,
    ui: &mut UiState,
    theme: &Theme,
    title: &str,
) {
    let area = frame.area();
    let layer = Layer::of(session);
    let has_questions = !session.questions().is_empty();

    let chunks = Layout::default()
        .direction(Axis::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Add button
            Constraint::Min(3),    // Preview
            Constraint::Length(if has_questions { 3 } else { 0 }), // Validate button
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    let heading = Paragraph::new(title)
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(heading, chunks[0]);

    let main_active = layer == Layer::Main;
    draw_button(
        frame,
        chunks[1],
        &format!("+ {}", locale::ADD_NEW_QUESTION),
        main_active && ui.main_focus == MainFocus::AddButton,
        theme,
    );

    if has_questions {
        draw_preview(frame, chunks[2], session, ui, theme, main_active);
        draw_button(
            frame,
            chunks[3],
            locale::VALIDATE_FORM,
            main_active && ui.main_focus == MainFocus::ValidateButton,
            theme,
        );
    }

    let help = match layer {
        Layer::Main => MAIN_HELP,
        Layer::Editor => EDITOR_HELP,
        Layer::Responses => RESPONSES_HELP,
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(theme.border)),
        chunks[4],
    );

    if session.editor_modal().is_rendered() {
        draw_editor_modal(frame, area, session, ui, theme);
    }
    if session.response_modal().is_rendered() {
        draw_response_modal(frame, area, session, ui, theme);
    }
}

fn draw_button(frame: &mut Frame, area: Rect, label: &str, focused: bool, theme: &Theme) {
    let style = if focused {
        Style::default()
            .fg(theme.text)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    };
    let text = if focused {
        format!("[ {label} ]")
    } else {
        label.to_string()
    };
    let button = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused {
                    theme.primary
                } else {
                    theme.border
                })),
        );
    frame.render_widget(button, area);
}

/// A row count as a terminal dimension, saturating at `u16::MAX`.
fn rows(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Move `offset` so that rows `top..bottom` lie in a window `viewport` rows tall.
fn follow(offset: &mut usize, top: usize, bottom: usize, viewport: usize) {
    if top < *offset {
        *offset = top;
    }
    if bottom > offset.saturating_add(viewport) {
        *offset = bottom.saturating_sub(viewport);
    }
}

fn draw_scrollbar(frame: &mut Frame, area: Rect, total: usize, position: usize, viewport: usize) {
    let scrollbar_area = Rect {
        x: area.x + area.width.saturating_sub(1),
        y: area.y,
        width: area.width.min(1),
        height: area.height,
    };
    let mut scrollbar_state = ScrollbarState::new(total)
        .position(position)
        .viewport_content_length(viewport);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"))
        .track_symbol(Some("│"))
        .thumb_symbol("█");
    frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}

// Preview

fn field_height(question: &Question) -> usize {
    match question.kind {
        QuestionKind::Paragraph => PARAGRAPH_HEIGHT,
        QuestionKind::Radio => 2 + question.options.len().max(1),
        QuestionKind::Text
        | QuestionKind::Number
        | QuestionKind::Date
        | QuestionKind::Select
        | QuestionKind::Switch => 3,
    }
}

/// Keep the focused field inside the viewport.
fn adjust_scroll(ui: &mut UiState, questions: &[Question], viewport_height: usize) {
    let MainFocus::Field(index) = ui.main_focus else {
        return;
    };
    let Some(focused) = questions.get(index) else {
        return;
    };
    let top: usize = questions[..index].iter().map(field_height).sum();
    let bottom = top.saturating_add(field_height(focused));
    follow(&mut ui.scroll_offset, top, bottom, viewport_height);
}

fn draw_preview(
    frame: &mut Frame,
    area: Rect,
    session: &FormBuilder,
    ui: &mut UiState,
    theme: &Theme,
    active: bool,
) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" {} ", locale::PREVIEW_HEADING))
        .title_style(
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        );
    let form_area = block.inner(area);
    frame.render_widget(block, area);

    let questions = session.questions();
    let viewport_height = usize::from(form_area.height);
    // 1 for left margin, 1 for scrollbar
    let content_width = form_area.width.saturating_sub(2);

    adjust_scroll(ui, questions, viewport_height);
    let total_height: usize = questions.iter().map(field_height).sum();
    let scroll_offset = ui.scroll_offset.min(total_height.saturating_sub(1));

    let mut virtual_y: usize = 0;
    for (index, question) in questions.iter().enumerate() {
        let height = field_height(question);
        let top = virtual_y;
        virtual_y = virtual_y.saturating_add(height);

        // Fields clipped at the top are skipped
        if top < scroll_offset {
            continue;
        }
        if top >= scroll_offset + viewport_height {
            break;
        }

        // Below the viewport height, so it fits a u16
        let visible_top = top - scroll_offset;
        let field_area = Rect {
            x: form_area.x + 1,
            y: form_area.y + rows(visible_top),
            width: content_width,
            height: rows(height.min(viewport_height - visible_top)),
        };
        let focused = active && ui.main_focus == MainFocus::Field(index);
        if let Some(control) = session.preview().control(question.id) {
            draw_field(frame, field_area, question, control, focused, ui, theme);
        }
    }

    if total_height > viewport_height {
        draw_scrollbar(
            frame,
            form_area,
            total_height,
            scroll_offset,
            viewport_height,
        );
    }
}

/// Block title of a control: the question text, starred when required.
fn field_title<'a>(question: &'a Question, focused: bool, theme: &Theme) -> Line<'a> {
    let mut spans = vec![Span::styled(
        format!(" {}", question.text),
        Style::default().fg(if focused { theme.highlight } else { theme.text }),
    )];
    if question.required {
        spans.push(Span::styled(" *", Style::default().fg(theme.error)));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

fn draw_field(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    control: &Control,
    focused: bool,
    ui: &UiState,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            theme.primary
        } else {
            theme.border
        }))
        .title(field_title(question, focused, theme));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text_style = Style::default().fg(theme.text);
    let placeholder_style = Style::default()
        .fg(theme.border)
        .add_modifier(Modifier::ITALIC);

    match control {
        Control::Text(value) | Control::Number(value) => {
            frame.render_widget(Paragraph::new(value.as_str()).style(text_style), inner);
            if focused {
                place_cursor(frame, inner, value, ui.cursor);
            }
        }
        Control::Date(value) => {
            let widget = if value.is_empty() && !focused {
                Paragraph::new(locale::DATE_PLACEHOLDER).style(placeholder_style)
            } else {
                Paragraph::new(value.as_str()).style(text_style)
            };
            frame.render_widget(widget, inner);
            if focused {
                place_cursor(frame, inner, value, ui.cursor);
            }
        }
        Control::Paragraph(value) => {
            let widget = Paragraph::new(value.as_str())
                .style(text_style)
                .wrap(Wrap { trim: false });
            frame.render_widget(widget, inner);
            if focused {
                place_cursor(frame, inner, value, ui.cursor);
            }
        }
        Control::Switch(on) => {
            let (marker, label) = if *on {
                ("[✓]", locale::SWITCH_ON)
            } else {
                ("[ ]", locale::SWITCH_OFF)
            };
            let widget = Paragraph::new(format!("{marker} {label}"))
                .style(Style::default().fg(if *on { theme.success } else { theme.text }));
            frame.render_widget(widget, inner);
        }
        Control::Select(chosen) => {
            let line = select_line(question, *chosen, focused, ui.highlight(question.id), theme);
            frame.render_widget(Paragraph::new(line), inner);
        }
        Control::Radio(chosen) => {
            let highlight = ui.highlight(question.id);
            let items: Vec<ListItem> = question
                .options
                .iter()
                .enumerate()
                .map(|(idx, option)| {
                    let marker = if *chosen == Some(idx) { "(●)" } else { "( )" };
                    let style = if focused && idx == highlight {
                        Style::default()
                            .fg(theme.text)
                            .bg(theme.selected_bg)
                            .add_modifier(Modifier::BOLD)
                    } else if *chosen == Some(idx) {
                        Style::default().fg(theme.highlight)
                    } else {
                        text_style
                    };
                    ListItem::new(format!("{marker} {option}")).style(style)
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
    }
}

/// One-line dropdown: the chosen option, or while focused, the highlighted one.
fn select_line<'a>(
    question: &'a Question,
    chosen: Option<usize>,
    focused: bool,
    highlight: usize,
    theme: &Theme,
) -> Line<'a> {
    if focused && !question.options.is_empty() {
        let highlight = highlight.min(question.options.len() - 1);
        let mut spans = vec![
            Span::styled("◀ ", Style::default().fg(theme.primary)),
            Span::styled(
                question.options[highlight].as_str(),
                Style::default()
                    .fg(theme.text)
                    .bg(theme.selected_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(theme.primary)),
        ];
        if chosen == Some(highlight) {
            spans.push(Span::styled(" ✓", Style::default().fg(theme.success)));
        }
        return Line::from(spans);
    }

    match chosen.and_then(|idx| question.options.get(idx)) {
        Some(option) => Line::from(vec![
            Span::styled("▼ ", Style::default().fg(theme.border)),
            Span::styled(option.as_str(), Style::default().fg(theme.highlight)),
        ]),
        None => Line::from(vec![
            Span::styled("▼ ", Style::default().fg(theme.border)),
            Span::styled(
                locale::SELECT_PLACEHOLDER,
                Style::default()
                    .fg(theme.border)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
    }
}

/// Put the terminal cursor at character `cursor` of `value` (line-aware).
fn place_cursor(frame: &mut Frame, inner: Rect, value: &str, cursor: usize) {
    let before: String = value.chars().take(cursor).collect();
    let row = before.matches('\n').count() as u16;
    let col = before
        .rsplit('\n')
        .next()
        .map_or(0, |line| line.chars().count()) as u16;
    let x = inner.x + col;
    let y = inner.y + row;
    if x < inner.x + inner.width && y < inner.y + inner.height {
        frame.set_cursor_position((x, y));
    }
}

// Modals

/// A `width` x `height` rectangle centered in `area`, clamped to it.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Clear `area` and draw the modal frame; returns the inner area.
fn draw_modal_frame(frame: &mut Frame, area: Rect, modal: &ModalShell, theme: &Theme) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary))
        .title(format!(" {} ", modal.title()))
        .title_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// A modal that is closing keeps being drawn, dimmed, until it unmounts.
fn dim_if_closing(frame: &mut Frame, area: Rect, modal: &ModalShell) {
    if !modal.is_open() {
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));
    }
}

fn draw_editor_modal(
    frame: &mut Frame,
    screen: Rect,
    session: &FormBuilder,
    ui: &mut UiState,
    theme: &Theme,
) {
    let modal = session.editor_modal();
    let editor = session.editor();
    let draft = editor.draft();
    let count = draft.options.len();

    let option_rows = if editor.shows_options() {
        let room = usize::from(screen.height.saturating_sub(EDITOR_ROWS_WITH_OPTIONS));
        count.min(MAX_OPTION_ROWS).min(room)
    } else {
        0
    };
    if let EditorFocus::Option(index) = ui.editor_focus {
        follow(&mut ui.option_scroll, index, index + 1, option_rows);
    }
    ui.option_scroll = ui.option_scroll.min(count.saturating_sub(option_rows));

    let ui = &*ui;
    let active = Layer::of(session) == Layer::Editor && modal.is_open();
    let focus = |target: EditorFocus| active && ui.editor_focus == target;

    let mut constraints = vec![
        Constraint::Length(3), // Question text
        Constraint::Length(1), // Error
        Constraint::Length(3), // Kind
        Constraint::Length(1), // Required
    ];
    if editor.shows_options() {
        constraints.push(Constraint::Length(3)); // New option
        constraints.push(Constraint::Length(rows(option_rows))); // Options
    }
    constraints.push(Constraint::Length(3)); // Buttons
    let content_height = constraints
        .iter()
        .map(|c| match c {
            Constraint::Length(n) => *n,
            _ => 0,
        })
        .fold(0u16, u16::saturating_add);

    let width = screen.width.saturating_sub(4).min(70);
    let area = centered_rect(screen, width, content_height.saturating_add(2));
    let inner = draw_modal_frame(frame, area, modal, theme);
    let layout = Layout::default()
        .direction(Axis::Vertical)
        .constraints(constraints)
        .split(inner);

    // Question text
    let text_focused = focus(EditorFocus::Text);
    let text_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if ui.editor_error.is_some() {
            theme.error
        } else if text_focused {
            theme.primary
        } else {
            theme.border
        }))
        .title(format!(" {} ", locale::QUESTION_TEXT_LABEL));
    let text_inner = text_block.inner(layout[0]);
    frame.render_widget(
        Paragraph::new(draft.text.as_str())
            .style(Style::default().fg(theme.text))
            .block(text_block),
        layout[0],
    );
    if text_focused {
        place_cursor(frame, text_inner, &draft.text, ui.cursor);
    }

    if let Some(error) = ui.editor_error {
        frame.render_widget(
            Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(theme.error)),
            layout[1],
        );
    }

    // Kind selector
    let kind_focused = focus(EditorFocus::Kind);
    let kind = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(theme.primary)),
        Span::styled(
            draft.kind.label(),
            Style::default().fg(theme.text).add_modifier(if kind_focused {
                Modifier::BOLD
            } else {
                Modifier::empty()
            }),
        ),
        Span::styled(" ▶", Style::default().fg(theme.primary)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if kind_focused {
                theme.primary
            } else {
                theme.border
            }))
            .title(format!(" {} ", locale::QUESTION_KIND_LABEL)),
    );
    frame.render_widget(kind, layout[2]);

    // Required checkbox
    let marker = if draft.required { "[✓]" } else { "[ ]" };
    let required_style = if focus(EditorFocus::Required) {
        Style::default()
            .fg(theme.text)
            .bg(theme.selected_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    frame.render_widget(
        Paragraph::new(format!(" {marker} {}", locale::REQUIRED_LABEL)).style(required_style),
        layout[3],
    );

    let mut next_row = 4;
    if editor.shows_options() {
        let option_focused = focus(EditorFocus::NewOption);
        let buffer = editor.new_option();
        let option_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if option_focused {
                theme.primary
            } else {
                theme.border
            }))
            .title(format!(" {} ", locale::OPTIONS_LABEL))
            .title_bottom(Line::from(format!(" Enter: {} ", locale::ADD_OPTION)).right_aligned());
        let option_inner = option_block.inner(layout[next_row]);
        let input = if buffer.is_empty() && !option_focused {
            Paragraph::new(locale::NEW_OPTION_PLACEHOLDER).style(
                Style::default()
                    .fg(theme.border)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(buffer).style(Style::default().fg(theme.text))
        };
        frame.render_widget(input.block(option_block), layout[next_row]);
        if option_focused {
            place_cursor(frame, option_inner, buffer, ui.cursor);
        }

        let items: Vec<ListItem> = draft
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                let arrow = |direction: Direction, symbol: &'static str| {
                    if editor.can_move_option(idx, direction) {
                        Span::styled(symbol, Style::default().fg(theme.primary))
                    } else {
                        Span::styled(symbol, Style::default().fg(theme.border))
                    }
                };
                let style = if focus(EditorFocus::Option(idx)) {
                    Style::default()
                        .fg(theme.text)
                        .bg(theme.selected_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {}. {option} ", idx + 1), style),
                    arrow(Direction::Up, "↑"),
                    arrow(Direction::Down, "↓"),
                    Span::styled(" ✕", Style::default().fg(theme.error)),
                ]))
            })
            .collect();
        if option_rows > 0 {
            let list_area = layout[next_row + 1];
            let mut list_state = ListState::default().with_offset(ui.option_scroll);
            frame.render_stateful_widget(List::new(items), list_area, &mut list_state);
            if count > option_rows {
                draw_scrollbar(frame, list_area, count, ui.option_scroll, option_rows);
            }
        }
        next_row += 2;
    }

    // Buttons
    let buttons = Layout::default()
        .direction(Axis::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[next_row]);
    draw_button(
        frame,
        buttons[0],
        editor.submit_label(),
        focus(EditorFocus::Submit),
        theme,
    );
    draw_button(
        frame,
        buttons[1],
        locale::CANCEL,
        focus(EditorFocus::Cancel),
        theme,
    );

    dim_if_closing(frame, area, modal);
}

fn draw_response_modal(
    frame: &mut Frame,
    screen: Rect,
    session: &FormBuilder,
    ui: &UiState,
    theme: &Theme,
) {
    let modal = session.response_modal();
    let summary = session.controller().response_summary();

    let mut lines = Vec::with_capacity(summary.len() * 3);
    for entry in &summary {
        lines.push(Line::from(Span::styled(
            entry.text,
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        )));
        let answer_style = if entry.answer == NO_ANSWER {
            Style::default()
                .fg(theme.border)
                .add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(theme.text)
        };
        lines.extend(
            entry
                .answer
                .split('\n')
                .map(|line| Line::from(Span::styled(format!("  {line}"), answer_style))),
        );
        lines.push(Line::default());
    }

    let width = screen.width.saturating_sub(4).min(70);
    let height = rows(lines.len())
        .saturating_add(2)
        .min(screen.height.saturating_sub(2));
    let area = centered_rect(screen, width, height);
    let inner = draw_modal_frame(frame, area, modal, theme);

    let max_scroll = rows(lines.len()).saturating_sub(inner.height);
    let scroll = ui.response_scroll.min(max_scroll);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        inner,
    );

    dim_if_closing(frame, area, modal);
}
