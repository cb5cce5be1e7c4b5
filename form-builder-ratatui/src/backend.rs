//! Ratatui frontend implementation of the FormFrontend trait.
//!
//! Shows the form builder on one screen: the add button, a scrollable live
//! preview of the form, and the editor/response modals drawn on top.

use crate::{render, state::UiState};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use form_builder::{FormBuilder, FormFrontend, locale};
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};
use thiserror::Error;

/// How often the event loop wakes up to let modal timers fire.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

/// Error type for the Ratatui frontend.
#[derive(Debug, Error)]
pub enum RatatuiFrontendError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup/restore error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Interactive terminal frontend for a [`FormBuilder`] session.
#[derive(Debug, Clone)]
pub struct RatatuiFrontend {
    /// Heading shown at the top of the screen.
    title: String,
    /// Color theme for the UI.
    theme: Theme,
    /// Poll interval of the event loop.
    tick: Duration,
}

impl Default for RatatuiFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiFrontend {
    /// Create a frontend with the default heading, theme and tick.
    pub fn new() -> Self {
        Self {
            title: locale::APP_TITLE.to_string(),
            theme: Theme::default(),
            tick: DEFAULT_TICK,
        }
    }

    /// Set the heading shown at the top of the screen.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the poll interval. Zero is raised to one millisecond.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFrontendError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(|err| RatatuiFrontendError::Terminal(err.to_string()))
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiFrontendError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut FormBuilder,
    ) -> Result<(), RatatuiFrontendError> {
        let mut ui = UiState::new();

        loop {
            session.sync(Instant::now());
            ui.clamp(session);
            terminal.draw(|frame| render::draw(frame, session, &mut ui, &self.theme, &self.title))?;

            if ui.should_quit() {
                tracing::info!(questions = session.questions().len(), "quit requested");
                return Ok(());
            }

            if !event::poll(self.tick)? {
                continue;
            }
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                tracing::trace!(code = ?key.code, modifiers = ?key.modifiers, "key");
                ui.handle_key(session, key);
            }
        }
    }
}

impl FormFrontend for RatatuiFrontend {
    type Error = RatatuiFrontendError;

    fn run(&self, session: &mut FormBuilder) -> Result<(), Self::Error> {
        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, session);
        // Restore even when the loop failed; the loop error wins.
        let restored = self.restore_terminal(&mut terminal);
        result.and(restored)
    }
}
