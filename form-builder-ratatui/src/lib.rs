//! # form-builder-ratatui
//!
//! Ratatui frontend for form-builder.
//!
//! Shows the question list as a live, fillable preview and opens the question
//! editor and the captured responses as modal overlays. Closed modals stay on
//! screen, dimmed, for the session's grace period before they unmount.
//!
//! ## Keys
//!
//! - `Tab`/`Shift+Tab`, `↑`/`↓`: move focus
//! - `Enter`: press the focused button
//! - `Space`: toggle a switch or pick the highlighted choice
//! - `←`/`→`: move the highlight of a choice control, or the text cursor
//! - `Ctrl+N`: new question; `F2`/`Ctrl+E`: edit the focused question
//! - `Ctrl+↑`/`Ctrl+↓` (or `Alt`): move the focused question or option
//! - `F10`: validate the form; `Esc`: close the editor, or quit
//!
//! ## Usage
//!
//! ```rust,no_run
//! use form_builder::FormBuilder;
//! use form_builder_ratatui::RatatuiFrontend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut session = FormBuilder::new();
//!     session.run(RatatuiFrontend::new())?;
//!     for entry in session.controller().response_summary() {
//!         println!("{}: {}", entry.text, entry.answer);
//!     }
//!     Ok(())
//! }
//! ```

mod backend;
mod render;
mod state;

pub use backend::{DEFAULT_TICK, RatatuiFrontend, RatatuiFrontendError, Theme};
