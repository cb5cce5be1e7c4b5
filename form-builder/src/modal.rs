//! Overlay container state with a delayed unmount for exit transitions.
//!
//! The shell keeps a `rendered` flag that is decoupled from `open`: opening
//! renders immediately, closing keeps the content rendered for a grace period
//! so an exit transition can play. Time is always passed in by the caller.

use std::time::{Duration, Instant};

/// How long a closed modal stays rendered.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(300);

/// Lifecycle phase of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    /// Not rendered.
    Closed,
    /// Just opened; becomes `Open` on the next tick.
    Opening,
    Open,
    /// Closed but still rendered until the pending unmount fires.
    Closing,
}

/// An unmount scheduled for a point in time.
///
/// Owned by the shell: replacing or dropping it cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredUnmount {
    due: Instant,
}

impl DeferredUnmount {
    fn after(now: Instant, delay: Duration) -> Self {
        Self { due: now + delay }
    }

    /// When the unmount fires.
    pub fn due(&self) -> Instant {
        self.due
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}

/// Generic modal container state.
#[derive(Debug, Clone)]
pub struct ModalShell {
    title: String,
    phase: ModalPhase,
    grace: Duration,
    pending: Option<DeferredUnmount>,
}

impl ModalShell {
    /// Create a closed modal with the default grace period.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            phase: ModalPhase::Closed,
            grace: DEFAULT_GRACE_PERIOD,
            pending: None,
        }
    }

    /// Set the grace period (builder style).
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn grace_period(&self) -> Duration {
        self.grace
    }

    /// The scheduled unmount, while closing.
    pub fn pending_unmount(&self) -> Option<DeferredUnmount> {
        self.pending
    }

    /// Whether the modal is logically open (accepts input).
    pub fn is_open(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    /// Whether anything should be displayed.
    pub fn is_rendered(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    /// Follow the owner's `open` flag.
    pub fn set_open(&mut self, open: bool, now: Instant) {
        match (open, self.phase) {
            (true, ModalPhase::Closed | ModalPhase::Closing) => {
                if self.pending.take().is_some() {
                    tracing::debug!(title = %self.title, "modal reopened before unmount");
                }
                self.phase = ModalPhase::Opening;
            }
            (false, ModalPhase::Opening | ModalPhase::Open) => {
                self.pending = Some(DeferredUnmount::after(now, self.grace));
                self.phase = ModalPhase::Closing;
            }
            _ => {}
        }
        if !open {
            self.tick(now);
        }
    }

    /// Advance time-driven transitions.
    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            ModalPhase::Opening => self.phase = ModalPhase::Open,
            ModalPhase::Closing => {
                if self.pending.is_none_or(|pending| pending.is_due(now)) {
                    self.pending = None;
                    self.phase = ModalPhase::Closed;
                    tracing::debug!(title = %self.title, "modal unmounted");
                }
            }
            ModalPhase::Closed | ModalPhase::Open => {}
        }
    }

    /// The close affordance: hand the request to the owner.
    ///
    /// The shell does not change its own state; the owner decides whether to
    /// flip `open`.
    pub fn request_close(&self, on_close: impl FnOnce()) {
        if self.is_open() {
            on_close();
        }
    }
}
