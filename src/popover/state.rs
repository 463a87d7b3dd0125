use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverTransition {
    Show,
    Hide,
}

/// Visibility of the popover plus which pinned page it shows.
#[derive(Debug, Default)]
pub struct PopoverState {
    shown: bool,
    selected_page: usize,
    dismissed_at: Option<Instant>,
}

impl PopoverState {
    /// A tray click this soon after a focus-loss dismissal is the same click
    /// that caused the dismissal.
    pub const DISMISS_GRACE: Duration = Duration::from_millis(300);

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn toggle(&mut self) -> PopoverTransition {
        self.shown = !self.shown;
        self.dismissed_at = None;
        if self.shown {
            PopoverTransition::Show
        } else {
            PopoverTransition::Hide
        }
    }

    /// Records that the popover closed because it lost focus. Returns whether
    /// it was shown.
    pub fn dismiss(&mut self, now: Instant) -> bool {
        if !self.shown {
            return false;
        }
        self.shown = false;
        self.dismissed_at = Some(now);
        true
    }

    /// Consumes a pending dismissal if it happened within the grace period.
    pub fn take_recent_dismissal(&mut self, now: Instant) -> bool {
        match self.dismissed_at.take() {
            Some(at) => now.saturating_duration_since(at) < Self::DISMISS_GRACE,
            None => false,
        }
    }

    pub fn selected_page(&self) -> usize {
        self.selected_page
    }

    /// Selects a page; out-of-range indices are ignored.
    pub fn select_page(&mut self, index: usize, page_count: usize) -> bool {
        if index >= page_count {
            return false;
        }
        self.selected_page = index;
        true
    }
}
