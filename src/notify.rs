//! Transient toast notification with auto-dismiss.
//!
//! At most one message is visible at a time. The pending dismissal is an
//! owned deadline on the state itself, checked from the event-loop tick;
//! a later `show` replaces the deadline, so a superseded timer cannot fire.

use std::time::{Duration, Instant};

/// How long a toast stays visible without being superseded or dismissed.
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    deadline: Instant,
}

/// Owner of the (at most one) visible toast.
#[derive(Debug, Default)]
pub struct ToastState {
    current: Option<Toast>,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text`, replacing any visible toast and restarting the countdown
    /// from `now`. Last message wins.
    pub fn show(&mut self, text: impl Into<String>, kind: ToastKind, now: Instant) {
        self.current = Some(Toast {
            text: text.into(),
            kind,
            deadline: now + TOAST_DURATION,
        });
    }

    pub fn success(&mut self, text: impl Into<String>, now: Instant) {
        self.show(text, ToastKind::Success, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.show(text, ToastKind::Error, now);
    }

    /// Hide immediately and cancel the pending countdown.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Dismiss the toast if its countdown has expired. Returns whether a
    /// dismissal happened on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(toast) if now >= toast.deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn visible(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_dismisses_after_duration() {
        let t0 = Instant::now();
        let mut toast = ToastState::new();
        toast.success("saved", t0);
        assert!(toast.visible().is_some());

        assert!(!toast.tick(t0 + TOAST_DURATION - Duration::from_millis(1)));
        assert!(toast.visible().is_some());

        assert!(toast.tick(t0 + TOAST_DURATION));
        assert!(toast.visible().is_none());
    }

    #[test]
    fn test_show_supersedes_pending_countdown() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(2);
        let mut toast = ToastState::new();
        let mut dismissals = 0;

        toast.show("A", ToastKind::Success, t0);
        toast.show("B", ToastKind::Error, t1);

        // The first countdown was replaced; nothing fires at t0 + 5s.
        for step in 0..=70u64 {
            let now = t0 + Duration::from_millis(step * 100);
            if toast.tick(now) {
                dismissals += 1;
                assert_eq!(now, t1 + TOAST_DURATION);
            } else if let Some(visible) = toast.visible() {
                assert_eq!(visible.text, "B");
            }
        }
        assert_eq!(dismissals, 1);
        assert!(toast.visible().is_none());
    }

    #[test]
    fn test_explicit_dismiss_cancels_countdown() {
        let t0 = Instant::now();
        let mut toast = ToastState::new();
        toast.error("nope", t0);
        toast.dismiss();
        assert!(toast.visible().is_none());
        assert!(!toast.tick(t0 + TOAST_DURATION));
    }
}
