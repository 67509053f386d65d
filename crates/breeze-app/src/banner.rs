//! Welcome banner shown after a successful sign-in or sign-up.

use std::time::{Duration, Instant};

/// A message that disappears after a fixed time or when tapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeBanner {
    message: String,
    shown_at: Instant,
    duration: Duration,
}

impl WelcomeBanner {
    pub fn new(message: impl Into<String>, shown_at: Instant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at,
            duration,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }

    /// Remaining fraction of the display time, from 1.0 down to 0.0.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(self.shown_at).as_secs_f32();
        (1.0 - elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}
