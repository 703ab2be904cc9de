//! Resend-eligibility countdown.

/// Counts whole seconds down to zero, at which point resend is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCountdown {
    cooldown: u32,
    remaining: u32,
}

impl ResendCountdown {
    /// Starts a countdown at `cooldown` seconds.
    pub fn new(cooldown: u32) -> Self {
        Self {
            cooldown,
            remaining: cooldown,
        }
    }

    /// Seconds remaining before resend is allowed.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True once the countdown has reached zero.
    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    /// Advances by one elapsed second.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Restarts the cooldown after a manual resend.
    pub fn reset(&mut self) {
        self.remaining = self.cooldown;
    }

    /// Formats the remaining time as `m:ss` with zero-padded seconds.
    pub fn format(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
