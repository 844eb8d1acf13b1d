//! Idle-timeout and battery-warning policy.
//!
//! Pure state machine: the caller supplies timestamps and the sampled
//! battery flag, so the policy runs identically on the host and on target.

/// Last activity and last observed battery flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerState {
    pub last_activity_ms: u64,
    pub last_warning: bool,
}

/// Tracks inactivity and battery-warning transitions.
pub struct PowerMonitor {
    state: PowerState,
    idle_timeout_ms: u64,
}

impl PowerMonitor {
    /// Start tracking from `now_ms` with the battery flag as currently read.
    pub fn new(now_ms: u64, warning: bool, idle_timeout_ms: u64) -> Self {
        Self {
            state: PowerState {
                last_activity_ms: now_ms,
                last_warning: warning,
            },
            idle_timeout_ms,
        }
    }

    /// Record a button press.
    pub fn activity(&mut self, now_ms: u64) {
        self.state.last_activity_ms = now_ms;
    }

    /// Store the new battery flag; true only on an inactive→active change.
    pub fn battery_rising_edge(&mut self, warning: bool) -> bool {
        let rising = warning && !self.state.last_warning;
        self.state.last_warning = warning;
        rising
    }

    /// Milliseconds since the last press.
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.state.last_activity_ms)
    }

    /// Whether the device has been idle long enough to sleep.
    pub fn idle_expired(&self, now_ms: u64) -> bool {
        self.idle_ms(now_ms) >= self.idle_timeout_ms
    }

    pub fn state(&self) -> PowerState {
        self.state
    }
}
