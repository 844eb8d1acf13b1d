//! Button edge detection and selection arithmetic.
//!
//! The board only reports raw levels; everything that turns levels into
//! "pressed once" events lives here so it can be tested on the host.

/// Advance a cursor by one, wrapping to 0 after `item_count - 1`.
pub fn next_wrapping(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else {
        (selected + 1) % item_count
    }
}

/// Raw button levels sampled in one tick (`true` = held down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels {
    pub cycle: bool,
    pub activate: bool,
}

/// Press events latched by the most recent refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Presses {
    pub cycle: bool,
    pub activate: bool,
}

/// Debounced press detector for one button.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeDetector {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Returns true only on the transition to pressed.
    ///
    /// Level changes within `debounce_ms` of the last accepted change are
    /// contact bounce and ignored.
    pub fn update(&mut self, pressed: bool, now_ms: u64, debounce_ms: u64) -> bool {
        if pressed == self.was_pressed {
            return false;
        }

        if let Some(last) = self.last_change_ms {
            if now_ms.saturating_sub(last) < debounce_ms {
                return false;
            }
        }

        self.was_pressed = pressed;
        self.last_change_ms = Some(now_ms);
        pressed
    }
}

/// Latch holding the press events seen at the last refresh.
///
/// The controller consumes the latched presses at the start of a tick and
/// refreshes the latch at the end, so a press registers once per
/// press-release cycle no matter how long the button is held.
#[derive(Clone, Copy, Debug)]
pub struct ButtonLatch {
    cycle: EdgeDetector,
    activate: EdgeDetector,
    latched: Presses,
    debounce_ms: u64,
}

impl ButtonLatch {
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            cycle: EdgeDetector::new(),
            activate: EdgeDetector::new(),
            latched: Presses {
                cycle: false,
                activate: false,
            },
            debounce_ms,
        }
    }

    /// Sample new levels and latch any fresh presses.
    pub fn refresh(&mut self, levels: ButtonLevels, now_ms: u64) {
        self.latched = Presses {
            cycle: self.cycle.update(levels.cycle, now_ms, self.debounce_ms),
            activate: self.activate.update(levels.activate, now_ms, self.debounce_ms),
        };
    }

    /// Take the latched presses, leaving the latch empty.
    pub fn take(&mut self) -> Presses {
        core::mem::take(&mut self.latched)
    }
}
