//! GPIO button levels.
//!
//! Two physical buttons (active-low with internal pull-up):
//!   - CYCLE    - move the highlight to the next menu slot
//!   - ACTIVATE - run the highlighted slot
//!
//! Only raw levels are read here; edge detection and debouncing happen in
//! [`input_logic`](crate::ui::input_logic) once per controller tick. Both
//! pins also wake the chip from System OFF.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

use crate::ui::input_logic::ButtonLevels;

pub struct Buttons<'d> {
    cycle: Input<'d>,
    activate: Input<'d>,
}

impl<'d> Buttons<'d> {
    pub fn new(cycle: AnyPin, activate: AnyPin) -> Self {
        Self {
            cycle: Input::new(cycle, Pull::Up),
            activate: Input::new(activate, Pull::Up),
        }
    }

    /// Current levels, `true` while held down.
    pub fn levels(&self) -> ButtonLevels {
        ButtonLevels {
            cycle: self.cycle.is_low(),
            activate: self.activate.is_low(),
        }
    }
}
