//! Shutter registry and command verbs.

use heapless::String;

use crate::bounded::truncated;
use crate::config::{MAX_TARGET_NAME_LEN, TARGET_COUNT, TARGET_NAMES};
use crate::ui::input_logic::next_wrapping;

/// Operation requested of a shutter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandVerb {
    Raise,
    Stop,
    Lower,
}

impl CommandVerb {
    /// All verbs in enumeration order.
    pub const ALL: [CommandVerb; 3] = [CommandVerb::Raise, CommandVerb::Stop, CommandVerb::Lower];

    /// Token substituted into the actuator URL (`shutter_<token>`).
    pub const fn token(self) -> &'static str {
        match self {
            CommandVerb::Raise => "up",
            CommandVerb::Stop => "stop",
            CommandVerb::Lower => "down",
        }
    }

    /// Menu caption for the slot bound to this verb.
    pub const fn caption(self) -> &'static str {
        match self {
            CommandVerb::Raise => "Up",
            CommandVerb::Stop => "Stop",
            CommandVerb::Lower => "Down",
        }
    }
}

/// A network-addressable shutter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    name: String<MAX_TARGET_NAME_LEN>,
}

impl Target {
    /// Create a target; names longer than the bound are truncated.
    pub fn new(name: &str) -> Self {
        Self {
            name: truncated(name),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Fixed, ordered set of shutters plus the one currently selected.
pub struct Targets {
    targets: [Target; TARGET_COUNT],
    selected: usize,
}

impl Targets {
    /// Build the registry with the first target selected.
    pub fn new(names: [&str; TARGET_COUNT]) -> Self {
        Self::starting_at(names, 0)
    }

    /// Build the registry with `selected` (wrapped into range) selected.
    pub fn starting_at(names: [&str; TARGET_COUNT], selected: usize) -> Self {
        Self {
            targets: names.map(Target::new),
            selected: selected % TARGET_COUNT,
        }
    }

    /// Advance to the next shutter, wrapping after the last.
    pub fn cycle(&mut self) -> &Target {
        self.selected = next_wrapping(self.selected, TARGET_COUNT);
        self.current()
    }

    pub fn current(&self) -> &Target {
        &self.targets[self.selected]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Verbs every shutter understands, in enumeration order.
    pub fn command_verbs(&self) -> &'static [CommandVerb; 3] {
        &CommandVerb::ALL
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self::new(TARGET_NAMES)
    }
}
