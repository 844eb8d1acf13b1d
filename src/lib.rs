//! Library interface for shutter-remote.
//!
//! Everything that does not touch a peripheral lives here: the menu, the
//! shutter registry, URL assembly, power policy, the controller loop and
//! the ESP-AT modem driver. The firmware in `main.rs` supplies the board,
//! display and UART; the tests supply fakes.
//!
//! Usage: `cargo test --lib` (unit tests) or `cargo test` (adds
//! `tests/integration.rs`).
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// ═══════════════════════════════════════════════════════════════════════════
// Host-testable modules
// ═══════════════════════════════════════════════════════════════════════════

pub mod bounded;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod menu;
pub mod net;
pub mod power_logic;
pub mod target;
pub mod ui;

// ═══════════════════════════════════════════════════════════════════════════
// Hardware modules (nRF52840 only)
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(feature = "embedded")]
pub mod board;
#[cfg(feature = "embedded")]
pub mod power;

pub use command::{CommandOutcome, Transport};
pub use controller::{associate, Board, Controller, Settings, Tick};
pub use error::{Error, TransportError};
pub use menu::{Action, Menu, MenuButton};
pub use target::{CommandVerb, Target, Targets};

// ═══════════════════════════════════════════════════════════════════════════
// Cross-module tests
// ═══════════════════════════════════════════════════════════════════════════
