//! Application-wide constants and compile-time configuration.
//!
//! Menu geometry, string bounds, the actuator URL contract and all timing
//! parameters live here so they can be tuned in one place.

// Menu

/// Number of on-screen menu slots.
pub const UI_SLOT_COUNT: usize = 4;

/// Slot whose label tracks the selected shutter.
pub const TARGET_SELECTOR_SLOT: usize = 0;

/// Maximum label length in bytes.
pub const MAX_LABEL_LEN: usize = 19;

/// Width of the white highlight border around the selected slot (pixels).
pub const SELECTION_PADDING: u32 = 3;

// Shutters

/// Number of addressable shutters.
pub const TARGET_COUNT: usize = 3;

/// Maximum shutter name length in bytes (also the URL substitution bound).
pub const MAX_TARGET_NAME_LEN: usize = 15;

/// Shutter host names, in menu cycling order.
pub const TARGET_NAMES: [&str; TARGET_COUNT] = ["bedroom-guest", "living-room", "bedroom-1"];

// Commands

/// Maximum verb token length in bytes.
pub const MAX_VERB_TOKEN_LEN: usize = 20;

/// Capacity of an assembled command URL.
pub const URL_CAPACITY: usize = 100;

/// Fixed pieces of the actuator URL:
/// `http://shutter-<name>.lan/control?cmd=event,shutter_<token>`
pub const URL_PREFIX: &str = "http://shutter-";
pub const URL_INFIX: &str = ".lan/control?cmd=event,shutter_";

/// HTTP status the actuators answer with on success.
pub const HTTP_OK: u16 = 200;

// Timing

/// Control loop period (ms).
pub const TICK_MS: u64 = 10;

/// How long OK / ERROR / LOW BAT screens stay up (ms).
pub const FEEDBACK_DWELL_MS: u64 = 1_000;

/// Inactivity before deep sleep (ms).
pub const IDLE_TIMEOUT_MS: u64 = 10_000;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Loading indicator step while the network joins (ms).
pub const LOADING_STEP_MS: u64 = 500;

/// Give up joining the network after this long (ms).
pub const WIFI_CONNECT_TIMEOUT_MS: u64 = 30_000;

// Display (ST7735S 0.96" 80x160, portrait)

pub const SCREEN_WIDTH: u32 = 80;
pub const SCREEN_HEIGHT: u32 = 160;

/// RAM window offset of the 80x160 glass inside the 132x162 controller.
pub const PANEL_OFFSET_X: u16 = 26;
pub const PANEL_OFFSET_Y: u16 = 1;

/// Bytes batched per SPI write when pushing pixels to the panel.
pub const DISPLAY_BUFFER_LEN: usize = 512;

// Modem (ESP32 running ESP-AT)

/// Receive buffer for modem replies.
pub const MODEM_RX_CAPACITY: usize = 512;

/// Largest `+IPD` payload ESP-AT delivers in one frame.
pub const MODEM_IPD_MAX_LEN: usize = 2920;

/// Longest AT command line we build.
pub const MODEM_COMMAND_CAPACITY: usize = 160;

/// Longest HTTP request we send.
pub const HTTP_REQUEST_CAPACITY: usize = 192;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Logical names only; the concrete `embassy_nrf::peripherals::*` are picked
// in `main.rs`.  Adjust for your own board.
//
//   Button CYCLE     → P0.11  (active-low, pull-up, wakes from System OFF)
//   Button ACTIVATE  → P0.12  (active-low, pull-up, wakes from System OFF)
//   Battery LBO      → P0.03  (charger low-battery output, active-low)
//   Status LED       → P0.13
//   TFT SCK/MOSI     → P0.26 / P0.27
//   TFT CS/DC/RST    → P0.28 / P0.29 / P0.30
//   Modem TX/RX      → P1.01 / P1.02  (UARTE0, 115200 8N1)

/// P0 pin numbers of the wake buttons (needed for SENSE configuration).
pub const CYCLE_BUTTON_PIN: usize = 11;
pub const ACTIVATE_BUTTON_PIN: usize = 12;
