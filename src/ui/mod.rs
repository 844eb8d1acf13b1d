//! User interface subsystem - colour TFT + two physical buttons.
//!
//! The controller drives everything through the [`Surface`] capability so
//! the menu and feedback screens can be rendered (and checked) without a
//! panel attached.
//!
//! ## Components
//!
//! - **Display**: ST7735S 80×160 RGB565 TFT via SPI
//! - **Buttons**: 2 tactile switches with debouncing (CYCLE, ACTIVATE)

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;
pub mod input_logic;
pub mod screens;
pub mod surface;

pub use screens::{Banner, LoadingDots};
pub use surface::{Canvas, Surface};

/// Colours used by the menu and feedback screens (M5 LCD palette).
pub mod palette {
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

    pub const BLACK: Rgb565 = Rgb565::BLACK;
    pub const WHITE: Rgb565 = Rgb565::WHITE;
    pub const RED: Rgb565 = Rgb565::RED;
    pub const NAVY: Rgb565 = Rgb565::new(0, 0, 15);
    pub const DARK_GREEN: Rgb565 = Rgb565::new(0, 31, 0);
    pub const DARK_GREY: Rgb565 = Rgb565::new(15, 31, 15);
    pub const MAROON: Rgb565 = Rgb565::new(15, 0, 0);
    pub const PURPLE: Rgb565 = Rgb565::new(15, 0, 15);
}
