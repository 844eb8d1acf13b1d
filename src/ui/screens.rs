//! Full-screen feedback and the network loading screen.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::palette::{DARK_GREEN, PURPLE, RED, WHITE};
use super::Surface;

/// Vertical distance of the loading caption / dots from screen centre.
const LOADING_TEXT_OFFSET: i32 = 10;

/// Height of the strip repainted behind the loading dots.
const LOADING_DOTS_HEIGHT: u32 = 12;

/// Screens that replace the menu for one dwell period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Banner {
    /// Shutter acknowledged the command with 200.
    Success,
    /// No response or a non-200 status.
    Failure,
    /// Battery warning just became active.
    LowBattery,
    /// Could not join the Wi-Fi network at startup.
    NoNetwork,
}

impl Banner {
    pub const fn text(self) -> &'static str {
        match self {
            Banner::Success => "OK",
            Banner::Failure => "ERROR",
            Banner::LowBattery => "LOW BAT",
            Banner::NoNetwork => "NO WIFI",
        }
    }

    pub const fn background(self) -> Rgb565 {
        match self {
            Banner::Success => DARK_GREEN,
            Banner::Failure | Banner::LowBattery | Banner::NoNetwork => RED,
        }
    }

    /// Paint the banner over the whole surface.
    pub fn draw<S: Surface>(self, surface: &mut S) {
        surface.fill_screen(self.background());
        let center = surface.center();
        surface.draw_centered_text(self.text(), center, WHITE);
    }
}

/// Paint the "Connecting" screen shown while the network joins.
pub fn draw_connecting<S: Surface>(surface: &mut S) {
    surface.fill_screen(PURPLE);
    let center = surface.center();
    surface.draw_centered_text(
        "Connecting",
        center - Point::new(0, LOADING_TEXT_OFFSET),
        WHITE,
    );
}

/// Animated "." / ".." / "..." indicator below the connecting caption.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadingDots {
    step: u8,
}

impl LoadingDots {
    const FRAMES: [&'static str; 3] = [".", "..", "..."];

    pub const fn new() -> Self {
        Self { step: 0 }
    }

    /// Frame that the next call to [`LoadingDots::advance`] will draw.
    pub fn frame(&self) -> &'static str {
        Self::FRAMES[self.step as usize]
    }

    /// Draw the current frame and move to the next one.
    pub fn advance<S: Surface>(&mut self, surface: &mut S) {
        let center = surface.center() + Point::new(0, LOADING_TEXT_OFFSET);
        let strip = Rectangle::with_center(
            center,
            Size::new(surface.size().width, LOADING_DOTS_HEIGHT),
        );
        surface.fill_rect(strip, PURPLE);
        surface.draw_centered_text(self.frame(), center, WHITE);
        self.step = (self.step + 1) % Self::FRAMES.len() as u8;
    }
}
