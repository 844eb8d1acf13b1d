//! nRF52840 implementation of [`Board`].

use embassy_nrf::gpio::{Input, Output};
use embassy_time::{Instant, Timer};

use crate::config::{ACTIVATE_BUTTON_PIN, CYCLE_BUTTON_PIN};
use crate::controller::Board;
use crate::power;
use crate::ui::buttons::Buttons;
use crate::ui::input_logic::ButtonLevels;

pub struct NrfBoard<'d> {
    buttons: Buttons<'d>,
    /// Charger LBO output, pulled low while the cell is nearly flat.
    battery_low: Input<'d>,
    led: Output<'d>,
}

impl<'d> NrfBoard<'d> {
    pub fn new(buttons: Buttons<'d>, battery_low: Input<'d>, led: Output<'d>) -> Self {
        Self {
            buttons,
            battery_low,
            led,
        }
    }
}

impl Board for NrfBoard<'_> {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    async fn delay_ms(&mut self, ms: u64) {
        Timer::after_millis(ms).await;
    }

    fn read_buttons(&mut self) -> ButtonLevels {
        self.buttons.levels()
    }

    fn battery_warning(&mut self) -> bool {
        self.battery_low.is_low()
    }

    fn set_indicator(&mut self, high: bool) {
        if high {
            self.led.set_high();
        } else {
            self.led.set_low();
        }
    }

    fn deep_sleep(&mut self) {
        power::system_off(&[CYCLE_BUTTON_PIN, ACTIVATE_BUTTON_PIN]);
    }
}
