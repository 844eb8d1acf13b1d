//! Power management - System OFF for battery operation.
//!
//! nRF52840 power modes:
//! - System ON: Normal operation (~3 mA with the modem link idle)
//! - System OFF: Deep sleep, wake on GPIO SENSE (~0.4 µA)
//!
//! Waking from System OFF is a reset: the firmware boots from scratch and
//! joins the network again.

use embassy_nrf::pac;
use embassy_nrf::pac::gpio::vals;

/// Arm SENSE-low wake on the given P0 pins and enter System OFF.
pub fn system_off(wake_pins: &[usize]) -> ! {
    for &pin in wake_pins {
        pac::P0.pin_cnf(pin).write(|w| {
            w.set_dir(vals::Dir::INPUT);
            w.set_input(vals::Input::CONNECT);
            w.set_pull(vals::Pull::PULLUP);
            w.set_sense(vals::Sense::LOW);
        });
    }

    info!("power: entering System OFF");
    pac::POWER.systemoff().write(|w| w.set_systemoff(true));

    // With a debugger attached System OFF is only emulated; park here.
    loop {
        cortex_m::asm::wfe();
    }
}
