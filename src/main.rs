//! shutter-remote firmware entry point (nRF52840).
//!
//! Startup: status LED on, panel up, modem UART up, join the network
//! behind the "Connecting" screen, then hand everything to the controller
//! loop until it puts the chip into System OFF.
//!
//! Build with `SHUTTER_WIFI_SSID` / `SHUTTER_WIFI_PASSWORD` set:
//! `cargo run --release --features embedded --target thumbv7em-none-eabihf`

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::buffered_uarte::{self, BufferedUarte};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::{bind_interrupts, peripherals, uarte};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use shutter_remote::board::NrfBoard;
use shutter_remote::config::DISPLAY_BUFFER_LEN;
use shutter_remote::controller::{associate, Board, Controller, Settings};
use shutter_remote::net::{Credentials, EspAt};
use shutter_remote::ui::buttons::Buttons;
use shutter_remote::ui::display;

bind_interrupts!(struct Irqs {
    UARTE0 => buffered_uarte::InterruptHandler<peripherals::UARTE0>;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

/// UART ring buffers for the ESP-AT link.
const MODEM_RING_LEN: usize = 1024;

static DISPLAY_BUFFER: StaticCell<[u8; DISPLAY_BUFFER_LEN]> = StaticCell::new();
static MODEM_RX: StaticCell<[u8; MODEM_RING_LEN]> = StaticCell::new();
static MODEM_TX: StaticCell<[u8; MODEM_RING_LEN]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("shutter-remote starting");

    let settings = Settings::default();

    let mut board = NrfBoard::new(
        Buttons::new(p.P0_11.degrade(), p.P0_12.degrade()),
        Input::new(p.P0_03, Pull::Up),
        Output::new(p.P0_13, Level::Low, OutputDrive::Standard),
    );
    board.set_indicator(true);

    let spi = Spim::new_txonly(p.SPI3, Irqs, p.P0_26, p.P0_27, display::spi_config());
    let mut surface = unwrap!(display::init(
        spi,
        Output::new(p.P0_28, Level::High, OutputDrive::Standard),
        Output::new(p.P0_29, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_30, Level::High, OutputDrive::Standard),
        DISPLAY_BUFFER.init([0; DISPLAY_BUFFER_LEN]),
    ));

    let mut uart_config = uarte::Config::default();
    uart_config.parity = uarte::Parity::EXCLUDED;
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let uart = BufferedUarte::new(
        p.UARTE0,
        p.TIMER0,
        p.PPI_CH0,
        p.PPI_CH1,
        p.PPI_GROUP0,
        Irqs,
        p.P1_02,
        p.P1_01,
        uart_config,
        MODEM_RX.init([0; MODEM_RING_LEN]),
        MODEM_TX.init([0; MODEM_RING_LEN]),
    );
    let mut modem = EspAt::new(uart);

    let credentials = Credentials {
        ssid: env!("SHUTTER_WIFI_SSID"),
        password: env!("SHUTTER_WIFI_PASSWORD"),
    };
    if associate(&mut surface, &mut modem, &mut board, &credentials, &settings)
        .await
        .is_err()
    {
        // Unreachable on hardware: the board is already in System OFF.
        return;
    }

    let mut controller = Controller::new(surface, modem, board, settings);
    controller.run().await;
}
