//! ST7735S 0.96" TFT (80x160, RGB565) wrapper.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7735s;
use mipidsi::options::{ColorInversion, ColorOrder};
use mipidsi::Builder;

use crate::config::{PANEL_OFFSET_X, PANEL_OFFSET_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::Error;
use crate::ui::{palette, Canvas, Surface};

/// Type alias for the concrete panel driver.
///
/// Generic over the SPI bus and pins so callers pass in their HAL's
/// peripherals.
pub type Panel<'a, SPI, CS, DC, RST> =
    mipidsi::Display<SpiInterface<'a, ExclusiveDevice<SPI, CS, NoDelay>, DC>, ST7735s, RST>;

/// Reset and initialise the panel, then clear it.
///
/// `buffer` batches pixel writes; any size works, larger is faster.
pub fn init<'a, SPI, CS, DC, RST>(
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    buffer: &'a mut [u8],
) -> Result<Canvas<Panel<'a, SPI, CS, DC, RST>>, Error>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    let device = ExclusiveDevice::new_no_delay(spi, cs).map_err(|_| Error::Display)?;
    let interface = SpiInterface::new(device, dc, buffer);

    // The 80x160 glass sits inside the controller's 132x162 RAM, and this
    // module wires its subpixels BGR with inverted levels.
    let panel = Builder::new(ST7735s, interface)
        .display_size(SCREEN_WIDTH as u16, SCREEN_HEIGHT as u16)
        .display_offset(PANEL_OFFSET_X, PANEL_OFFSET_Y)
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(rst)
        .init(&mut embassy_time::Delay)
        .map_err(|_| Error::Display)?;

    let mut canvas = Canvas::new(panel);
    canvas.fill_screen(palette::BLACK);
    Ok(canvas)
}

/// SPIM configuration for the panel (mode 0, 8 MHz).
pub fn spi_config() -> embassy_nrf::spim::Config {
    let mut config = embassy_nrf::spim::Config::default();
    config.frequency = embassy_nrf::spim::Frequency::M8;
    config.mode = embassy_nrf::spim::MODE_0;
    config
}
