//! Display hardware initialization module
//!
//! This module handles the initialization of the ILI9342C LCD controller via
//! SPI with DMA. Reset and backlight are driven by the AXP192, so the driver
//! gets no reset pin and the PMU must be up first.

use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::dma::{DmaRxBuf, DmaTxBuf};
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::{DMA_SPI2, GPIO15, GPIO18, GPIO23, GPIO5, SPI2};
use esp_hal::spi::master::{Config as SpiConfig, Spi, SpiDmaBus};
use esp_hal::spi::Mode;
use esp_hal::time::Rate;
use esp_hal::{dma_buffers, Blocking};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9342CRgb565;
use mipidsi::options::{ColorInversion, ColorOrder};
use mipidsi::{Builder, Display, NoResetPin};
use static_cell::StaticCell;

/// Display dimensions
pub const DISPLAY_HEIGHT: u16 = 240;
pub const DISPLAY_WIDTH: u16 = 320;

const SPI_FREQUENCY_MHZ: u32 = 40;

/// Type alias for the ILI9342C display instance using SPI interface
pub type Lcd = Display<
    SpiInterface<
        'static,
        ExclusiveDevice<SpiDmaBus<'static, Blocking>, Output<'static>, NoDelay>,
        Output<'static>,
    >,
    ILI9342CRgb565,
    NoResetPin,
>;

/// Initializes the ILI9342C with SPI interface and DMA support.
///
/// # Panics
///
/// Panics if display initialization fails.
pub fn initialize_display(
    dc: GPIO15<'static>,
    sck: GPIO18<'static>,
    mosi: GPIO23<'static>,
    cs: GPIO5<'static>,
    spi: SPI2<'static>,
    dma: DMA_SPI2<'static>,
) -> Lcd {
    let dc = Output::new(dc, Level::Low, OutputConfig::default());
    let cs = Output::new(cs, Level::High, OutputConfig::default());

    let spi_dma = Spi::new(
        spi,
        SpiConfig::default()
            .with_frequency(Rate::from_mhz(SPI_FREQUENCY_MHZ))
            .with_mode(Mode::_0),
    )
    .expect("Failed to create SPI bus")
    .with_sck(sck)
    .with_mosi(mosi)
    .with_dma(dma);

    #[allow(clippy::manual_div_ceil)]
    let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(4092);
    let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).expect("DMA rx buffer");
    let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).expect("DMA tx buffer");

    let spi = SpiDmaBus::new(spi_dma, dma_rx_buf, dma_tx_buf);
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).expect("Failed to attach LCD");

    // scratch space for mipidsi command and pixel batching
    static DISPLAY_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();
    let buffer = DISPLAY_BUFFER.init([0_u8; 512]);

    let di = SpiInterface::new(spi_device, dc, buffer);

    Builder::new(ILI9342CRgb565, di)
        .display_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        .color_order(ColorOrder::Bgr)
        .invert_colors(ColorInversion::Inverted)
        .init(&mut esp_hal::delay::Delay::new())
        .expect("Failed to initialize display")
}
