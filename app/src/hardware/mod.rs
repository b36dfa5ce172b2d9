//! Hardware initialization modules
//!
//! Bring-up of the M5Stack Core2 peripherals used by the demo:
//!
//! - **PMU**: AXP192 power rails, backlight and vibration motor via I2C
//! - **Touchpad**: FT6336U capacitive touch controller via I2C
//! - **Display**: ILI9342C LCD via SPI with DMA
//! - **RTC**: BM8563 real-time clock via I2C
//!
//! All I2C devices share one bus, guarded by an async mutex.

use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::peripherals::{GPIO21, GPIO22, I2C0};
use esp_hal::time::Rate;
use esp_hal::Async;
use static_cell::StaticCell;

pub mod display;
pub mod pmu;
pub mod rtc;
pub mod touch;

pub use display::{initialize_display, Lcd, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use pmu::{initialize_pmu, Pmu, SharedPmu};
pub use rtc::{initialize_rtc, Rtc};
pub use touch::{initialize_touchpad, Touchpad};

/// Internal I2C bus clock
const I2C_FREQUENCY_KHZ: u32 = 400;

pub type I2cBus = Mutex<CriticalSectionRawMutex, I2c<'static, Async>>;

/// One device handle on the shared internal bus
pub type SharedI2c = I2cDevice<'static, CriticalSectionRawMutex, I2c<'static, Async>>;

/// Creates the internal I2C bus (SDA GPIO21, SCL GPIO22) and its mutex.
///
/// # Panics
///
/// Panics if called twice or if the I2C configuration is rejected.
pub fn initialize_i2c_bus(
    i2c: I2C0<'static>,
    sda: GPIO21<'static>,
    scl: GPIO22<'static>,
) -> &'static I2cBus {
    let i2c = I2c::new(
        i2c,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
    )
    .expect("Failed to create I2C bus")
    .with_sda(sda)
    .with_scl(scl)
    .into_async();

    static I2C_BUS: StaticCell<I2cBus> = StaticCell::new();
    I2C_BUS.init(Mutex::new(i2c))
}
