//! Touchpad hardware initialization module
//!
//! This module handles the initialization of the FT6336U capacitive touch
//! controller via I2C. The Core2 leaves its interrupt line unused, so the
//! controller is put in polling mode.

use drivers::ft6336u::asynch::Ft6336uAsync;
use drivers::ft6336u::DEFAULT_TOUCH_THRESHOLD;
use log::info;

use super::SharedI2c;

/// Type alias for the FT6336U touchpad driver instance
pub type Touchpad = Ft6336uAsync<SharedI2c>;

/// Initializes the FT6336U and logs its identification registers.
///
/// # Panics
///
/// Panics if any initialization step fails.
pub async fn initialize_touchpad(i2c_device: SharedI2c) -> Touchpad {
    let mut touchpad = Ft6336uAsync::new(i2c_device);
    touchpad.begin().await.expect("Failed to begin touchpad");

    let chip_id = touchpad.get_chip_id().await.expect("Failed to get chip ID");
    info!("Touchpad chip ID: 0x{chip_id:X}");
    let vendor_id = touchpad
        .get_vendor_id()
        .await
        .expect("Failed to get vendor ID");
    info!("Touchpad vendor ID: 0x{vendor_id:X}");
    let firmware = touchpad
        .get_firmware_version()
        .await
        .expect("Failed to get firmware version");
    info!("Touchpad firmware: {firmware}");

    let mode = touchpad
        .get_interrupt_mode()
        .await
        .expect("Failed to get interrupt mode");
    let threshold = touchpad
        .get_touch_threshold()
        .await
        .expect("Failed to get touch threshold");
    info!("Interrupt mode: {mode:?}, threshold: {threshold} (default {DEFAULT_TOUCH_THRESHOLD})");

    touchpad
}
