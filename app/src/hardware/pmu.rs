//! Power Management Unit (PMU) hardware initialization module
//!
//! This module brings up the AXP192 rails the Core2 needs before anything
//! else on the board can be used: ESP32 core, LCD logic, LCD backlight and
//! the vibration motor (off at boot).

use drivers::axp192::asynch::Axp192Async;
use drivers::axp192::PowerOutput;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use log::info;
use static_cell::StaticCell;

use super::SharedI2c;

/// Type alias for the AXP192 PMU driver instance
pub type Pmu = Axp192Async<SharedI2c>;

/// The PMU is used by the polling loop (battery telemetry) and the controller
/// task (backlight and motor rails).
pub type SharedPmu = Mutex<CriticalSectionRawMutex, Pmu>;

/// Initializes the AXP192 for the Core2 and logs the resulting rail state.
///
/// This also pulses the LCD reset line, so it must run before the display is
/// initialized.
///
/// # Panics
///
/// Panics if called twice or if any register access fails.
pub async fn initialize_pmu(i2c_device: SharedI2c) -> &'static SharedPmu {
    let mut pmu = Axp192Async::new(i2c_device);
    pmu.init_core2(&mut Delay)
        .await
        .expect("Failed to initialize PMU");

    let outputs = pmu
        .get_power_output()
        .await
        .expect("get_power_output failed");
    info!("PMU power outputs: {outputs:?}");
    info!(
        "LCD backlight: {}",
        if outputs.contains(PowerOutput::DCDC3) {
            "on"
        } else {
            "off"
        }
    );

    info!(
        "Charge status: {}",
        pmu.get_charge_status()
            .await
            .expect("get_charge_status failed")
    );

    info!(
        "Battery voltage: {:.3}V",
        pmu.get_battery_voltage()
            .await
            .expect("get_battery_voltage failed")
    );

    static PMU: StaticCell<SharedPmu> = StaticCell::new();
    PMU.init(Mutex::new(pmu))
}
