//! Core2 drivers behind the demo traits

use drivers::axp192::asynch::Axp192Async;
use drivers::axp192::PmuError;
use drivers::bm8563::asynch::Bm8563Async;
use drivers::bm8563::RtcError;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::i2c::I2c;

use crate::{BatteryMonitor, BatteryTelemetry, Clock, DateTime, PowerControl};

impl<I2C> Clock for Bm8563Async<I2C>
where
    I2C: I2c,
{
    type Error = RtcError;

    async fn now(&mut self) -> Result<DateTime, RtcError> {
        self.get_time().await
    }
}

/// The PMU is shared by the polling loop (telemetry) and the controller (rails)
impl<M, I2C> BatteryMonitor for &Mutex<M, Axp192Async<I2C>>
where
    M: RawMutex,
    I2C: I2c,
{
    type Error = PmuError;

    async fn battery(&mut self) -> Result<BatteryTelemetry, PmuError> {
        let mut pmu = self.lock().await;
        let voltage = pmu.get_battery_voltage().await?;
        let current = pmu.get_battery_current().await?;
        Ok(BatteryTelemetry { voltage, current })
    }
}

impl<M, I2C> PowerControl for &Mutex<M, Axp192Async<I2C>>
where
    M: RawMutex,
    I2C: I2c,
{
    type Error = PmuError;

    async fn set_brightness(&mut self, percent: u8) -> Result<(), PmuError> {
        self.lock().await.set_lcd_brightness(percent).await
    }

    async fn set_motor_strength(&mut self, percent: u8) -> Result<(), PmuError> {
        self.lock().await.set_motor_strength(percent).await
    }
}
