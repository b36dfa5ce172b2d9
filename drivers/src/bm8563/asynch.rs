use super::*;
use crate::AsyncRegisterDevice;
use embedded_hal_async::i2c::I2c;

/// BM8563 real-time clock (PCF8563 compatible)
#[derive(Debug)]
pub struct Bm8563Async<I2C> {
    dev: AsyncRegisterDevice<I2C>,
}

impl<I2C> Bm8563Async<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            dev: AsyncRegisterDevice::new(i2c, BM8563_ADDRESS),
        }
    }

    /// Starts the oscillator and clears alarm/timer configuration
    pub async fn init(&mut self) -> Result<(), RtcError> {
        self.dev
            .write_register(&[REG_CONTROL_STATUS1, 0x00, 0x00])
            .await?;
        Ok(())
    }

    /// False when the chip reports the clock may have stopped since it was last set
    pub async fn is_clock_integrity_ok(&mut self) -> Result<bool, RtcError> {
        let seconds = self.dev.read_register(REG_SECONDS).await?;
        Ok(seconds & VOLTAGE_LOW == 0)
    }

    /// Writes all time registers in one transaction, which also clears the low-voltage flag
    pub async fn set_time(&mut self, time: &DateTime) -> Result<(), RtcError> {
        let regs = time.to_registers()?;
        let mut buffer = [0u8; TIME_LEN + 1];
        buffer[0] = REG_SECONDS;
        buffer[1..].copy_from_slice(&regs);
        self.dev.write_register(&buffer).await?;
        Ok(())
    }

    pub async fn get_time(&mut self) -> Result<DateTime, RtcError> {
        let mut regs = [0u8; TIME_LEN];
        self.dev.read_register_buffer(REG_SECONDS, &mut regs).await?;
        Ok(DateTime::from_registers(&regs))
    }
}
