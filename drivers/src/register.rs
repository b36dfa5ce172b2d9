//! Register-level access shared by the I2C drivers in this crate.
//!
//! Every chip on the Core2 internal bus uses the same convention: a one byte
//! register address followed by the data bytes, so a single helper covers
//! the AXP192, the BM8563 and the FT6336U.

use embedded_hal_async::i2c::I2c;

#[derive(Debug)]
pub struct AsyncRegisterDevice<I2C> {
    i2c: I2C,
    pub adr: u8,
}

impl<I2C> AsyncRegisterDevice<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, adr: u8) -> Self {
        Self { i2c, adr }
    }

    pub async fn read_register(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut buffer = [0u8; 1];
        self.i2c.write_read(self.adr, &[reg], &mut buffer).await?;
        Ok(buffer[0])
    }

    pub async fn read_register_buffer(
        &mut self,
        reg: u8,
        buffer: &mut [u8],
    ) -> Result<(), I2C::Error> {
        self.i2c.write_read(self.adr, &[reg], buffer).await
    }

    /// Writes `data[1..]` starting at register `data[0]`.
    pub async fn write_register(&mut self, data: &[u8]) -> Result<(), I2C::Error> {
        self.i2c.write(self.adr, data).await
    }

    pub async fn set_register_bit(&mut self, reg: u8, bit: u8) -> Result<(), I2C::Error> {
        let val = self.read_register(reg).await?;
        self.write_register(&[reg, val | (1 << bit)]).await
    }

    pub async fn clear_register_bit(&mut self, reg: u8, bit: u8) -> Result<(), I2C::Error> {
        let val = self.read_register(reg).await?;
        self.write_register(&[reg, val & !(1 << bit)]).await
    }

    /// Read-modify-write: keeps the bits outside `mask`, replaces the rest with `value`.
    pub async fn update_register(
        &mut self,
        reg: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), I2C::Error> {
        let val = self.read_register(reg).await?;
        self.write_register(&[reg, (val & !mask) | (value & mask)]).await
    }
}
