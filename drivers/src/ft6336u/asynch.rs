use super::*;
use crate::AsyncRegisterDevice;
use embedded_hal_async::i2c::I2c;

/// FT6336U capacitive touch controller, polled over I2C
#[derive(Debug)]
pub struct Ft6336uAsync<I2C> {
    dev: AsyncRegisterDevice<I2C>,
    last: TouchSample,
}

impl<I2C> Ft6336uAsync<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            dev: AsyncRegisterDevice::new(i2c, FT6336U_ADDRESS),
            last: TouchSample::default(),
        }
    }

    /// Puts the controller in polling mode with the default touch threshold
    pub async fn begin(&mut self) -> Result<(), TouchError> {
        self.set_interrupt_mode(InterruptMode::Polling).await?;
        self.set_touch_threshold(DEFAULT_TOUCH_THRESHOLD).await?;
        self.last = TouchSample::default();
        Ok(())
    }

    pub async fn get_chip_id(&mut self) -> Result<u8, TouchError> {
        let result = self.dev.read_register(REG_CHIP_ID).await?;
        Ok(result)
    }

    pub async fn get_vendor_id(&mut self) -> Result<u8, TouchError> {
        let result = self.dev.read_register(REG_VENDOR_ID).await?;
        Ok(result)
    }

    pub async fn get_firmware_version(&mut self) -> Result<u8, TouchError> {
        let result = self.dev.read_register(REG_FIRMWARE_VERSION).await?;
        Ok(result)
    }

    pub async fn set_interrupt_mode(&mut self, mode: InterruptMode) -> Result<(), TouchError> {
        self.dev.write_register(&[REG_G_MODE, mode.into()]).await?;
        Ok(())
    }

    pub async fn get_interrupt_mode(&mut self) -> Result<InterruptMode, TouchError> {
        let result = self.dev.read_register(REG_G_MODE).await?;
        Ok(InterruptMode::try_from(result & 0x01).unwrap_or(InterruptMode::Polling))
    }

    pub async fn set_touch_threshold(&mut self, threshold: u8) -> Result<(), TouchError> {
        self.dev.write_register(&[REG_THRESHOLD, threshold]).await?;
        Ok(())
    }

    pub async fn get_touch_threshold(&mut self) -> Result<u8, TouchError> {
        let result = self.dev.read_register(REG_THRESHOLD).await?;
        Ok(result)
    }

    /// Raw first touch point, `None` when nothing touches the panel
    pub async fn read_point(&mut self) -> Result<Option<TouchPoint>, TouchError> {
        let mut buffer = [0u8; RAW_TOUCH_LEN];
        self.dev
            .read_register_buffer(REG_TD_STATUS, &mut buffer)
            .await?;
        Ok(TouchPoint::parse(&buffer))
    }

    /// Current touch state. Position is held from the last contact while released.
    pub async fn read_touch(&mut self) -> Result<TouchSample, TouchError> {
        match self.read_point().await? {
            Some(point) if point.is_pressed() => {
                self.last = TouchSample {
                    x: point.x,
                    y: point.y,
                    pressed: true,
                };
            }
            _ => self.last.pressed = false,
        }
        Ok(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::FakeBus;
    use embassy_futures::block_on;

    fn put_point(bus: &mut FakeBus, points: u8, event: Event, x: u16, y: u16) {
        let event: u8 = event.into();
        let start = REG_TD_STATUS as usize;
        bus.regs[start..start + RAW_TOUCH_LEN].copy_from_slice(&[
            points,
            (event << 6) | (x >> 8) as u8,
            x as u8,
            (y >> 8) as u8,
            y as u8,
        ]);
    }

    #[test]
    fn begin_selects_polling_mode_and_threshold() {
        let mut bus = FakeBus::new(FT6336U_ADDRESS);
        bus.regs[REG_G_MODE as usize] = 1;
        let mut touch = Ft6336uAsync::new(&mut bus);

        block_on(touch.begin()).unwrap();
        assert_eq!(
            block_on(touch.get_interrupt_mode()).unwrap(),
            InterruptMode::Polling
        );
        assert_eq!(
            block_on(touch.get_touch_threshold()).unwrap(),
            DEFAULT_TOUCH_THRESHOLD
        );
    }

    #[test]
    fn press_reports_coordinates() {
        let mut bus = FakeBus::new(FT6336U_ADDRESS);
        put_point(&mut bus, 1, Event::Down, 300, 260);
        let mut touch = Ft6336uAsync::new(&mut bus);

        let sample = block_on(touch.read_touch()).unwrap();
        assert_eq!(
            sample,
            TouchSample {
                x: 300,
                y: 260,
                pressed: true
            }
        );
    }

    #[test]
    fn release_keeps_last_position() {
        let held = TouchSample {
            x: 12,
            y: 34,
            pressed: true,
        };
        // zero points reported: finger lifted
        let mut bus = FakeBus::new(FT6336U_ADDRESS);
        let mut touch = Ft6336uAsync {
            dev: AsyncRegisterDevice::new(&mut bus, FT6336U_ADDRESS),
            last: held,
        };

        let released = block_on(touch.read_touch()).unwrap();
        assert_eq!(
            released,
            TouchSample {
                pressed: false,
                ..held
            }
        );
        assert_eq!(touch.last, released);
    }

    #[test]
    fn lift_up_event_is_not_a_press() {
        let raw = [1, 1 << 6, 10, 0, 20];
        let point = TouchPoint::parse(&raw).unwrap();
        assert_eq!(point.event, Event::Up);
        assert!(!point.is_pressed());
    }

    #[test]
    fn invalid_point_counts_are_ignored() {
        assert_eq!(TouchPoint::parse(&[0, 0, 5, 0, 5]), None);
        assert_eq!(TouchPoint::parse(&[0x0F, 0, 5, 0, 5]), None);
    }
}
