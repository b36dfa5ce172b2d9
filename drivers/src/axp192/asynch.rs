use super::*;
use crate::AsyncRegisterDevice;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use log::debug;

/// <https://github.com/m5stack/M5Core2/blob/master/src/AXP192.cpp>
///
/// AXP192 power management IC as wired on the M5Stack Core2: DCDC1 feeds the
/// ESP32, DCDC3 the LCD backlight, LDO2 the LCD logic, LDO3 the vibration
/// motor and GPIO4 drives the LCD reset line.
#[derive(Debug)]
pub struct Axp192Async<I2C> {
    dev: AsyncRegisterDevice<I2C>,
}

impl<I2C> Axp192Async<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            dev: AsyncRegisterDevice::new(i2c, AXP192_ADDRESS),
        }
    }

    /// Checks that the chip answers on the bus
    pub async fn init(&mut self) -> Result<(), PmuError> {
        if self.dev.read_register(REG_POWER_STATUS).await.is_err() {
            return Err(PmuError::Init);
        }
        Ok(())
    }

    /// Brings up the Core2 power rails. The backlight comes up at
    /// [`CORE2_BACKLIGHT_VOLTAGE`] and the motor rail stays off.
    pub async fn init_core2(&mut self, delay: &mut impl DelayNs) -> Result<(), PmuError> {
        self.init().await?;

        // VBUS-IPSOUT path: keep VHOLD, limit off
        self.dev.update_register(REG_VBUS_IPSOUT, 0xFB, 0x02).await?;
        // GPIO1 (green LED) and GPIO2 (speaker enable) as NMOS open drain
        self.dev.update_register(REG_GPIO1_CONTROL, 0x07, 0x00).await?;
        self.dev.update_register(REG_GPIO2_CONTROL, 0x07, 0x00).await?;
        // RTC backup battery charging, 3.0V 200uA
        self.dev.update_register(REG_BACKUP_CHARGE, 0xE3, 0xA2).await?;
        // 100mA battery charge current, 4.2V target
        self.dev.write_register(&[REG_CHARGE_CONTROL1, 0xC0]).await?;
        // Power key: 128ms on, 4s off
        self.dev.write_register(&[REG_PEK_CONFIG, 0x4C]).await?;
        // All ADC channels on
        self.set_adc_enabled().await?;

        self.set_dcdc1_voltage(CORE2_DCDC1_VOLTAGE).await?;
        self.set_ldo2_voltage(CORE2_LDO2_VOLTAGE).await?;
        self.set_backlight_voltage(CORE2_BACKLIGHT_VOLTAGE).await?;
        self.set_ldo3_voltage(MOTOR_VOL_MIN).await?;

        self.set_power_output(PowerOutput::DCDC1 | PowerOutput::LDO2 | PowerOutput::DCDC3, true)
            .await?;
        self.set_power_output(PowerOutput::LDO3, false).await?;

        // GPIO4 as NMOS open drain output for the LCD reset line
        self.dev.update_register(REG_GPIO34_CONTROL, 0x8D, 0x84).await?;
        self.reset_lcd(delay).await?;

        Ok(())
    }

    /// Pulses the LCD reset line low for 100ms
    pub async fn reset_lcd(&mut self, delay: &mut impl DelayNs) -> Result<(), PmuError> {
        self.set_lcd_reset(false).await?;
        delay.delay_ms(100).await;
        self.set_lcd_reset(true).await?;
        delay.delay_ms(100).await;
        Ok(())
    }

    pub async fn set_lcd_reset(&mut self, high: bool) -> Result<(), PmuError> {
        if high {
            self.dev.set_register_bit(REG_GPIO34_SIGNAL, 1).await?;
        } else {
            self.dev.clear_register_bit(REG_GPIO34_SIGNAL, 1).await?;
        }
        Ok(())
    }

    pub async fn set_adc_enabled(&mut self) -> Result<(), PmuError> {
        self.dev.write_register(&[REG_ADC_ENABLE1, 0xFF]).await?;
        Ok(())
    }

    pub async fn get_power_output(&mut self) -> Result<PowerOutput, PmuError> {
        let val = self.dev.read_register(REG_POWER_OUTPUT).await?;
        Ok(PowerOutput::from_bits_truncate(val))
    }

    /// Switches the given rails on or off, leaving the others untouched
    pub async fn set_power_output(
        &mut self,
        outputs: PowerOutput,
        enabled: bool,
    ) -> Result<(), PmuError> {
        let value = if enabled { outputs.bits() } else { 0 };
        self.dev
            .update_register(REG_POWER_OUTPUT, outputs.bits(), value)
            .await?;
        Ok(())
    }

    pub async fn set_dcdc1_voltage(&mut self, millivolts: u16) -> Result<(), PmuError> {
        let bits = dcdc_voltage_bits(millivolts)?;
        self.dev
            .update_register(REG_DCDC1_VOLTAGE, 0x7F, bits)
            .await?;
        Ok(())
    }

    /// DCDC3, the backlight rail
    pub async fn set_backlight_voltage(&mut self, millivolts: u16) -> Result<(), PmuError> {
        let bits = dcdc_voltage_bits(millivolts)?;
        debug!("DCDC3 -> {millivolts}mV (0x{bits:02X})");
        self.dev
            .update_register(REG_DCDC3_VOLTAGE, 0x7F, bits)
            .await?;
        Ok(())
    }

    pub async fn set_ldo2_voltage(&mut self, millivolts: u16) -> Result<(), PmuError> {
        let bits = ldo_voltage_bits(millivolts)?;
        self.dev
            .update_register(REG_LDO23_VOLTAGE, 0xF0, bits << 4)
            .await?;
        Ok(())
    }

    /// LDO3, the vibration motor rail
    pub async fn set_ldo3_voltage(&mut self, millivolts: u16) -> Result<(), PmuError> {
        let bits = ldo_voltage_bits(millivolts)?;
        debug!("LDO3 -> {millivolts}mV (0x{bits:02X})");
        self.dev
            .update_register(REG_LDO23_VOLTAGE, 0x0F, bits)
            .await?;
        Ok(())
    }

    /// Sets the LCD backlight, `percent` is clamped to 0..=100
    pub async fn set_lcd_brightness(&mut self, percent: u8) -> Result<(), PmuError> {
        let millivolts = percent_to_millivolts(percent, BACKLIGHT_VOL_MIN, BACKLIGHT_VOL_MAX);
        self.set_backlight_voltage(millivolts).await
    }

    /// Sets the vibration strength. Zero switches the motor rail off.
    pub async fn set_motor_strength(&mut self, percent: u8) -> Result<(), PmuError> {
        if percent == 0 {
            return self.set_power_output(PowerOutput::LDO3, false).await;
        }
        let millivolts = percent_to_millivolts(percent, MOTOR_VOL_MIN, MOTOR_VOL_MAX);
        self.set_ldo3_voltage(millivolts).await?;
        self.set_power_output(PowerOutput::LDO3, true).await
    }

    pub async fn get_charge_status(&mut self) -> Result<ChargeStatus, PmuError> {
        let val = self.dev.read_register(REG_CHARGE_STATUS).await?;
        Ok(ChargeStatus::from(val))
    }

    /// Battery voltage in volts
    pub async fn get_battery_voltage(&mut self) -> Result<f32, PmuError> {
        let mut raw = [0u8; 2];
        self.dev
            .read_register_buffer(REG_BAT_VOLTAGE, &mut raw)
            .await?;
        Ok(battery_voltage_from_raw(raw))
    }

    pub async fn get_battery_charge_current(&mut self) -> Result<f32, PmuError> {
        let mut raw = [0u8; 2];
        self.dev
            .read_register_buffer(REG_BAT_CHARGE_CURRENT, &mut raw)
            .await?;
        Ok(battery_current_from_raw(raw))
    }

    pub async fn get_battery_discharge_current(&mut self) -> Result<f32, PmuError> {
        let mut raw = [0u8; 2];
        self.dev
            .read_register_buffer(REG_BAT_DISCHARGE_CURRENT, &mut raw)
            .await?;
        Ok(battery_current_from_raw(raw))
    }

    /// Net battery current in milliamps, positive while charging
    pub async fn get_battery_current(&mut self) -> Result<f32, PmuError> {
        let charge = self.get_battery_charge_current().await?;
        let discharge = self.get_battery_discharge_current().await?;
        Ok(charge - discharge)
    }
}
