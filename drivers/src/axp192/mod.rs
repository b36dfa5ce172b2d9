use bitflags::bitflags;
use core::fmt::{self, Display, Formatter};
use embedded_hal::i2c::Error;

pub(crate) const AXP192_ADDRESS: u8 = 0x34;

pub(crate) const REG_POWER_STATUS: u8 = 0x00;
pub(crate) const REG_CHARGE_STATUS: u8 = 0x01;
pub(crate) const REG_POWER_OUTPUT: u8 = 0x12;
pub(crate) const REG_DCDC1_VOLTAGE: u8 = 0x26;
pub(crate) const REG_DCDC3_VOLTAGE: u8 = 0x27;
pub(crate) const REG_LDO23_VOLTAGE: u8 = 0x28;
pub(crate) const REG_VBUS_IPSOUT: u8 = 0x30;
pub(crate) const REG_CHARGE_CONTROL1: u8 = 0x33;
pub(crate) const REG_BACKUP_CHARGE: u8 = 0x35;
pub(crate) const REG_PEK_CONFIG: u8 = 0x36;
pub(crate) const REG_BAT_VOLTAGE: u8 = 0x78;
pub(crate) const REG_BAT_CHARGE_CURRENT: u8 = 0x7A;
pub(crate) const REG_BAT_DISCHARGE_CURRENT: u8 = 0x7C;
pub(crate) const REG_ADC_ENABLE1: u8 = 0x82;
pub(crate) const REG_GPIO1_CONTROL: u8 = 0x92;
pub(crate) const REG_GPIO2_CONTROL: u8 = 0x93;
pub(crate) const REG_GPIO34_CONTROL: u8 = 0x95;
pub(crate) const REG_GPIO34_SIGNAL: u8 = 0x96;

pub(crate) const DCDC_VOL_MIN: u16 = 700;
pub(crate) const DCDC_VOL_MAX: u16 = 3500;
pub(crate) const DCDC_VOL_STEP: u16 = 25;

pub(crate) const LDO_VOL_MIN: u16 = 1800;
pub(crate) const LDO_VOL_MAX: u16 = 3300;
pub(crate) const LDO_VOL_STEP: u16 = 100;

/// ESP32 core supply on the Core2
pub const CORE2_DCDC1_VOLTAGE: u16 = 3350;
/// LCD logic and SD card supply
pub const CORE2_LDO2_VOLTAGE: u16 = 3300;
/// Backlight rail voltage at power-up
pub const CORE2_BACKLIGHT_VOLTAGE: u16 = 2800;

/// Backlight rail (DCDC3) range covered by the 0..=100 % brightness scale
pub const BACKLIGHT_VOL_MIN: u16 = 2500;
pub const BACKLIGHT_VOL_MAX: u16 = 3300;

/// Vibration motor rail (LDO3) range covered by the 1..=100 % strength scale
pub const MOTOR_VOL_MIN: u16 = 2000;
pub const MOTOR_VOL_MAX: u16 = 3300;

/// Battery voltage ADC resolution in microvolts per LSB
const BAT_VOLTAGE_LSB_UV: u32 = 1100;
/// Battery current ADC resolution, 0.5 mA per LSB
const BAT_CURRENT_LSB_MA: f32 = 0.5;

/// Errors that can occur when interacting with the AXP192
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PmuError {
    /// The chip did not acknowledge its address
    Init,
    /// Requested rail voltage is outside what the regulator can produce
    VoltageOutOfRange(u16),
    I2CError,
}

impl<E> From<E> for PmuError
where
    E: Error,
{
    fn from(_: E) -> Self {
        PmuError::I2CError
    }
}

impl Display for PmuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PmuError::Init => write!(f, "AXP192 not responding"),
            PmuError::VoltageOutOfRange(mv) => write!(f, "voltage {mv}mV out of range"),
            PmuError::I2CError => write!(f, "I2C error"),
        }
    }
}

bitflags! {
    /// Register 0x12, power output control
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct PowerOutput: u8 {
        /// ESP32 core
        const DCDC1 = 1 << 0;
        /// LCD backlight
        const DCDC3 = 1 << 1;
        /// LCD logic, SD card
        const LDO2  = 1 << 2;
        /// Vibration motor
        const LDO3  = 1 << 3;
        const DCDC2 = 1 << 4;
        /// 5V boost for the M-Bus and Grove port
        const EXTEN = 1 << 6;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeStatus {
    NoBattery,
    Charging,
    Discharging,
}

impl Display for ChargeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ChargeStatus::NoBattery => write!(f, "No battery"),
            ChargeStatus::Charging => write!(f, "Charging"),
            ChargeStatus::Discharging => write!(f, "Discharging"),
        }
    }
}

impl From<u8> for ChargeStatus {
    /// Decodes register 0x01: bit 5 battery present, bit 6 charging
    fn from(value: u8) -> Self {
        if value & (1 << 5) == 0 {
            ChargeStatus::NoBattery
        } else if value & (1 << 6) != 0 {
            ChargeStatus::Charging
        } else {
            ChargeStatus::Discharging
        }
    }
}

/// Converts a DCDC1/DCDC3 target voltage to its 7 bit register value
pub fn dcdc_voltage_bits(millivolts: u16) -> Result<u8, PmuError> {
    if !(DCDC_VOL_MIN..=DCDC_VOL_MAX).contains(&millivolts) {
        return Err(PmuError::VoltageOutOfRange(millivolts));
    }
    Ok(((millivolts - DCDC_VOL_MIN) / DCDC_VOL_STEP) as u8)
}

/// Converts an LDO2/LDO3 target voltage to its 4 bit register value
pub fn ldo_voltage_bits(millivolts: u16) -> Result<u8, PmuError> {
    if !(LDO_VOL_MIN..=LDO_VOL_MAX).contains(&millivolts) {
        return Err(PmuError::VoltageOutOfRange(millivolts));
    }
    Ok(((millivolts - LDO_VOL_MIN) / LDO_VOL_STEP) as u8)
}

/// Linear map of `percent` (clamped to 100) onto `min..=max` millivolts
pub fn percent_to_millivolts(percent: u8, min: u16, max: u16) -> u16 {
    let percent = u32::from(percent.min(100));
    let span = u32::from(max - min);
    min + (span * percent / 100) as u16
}

/// 12 bit battery voltage sample, high byte first, to volts
pub fn battery_voltage_from_raw(raw: [u8; 2]) -> f32 {
    let value = (u32::from(raw[0]) << 4) | u32::from(raw[1] & 0x0F);
    (value * BAT_VOLTAGE_LSB_UV) as f32 / 1_000_000.0
}

/// 13 bit battery current sample, high byte first, to milliamps
pub fn battery_current_from_raw(raw: [u8; 2]) -> f32 {
    let value = (u16::from(raw[0]) << 5) | u16::from(raw[1] & 0x1F);
    f32::from(value) * BAT_CURRENT_LSB_MA
}

pub mod asynch;
