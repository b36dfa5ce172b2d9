use embedded_hal::i2c::Error;
use num_enum::{IntoPrimitive, TryFromPrimitive};

pub(crate) const FT6336U_ADDRESS: u8 = 0x38;

pub(crate) const REG_TD_STATUS: u8 = 0x02;
pub(crate) const REG_THRESHOLD: u8 = 0x80;
pub(crate) const REG_CHIP_ID: u8 = 0xA3;
pub(crate) const REG_G_MODE: u8 = 0xA4;
pub(crate) const REG_FIRMWARE_VERSION: u8 = 0xA6;
pub(crate) const REG_VENDOR_ID: u8 = 0xA8;

/// TD_STATUS plus the four P1 coordinate registers
pub(crate) const RAW_TOUCH_LEN: usize = 5;

/// Controller supports at most two simultaneous points
const MAX_POINTS: u8 = 2;

pub const DEFAULT_TOUCH_THRESHOLD: u8 = 0x16;

#[derive(Debug, Clone, Copy, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Down = 0,
    Up = 1,
    Contact = 2,
    NoEvent = 3,
}

/// Register 0xA4: how the INT line reports touches
#[derive(Debug, Clone, Copy, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptMode {
    Polling = 0,
    Trigger = 1,
}

/// Errors that can occur when interacting with the FT6336U
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    I2CError,
}

impl<E> From<E> for TouchError
where
    E: Error,
{
    fn from(_: E) -> Self {
        TouchError::I2CError
    }
}

/// Latest touch position. Coordinates are kept from the last contact when
/// the finger is lifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    pub x: u16,
    pub y: u16,
    pub pressed: bool,
}

/// First touch point as reported by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub points: u8,
    pub event: Event,
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    /// Decodes TD_STATUS..P1_YL. Returns `None` when no finger is reported.
    pub(crate) fn parse(raw: &[u8; RAW_TOUCH_LEN]) -> Option<Self> {
        let points = raw[0] & 0x0F;
        if points == 0 || points > MAX_POINTS {
            return None;
        }
        let event = Event::try_from(raw[1] >> 6).unwrap_or(Event::NoEvent);
        let x = (u16::from(raw[1] & 0x0F) << 8) | u16::from(raw[2]);
        let y = (u16::from(raw[3] & 0x0F) << 8) | u16::from(raw[4]);
        Some(Self {
            points,
            event,
            x,
            y,
        })
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.event, Event::Down | Event::Contact)
    }
}

pub mod asynch;
