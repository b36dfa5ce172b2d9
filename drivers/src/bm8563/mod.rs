use core::fmt::{self, Display, Formatter};
use embedded_hal::i2c::Error;

pub(crate) const BM8563_ADDRESS: u8 = 0x51;

pub(crate) const REG_CONTROL_STATUS1: u8 = 0x00;
pub(crate) const REG_SECONDS: u8 = 0x02;

/// Seconds register bit 7: oscillator stopped or supply dropped, time is unreliable
pub(crate) const VOLTAGE_LOW: u8 = 1 << 7;
/// Months register bit 7: set for 19xx, clear for 20xx
pub(crate) const CENTURY: u8 = 1 << 7;

/// Number of time registers, seconds through years
pub(crate) const TIME_LEN: usize = 7;

/// Errors that can occur when interacting with the BM8563
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// Date or time field outside the calendar or outside 1900..=2099
    InvalidDateTime,
    I2CError,
}

impl<E> From<E> for RtcError
where
    E: Error,
{
    fn from(_: E) -> Self {
        RtcError::I2CError
    }
}

/// Calendar date and wall-clock time as kept by the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn is_valid(&self) -> bool {
        (1900..=2099).contains(&self.year)
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Day of the week, 0 = Sunday. `None` for an invalid date.
    pub fn weekday(&self) -> Option<u8> {
        if !self.is_valid() {
            return None;
        }
        const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
        let year = if self.month < 3 {
            self.year - 1
        } else {
            self.year
        };
        let days = year + year / 4 - year / 100 + year / 400
            + OFFSETS[usize::from(self.month - 1)]
            + u16::from(self.day);
        Some((days % 7) as u8)
    }

    /// Encodes into the seconds..years register layout
    pub(crate) fn to_registers(self) -> Result<[u8; TIME_LEN], RtcError> {
        let weekday = self.weekday().ok_or(RtcError::InvalidDateTime)?;
        let century = if self.year < 2000 { CENTURY } else { 0 };
        Ok([
            to_bcd(self.second),
            to_bcd(self.minute),
            to_bcd(self.hour),
            to_bcd(self.day),
            weekday,
            to_bcd(self.month) | century,
            to_bcd((self.year % 100) as u8),
        ])
    }

    /// Decodes the seconds..years register layout, ignoring status bits
    pub(crate) fn from_registers(regs: &[u8; TIME_LEN]) -> Self {
        let base = if regs[5] & CENTURY != 0 { 1900 } else { 2000 };
        Self {
            second: from_bcd(regs[0] & 0x7F),
            minute: from_bcd(regs[1] & 0x7F),
            hour: from_bcd(regs[2] & 0x3F),
            day: from_bcd(regs[3] & 0x3F),
            month: from_bcd(regs[5] & 0x1F),
            year: base + u16::from(from_bcd(regs[6])),
        }
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

pub(crate) fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

pub(crate) fn from_bcd(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

pub mod asynch;
