//! Compile-time settings of the demo

use core::ops::RangeInclusive;
use drivers::bm8563::DateTime;

/// Written to the RTC on every boot, replacing whatever time it kept
pub const SEED_TIME: DateTime = DateTime::new(2020, 9, 30, 13, 40, 10);

/// Sleep between two polling iterations, read time not included
pub const POLL_PERIOD_MS: u32 = 100;

pub const BRIGHTNESS_RANGE: RangeInclusive<u8> = 30..=100;
pub const BRIGHTNESS_INITIAL: u8 = 50;

pub const MOTOR_RANGE: RangeInclusive<u8> = 0..=100;
pub const MOTOR_INITIAL: u8 = 0;

/// Wait before a failed slider write is attempted again
pub const SETTER_RETRY_MS: u32 = 500;

/// Capacity of the shared label text buffer
pub const LABEL_CAPACITY: usize = 64;
