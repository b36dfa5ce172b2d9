#![no_std]
//! Drivers for the peripherals on the M5Stack Core2 internal I2C bus
//!
//! All chips share one bus, so every driver takes any
//! `embedded_hal_async::i2c::I2c` implementation and is expected to be handed
//! a shared-bus device handle.

/// AXP192 power management IC driver.
pub mod axp192;

/// BM8563 real-time clock driver.
pub mod bm8563;

/// FT6336U capacitive touch controller driver.
pub mod ft6336u;

mod register;

pub(crate) use register::AsyncRegisterDevice;

#[cfg(test)]
extern crate alloc;
