#![no_std]
//! Board-independent part of the Core2 hardware demo: what the labels say,
//! when they are refreshed and where slider changes go.

pub mod board;
pub mod buttons;
pub mod config;
pub mod controller;
pub mod gui;
pub mod label;
pub mod poller;
pub mod touch;

pub use drivers::bm8563::DateTime;
pub use drivers::ft6336u::TouchSample;

use core::fmt::Debug;

/// Battery voltage in volts and current in milliamps, positive while charging
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatteryTelemetry {
    pub voltage: f32,
    pub current: f32,
}

/// The three labels refreshed by the polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Time,
    Touch,
    Battery,
}

/// Widget tree access. Only ever called with the GUI lock held.
pub trait Labels {
    fn set_label(&mut self, label: Label, text: &str);
}

#[allow(async_fn_in_trait)]
pub trait Clock {
    type Error: Debug;

    async fn now(&mut self) -> Result<DateTime, Self::Error>;
}

#[allow(async_fn_in_trait)]
pub trait TouchInput {
    type Error: Debug;

    async fn touch(&mut self) -> Result<TouchSample, Self::Error>;
}

#[allow(async_fn_in_trait)]
pub trait BatteryMonitor {
    type Error: Debug;

    async fn battery(&mut self) -> Result<BatteryTelemetry, Self::Error>;
}

/// Setters the two sliders drive
#[allow(async_fn_in_trait)]
pub trait PowerControl {
    type Error: Debug;

    async fn set_brightness(&mut self, percent: u8) -> Result<(), Self::Error>;

    async fn set_motor_strength(&mut self, percent: u8) -> Result<(), Self::Error>;
}
