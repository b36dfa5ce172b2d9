//! Label texts. One buffer is reused for every label: it is overwritten
//! right before each update and copied into the widget by the toolkit.

use core::fmt::Write;
use heapless::String;

use crate::config::LABEL_CAPACITY;
use crate::{BatteryTelemetry, DateTime, TouchSample};

#[derive(Debug, Default)]
pub struct LabelBuffer {
    text: String<LABEL_CAPACITY>,
}

impl LabelBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Time: YYYY-MM-DD HH:MM:SS`
    pub fn time(&mut self, time: &DateTime) -> &str {
        self.format(format_args!("Time: {time}"))
    }

    /// `Touch x: <x>, y: <y>, press: <0|1>`
    pub fn touch(&mut self, sample: &TouchSample) -> &str {
        self.format(format_args!(
            "Touch x: {}, y: {}, press: {}",
            sample.x,
            sample.y,
            u8::from(sample.pressed)
        ))
    }

    /// `Bat <volt> V, <current> mA`, three decimals each
    pub fn battery(&mut self, battery: &BatteryTelemetry) -> &str {
        self.format(format_args!(
            "Bat {:.3} V, {:.3} mA",
            battery.voltage, battery.current
        ))
    }

    fn format(&mut self, args: core::fmt::Arguments<'_>) -> &str {
        self.text.clear();
        // overflow keeps what fit
        let _ = self.text.write_fmt(args);
        self.text.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    /// `-?\d+\.\d{3}`
    fn is_fixed3(s: &str) -> bool {
        let s = s.strip_prefix('-').unwrap_or(s);
        match s.split_once('.') {
            Some((int, frac)) => is_digits(int) && frac.len() == 3 && is_digits(frac),
            None => false,
        }
    }

    #[test]
    fn time_label_is_zero_padded() {
        let mut buffer = LabelBuffer::new();
        let text = buffer.time(&DateTime::new(2020, 9, 30, 13, 40, 10));
        assert_eq!(text, "Time: 2020-09-30 13:40:10");

        let text = buffer.time(&DateTime::new(2021, 1, 2, 3, 4, 5));
        assert_eq!(text, "Time: 2021-01-02 03:04:05");
    }

    #[test]
    fn time_label_matches_pattern_for_default_reading() {
        let mut buffer = LabelBuffer::new();
        let text = buffer.time(&DateTime::default());
        let rest = text.strip_prefix("Time: ").unwrap();
        let (date, time) = rest.split_once(' ').unwrap();
        let date: heapless::Vec<&str, 3> = date.split('-').collect();
        let time: heapless::Vec<&str, 3> = time.split(':').collect();
        assert_eq!(date.len(), 3);
        assert_eq!(date[0].len(), 4);
        assert!(date.iter().chain(time.iter()).all(|part| is_digits(part)));
        assert!(date[1..].iter().chain(time.iter()).all(|part| part.len() == 2));
    }

    #[test]
    fn touch_label_reports_press_as_digit() {
        let mut buffer = LabelBuffer::new();
        let pressed = TouchSample {
            x: 160,
            y: 120,
            pressed: true,
        };
        assert_eq!(buffer.touch(&pressed), "Touch x: 160, y: 120, press: 1");

        let released = TouchSample {
            pressed: false,
            ..pressed
        };
        assert_eq!(buffer.touch(&released), "Touch x: 160, y: 120, press: 0");
    }

    #[test]
    fn touch_label_fits_extreme_coordinates() {
        let mut buffer = LabelBuffer::new();
        let sample = TouchSample {
            x: u16::MAX,
            y: u16::MAX,
            pressed: true,
        };
        assert_eq!(
            buffer.touch(&sample),
            "Touch x: 65535, y: 65535, press: 1"
        );
    }

    #[test]
    fn battery_label_has_three_decimals() {
        let mut buffer = LabelBuffer::new();
        let text = buffer.battery(&BatteryTelemetry {
            voltage: 4.125,
            current: -24.5,
        });
        assert_eq!(text, "Bat 4.125 V, -24.500 mA");
    }

    #[test]
    fn battery_label_matches_pattern() {
        let mut buffer = LabelBuffer::new();
        for (voltage, current) in [(0.0, 0.0), (3.7, 120.25), (4.5045, -4095.5), (0.0011, -0.0)] {
            let text = buffer.battery(&BatteryTelemetry { voltage, current });
            let rest = text.strip_prefix("Bat ").unwrap();
            let rest = rest.strip_suffix(" mA").unwrap();
            let (volt, amp) = rest.split_once(" V, ").unwrap();
            assert!(is_fixed3(volt), "{text}");
            assert!(is_fixed3(amp), "{text}");
        }
    }

    #[test]
    fn buffer_is_reused_not_appended() {
        let mut buffer = LabelBuffer::new();
        buffer.battery(&BatteryTelemetry::default());
        let text = buffer.touch(&TouchSample::default());
        assert_eq!(text, "Touch x: 0, y: 0, press: 0");
    }
}
