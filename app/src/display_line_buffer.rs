use embedded_graphics_core::pixelcolor::raw::RawU16;
use log::warn;
use slint::platform::software_renderer::{LineBufferProvider, Rgb565Pixel};

use crate::hardware::{Lcd, DISPLAY_WIDTH};

/// Renders one display line at a time into a single line of pixels and
/// pushes it straight to the LCD.
pub struct DisplayLineBuffer {
    display: Lcd,
    line_buffer: [Rgb565Pixel; DISPLAY_WIDTH as usize],
}

impl DisplayLineBuffer {
    pub fn new(display: Lcd) -> Self {
        Self {
            display,
            line_buffer: [Rgb565Pixel(0); DISPLAY_WIDTH as usize],
        }
    }
}

impl LineBufferProvider for &mut DisplayLineBuffer {
    type TargetPixel = Rgb565Pixel;

    fn process_line(
        &mut self,
        line: usize,
        range: core::ops::Range<usize>,
        render_fn: impl FnOnce(&mut [Self::TargetPixel]),
    ) {
        if range.is_empty() {
            return;
        }
        let buffer = &mut self.line_buffer[range.clone()];
        render_fn(buffer);

        // set_pixels takes an inclusive end
        if let Err(e) = self.display.set_pixels(
            range.start as u16,
            line as u16,
            (range.end - 1) as u16,
            line as u16,
            buffer.iter().map(|x| RawU16::new(x.0).into()),
        ) {
            warn!("set_pixels failed on line {line}: {e:?}");
        }
    }
}
