use core::cell::Cell;
use core::convert::Infallible;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::buttons::BUTTON_AREA_TOP;
use crate::{TouchInput, TouchSample};

/// Latest sample read by the render task, which owns the touch controller.
/// The polling loop reads it from here instead of going to the bus again.
pub struct TouchState {
    sample: Mutex<CriticalSectionRawMutex, Cell<TouchSample>>,
}

impl TouchState {
    pub const fn new() -> Self {
        Self {
            sample: Mutex::new(Cell::new(TouchSample {
                x: 0,
                y: 0,
                pressed: false,
            })),
        }
    }

    pub fn publish(&self, sample: TouchSample) {
        self.sample.lock(|cell| cell.set(sample));
    }

    pub fn latest(&self) -> TouchSample {
        self.sample.lock(|cell| cell.get())
    }
}

impl Default for TouchState {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchInput for &TouchState {
    type Error = Infallible;

    async fn touch(&mut self) -> Result<TouchSample, Self::Error> {
        Ok(self.latest())
    }
}

/// Pointer event for the window, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Pressed { x: u16, y: u16 },
    Moved { x: u16, y: u16 },
    Released { x: u16, y: u16 },
}

/// Turns polled touch samples into press/move/release events for the
/// visible screen area. Touches in the button strip never reach the window;
/// dragging into it releases the pointer at its last on-screen position.
#[derive(Debug, Default)]
pub struct PointerTracker {
    down: Option<(u16, u16)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, sample: &TouchSample) -> Option<PointerEvent> {
        let on_screen = sample.pressed && sample.y < BUTTON_AREA_TOP;
        match (self.down, on_screen) {
            (None, true) => {
                self.down = Some((sample.x, sample.y));
                Some(PointerEvent::Pressed {
                    x: sample.x,
                    y: sample.y,
                })
            }
            (Some(last), true) if last != (sample.x, sample.y) => {
                self.down = Some((sample.x, sample.y));
                Some(PointerEvent::Moved {
                    x: sample.x,
                    y: sample.y,
                })
            }
            (Some((x, y)), false) => {
                self.down = None;
                Some(PointerEvent::Released { x, y })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn latest_returns_last_published() {
        let state = TouchState::new();
        assert_eq!(state.latest(), TouchSample::default());

        let sample = TouchSample {
            x: 5,
            y: 6,
            pressed: true,
        };
        state.publish(sample);
        let mut input = &state;
        assert_eq!(block_on(input.touch()), Ok(sample));
    }

    fn touch(x: u16, y: u16, pressed: bool) -> TouchSample {
        TouchSample { x, y, pressed }
    }

    #[test]
    fn press_drag_release() {
        let mut tracker = PointerTracker::new();
        assert_eq!(
            tracker.update(&touch(100, 50, true)),
            Some(PointerEvent::Pressed { x: 100, y: 50 })
        );
        assert_eq!(tracker.update(&touch(100, 50, true)), None);
        assert_eq!(
            tracker.update(&touch(120, 52, true)),
            Some(PointerEvent::Moved { x: 120, y: 52 })
        );
        // the controller keeps the last position once released
        assert_eq!(
            tracker.update(&touch(120, 52, false)),
            Some(PointerEvent::Released { x: 120, y: 52 })
        );
        assert_eq!(tracker.update(&touch(120, 52, false)), None);
    }

    #[test]
    fn button_strip_is_not_forwarded() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.update(&touch(10, 260, true)), None);
        assert_eq!(tracker.update(&touch(10, 260, false)), None);
    }

    #[test]
    fn dragging_into_button_strip_releases() {
        let mut tracker = PointerTracker::new();
        tracker.update(&touch(200, 230, true));
        assert_eq!(
            tracker.update(&touch(200, 245, true)),
            Some(PointerEvent::Released { x: 200, y: 230 })
        );
    }
}
