//! The three touch buttons printed below the Core2 screen.
//!
//! The touch panel extends 40 pixels past the bottom of the LCD; that strip is
//! split in three equal regions.

use crate::TouchSample;

pub const BUTTON_AREA_TOP: u16 = 240;
pub const BUTTON_AREA_BOTTOM: u16 = 280;
const BUTTON_WIDTH: u16 = 320 / 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed(Button),
    Released(Button),
}

pub fn button_at(x: u16, y: u16) -> Option<Button> {
    if !(BUTTON_AREA_TOP..BUTTON_AREA_BOTTOM).contains(&y) {
        return None;
    }
    match x / BUTTON_WIDTH {
        0 => Some(Button::Left),
        1 => Some(Button::Middle),
        _ => Some(Button::Right),
    }
}

/// Turns touch samples into press/release edges
#[derive(Debug, Default)]
pub struct VirtualButtons {
    held: Option<Button>,
}

impl VirtualButtons {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finger sliding from one button to another releases the first; the
    /// second is reported as pressed on the following sample.
    pub fn update(&mut self, sample: &TouchSample) -> Option<ButtonEvent> {
        let current = if sample.pressed {
            button_at(sample.x, sample.y)
        } else {
            None
        };
        match (self.held, current) {
            (Some(held), current) if current != Some(held) => {
                self.held = None;
                Some(ButtonEvent::Released(held))
            }
            (None, Some(pressed)) => {
                self.held = Some(pressed);
                Some(ButtonEvent::Pressed(pressed))
            }
            _ => None,
        }
    }

    #[cfg(test)]
    fn held(&self) -> Option<Button> {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(x: u16, y: u16, pressed: bool) -> TouchSample {
        TouchSample { x, y, pressed }
    }

    #[test]
    fn regions_split_the_strip_in_three() {
        assert_eq!(button_at(0, 250), Some(Button::Left));
        assert_eq!(button_at(105, 250), Some(Button::Left));
        assert_eq!(button_at(106, 250), Some(Button::Middle));
        assert_eq!(button_at(212, 279), Some(Button::Right));
        assert_eq!(button_at(319, 240), Some(Button::Right));
        assert_eq!(button_at(160, 239), None);
        assert_eq!(button_at(160, 280), None);
    }

    #[test]
    fn press_and_release_are_reported_once() {
        let mut buttons = VirtualButtons::new();
        assert_eq!(
            buttons.update(&touch(160, 260, true)),
            Some(ButtonEvent::Pressed(Button::Middle))
        );
        assert_eq!(buttons.update(&touch(161, 261, true)), None);
        assert_eq!(buttons.held(), Some(Button::Middle));
        assert_eq!(
            buttons.update(&touch(161, 261, false)),
            Some(ButtonEvent::Released(Button::Middle))
        );
        assert_eq!(buttons.update(&touch(161, 261, false)), None);
    }

    #[test]
    fn sliding_between_buttons_releases_first() {
        let mut buttons = VirtualButtons::new();
        buttons.update(&touch(10, 260, true));
        assert_eq!(
            buttons.update(&touch(300, 260, true)),
            Some(ButtonEvent::Released(Button::Left))
        );
        assert_eq!(
            buttons.update(&touch(300, 260, true)),
            Some(ButtonEvent::Pressed(Button::Right))
        );
    }

    #[test]
    fn screen_touches_are_not_buttons() {
        let mut buttons = VirtualButtons::new();
        assert_eq!(buttons.update(&touch(10, 100, true)), None);
        assert_eq!(buttons.held(), None);
    }
}
