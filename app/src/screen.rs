use alloc::rc::Rc;
use dashboard::config::{BRIGHTNESS_INITIAL, BRIGHTNESS_RANGE, MOTOR_INITIAL, MOTOR_RANGE};
use dashboard::controller::{send_action, slider_value, Action, Actions};
use dashboard::{Label, Labels};
use slint::platform::software_renderer::MinimalSoftwareWindow;
use slint::{ComponentHandle, PlatformError};
use slint_generated::AppWindow;

/// The window and its widget tree. Only reachable through the GUI lock.
pub struct Screen {
    pub window: Rc<MinimalSoftwareWindow>,
    ui: Option<AppWindow>,
}

impl Screen {
    /// An empty screen; the widget tree is created by [`Self::construct`].
    pub fn new(window: Rc<MinimalSoftwareWindow>) -> Self {
        Self { window, ui: None }
    }

    /// Creates the widget tree, sets slider ranges and initial values, wires
    /// the slider callbacks to the controller and shows the window. The Slint
    /// platform must already be set.
    pub fn construct(&mut self, actions: &'static Actions) -> Result<(), PlatformError> {
        let ui = AppWindow::new()?;

        ui.set_brightness_minimum((*BRIGHTNESS_RANGE.start()).into());
        ui.set_brightness_maximum((*BRIGHTNESS_RANGE.end()).into());
        ui.set_brightness(BRIGHTNESS_INITIAL.into());
        ui.set_motor_minimum((*MOTOR_RANGE.start()).into());
        ui.set_motor_maximum((*MOTOR_RANGE.end()).into());
        ui.set_motor_strength(MOTOR_INITIAL.into());

        ui.on_brightness_changed(move |value| {
            send_action(
                actions,
                Action::SetBrightness(slider_value(value, &BRIGHTNESS_RANGE)),
            )
        });
        ui.on_motor_strength_changed(move |value| {
            send_action(
                actions,
                Action::SetMotorStrength(slider_value(value, &MOTOR_RANGE)),
            )
        });

        ui.show()?;
        self.ui = Some(ui);
        Ok(())
    }
}

impl Labels for Screen {
    fn set_label(&mut self, label: Label, text: &str) {
        let Some(ui) = &self.ui else {
            return;
        };
        match label {
            Label::Time => ui.set_time_text(text.into()),
            Label::Touch => ui.set_touch_text(text.into()),
            Label::Battery => ui.set_battery_text(text.into()),
        }
    }
}
