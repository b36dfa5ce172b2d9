use alloc::rc::Rc;
use embassy_time::Instant;
use log::info;
use slint::{
    platform::{software_renderer::MinimalSoftwareWindow, Platform, WindowAdapter},
    PlatformError,
};

/// Slint platform backed by the embassy time driver. The single window is
/// created up front and handed out to the generated component.
pub struct Backend {
    window: Rc<MinimalSoftwareWindow>,
}

impl Backend {
    pub fn new(window: Rc<MinimalSoftwareWindow>) -> Self {
        Self { window }
    }
}

impl Platform for Backend {
    fn create_window_adapter(&self) -> Result<Rc<dyn WindowAdapter>, PlatformError> {
        info!("Creating window adapter");
        Ok(self.window.clone())
    }

    fn duration_since_start(&self) -> core::time::Duration {
        core::time::Duration::from_micros(Instant::now().as_micros())
    }
}
