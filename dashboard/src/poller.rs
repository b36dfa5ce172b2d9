use embedded_hal_async::delay::DelayNs;
use log::warn;

use crate::config::POLL_PERIOD_MS;
use crate::gui::GuiLock;
use crate::label::LabelBuffer;
use crate::{
    BatteryMonitor, BatteryTelemetry, Clock, DateTime, Label, Labels, TouchInput, TouchSample,
};

/// Refreshes the time, touch and battery labels at a fixed period.
///
/// Sensors are read with the GUI lock released; the lock is then taken once
/// per label. A failed read is logged and the previous reading is shown again.
pub struct Poller<'a, S, C, T, B> {
    gui: &'a GuiLock<S>,
    clock: C,
    touch: T,
    battery: B,
    buffer: LabelBuffer,
    time: DateTime,
    sample: TouchSample,
    telemetry: BatteryTelemetry,
}

impl<'a, S, C, T, B> Poller<'a, S, C, T, B>
where
    S: Labels,
    C: Clock,
    T: TouchInput,
    B: BatteryMonitor,
{
    pub fn new(gui: &'a GuiLock<S>, clock: C, touch: T, battery: B) -> Self {
        Self {
            gui,
            clock,
            touch,
            battery,
            buffer: LabelBuffer::new(),
            time: DateTime::default(),
            sample: TouchSample::default(),
            telemetry: BatteryTelemetry::default(),
        }
    }

    pub async fn run(&mut self, delay: &mut impl DelayNs) -> ! {
        loop {
            self.poll_once().await;
            delay.delay_ms(POLL_PERIOD_MS).await;
        }
    }

    /// One iteration without the trailing sleep
    pub async fn poll_once(&mut self) {
        match self.clock.now().await {
            Ok(time) => self.time = time,
            Err(e) => warn!("RTC read failed: {e:?}"),
        }
        let text = self.buffer.time(&self.time);
        self.gui
            .with(|screen| screen.set_label(Label::Time, text))
            .await;

        match self.touch.touch().await {
            Ok(sample) => self.sample = sample,
            Err(e) => warn!("Touch read failed: {e:?}"),
        }
        let text = self.buffer.touch(&self.sample);
        self.gui
            .with(|screen| screen.set_label(Label::Touch, text))
            .await;

        match self.battery.battery().await {
            Ok(telemetry) => self.telemetry = telemetry,
            Err(e) => warn!("Battery read failed: {e:?}"),
        }
        let text = self.buffer.battery(&self.telemetry);
        self.gui
            .with(|screen| screen.set_label(Label::Battery, text))
            .await;
    }
}
