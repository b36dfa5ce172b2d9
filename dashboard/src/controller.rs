use core::ops::RangeInclusive;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use log::{debug, warn};

use crate::config::{BRIGHTNESS_RANGE, MOTOR_RANGE, SETTER_RETRY_MS};
use crate::PowerControl;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SetBrightness(u8),
    SetMotorStrength(u8),
}

/// Pending slider values, one slot per slider. A value the controller has
/// not picked up yet is replaced by a newer one, so the position the user
/// stopped on is always the one applied.
pub struct Actions {
    brightness: Signal<CriticalSectionRawMutex, u8>,
    motor: Signal<CriticalSectionRawMutex, u8>,
}

impl Actions {
    pub const fn new() -> Self {
        Self {
            brightness: Signal::new(),
            motor: Signal::new(),
        }
    }

    fn slot(&self, action: Action) -> (&Signal<CriticalSectionRawMutex, u8>, u8) {
        match action {
            Action::SetBrightness(value) => (&self.brightness, value),
            Action::SetMotorStrength(value) => (&self.motor, value),
        }
    }

    /// Queues `action` again unless a newer value for the same slider arrived
    pub fn resend(&self, action: Action) {
        let (slot, value) = self.slot(action);
        if !slot.signaled() {
            slot.signal(value);
        }
    }

    /// Waits for the next pending value of either slider
    pub async fn receive(&self) -> Action {
        match select(self.brightness.wait(), self.motor.wait()).await {
            Either::First(value) => Action::SetBrightness(value),
            Either::Second(value) => Action::SetMotorStrength(value),
        }
    }
}

impl Default for Actions {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues an action from a UI callback.
///
/// Callbacks run synchronously inside the toolkit's event dispatch, so this
/// never waits.
pub fn send_action(actions: &Actions, action: Action) {
    let (slot, value) = actions.slot(action);
    slot.signal(value);
}

/// Slider position to percent. The toolkit reports fractional values while
/// dragging; they are rounded and clamped to the slider range.
pub fn slider_value(raw: f32, range: &RangeInclusive<u8>) -> u8 {
    let rounded = libm::roundf(raw);
    if rounded.is_nan() || rounded <= f32::from(*range.start()) {
        *range.start()
    } else if rounded >= f32::from(*range.end()) {
        *range.end()
    } else {
        rounded as u8
    }
}

/// Idle until a value different from the last applied one arrives
#[derive(Debug, Default)]
pub struct SliderLatch {
    applied: Option<u8>,
}

impl SliderLatch {
    pub fn is_changed(&self, value: u8) -> bool {
        self.applied != Some(value)
    }

    pub fn commit(&mut self, value: u8) {
        self.applied = Some(value);
    }
}

/// Applies slider actions to the hardware, one setter call per new value
pub struct Controller<'a, P> {
    actions: &'a Actions,
    power: P,
    brightness: SliderLatch,
    motor: SliderLatch,
}

impl<'a, P> Controller<'a, P>
where
    P: PowerControl,
{
    pub fn new(actions: &'a Actions, power: P) -> Self {
        Self {
            actions,
            power,
            brightness: SliderLatch::default(),
            motor: SliderLatch::default(),
        }
    }

    /// A failed write is attempted again after [`SETTER_RETRY_MS`] unless the
    /// slider moved in the meantime.
    pub async fn run(&mut self, delay: &mut impl DelayNs) -> ! {
        loop {
            let action = self.actions.receive().await;
            debug!("process action {action:?}");
            if let Err(e) = self.process_action(action).await {
                warn!("process action {action:?}: {e:?}");
                delay.delay_ms(SETTER_RETRY_MS).await;
                self.actions.resend(action);
            }
        }
    }

    pub async fn process_action(&mut self, action: Action) -> Result<(), P::Error> {
        match action {
            Action::SetBrightness(value) => {
                let value = value.clamp(*BRIGHTNESS_RANGE.start(), *BRIGHTNESS_RANGE.end());
                if self.brightness.is_changed(value) {
                    self.power.set_brightness(value).await?;
                    self.brightness.commit(value);
                }
            }
            Action::SetMotorStrength(value) => {
                let value = value.clamp(*MOTOR_RANGE.start(), *MOTOR_RANGE.end());
                if self.motor.is_changed(value) {
                    self.power.set_motor_strength(value).await?;
                    self.motor.commit(value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::{block_on, yield_now};
    extern crate std;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Brightness(u8),
        Motor(u8),
    }

    #[derive(Default)]
    struct FakePower {
        calls: Vec<Call>,
        failures: u8,
    }

    impl FakePower {
        fn record(&mut self, call: Call) -> Result<(), ()> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(());
            }
            self.calls.push(call);
            Ok(())
        }
    }

    impl PowerControl for &mut FakePower {
        type Error = ();

        async fn set_brightness(&mut self, percent: u8) -> Result<(), ()> {
            self.record(Call::Brightness(percent))
        }

        async fn set_motor_strength(&mut self, percent: u8) -> Result<(), ()> {
            self.record(Call::Motor(percent))
        }
    }

    /// Records the requested sleeps and lets the other side of a `select` run
    #[derive(Default)]
    struct FakeDelay(Vec<u32>);

    impl DelayNs for FakeDelay {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.0.push(ms);
            yield_now().await;
        }
    }

    /// Drives the controller until it has been idle for a few polls
    fn run_until_idle(controller: &mut Controller<'_, &mut FakePower>, delay: &mut FakeDelay) {
        block_on(select(controller.run(delay), async {
            for _ in 0..16 {
                yield_now().await;
            }
        }));
    }

    #[test]
    fn every_brightness_value_makes_exactly_one_call() {
        let actions = Actions::new();
        for value in BRIGHTNESS_RANGE {
            let mut power = FakePower::default();
            let mut controller = Controller::new(&actions, &mut power);
            block_on(controller.process_action(Action::SetBrightness(value))).unwrap();
            assert_eq!(power.calls, [Call::Brightness(value)]);
        }
    }

    #[test]
    fn every_motor_value_makes_exactly_one_call() {
        let actions = Actions::new();
        for value in MOTOR_RANGE {
            let mut power = FakePower::default();
            let mut controller = Controller::new(&actions, &mut power);
            block_on(controller.process_action(Action::SetMotorStrength(value))).unwrap();
            assert_eq!(power.calls, [Call::Motor(value)]);
        }
    }

    #[test]
    fn repeated_value_is_forwarded_once() {
        let actions = Actions::new();
        let mut power = FakePower::default();
        let mut controller = Controller::new(&actions, &mut power);
        for action in [
            Action::SetBrightness(60),
            Action::SetBrightness(60),
            Action::SetMotorStrength(10),
            Action::SetBrightness(61),
            Action::SetMotorStrength(10),
        ] {
            block_on(controller.process_action(action)).unwrap();
        }
        assert_eq!(
            power.calls,
            [Call::Brightness(60), Call::Motor(10), Call::Brightness(61)]
        );
    }

    #[test]
    fn out_of_range_brightness_is_clamped() {
        let actions = Actions::new();
        let mut power = FakePower::default();
        let mut controller = Controller::new(&actions, &mut power);
        block_on(controller.process_action(Action::SetBrightness(5))).unwrap();
        assert_eq!(power.calls, [Call::Brightness(30)]);
    }

    #[test]
    fn burst_of_changes_applies_the_final_value() {
        let actions = Actions::new();
        for value in [40, 50, 60, 70, 80, 90] {
            send_action(&actions, Action::SetBrightness(value));
        }
        send_action(&actions, Action::SetMotorStrength(20));
        send_action(&actions, Action::SetMotorStrength(35));

        let mut power = FakePower::default();
        let mut delay = FakeDelay::default();
        let mut controller = Controller::new(&actions, &mut power);
        run_until_idle(&mut controller, &mut delay);

        assert_eq!(power.calls, [Call::Brightness(90), Call::Motor(35)]);
        assert!(delay.0.is_empty());
    }

    #[test]
    fn failed_setter_is_retried_after_a_pause() {
        let actions = Actions::new();
        send_action(&actions, Action::SetMotorStrength(40));

        let mut power = FakePower {
            failures: 1,
            ..FakePower::default()
        };
        let mut delay = FakeDelay::default();
        let mut controller = Controller::new(&actions, &mut power);
        run_until_idle(&mut controller, &mut delay);

        assert_eq!(power.calls, [Call::Motor(40)]);
        assert_eq!(delay.0, [SETTER_RETRY_MS]);
    }

    #[test]
    fn resend_keeps_a_newer_value() {
        let actions = Actions::new();
        send_action(&actions, Action::SetBrightness(70));
        actions.resend(Action::SetBrightness(40));
        assert_eq!(block_on(actions.receive()), Action::SetBrightness(70));

        actions.resend(Action::SetBrightness(40));
        assert_eq!(block_on(actions.receive()), Action::SetBrightness(40));
    }

    #[test]
    fn slider_values_are_rounded_and_clamped() {
        assert_eq!(slider_value(49.6, &BRIGHTNESS_RANGE), 50);
        assert_eq!(slider_value(50.4, &BRIGHTNESS_RANGE), 50);
        assert_eq!(slider_value(10.0, &BRIGHTNESS_RANGE), 30);
        assert_eq!(slider_value(250.0, &BRIGHTNESS_RANGE), 100);
        assert_eq!(slider_value(-3.0, &MOTOR_RANGE), 0);
        assert_eq!(slider_value(f32::NAN, &MOTOR_RANGE), 0);
    }
}
