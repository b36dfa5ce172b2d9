use dashboard::controller::{Actions, Controller};
use embassy_time::Delay;

use crate::hardware::SharedPmu;

/// Latest slider values set by the UI callbacks
pub static ACTIONS: Actions = Actions::new();

#[embassy_executor::task]
pub async fn controller_task(pmu: &'static SharedPmu) {
    let mut controller = Controller::new(&ACTIONS, pmu);
    controller.run(&mut Delay).await
}
