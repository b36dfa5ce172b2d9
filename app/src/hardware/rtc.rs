//! BM8563 real-time clock initialization

use dashboard::config::SEED_TIME;
use drivers::bm8563::asynch::Bm8563Async;
use log::{info, warn};

use super::SharedI2c;

pub type Rtc = Bm8563Async<SharedI2c>;

/// Starts the clock and seeds it with a fixed date, overwriting whatever time
/// it kept across the reset.
///
/// # Panics
///
/// Panics if the RTC does not respond.
pub async fn initialize_rtc(i2c_device: SharedI2c) -> Rtc {
    let mut rtc = Bm8563Async::new(i2c_device);
    rtc.init().await.expect("Failed to initialize RTC");

    if !rtc
        .is_clock_integrity_ok()
        .await
        .expect("Failed to read RTC integrity flag")
    {
        warn!("RTC lost power, retained time is not reliable");
    }

    rtc.set_time(&SEED_TIME).await.expect("Failed to seed RTC");
    info!("RTC set to {SEED_TIME}");

    rtc
}
