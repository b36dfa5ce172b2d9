#![no_std]
#![no_main]

use alloc::boxed::Box;
use alloc::rc::Rc;
use dashboard::gui::GuiLock;
use dashboard::poller::Poller;
use dashboard::touch::TouchState;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_time::Delay;
use esp_alloc::psram_allocator;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use esp_hal_embassy::main;
use esp_println::logger::init_logger_from_env;
use log::info;
use slint::platform::software_renderer::{MinimalSoftwareWindow, RepaintBufferType};
use slint::PhysicalSize;

use controller_task::{controller_task, ACTIONS};
use hardware::{
    initialize_display, initialize_i2c_bus, initialize_pmu, initialize_rtc, initialize_touchpad,
    DISPLAY_HEIGHT, DISPLAY_WIDTH,
};
use render_task::render_task;
use screen::Screen;
use slint_backend::Backend;

extern crate alloc;

mod controller_task;
mod display_line_buffer;
mod hardware;
mod render_task;
mod screen;
mod slint_backend;

esp_bootloader_esp_idf::esp_app_desc!();

/// Latest touch sample, written by the render task
static TOUCH: TouchState = TouchState::new();

#[main]
async fn main(spawner: Spawner) {
    init_logger_from_env();

    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::_240MHz));

    esp_alloc::heap_allocator!(size: 72 * 1024);
    psram_allocator!(peripherals.PSRAM, esp_hal::psram);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);
    info!("Embassy initialized!");

    let i2c_bus = initialize_i2c_bus(peripherals.I2C0, peripherals.GPIO21, peripherals.GPIO22);

    // PMU first: it powers the LCD and drives its reset line
    let pmu = initialize_pmu(I2cDevice::new(i2c_bus)).await;
    info!("PMU initialized");

    let touchpad = initialize_touchpad(I2cDevice::new(i2c_bus)).await;
    info!("Touchpad initialized");

    let display = initialize_display(
        peripherals.GPIO15,
        peripherals.GPIO18,
        peripherals.GPIO23,
        peripherals.GPIO5,
        peripherals.SPI2,
        peripherals.DMA_SPI2,
    );
    info!("Display initialized");

    let window = MinimalSoftwareWindow::new(RepaintBufferType::ReusedBuffer);
    window.set_size(PhysicalSize::new(DISPLAY_WIDTH.into(), DISPLAY_HEIGHT.into()));
    slint::platform::set_platform(Box::new(Backend::new(window.clone())))
        .expect("set_platform failed");

    let rtc = initialize_rtc(I2cDevice::new(i2c_bus)).await;
    info!("RTC initialized");

    let gui = Rc::new(GuiLock::new(Screen::new(window)));
    gui.with(|screen| screen.construct(&ACTIONS))
        .await
        .expect("UI init failed");
    info!("UI constructed");

    // TASK: touch dispatch, virtual buttons and the render loop
    spawner
        .spawn(render_task(gui.clone(), display, touchpad, &TOUCH))
        .ok();

    // TASK: apply slider changes to the PMU
    spawner.spawn(controller_task(pmu)).ok();

    let mut poller = Poller::new(&*gui, rtc, &TOUCH, pmu);
    poller.run(&mut Delay).await
}
