use alloc::rc::Rc;
use dashboard::buttons::{ButtonEvent, VirtualButtons};
use dashboard::gui::GuiLock;
use dashboard::touch::{PointerEvent, PointerTracker, TouchState};
use embassy_time::Timer;
use log::{debug, info, warn};
use slint::platform::{PointerEventButton, WindowEvent};
use slint::LogicalPosition;

use crate::display_line_buffer::DisplayLineBuffer;
use crate::hardware::{Lcd, Touchpad};
use crate::screen::Screen;

/// Idle time between frames when nothing needed drawing
const IDLE_FRAME_MS: u64 = 10;

#[embassy_executor::task()]
pub async fn render_task(
    gui: Rc<GuiLock<Screen>>,
    display: Lcd,
    mut touchpad: Touchpad,
    touch_state: &'static TouchState,
) {
    let mut buffer_provider = DisplayLineBuffer::new(display);
    let mut pointer = PointerTracker::new();
    let mut buttons = VirtualButtons::new();

    loop {
        // the bus is only touched with the GUI lock released
        let event = match touchpad.read_touch().await {
            Ok(sample) => {
                touch_state.publish(sample);
                match buttons.update(&sample) {
                    Some(ButtonEvent::Pressed(button)) => info!("{button:?} button pressed"),
                    Some(ButtonEvent::Released(button)) => info!("{button:?} button released"),
                    None => {}
                }
                pointer.update(&sample).map(window_event)
            }
            Err(e) => {
                warn!("Touch read error: {e:?}");
                None
            }
        };

        let is_dirty = gui
            .with(|screen| {
                slint::platform::update_timers_and_animations();

                if let Some(event) = event {
                    debug!("Dispatching Slint event: {event:?}");
                    if let Err(e) = screen.window.try_dispatch_event(event) {
                        warn!("Event dispatch failed: {e:?}");
                    }
                }

                screen.window.draw_if_needed(|renderer| {
                    renderer.render_by_line(&mut buffer_provider);
                })
            })
            .await;

        if !is_dirty {
            Timer::after_millis(IDLE_FRAME_MS).await
        }
    }
}

fn window_event(event: PointerEvent) -> WindowEvent {
    let button = PointerEventButton::Left;
    match event {
        PointerEvent::Pressed { x, y } => WindowEvent::PointerPressed {
            position: position(x, y),
            button,
        },
        PointerEvent::Moved { x, y } => WindowEvent::PointerMoved {
            position: position(x, y),
        },
        PointerEvent::Released { x, y } => WindowEvent::PointerReleased {
            position: position(x, y),
            button,
        },
    }
}

fn position(x: u16, y: u16) -> LogicalPosition {
    LogicalPosition::new(x.into(), y.into())
}
