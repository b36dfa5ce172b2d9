//! The lock around the widget tree.
//!
//! The render task and the polling loop both touch the UI. Every access goes
//! through [`GuiLock::with`], which takes the lock, runs a synchronous closure
//! and releases the lock on return, so the lock can never be held across an
//! `.await` (a bus transfer, a timer) by construction.

#[cfg(test)]
use core::cell::Cell;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;

pub struct GuiLock<S> {
    screen: Mutex<NoopRawMutex, S>,
    #[cfg(test)]
    sections: Cell<u32>,
}

impl<S> GuiLock<S> {
    pub fn new(screen: S) -> Self {
        Self {
            screen: Mutex::new(screen),
            #[cfg(test)]
            sections: Cell::new(0),
        }
    }

    /// Runs `f` with exclusive access to the screen, waiting for the lock if needed
    pub async fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut screen = self.screen.lock().await;
        self.entered();
        f(&mut *screen)
    }

    /// Like [`Self::with`] but gives up instead of waiting
    pub fn try_with<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        let mut screen = self.screen.try_lock().ok()?;
        self.entered();
        Some(f(&mut *screen))
    }

    #[cfg(test)]
    fn entered(&self) {
        self.sections.set(self.sections.get() + 1);
    }

    #[cfg(not(test))]
    fn entered(&self) {}

    /// Number of completed lock/unlock pairs
    #[cfg(test)]
    pub(crate) fn critical_sections(&self) -> u32 {
        self.sections.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn with_counts_each_acquisition() {
        let gui = GuiLock::new(0u32);
        block_on(gui.with(|value| *value += 1));
        block_on(gui.with(|value| *value += 1));
        assert_eq!(block_on(gui.with(|value| *value)), 2);
        assert_eq!(gui.critical_sections(), 3);
    }

    #[test]
    fn lock_is_released_after_the_closure() {
        let gui = GuiLock::new(());
        block_on(gui.with(|_| {}));
        assert!(gui.try_with(|_| {}).is_some());
    }

    #[test]
    fn try_with_fails_while_held() {
        let gui = GuiLock::new(());
        let nested = block_on(gui.with(|_| gui.try_with(|_| {})));
        assert!(nested.is_none());
        assert_eq!(gui.critical_sections(), 1);
    }
}
