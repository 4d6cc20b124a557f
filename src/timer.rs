use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

/// # Timer
/// An 8-bit register that counts down towards 0, used for both the delay and sound timers.
///
/// The register can be driven in one of two ways, never both:
/// - `start` spawns a thread that decrements it once per period until the Timer is dropped
/// - `tick` decrements it once, for drivers that step timers alongside the CPU
///
/// Periods missed because the thread was descheduled are not made up.
#[derive(Debug, Default)]
pub struct Timer {
    register: Arc<Mutex<u8>>,
    countdown: Option<Countdown>,
}

/// The background decrement loop; dropping `stop` wakes and ends it.
#[derive(Debug)]
struct Countdown {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u8 {
        *self.lock()
    }

    pub fn set(&self, value: u8) {
        *self.lock() = value;
    }

    /// Starts decrementing the register once every `period` on a background thread.
    pub fn start(&mut self, period: Duration) {
        if self.is_running() {
            warn!("timer already running, ignoring start");
            return;
        }

        let register = Arc::clone(&self.register);
        let (stop, stopped) = mpsc::channel::<()>();

        debug!("starting timer with a period of {:?}", period);
        let handle = thread::spawn(move || loop {
            match stopped.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    let mut value = register.lock().unwrap_or_else(PoisonError::into_inner);
                    *value = value.saturating_sub(1);
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        self.countdown = Some(Countdown { stop, handle });
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_some()
    }

    /// Decrements the register once; a no-op while the countdown thread owns decrementing.
    pub fn tick(&self) {
        if self.is_running() {
            return;
        }
        let mut value = self.lock();
        *value = value.saturating_sub(1);
    }

    fn lock(&self) -> MutexGuard<'_, u8> {
        self.register.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(Countdown { stop, handle }) = self.countdown.take() {
            drop(stop);
            if handle.join().is_err() {
                warn!("timer thread panicked");
            }
            debug!("timer stopped");
        }
    }
}
