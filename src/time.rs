//! Blocking delay abstraction for platform-agnostic timing.

use core::time::Duration;

/// Trait for abstracting blocking delays.
///
/// The controller schedules everything with plain blocking waits, so this is
/// the only timing facility it needs. Implement it over your platform's sleep
/// or busy-wait primitive; test code implements it over a virtual clock
/// instead so no test ever sleeps for real.
pub trait Delay {
    /// Blocks the calling thread of control for at least `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// [`Delay`] implementation over [`std::thread::sleep`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

#[cfg(feature = "std")]
impl Delay for ThreadDelay {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
