//! Button monitoring and crossing trigger loop.
//!
//! Provides [`ButtonMonitor`] which polls the request button, debounces
//! presses, and fires one crossing cycle per physical press on a borrowed
//! [`Sequencer`]. Also defines the [`PushButton`] trait for input hardware.

use crate::sequencer::{Lamps, Sequencer};
use crate::time::Delay;
use core::time::Duration;
use log::{debug, info};

/// Wait between the first pressed sample and committing to a cycle.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Button sampling interval while the crossing is idle.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Button sampling interval while waiting for a held button's release.
pub const RELEASE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Trait for abstracting the crossing-request button.
///
/// Implement this for your input hardware. The monitor only ever sees the
/// logical pressed state, never raw levels.
pub trait PushButton {
    /// Returns `true` while the button is held down.
    ///
    /// Fold any active-low wiring in here. Handle any hardware errors
    /// internally - this method cannot fail.
    fn is_pressed(&mut self) -> bool;
}

/// Polls the request button and fires crossing cycles on a sequencer.
///
/// One physical press triggers exactly one cycle. While a cycle runs the
/// button is not sampled at all, so a press arriving mid-cycle is dropped
/// rather than queued. After a cycle the monitor holds until the button
/// reads released, so a press held across the whole cycle still counts
/// once.
///
/// # Type Parameters
/// * `B` - Button implementation
/// * `D` - Blocking delay implementation
pub struct ButtonMonitor<B: PushButton, D: Delay> {
    button: B,
    delay: D,
}

impl<B: PushButton, D: Delay> ButtonMonitor<B, D> {
    /// Creates a monitor over the given button and delay source.
    pub fn new(button: B, delay: D) -> Self {
        Self { button, delay }
    }

    /// Runs the poll loop until `keep_running` returns `false`.
    ///
    /// While idle the button is sampled every [`POLL_INTERVAL`]. A pressed
    /// sample commits to one cycle: the monitor waits [`DEBOUNCE_DELAY`],
    /// runs the sequencer, then polls at [`RELEASE_POLL_INTERVAL`] until the
    /// button reads released. The level is not re-sampled after the debounce
    /// wait, so a press shorter than the window still runs a full cycle.
    ///
    /// `keep_running` is checked once per idle iteration and inside the
    /// release wait, so a held button cannot stall shutdown.
    pub fn run<L, D2, F>(&mut self, sequencer: &mut Sequencer<L, D2>, mut keep_running: F)
    where
        L: Lamps,
        D2: Delay,
        F: FnMut() -> bool,
    {
        while keep_running() {
            if self.button.is_pressed() {
                info!("button pressed, starting crossing sequence");
                self.delay.sleep(DEBOUNCE_DELAY);

                sequencer.run_crossing_sequence();
                debug!("crossing sequence complete, waiting for button release");

                while self.button.is_pressed() {
                    if !keep_running() {
                        return;
                    }
                    self.delay.sleep(RELEASE_POLL_INTERVAL);
                }
            }

            self.delay.sleep(POLL_INTERVAL);
        }
    }
}
