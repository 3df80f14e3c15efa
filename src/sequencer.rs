//! Crossing sequencer with fixed phase timing.
//!
//! Provides [`Sequencer`] which drives the five crossing lamps through one
//! timed pedestrian-crossing cycle per trigger, blocking between phase
//! transitions. Also defines the [`Lamps`] trait for hardware abstraction.

use crate::time::Delay;
use crate::types::{CarLights, Lamp, PedLights, Phase};
use core::time::Duration;

/// How long the car amber phase holds before cars are stopped.
pub const CAR_AMBER_HOLD: Duration = Duration::from_secs(3);

/// How long pedestrians get a steady green.
pub const PED_CROSS_HOLD: Duration = Duration::from_secs(15);

/// Number of pedestrian-green blinks that close the crossing window.
pub const BLINK_COUNT: u32 = 5;

/// Half-period of one blink. The lamp holds each level this long.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// How long red and amber show together before cars are released.
pub const CAR_RED_AMBER_HOLD: Duration = Duration::from_secs(3);

/// Trait for abstracting the five-lamp crossing display.
///
/// Implement this for your output hardware (GPIO expander, relay board,
/// LED driver) to let the sequencer control it.
pub trait Lamps {
    /// Sets a single lamp to the given level (`true` = lit).
    ///
    /// Handle any hardware errors internally - this method cannot fail.
    fn set(&mut self, lamp: Lamp, on: bool);
}

/// Drives one pedestrian crossing through its fixed light cycle.
///
/// The sequencer owns the lamp port and a blocking delay source, both
/// injected at construction. Every operation is synchronous: a call to
/// [`Sequencer::run_crossing_sequence`] returns only after the whole cycle
/// has played out on the lamps and the display is back in the idle pattern.
/// Mutual exclusion between cycles is structural - nothing else runs on the
/// thread while a cycle is in progress.
///
/// # Type Parameters
/// * `L` - Lamp port implementation
/// * `D` - Blocking delay implementation
pub struct Sequencer<L: Lamps, D: Delay> {
    lamps: L,
    delay: D,
    phase: Phase,
}

impl<L: Lamps, D: Delay> Sequencer<L, D> {
    /// Creates a new idle sequencer with every lamp turned off.
    pub fn new(mut lamps: L, delay: D) -> Self {
        for lamp in Lamp::ALL {
            lamps.set(lamp, false);
        }

        Self {
            lamps,
            delay,
            phase: Phase::Idle,
        }
    }

    /// Returns the currently active phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Puts the display in the at-rest pattern: car green on, pedestrian red
    /// on, every other lamp off.
    ///
    /// No precondition; calling it repeatedly rewrites the same levels.
    pub fn enter_idle(&mut self) {
        self.enter_phase(Phase::Idle);
    }

    /// Drives every lamp low, leaving the display dark.
    ///
    /// Shutdown path. The tracked phase is left untouched.
    pub fn all_off(&mut self) {
        for lamp in Lamp::ALL {
            self.lamps.set(lamp, false);
        }
    }

    /// Runs one full crossing cycle, blocking until the display is back in
    /// the idle pattern.
    ///
    /// The cycle is a fixed chain with no branching and no early exit:
    ///
    /// 1. Car amber; hold [`CAR_AMBER_HOLD`].
    /// 2. Car red (no wait).
    /// 3. Pedestrian green; hold [`PED_CROSS_HOLD`].
    /// 4. Blink pedestrian green [`BLINK_COUNT`] times at [`BLINK_INTERVAL`]
    ///    per half-period, ending dark.
    /// 5. Pedestrian red (no wait).
    /// 6. Car red and amber; hold [`CAR_RED_AMBER_HOLD`].
    /// 7. Back to idle.
    ///
    /// Each phase writes its lamp group in full before its wait starts. The
    /// call blocks for the sum of all holds, about 26 seconds.
    pub fn run_crossing_sequence(&mut self) {
        loop {
            let phase = self.phase.next();
            self.enter_phase(phase);

            match phase {
                Phase::CarAmber => self.delay.sleep(CAR_AMBER_HOLD),
                Phase::CarRed | Phase::PedRed => {}
                Phase::PedGreen => self.delay.sleep(PED_CROSS_HOLD),
                Phase::PedBlinking => self.blink_ped_green(),
                Phase::CarRedAmber => self.delay.sleep(CAR_RED_AMBER_HOLD),
                Phase::Idle => break,
            }
        }
    }

    // Applies a phase's lamp patterns as whole groups, never mid-wait.
    fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;

        if let Some(car) = phase.car_lights() {
            self.set_car(car);
        }
        if let Some(ped) = phase.ped_lights() {
            self.set_ped(ped);
        }
    }

    fn set_car(&mut self, lights: CarLights) {
        self.lamps.set(Lamp::CarRed, lights.red);
        self.lamps.set(Lamp::CarAmber, lights.amber);
        self.lamps.set(Lamp::CarGreen, lights.green);
    }

    fn set_ped(&mut self, lights: PedLights) {
        self.lamps.set(Lamp::PedRed, lights.red);
        self.lamps.set(Lamp::PedGreen, lights.green);
    }

    // Toggles only the pedestrian green lamp; the rest of the display keeps
    // the levels of the preceding phase. Ends with the lamp dark.
    fn blink_ped_green(&mut self) {
        for _ in 0..BLINK_COUNT {
            self.lamps.set(Lamp::PedGreen, true);
            self.delay.sleep(BLINK_INTERVAL);
            self.lamps.set(Lamp::PedGreen, false);
            self.delay.sleep(BLINK_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use core::time::Duration;
    use heapless::Vec;
    extern crate std;
    use std::rc::Rc;

    // Virtual clock shared by the delay mock and the write recorder.
    #[derive(Clone)]
    struct TestClock(Rc<Cell<u64>>);

    impl TestClock {
        fn new() -> Self {
            TestClock(Rc::new(Cell::new(0)))
        }

        fn now_ms(&self) -> u64 {
            self.0.get()
        }

        fn advance(&self, millis: u64) {
            self.0.set(self.0.get() + millis);
        }
    }

    // Delay that advances the virtual clock instead of sleeping.
    struct TestDelay {
        clock: TestClock,
    }

    impl Delay for TestDelay {
        fn sleep(&mut self, duration: Duration) {
            self.clock.advance(duration.as_millis() as u64);
        }
    }

    // One recorded lamp write with its virtual timestamp.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Write {
        at_ms: u64,
        lamp: Lamp,
        on: bool,
    }

    // Lamp port that records every write instead of touching hardware.
    struct RecordingLamps {
        clock: TestClock,
        writes: Rc<RefCell<Vec<Write, 128>>>,
    }

    impl Lamps for RecordingLamps {
        fn set(&mut self, lamp: Lamp, on: bool) {
            let write = Write {
                at_ms: self.clock.now_ms(),
                lamp,
                on,
            };
            let _ = self.writes.borrow_mut().push(write);
        }
    }

    fn harness() -> (
        TestClock,
        Rc<RefCell<Vec<Write, 128>>>,
        Sequencer<RecordingLamps, TestDelay>,
    ) {
        let clock = TestClock::new();
        let writes = Rc::new(RefCell::new(Vec::new()));
        let lamps = RecordingLamps {
            clock: clock.clone(),
            writes: Rc::clone(&writes),
        };
        let delay = TestDelay {
            clock: clock.clone(),
        };
        let sequencer = Sequencer::new(lamps, delay);

        // Drop the all-off writes the constructor emits so each test sees
        // only the operation under test.
        writes.borrow_mut().clear();
        (clock, writes, sequencer)
    }

    fn slot(lamp: Lamp) -> usize {
        match lamp {
            Lamp::CarRed => 0,
            Lamp::CarAmber => 1,
            Lamp::CarGreen => 2,
            Lamp::PedRed => 3,
            Lamp::PedGreen => 4,
        }
    }

    // Replays writes on top of an all-off display and returns final levels.
    fn final_levels(writes: &[Write]) -> [bool; 5] {
        let mut levels = [false; 5];
        for write in writes {
            levels[slot(write.lamp)] = write.on;
        }
        levels
    }

    #[test]
    fn new_forces_every_lamp_off() {
        let clock = TestClock::new();
        let writes = Rc::new(RefCell::new(Vec::new()));
        let lamps = RecordingLamps {
            clock: clock.clone(),
            writes: Rc::clone(&writes),
        };
        let delay = TestDelay { clock };

        let sequencer = Sequencer::new(lamps, delay);

        let recorded = writes.borrow();
        assert_eq!(recorded.len(), 5);
        for (write, lamp) in recorded.iter().zip(Lamp::ALL) {
            assert_eq!(write.lamp, lamp);
            assert!(!write.on);
            assert_eq!(write.at_ms, 0);
        }
        assert_eq!(sequencer.phase(), Phase::Idle);
    }

    #[test]
    fn enter_idle_sets_car_green_and_ped_red() {
        let (_clock, writes, mut sequencer) = harness();

        sequencer.enter_idle();

        let expected = [
            (Lamp::CarRed, false),
            (Lamp::CarAmber, false),
            (Lamp::CarGreen, true),
            (Lamp::PedRed, true),
            (Lamp::PedGreen, false),
        ];
        let recorded = writes.borrow();
        assert_eq!(recorded.len(), expected.len());
        for (write, (lamp, on)) in recorded.iter().zip(expected) {
            assert_eq!((write.lamp, write.on), (lamp, on));
        }
        assert_eq!(sequencer.phase(), Phase::Idle);
    }

    #[test]
    fn enter_idle_is_idempotent() {
        let (_clock, writes, mut sequencer) = harness();

        sequencer.enter_idle();
        sequencer.enter_idle();

        let recorded = writes.borrow();
        assert_eq!(recorded.len(), 10);
        assert_eq!(recorded[..5], recorded[5..]);

        let levels = final_levels(&recorded);
        assert_eq!(levels[slot(Lamp::CarGreen)], true);
        assert_eq!(levels[slot(Lamp::PedRed)], true);
        assert_eq!(levels[slot(Lamp::CarRed)], false);
        assert_eq!(levels[slot(Lamp::CarAmber)], false);
        assert_eq!(levels[slot(Lamp::PedGreen)], false);
    }

    #[test]
    fn all_off_drives_every_lamp_low() {
        let (_clock, writes, mut sequencer) = harness();

        sequencer.enter_idle();
        writes.borrow_mut().clear();
        sequencer.all_off();

        let recorded = writes.borrow();
        assert_eq!(recorded.len(), 5);
        for (write, lamp) in recorded.iter().zip(Lamp::ALL) {
            assert_eq!(write.lamp, lamp);
            assert!(!write.on);
        }
    }

    #[test]
    fn crossing_sequence_writes_every_phase_in_order() {
        let (_clock, writes, mut sequencer) = harness();
        sequencer.enter_idle();
        writes.borrow_mut().clear();

        sequencer.run_crossing_sequence();

        let expected: [(u64, Lamp, bool); 28] = [
            // Car amber at t=0.
            (0, Lamp::CarRed, false),
            (0, Lamp::CarAmber, true),
            (0, Lamp::CarGreen, false),
            // Car red after the amber hold, pedestrian green immediately after.
            (3_000, Lamp::CarRed, true),
            (3_000, Lamp::CarAmber, false),
            (3_000, Lamp::CarGreen, false),
            (3_000, Lamp::PedRed, false),
            (3_000, Lamp::PedGreen, true),
            // Blink half-periods after the steady crossing hold.
            (18_000, Lamp::PedGreen, true),
            (18_500, Lamp::PedGreen, false),
            (19_000, Lamp::PedGreen, true),
            (19_500, Lamp::PedGreen, false),
            (20_000, Lamp::PedGreen, true),
            (20_500, Lamp::PedGreen, false),
            (21_000, Lamp::PedGreen, true),
            (21_500, Lamp::PedGreen, false),
            (22_000, Lamp::PedGreen, true),
            (22_500, Lamp::PedGreen, false),
            // Pedestrian red, then car red+amber, at the same instant.
            (23_000, Lamp::PedRed, true),
            (23_000, Lamp::PedGreen, false),
            (23_000, Lamp::CarRed, true),
            (23_000, Lamp::CarAmber, true),
            (23_000, Lamp::CarGreen, false),
            // Back to idle after the red+amber hold.
            (26_000, Lamp::CarRed, false),
            (26_000, Lamp::CarAmber, false),
            (26_000, Lamp::CarGreen, true),
            (26_000, Lamp::PedRed, true),
            (26_000, Lamp::PedGreen, false),
        ];

        let recorded = writes.borrow();
        assert_eq!(recorded.len(), expected.len());
        for (i, (write, (at_ms, lamp, on))) in recorded.iter().zip(expected).enumerate() {
            assert_eq!(
                (write.at_ms, write.lamp, write.on),
                (at_ms, lamp, on),
                "write {} out of order",
                i
            );
        }
        assert_eq!(sequencer.phase(), Phase::Idle);
    }

    #[test]
    fn crossing_sequence_blocks_for_total_duration() {
        let (clock, _writes, mut sequencer) = harness();
        sequencer.enter_idle();

        sequencer.run_crossing_sequence();

        // 3s amber + 15s crossing + 5s blinking + 3s red+amber.
        assert_eq!(clock.now_ms(), 26_000);
    }

    #[test]
    fn blink_toggles_only_ped_green_and_ends_dark() {
        let (_clock, writes, mut sequencer) = harness();
        sequencer.enter_idle();
        writes.borrow_mut().clear();

        sequencer.run_crossing_sequence();

        let recorded = writes.borrow();
        let blink: std::vec::Vec<&Write> = recorded
            .iter()
            .filter(|write| write.at_ms >= 18_000 && write.at_ms < 23_000)
            .collect();

        assert_eq!(blink.len(), 2 * BLINK_COUNT as usize);
        for (i, write) in blink.iter().enumerate() {
            assert_eq!(write.lamp, Lamp::PedGreen);
            assert_eq!(write.on, i % 2 == 0);
            assert_eq!(write.at_ms, 18_000 + 500 * i as u64);
        }
        assert!(!blink.last().unwrap().on);
    }

    #[test]
    fn greens_are_never_lit_together() {
        let (_clock, writes, mut sequencer) = harness();

        sequencer.enter_idle();
        sequencer.run_crossing_sequence();

        let mut levels = [false; 5];
        for write in writes.borrow().iter() {
            levels[slot(write.lamp)] = write.on;
            assert!(
                !(levels[slot(Lamp::CarGreen)] && levels[slot(Lamp::PedGreen)]),
                "car and pedestrian green lit together at {}ms",
                write.at_ms
            );
        }
    }

    #[test]
    fn ped_green_follows_car_red_in_the_handoff() {
        let (_clock, writes, mut sequencer) = harness();
        sequencer.enter_idle();
        writes.borrow_mut().clear();

        sequencer.run_crossing_sequence();

        let recorded = writes.borrow();
        let car_red_on = recorded
            .iter()
            .position(|w| w.lamp == Lamp::CarRed && w.on)
            .unwrap();
        let ped_green_on = recorded
            .iter()
            .position(|w| w.lamp == Lamp::PedGreen && w.on)
            .unwrap();
        assert!(car_red_on < ped_green_on);
    }

    #[test]
    fn back_to_back_sequences_leave_identical_traces() {
        let (_clock, writes, mut sequencer) = harness();
        sequencer.enter_idle();
        writes.borrow_mut().clear();

        sequencer.run_crossing_sequence();
        let first: std::vec::Vec<(Lamp, bool)> = writes
            .borrow()
            .iter()
            .map(|write| (write.lamp, write.on))
            .collect();

        writes.borrow_mut().clear();
        sequencer.run_crossing_sequence();
        let second: std::vec::Vec<(Lamp, bool)> = writes
            .borrow()
            .iter()
            .map(|write| (write.lamp, write.on))
            .collect();

        assert_eq!(first, second);
    }
}
