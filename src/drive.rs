//! Fixed-timestep tick drive fed by the host's frame clock.

use crate::config;
use crate::simulation::{SimState, StepOutcome};

/// Proof that a tick drive is scheduled. Handing it back to
/// [`Driver::cancel`] stops all further steps.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a scheduled drive must be cancelled through its handle"]
pub struct DriveHandle {
    generation: u64,
}

impl DriveHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct Driver {
    accumulator: f64,
    active: Option<u64>,
    next_generation: u64,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a fresh drive, superseding any previous one.
    pub fn schedule(&mut self) -> DriveHandle {
        self.next_generation += 1;
        self.active = Some(self.next_generation);
        self.accumulator = 0.0;
        DriveHandle {
            generation: self.next_generation,
        }
    }

    /// Cancel the drive identified by `handle`. A stale handle is ignored.
    pub fn cancel(&mut self, handle: DriveHandle) -> bool {
        if self.active != Some(handle.generation) {
            return false;
        }
        self.active = None;
        self.accumulator = 0.0;
        true
    }

    pub fn is_scheduled(&self) -> bool {
        self.active.is_some()
    }

    /// Feed one frame's worth of wall time and run as many fixed ticks as fit.
    /// Frame time is capped so a stalled window cannot queue a burst of ticks.
    pub fn advance<F>(&mut self, sim: &mut SimState, frame_time: f64, mut on_step: F) -> u32
    where
        F: FnMut(&StepOutcome),
    {
        if self.active.is_none() || !sim.is_running() {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += frame_time.clamp(0.0, config::MAX_FRAME_TIME);
        let mut ticks = 0;
        while self.accumulator >= config::FIXED_DT {
            let outcome = sim.step();
            on_step(&outcome);
            self.accumulator -= config::FIXED_DT;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimParams;
    use crate::world::World;

    fn sim() -> SimState {
        let mut sim = SimState::new(World::new(640, 480).unwrap(), SimParams::default(), 1);
        sim.set_running(true);
        sim
    }

    #[test]
    fn unscheduled_driver_never_steps() {
        let mut driver = Driver::new();
        let mut sim = sim();
        assert_eq!(driver.advance(&mut sim, 1.0, |_| {}), 0);
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn scheduled_driver_runs_fixed_ticks() {
        let mut driver = Driver::new();
        let mut sim = sim();
        let _handle = driver.schedule();

        let mut seen = 0;
        let ticks = driver.advance(&mut sim, 0.055, |_| seen += 1);
        assert_eq!(ticks, 3);
        assert_eq!(seen, 3);
        assert_eq!(sim.tick_count(), 3);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut driver = Driver::new();
        let mut sim = sim();
        let _handle = driver.schedule();
        let ticks = driver.advance(&mut sim, 10.0, |_| {});
        assert!(ticks > 0 && ticks <= 6);
    }

    #[test]
    fn cancelled_handle_stops_stepping() {
        let mut driver = Driver::new();
        let mut sim = sim();
        let handle = driver.schedule();
        driver.advance(&mut sim, 0.055, |_| {});

        assert!(driver.cancel(handle));
        assert!(!driver.is_scheduled());
        assert_eq!(driver.advance(&mut sim, 0.05, |_| {}), 0);
        assert_eq!(sim.tick_count(), 3);
    }

    #[test]
    fn stale_handle_cannot_cancel_newer_drive() {
        let mut driver = Driver::new();
        let old = driver.schedule();
        let current = driver.schedule();
        assert!(!driver.cancel(old));
        assert!(driver.is_scheduled());
        assert_eq!(current.generation(), 2);
        assert!(driver.cancel(current));
    }
}
