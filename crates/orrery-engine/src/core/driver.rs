use crate::core::time::FrameClock;

/// Run state of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Paused,
}

/// Per-frame scheduler: decides whether a tick advances the simulation.
///
/// While `Running`, each tick yields the clamped frame delta. While `Paused`,
/// ticks yield `None` so the caller skips its update entirely, but the clock
/// keeps tracking timestamps so the paused duration is never reported as
/// elapsed once the loop resumes.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    state: DriverState,
    clock: FrameClock,
    /// Ticks that advanced the simulation.
    frames: u64,
}

impl FrameDriver {
    pub fn new(max_dt: f32) -> Self {
        Self {
            state: DriverState::Running,
            clock: FrameClock::new(max_dt),
            frames: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == DriverState::Paused
    }

    /// Number of ticks that ran an update.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pause(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Paused;
            log::debug!("frame driver paused");
        }
    }

    /// Resume running. The clock is re-anchored on the next tick.
    pub fn resume(&mut self) {
        if self.state == DriverState::Paused {
            self.state = DriverState::Running;
            self.clock.reset();
            log::debug!("frame driver resumed");
        }
    }

    /// Flip between `Running` and `Paused`. Returns the new state.
    pub fn toggle(&mut self) -> DriverState {
        match self.state {
            DriverState::Running => self.pause(),
            DriverState::Paused => self.resume(),
        }
        self.state
    }

    /// Feed the host timestamp (seconds) for this tick.
    /// Returns the delta to simulate, or `None` when paused.
    pub fn tick(&mut self, now: f64) -> Option<f32> {
        let dt = self.clock.advance(now);
        match self.state {
            DriverState::Running => {
                self.frames += 1;
                Some(dt)
            }
            DriverState::Paused => None,
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(crate::core::time::DEFAULT_MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        let driver = FrameDriver::default();
        assert_eq!(driver.state(), DriverState::Running);
        assert!(!driver.is_paused());
    }

    #[test]
    fn running_ticks_yield_dt() {
        let mut driver = FrameDriver::default();
        assert_eq!(driver.tick(1.0), Some(0.0));
        let dt = driver.tick(1.02).unwrap();
        assert!((dt - 0.02).abs() < 1e-6);
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn paused_ticks_skip_update() {
        let mut driver = FrameDriver::default();
        driver.tick(1.0);
        driver.pause();
        assert_eq!(driver.tick(1.02), None);
        assert_eq!(driver.tick(1.04), None);
        assert_eq!(driver.frames(), 1);
    }

    #[test]
    fn resume_does_not_report_paused_duration() {
        let mut driver = FrameDriver::default();
        driver.tick(1.0);
        driver.pause();
        // No ticks at all while paused (e.g. hidden tab)
        driver.resume();
        assert_eq!(driver.tick(600.0), Some(0.0));
        let dt = driver.tick(600.016).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn resume_after_paused_ticks_reports_single_frame() {
        let mut driver = FrameDriver::default();
        driver.tick(0.0);
        driver.pause();
        for i in 1..=300 {
            assert_eq!(driver.tick(i as f64 * 0.016), None);
        }
        driver.resume();
        let dt = driver.tick(301.0 * 0.016).unwrap();
        assert!(dt <= 0.016 + 1e-6, "dt was {}", dt);
    }

    #[test]
    fn toggle_flips_state() {
        let mut driver = FrameDriver::default();
        assert_eq!(driver.toggle(), DriverState::Paused);
        assert_eq!(driver.toggle(), DriverState::Running);
    }

    #[test]
    fn redundant_transitions_are_noops() {
        let mut driver = FrameDriver::default();
        driver.tick(1.0);
        driver.resume();
        // Still anchored: resume on a running driver must not reset the clock
        let dt = driver.tick(1.05).unwrap();
        assert!((dt - 0.05).abs() < 1e-6);
        driver.pause();
        driver.pause();
        assert!(driver.is_paused());
    }
}
