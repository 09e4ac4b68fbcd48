use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    display::Display,
    render,
    sim::{Simulation, TickReport, random::RandomSource},
};

pub const DEFAULT_FPS: u8 = 60;

/// Monotonic time plus a blocking sleep, both in microseconds.
pub trait Clock {
    fn now_micros(&self) -> i64;

    /// Zero or negative durations return immediately.
    fn sleep_micros(&mut self, micros: i64);
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_micros(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }

    fn sleep_micros(&mut self, micros: i64) {
        if let Ok(micros) = u64::try_from(micros)
            && micros > 0
        {
            std::thread::sleep(Duration::from_micros(micros));
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub overruns: u64,
    pub last_elapsed_micros: i64,
    pub worst_elapsed_micros: i64,
}

/// Owns everything one running screen needs and paces it to a fixed period.
#[derive(Debug)]
pub struct FrameLoop<R, D> {
    sim: Simulation,
    rng: R,
    display: D,
    period_micros: i64,
    stats: FrameStats,
}

impl<R: RandomSource, D: Display> FrameLoop<R, D> {
    pub fn new(sim: Simulation, rng: R, display: D, fps: u8) -> Self {
        Self {
            sim,
            rng,
            display,
            period_micros: 1_000_000 / i64::from(fps.max(1)),
            stats: FrameStats::default(),
        }
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[must_use]
    pub fn period_micros(&self) -> i64 {
        self.period_micros
    }

    /// Simulates, composites and publishes one frame.
    pub fn step(&mut self) -> TickReport {
        let report = self.sim.tick(&mut self.rng);
        render::compose(&self.sim, &mut self.display);
        self.display.flip(false);
        report
    }

    /// Time left in the frame after `elapsed_micros` of work. Records the
    /// frame; an overrun is logged and the next frame starts late rather
    /// than skipping ahead.
    pub fn finish_frame(&mut self, elapsed_micros: i64) -> i64 {
        self.stats.frames += 1;
        self.stats.last_elapsed_micros = elapsed_micros;
        self.stats.worst_elapsed_micros = self.stats.worst_elapsed_micros.max(elapsed_micros);

        let remaining = self.period_micros - elapsed_micros;
        if remaining < 0 {
            self.stats.overruns += 1;
            debug!(
                frame = self.stats.frames,
                elapsed_micros,
                budget_micros = self.period_micros,
                "frame overran its budget"
            );
        }
        remaining
    }

    /// One full tick: step, then sleep out whatever is left of the period.
    pub fn run_frame(&mut self, clock: &mut impl Clock) -> TickReport {
        let start = clock.now_micros();
        let report = self.step();
        let elapsed = clock.now_micros() - start;
        let remaining = self.finish_frame(elapsed);
        clock.sleep_micros(remaining);
        report
    }

    /// Runs `frames` ticks, or forever when `None`.
    pub fn run(&mut self, clock: &mut impl Clock, frames: Option<u64>) -> FrameStats {
        let mut done = 0_u64;
        while frames.is_none_or(|limit| done < limit) {
            self.run_frame(clock);
            done += 1;
            if done.is_multiple_of(600) {
                let sim = &self.sim;
                info!(
                    frames = done,
                    wind = sim.wind().wind(),
                    active = sim.particles().active_count(),
                    spawn_interval = sim.particles().schedule().interval(),
                    snow = sim.cover().total(),
                    overruns = self.stats.overruns,
                    "snowfall status"
                );
            }
        }
        self.stats
    }
}
