pub mod cover;
pub mod fixed;
pub mod particles;
pub mod random;
pub mod wind;

use tracing::trace;

use crate::config::MatrixConfig;
use cover::SnowCover;
use particles::ParticleSystem;
use random::RandomSource;
use wind::WindController;

/// What happened during one [`Simulation::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub landed: usize,
    pub spawned: bool,
    pub melted: bool,
    pub wind: i32,
}

/// All mutable simulation state for one screen.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: MatrixConfig,
    particles: ParticleSystem,
    cover: SnowCover,
    wind: WindController,
    melt_countdown: i32,
    ticks: u64,
}

impl Simulation {
    #[must_use]
    pub fn new(config: &MatrixConfig) -> Self {
        Self {
            config: *config,
            particles: ParticleSystem::new(config),
            cover: SnowCover::new(
                usize::from(config.width),
                usize::from(config.max_snow_depth),
            ),
            wind: WindController::default(),
            melt_countdown: 0,
            ticks: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }

    #[must_use]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSystem {
        &mut self.particles
    }

    #[must_use]
    pub fn cover(&self) -> &SnowCover {
        &self.cover
    }

    pub fn cover_mut(&mut self) -> &mut SnowCover {
        &mut self.cover
    }

    #[must_use]
    pub fn wind(&self) -> &WindController {
        &self.wind
    }

    pub fn set_wind(&mut self, wind: WindController) {
        self.wind = wind;
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One simulation step: move and land flakes, spawn, shift the wind,
    /// then melt when the melt countdown runs out.
    pub fn tick(&mut self, rng: &mut impl RandomSource) -> TickReport {
        let landed = self.particles.update(self.wind.wind(), &mut self.cover);
        let spawned = self.particles.spawn_due(self.wind.wind(), rng).is_some();
        let wind = self.wind.step(rng);
        let melted = self.advance_melt();
        self.ticks += 1;

        trace!(
            tick = self.ticks,
            landed,
            spawned,
            melted,
            wind,
            active = self.particles.active_count(),
            "simulation tick"
        );

        TickReport {
            landed,
            spawned,
            melted,
            wind,
        }
    }

    fn advance_melt(&mut self) -> bool {
        self.melt_countdown -= 1;
        if self.melt_countdown > 0 {
            return false;
        }
        self.cover.melt();
        self.melt_countdown = i32::from(self.config.melt_interval);
        true
    }
}
