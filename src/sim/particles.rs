use crate::config::MatrixConfig;

use super::{
    cover::SnowCover,
    fixed::{GRAVITY, Motion, from_pixels},
    random::RandomSource,
};

/// Raw 16.16 units, just above the top edge.
pub const SPAWN_Y: i32 = -8;
pub const SPAWN_SPEED: i32 = 1024;
pub const LARGE_FLAKE: u8 = 3;
pub const MIN_BRIGHTNESS: u8 = 0x40;
pub const MAX_BRIGHTNESS: u8 = 0xFF;

pub const INITIAL_INTERVAL: i32 = 30;
pub const MIN_INTERVAL: i32 = 1;
pub const MAX_INTERVAL: i32 = 60;
/// Interval at which upward jitter starts to lose reach.
pub const INTERVAL_SOFT_TARGET: i32 = 40;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Particle {
    pub motion: Motion,
    /// 0..=2 draw as one pixel, 3 draws a plus shape.
    pub size: u8,
    pub brightness: u8,
    pub dead: bool,
}

impl Particle {
    #[must_use]
    pub fn new(motion: Motion, size: u8, brightness: u8) -> Self {
        Self {
            motion,
            size,
            brightness,
            dead: false,
        }
    }

    #[must_use]
    pub fn is_large(&self) -> bool {
        self.size >= LARGE_FLAKE
    }
}

/// Countdown to the next spawn plus a self-correcting interval: the jitter
/// window shrinks upward once the interval passes the soft target, pulling
/// it back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSchedule {
    countdown: i32,
    interval: i32,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            countdown: 0,
            interval: INITIAL_INTERVAL,
        }
    }
}

impl SpawnSchedule {
    #[must_use]
    pub fn new(countdown: i32, interval: i32) -> Self {
        Self {
            countdown,
            interval: interval.clamp(MIN_INTERVAL, MAX_INTERVAL),
        }
    }

    #[must_use]
    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    #[must_use]
    pub fn interval(&self) -> i32 {
        self.interval
    }

    pub fn advance(&mut self, step: i32) {
        self.countdown = self.countdown.saturating_sub(step);
    }

    #[must_use]
    pub fn is_due(&self) -> bool {
        self.countdown <= 0
    }

    pub fn rearm(&mut self, rng: &mut impl RandomSource) {
        self.countdown = self.countdown.saturating_add(self.interval);
        let jitter = rng.between(-3, 3 - self.interval / INTERVAL_SOFT_TARGET);
        self.interval = (self.interval + jitter).clamp(MIN_INTERVAL, MAX_INTERVAL);
    }
}

/// Fixed-capacity pool. Slots `0..active` are live; everything past the
/// cursor is stale and never read.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pool: Box<[Particle]>,
    active: usize,
    schedule: SpawnSchedule,
    spawn_step: i32,
    width: i32,
    height: i32,
    wind_adjust: i32,
}

impl ParticleSystem {
    #[must_use]
    pub fn new(config: &MatrixConfig) -> Self {
        Self {
            pool: vec![Particle::default(); config.max_particles].into_boxed_slice(),
            active: 0,
            schedule: SpawnSchedule::default(),
            spawn_step: config.spawn_step(),
            width: i32::from(config.width),
            height: i32::from(config.height),
            wind_adjust: i32::from(config.spawn_wind_adjust),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.active >= self.pool.len()
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.pool[..self.active]
    }

    #[must_use]
    pub fn schedule(&self) -> SpawnSchedule {
        self.schedule
    }

    pub fn set_schedule(&mut self, schedule: SpawnSchedule) {
        self.schedule = schedule;
    }

    /// Places a particle in the next free slot and returns its index, or
    /// `None` when the pool is full.
    pub fn insert(&mut self, particle: Particle) -> Option<usize> {
        let slot = self.pool.get_mut(self.active)?;
        *slot = Particle {
            dead: false,
            ..particle
        };
        self.active += 1;
        Some(self.active - 1)
    }

    /// Moves every live particle one tick. Flakes that reach the bottom row
    /// are flagged dead and deposited into `cover`; the pool is compacted
    /// only after the whole pass so a flagged flake is never moved again.
    /// Returns how many flakes landed.
    pub fn update(&mut self, wind: i32, cover: &mut SnowCover) -> usize {
        let wind_sign = if wind < 0 { -1 } else { 1 };
        let mut landed = 0;

        for particle in &mut self.pool[..self.active] {
            particle.motion.integrate(wind, GRAVITY);
            let (_, y) = particle.motion.pixel();
            if y >= self.height {
                particle.dead = true;
                landed += 1;
                cover.deposit(
                    particle.motion.landing_column(),
                    particle.brightness,
                    wind_sign,
                );
            }
        }

        if landed > 0 {
            self.compact();
        }
        landed
    }

    /// Runs the spawn countdown for one tick and spawns when it expires.
    /// Nothing advances while the pool is full.
    pub fn spawn_due(&mut self, wind: i32, rng: &mut impl RandomSource) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        self.schedule.advance(self.spawn_step);
        if !self.schedule.is_due() {
            return None;
        }
        let index = self.spawn_one(wind, rng);
        self.schedule.rearm(rng);
        index
    }

    /// Spawns upwind of the visible area so drifting snow still crosses it.
    pub fn spawn_one(&mut self, wind: i32, rng: &mut impl RandomSource) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let reach = -wind * self.wind_adjust;
        let column = rng.between(reach.min(0), self.width + reach.max(0));
        let x_vel = rng.between(-SPAWN_SPEED, SPAWN_SPEED);
        let y_vel = rng.between(-SPAWN_SPEED, SPAWN_SPEED) + SPAWN_SPEED;
        let size = rng.between(0, i32::from(LARGE_FLAKE));
        let brightness = rng.between(i32::from(MIN_BRIGHTNESS), i32::from(MAX_BRIGHTNESS));

        let motion = Motion::new(from_pixels(column), SPAWN_Y, x_vel, y_vel);
        self.insert(Particle::new(
            motion,
            u8::try_from(size).unwrap_or(0),
            u8::try_from(brightness).unwrap_or(MAX_BRIGHTNESS),
        ))
    }

    /// Swaps each dead particle with the last live one. Order among the
    /// survivors is not kept.
    fn compact(&mut self) {
        let mut idx = 0;
        while idx < self.active {
            if self.pool[idx].dead {
                self.active -= 1;
                self.pool.swap(idx, self.active);
            } else {
                idx += 1;
            }
        }
    }
}
