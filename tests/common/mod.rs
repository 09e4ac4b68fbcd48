#![allow(dead_code)]

use std::collections::HashMap;

use snowfall_matrix::{
    config::MatrixConfig,
    display::{Display, layout::PanelLayout},
    sim::{
        fixed::{Motion, from_pixels},
        particles::Particle,
    },
};

pub fn tiny_config(width: u16, height: u16, max_particles: usize, depth: u16) -> MatrixConfig {
    MatrixConfig {
        width,
        height,
        max_particles,
        max_snow_depth: depth,
        spawn_wind_adjust: 2,
        melt_interval: 16,
        layout: PanelLayout::Direct,
    }
}

/// A flake at rest at an exact pixel position.
pub fn still_flake(x: i32, y_raw: i32, size: u8, brightness: u8) -> Particle {
    Particle::new(Motion::new(from_pixels(x), y_raw, 0, 0), size, brightness)
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub plots: Vec<(i32, i32, u8)>,
    pub front: HashMap<(i32, i32), u16>,
    pub flips: usize,
}

impl Display for RecordingDisplay {
    fn set_pixel(&mut self, x: i32, y: i32, level: u8) {
        self.plots.push((x, y, level));
    }

    fn front_value(&self, x: i32, y: i32) -> u16 {
        self.front.get(&(x, y)).copied().unwrap_or(0)
    }

    fn flip(&mut self, _vsync: bool) {
        self.flips += 1;
    }
}
