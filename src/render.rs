//! Draws the simulation into a [`Display`] back buffer.

use crate::{
    display::{Display, gamma::gamma_10bit},
    sim::{Simulation, cover::SnowCover, particles::Particle},
};

/// Flakes first, then the snow cover on the bottom rows.
pub fn compose<D: Display + ?Sized>(sim: &Simulation, display: &mut D) {
    let config = sim.config();
    let (width, height) = (i32::from(config.width), i32::from(config.height));
    draw_particles(sim.particles().particles(), width, height, display);
    draw_cover(sim.cover(), height, display);
}

pub fn draw_particles<D: Display + ?Sized>(
    particles: &[Particle],
    width: i32,
    height: i32,
    display: &mut D,
) {
    for particle in particles {
        draw_particle(particle, width, height, display);
    }
}

/// Small flakes are a single pixel; large ones add four half-bright arms.
pub fn draw_particle<D: Display + ?Sized>(
    particle: &Particle,
    width: i32,
    height: i32,
    display: &mut D,
) {
    let (x, y) = particle.motion.pixel();
    let level = particle.brightness;
    plot(display, x, y, level, width, height);
    if particle.is_large() {
        let arm = level / 2;
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            plot(display, x + dx, y + dy, arm, width, height);
        }
    }
}

/// Slot `s` lands on screen row `height - depth + s`. A cell is skipped
/// when the buffer currently on screen is already brighter there, so
/// leftover light from the previous frame is not dimmed by the cover.
pub fn draw_cover<D: Display + ?Sized>(cover: &SnowCover, height: i32, display: &mut D) {
    let depth = i32::try_from(cover.depth()).unwrap_or(i32::MAX);
    let top = height - depth;
    for (column, slot, level) in cover.cells() {
        let (Ok(x), Ok(slot)) = (i32::try_from(column), i32::try_from(slot)) else {
            continue;
        };
        let y = top + slot;
        if y < 0 || display.front_value(x, y) > gamma_10bit(level) {
            continue;
        }
        display.set_pixel(x, y, level);
    }
}

fn plot<D: Display + ?Sized>(display: &mut D, x: i32, y: i32, level: u8, width: i32, height: i32) {
    if x < 0 || y < 0 || x >= width || y >= height {
        return;
    }
    display.set_pixel(x, y, level);
}
