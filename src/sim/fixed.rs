//! 16.16 fixed-point kinematics shared by every snowflake.

pub const FRACTION_BITS: u32 = 16;
pub const ONE: i32 = 1 << FRACTION_BITS;
pub const HALF: i32 = 1 << (FRACTION_BITS - 1);

/// Added to the vertical velocity every tick.
pub const GRAVITY: i32 = 8;

#[must_use]
pub fn from_pixels(pixels: i32) -> i32 {
    pixels.saturating_mul(ONE)
}

/// Truncates toward negative infinity, so `-8` raw lands on pixel `-1`.
#[must_use]
pub fn to_pixel(value: i32) -> i32 {
    value >> FRACTION_BITS
}

#[must_use]
pub fn round_to_pixel(value: i32) -> i32 {
    value.saturating_add(HALF) >> FRACTION_BITS
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Motion {
    pub x: i32,
    pub y: i32,
    pub x_vel: i32,
    pub y_vel: i32,
}

impl Motion {
    #[must_use]
    pub fn new(x: i32, y: i32, x_vel: i32, y_vel: i32) -> Self {
        Self { x, y, x_vel, y_vel }
    }

    /// Advances one tick: position first, then wind and gravity feed the
    /// velocity used on the next tick.
    pub fn integrate(&mut self, wind: i32, gravity: i32) {
        self.x = self.x.saturating_add(self.x_vel);
        self.y = self.y.saturating_add(self.y_vel);
        self.x_vel = self.x_vel.saturating_add(wind);
        self.y_vel = self.y_vel.saturating_add(gravity);
    }

    #[must_use]
    pub fn pixel(&self) -> (i32, i32) {
        (to_pixel(self.x), to_pixel(self.y))
    }

    /// Column a landed flake is credited to: nearest pixel, not truncated.
    #[must_use]
    pub fn landing_column(&self) -> i32 {
        round_to_pixel(self.x)
    }
}
