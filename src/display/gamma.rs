use std::sync::LazyLock;

pub const GAMMA_EXPONENT: f32 = 2.2;
pub const MAX_INTENSITY: u16 = 1023;

static GAMMA_10BIT: LazyLock<[u16; 256]> = LazyLock::new(|| {
    let mut table = [0_u16; 256];
    for (level, entry) in (0_u16..).zip(table.iter_mut()) {
        let normalized = f32::from(level) / 255.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let intensity = (normalized.powf(GAMMA_EXPONENT) * f32::from(MAX_INTENSITY)).round() as u16;
        *entry = intensity.min(MAX_INTENSITY);
    }
    table
});

/// Perceptual brightness to the 10-bit drive intensity a panel would show.
#[must_use]
pub fn gamma_10bit(level: u8) -> u16 {
    GAMMA_10BIT[usize::from(level)]
}
