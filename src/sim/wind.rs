use super::random::RandomSource;

pub const WIND_LIMIT: i32 = 30;

/// Random walk with momentum: a step keeps the previous direction as often
/// as it holds still, and only reverses one time in three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindController {
    wind: i32,
    last_direction: i32,
}

impl Default for WindController {
    fn default() -> Self {
        Self {
            wind: 0,
            last_direction: 1,
        }
    }
}

impl WindController {
    #[must_use]
    pub fn new(wind: i32, last_direction: i32) -> Self {
        Self {
            wind: wind.clamp(-WIND_LIMIT, WIND_LIMIT),
            last_direction: if last_direction < 0 { -1 } else { 1 },
        }
    }

    #[must_use]
    pub fn wind(&self) -> i32 {
        self.wind
    }

    #[must_use]
    pub fn last_direction(&self) -> i32 {
        self.last_direction
    }

    pub fn step(&mut self, rng: &mut impl RandomSource) -> i32 {
        match rng.between(0, 2) {
            1 => self.wind += self.last_direction,
            2 => {
                self.last_direction = -self.last_direction;
                self.wind += self.last_direction;
            }
            _ => {}
        }
        self.wind = self.wind.clamp(-WIND_LIMIT, WIND_LIMIT);
        self.wind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedDraws;

    #[test]
    fn hold_leaves_state_untouched() {
        let mut wind = WindController::new(4, -1);
        wind.step(&mut ScriptedDraws::new([0]));
        assert_eq!(wind, WindController::new(4, -1));
    }

    #[test]
    fn continue_adds_last_direction() {
        let mut wind = WindController::default();
        let mut draws = ScriptedDraws::new([1, 1, 1]);
        for _ in 0..3 {
            wind.step(&mut draws);
        }
        assert_eq!(wind.wind(), 3);
        assert_eq!(wind.last_direction(), 1);
    }

    #[test]
    fn reverse_flips_then_applies() {
        let mut wind = WindController::new(2, 1);
        wind.step(&mut ScriptedDraws::new([2]));
        assert_eq!(wind.wind(), 1);
        assert_eq!(wind.last_direction(), -1);

        wind.step(&mut ScriptedDraws::new([1]));
        assert_eq!(wind.wind(), 0);
    }

    #[test]
    fn clamps_at_limits() {
        let mut wind = WindController::new(WIND_LIMIT, 1);
        wind.step(&mut ScriptedDraws::new([1]));
        assert_eq!(wind.wind(), WIND_LIMIT);

        let mut wind = WindController::new(-WIND_LIMIT, 1);
        wind.step(&mut ScriptedDraws::new([2]));
        assert_eq!(wind.wind(), -WIND_LIMIT);
    }

    #[test]
    fn constructor_normalizes_inputs() {
        let wind = WindController::new(99, -7);
        assert_eq!(wind.wind(), WIND_LIMIT);
        assert_eq!(wind.last_direction(), -1);
    }
}
