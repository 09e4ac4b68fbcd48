use serde::{Deserialize, Serialize};

/// How logical screen pixels map onto the chained panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelLayout {
    /// Panels chained left to right, one logical row per physical row.
    #[default]
    Direct,
    /// Two rows of panels driven as one chain: the lower half of the screen
    /// continues to the right of the upper half, rotated 180°.
    Folded,
}

impl PanelLayout {
    /// Physical chain size for a `width` x `height` logical screen. An odd
    /// folded height leaves one physical row half used.
    #[must_use]
    pub fn physical_size(self, width: usize, height: usize) -> (usize, usize) {
        match self {
            Self::Direct => (width, height),
            Self::Folded => (width * 2, height.div_ceil(2)),
        }
    }

    /// Logical to physical. Callers pass in-bounds coordinates.
    #[must_use]
    pub fn remap(self, x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
        match self {
            Self::Direct => (x, y),
            Self::Folded => {
                let half = height / 2;
                if y >= half {
                    (2 * width - 1 - x, height - 1 - y)
                } else {
                    (x, y)
                }
            }
        }
    }
}
