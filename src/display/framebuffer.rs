use crate::config::MatrixConfig;

use super::{Display, gamma::gamma_10bit, layout::PanelLayout};

/// Double-buffered grayscale matrix stored in physical panel order.
///
/// The compositor only writes `back`; readers only see `front`. A flip swaps
/// them and clears the new back buffer to black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    layout: PanelLayout,
    physical_width: usize,
    front: Vec<u8>,
    back: Vec<u8>,
    flips: u64,
}

impl FrameBuffer {
    #[must_use]
    pub fn new(width: usize, height: usize, layout: PanelLayout) -> Self {
        let (physical_width, physical_height) = layout.physical_size(width, height);
        let len = physical_width * physical_height;
        Self {
            width,
            height,
            layout,
            physical_width,
            front: vec![0; len],
            back: vec![0; len],
            flips: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &MatrixConfig) -> Self {
        Self::new(
            usize::from(config.width),
            usize::from(config.height),
            config.layout,
        )
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn flips(&self) -> u64 {
        self.flips
    }

    /// Level on screen at a logical pixel.
    #[must_use]
    pub fn front_level(&self, x: usize, y: usize) -> Option<u8> {
        self.physical_index(x, y).map(|idx| self.front[idx])
    }

    /// Level written so far this frame at a logical pixel.
    #[must_use]
    pub fn back_level(&self, x: usize, y: usize) -> Option<u8> {
        self.physical_index(x, y).map(|idx| self.back[idx])
    }

    /// Physical chain contents of the front buffer, row-major.
    #[must_use]
    pub fn front_physical(&self) -> &[u8] {
        &self.front
    }

    fn physical_index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (px, py) = self.layout.remap(x, y, self.width, self.height);
        Some(py * self.physical_width + px)
    }

    fn logical_index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.physical_index(x, y)
    }
}

impl Display for FrameBuffer {
    fn set_pixel(&mut self, x: i32, y: i32, level: u8) {
        if let Some(idx) = self.logical_index(x, y) {
            self.back[idx] = level;
        }
    }

    fn front_value(&self, x: i32, y: i32) -> u16 {
        self.logical_index(x, y)
            .map_or(0, |idx| gamma_10bit(self.front[idx]))
    }

    // Nothing scans this buffer out concurrently, so there is no frame to
    // wait for.
    fn flip(&mut self, _vsync: bool) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.back.fill(0);
        self.flips += 1;
    }
}
