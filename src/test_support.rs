use std::collections::HashMap;

use crate::{
    cli::{Cli, ColorArg, PresetArg},
    display::Display,
    sim::random::DEFAULT_SEED,
};

/// Records every call the compositor makes, including ones a real panel
/// would reject.
#[derive(Debug, Default)]
pub(crate) struct RecordingDisplay {
    pub width: i32,
    pub height: i32,
    pub plots: Vec<(i32, i32, u8)>,
    pub front: HashMap<(i32, i32), u16>,
    pub flips: Vec<bool>,
}

impl RecordingDisplay {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub(crate) fn out_of_bounds(&self) -> usize {
        self.plots
            .iter()
            .filter(|&&(x, y, _)| x < 0 || y < 0 || x >= self.width || y >= self.height)
            .count()
    }
}

impl Display for RecordingDisplay {
    fn set_pixel(&mut self, x: i32, y: i32, level: u8) {
        self.plots.push((x, y, level));
    }

    fn front_value(&self, x: i32, y: i32) -> u16 {
        self.front.get(&(x, y)).copied().unwrap_or(0)
    }

    fn flip(&mut self, vsync: bool) {
        self.flips.push(vsync);
    }
}

pub(crate) fn headless_test_cli() -> Cli {
    Cli {
        preset: PresetArg::Single,
        config: None,
        seed: DEFAULT_SEED,
        fps: 60,
        color: ColorArg::Auto,
        no_color: false,
        headless: true,
        frames: Some(10),
        log_file: None,
    }
}
