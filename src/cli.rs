#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{frame_loop::DEFAULT_FPS, sim::random::DEFAULT_SEED};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresetArg {
    /// One 32x32 panel
    #[default]
    Single,
    /// Two 32x32 panels side by side (64x32)
    Wide,
    /// Four 32x32 panels folded into a 64x64 square
    Quad,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "snowfall-matrix",
    version,
    about = "Falling snow on a grayscale LED matrix, rendered in the terminal"
)]
pub struct Cli {
    /// Panel geometry preset
    #[arg(long, value_enum, default_value_t = PresetArg::Single)]
    pub preset: PresetArg,

    /// JSON file overriding preset fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for every random draw
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Target frames per second (15..120)
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u8).range(15..=120))]
    pub fps: u8,

    /// Color output policy
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, conflicts_with = "no_color")]
    pub color: ColorArg,

    /// Alias for --color never
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Run without a terminal UI and print the final frame
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many frames (headless only)
    #[arg(long, requires = "headless")]
    pub frames: Option<u64>,

    /// Write tracing output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.frames == Some(0) {
            anyhow::bail!("--frames must be at least 1");
        }
        Ok(())
    }

    #[must_use]
    pub fn effective_color_mode(&self) -> ColorArg {
        if self.no_color {
            ColorArg::Never
        } else {
            self.color
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, ColorArg, PresetArg};
    use crate::sim::random::DEFAULT_SEED;

    #[test]
    fn defaults_match_single_panel_at_sixty_fps() {
        let cli = Cli::parse_from(["snowfall-matrix"]);
        assert_eq!(cli.preset, PresetArg::Single);
        assert_eq!(cli.fps, 60);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!(!cli.headless);
        assert_eq!(cli.frames, None);
    }

    #[test]
    fn parses_preset_and_seed() {
        let cli = Cli::parse_from(["snowfall-matrix", "--preset", "quad", "--seed", "99"]);
        assert_eq!(cli.preset, PresetArg::Quad);
        assert_eq!(cli.seed, 99);
    }

    #[test]
    fn rejects_fps_out_of_range() {
        assert!(Cli::try_parse_from(["snowfall-matrix", "--fps", "5"]).is_err());
        assert!(Cli::try_parse_from(["snowfall-matrix", "--fps", "121"]).is_err());
    }

    #[test]
    fn frames_requires_headless() {
        let err = Cli::try_parse_from(["snowfall-matrix", "--frames", "10"])
            .expect_err("expected missing --headless");
        assert!(err.to_string().contains("--headless"));

        let cli = Cli::parse_from(["snowfall-matrix", "--headless", "--frames", "10"]);
        assert_eq!(cli.frames, Some(10));
    }

    #[test]
    fn validate_rejects_zero_frames() {
        let mut cli = crate::test_support::headless_test_cli();
        assert!(cli.validate().is_ok());
        cli.frames = Some(0);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn rejects_color_and_no_color_together() {
        let err = Cli::try_parse_from(["snowfall-matrix", "--color", "always", "--no-color"])
            .expect_err("expected conflict");
        let rendered = err.to_string();
        assert!(rendered.contains("--color"));
        assert!(rendered.contains("--no-color"));
    }

    #[test]
    fn effective_color_mode_prefers_no_color() {
        let cli = Cli::parse_from(["snowfall-matrix", "--no-color"]);
        assert_eq!(cli.effective_color_mode(), ColorArg::Never);

        let cli = Cli::parse_from(["snowfall-matrix", "--color", "always"]);
        assert_eq!(cli.effective_color_mode(), ColorArg::Always);

        let cli = Cli::parse_from(["snowfall-matrix"]);
        assert_eq!(cli.effective_color_mode(), ColorArg::Auto);
    }
}
