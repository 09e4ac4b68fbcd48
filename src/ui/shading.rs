use ratatui::style::Color;

use crate::cli::ColorArg;

/// How grayscale levels become terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    TrueColor,
    /// The 24-step gray ramp of the xterm 256 palette.
    Gray256,
    /// Density glyphs only, no color.
    Glyphs,
}

const GLYPHS: [char; 5] = [' ', '░', '▒', '▓', '█'];
const GRAY_RAMP_START: u8 = 232;

impl Shading {
    #[must_use]
    pub fn color(self, level: u8) -> Color {
        match self {
            Self::TrueColor => Color::Rgb(level, level, level),
            Self::Gray256 => {
                let step = u16::from(level) * 23 / 255;
                Color::Indexed(GRAY_RAMP_START + u8::try_from(step).unwrap_or(23))
            }
            Self::Glyphs => Color::Reset,
        }
    }
}

#[must_use]
pub fn glyph(level: u8) -> char {
    match level {
        0 => GLYPHS[0],
        1..=63 => GLYPHS[1],
        64..=127 => GLYPHS[2],
        128..=191 => GLYPHS[3],
        _ => GLYPHS[4],
    }
}

pub fn detect_shading(mode: ColorArg) -> Shading {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();
    let no_color = std::env::var("NO_COLOR").ok();
    detect_shading_from(
        mode,
        term.as_deref(),
        colorterm.as_deref(),
        no_color.as_deref(),
    )
}

pub(crate) fn detect_shading_from(
    mode: ColorArg,
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> Shading {
    let term = term.unwrap_or_default().to_ascii_lowercase();
    let colorterm = colorterm.unwrap_or_default().to_ascii_lowercase();
    let color_opted_out = no_color.is_some_and(|value| !value.is_empty()) || term == "dumb";

    match mode {
        ColorArg::Never => Shading::Glyphs,
        ColorArg::Auto if color_opted_out => Shading::Glyphs,
        _ if [&colorterm, &term].into_iter().any(|hint| names_direct_color(hint)) => {
            Shading::TrueColor
        }
        ColorArg::Always => Shading::Gray256,
        ColorArg::Auto if term.contains("256color") => Shading::Gray256,
        ColorArg::Auto => Shading::Glyphs,
    }
}

/// `COLORTERM=truecolor|24bit`, or a `*-direct` terminfo name.
fn names_direct_color(hint: &str) -> bool {
    hint.contains("truecolor") || hint.contains("24bit") || hint.ends_with("direct")
}
