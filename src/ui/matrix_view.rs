use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::shading::{Shading, glyph};
use crate::display::framebuffer::FrameBuffer;

const UPPER_HALF: char = '▀';

/// Shows the front buffer with two matrix rows per terminal row: the
/// upper pixel is the foreground of a `▀`, the lower one its background.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    buffer: &'a FrameBuffer,
    shading: Shading,
}

impl<'a> MatrixView<'a> {
    #[must_use]
    pub fn new(buffer: &'a FrameBuffer, shading: Shading) -> Self {
        Self { buffer, shading }
    }

    /// Terminal cells needed to show the whole matrix.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        view_size(self.buffer)
    }
}

#[must_use]
pub fn view_size(buffer: &FrameBuffer) -> (u16, u16) {
    (
        u16::try_from(buffer.width()).unwrap_or(u16::MAX),
        u16::try_from(buffer.height().div_ceil(2)).unwrap_or(u16::MAX),
    )
}

impl Widget for MatrixView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (columns, rows) = self.size();
        for dy in 0..rows.min(area.height) {
            for dx in 0..columns.min(area.width) {
                let (upper, lower) = pixel_pair(self.buffer, dx, dy);
                let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) else {
                    continue;
                };
                match self.shading {
                    Shading::Glyphs => {
                        cell.set_char(glyph(upper.max(lower)));
                    }
                    shading => {
                        cell.set_char(UPPER_HALF)
                            .set_fg(shading.color(upper))
                            .set_bg(shading.color(lower));
                    }
                }
            }
        }
    }
}

/// The front buffer as density glyphs, trailing blanks trimmed.
#[must_use]
pub fn text_frame(buffer: &FrameBuffer) -> String {
    let (columns, rows) = view_size(buffer);
    (0..rows)
        .map(|dy| {
            let line: String = (0..columns)
                .map(|dx| {
                    let (upper, lower) = pixel_pair(buffer, dx, dy);
                    glyph(upper.max(lower))
                })
                .collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn pixel_pair(buffer: &FrameBuffer, dx: u16, dy: u16) -> (u8, u8) {
    let x = usize::from(dx);
    let y = usize::from(dy) * 2;
    (
        buffer.front_level(x, y).unwrap_or(0),
        buffer.front_level(x, y + 1).unwrap_or(0),
    )
}
