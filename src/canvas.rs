use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::renderer::Surface;

/// A [`Surface`] backed by a region of a ratatui buffer. One surface cell is
/// one terminal cell.
pub struct BufferSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    background: Color,
}

impl<'a> BufferSurface<'a> {
    /// Clips `area` to the buffer so every write stays in range.
    pub fn new(buffer: &'a mut Buffer, area: Rect, background: Color) -> Self {
        let area = area.intersection(buffer.area);
        Self {
            buffer,
            area,
            background,
        }
    }

    fn paint(&mut self, x: u16, y: u16, color: Color) {
        if let Some(cell) = self.buffer.cell_mut((x, y)) {
            cell.set_symbol(" ").set_bg(color);
        }
    }
}

impl Surface for BufferSurface<'_> {
    fn size(&self) -> (u16, u16) {
        (self.area.width, self.area.height)
    }

    fn clear(&mut self) {
        let area = self.area;
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.paint(x, y, self.background);
            }
        }
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color) {
        let area = self.area;
        let left = area.x.saturating_add(x);
        let top = area.y.saturating_add(y);
        let right = left.saturating_add(width).min(area.right());
        let bottom = top.saturating_add(height).min(area.bottom());

        for row in top..bottom {
            for column in left..right {
                self.paint(column, row, color);
            }
        }
    }
}
