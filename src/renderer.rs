use ratatui::style::Color;

use crate::config::{Palette, TileSize};
use crate::game::GameState;

/// Callbacks the engine makes towards whatever presents the game.
pub trait Render {
    /// Called after every reset, start and tick with the current state.
    fn render(&mut self, state: &GameState);

    /// Called once when a round ends, with the final score.
    fn game_over(&mut self, final_score: u32);
}

/// A rectangular drawing target addressed in surface cells.
pub trait Surface {
    /// Surface extent as `(width, height)`.
    fn size(&self) -> (u16, u16);

    /// Paints the whole surface with its background.
    fn clear(&mut self);

    /// Fills a rectangle; parts outside the surface are clipped.
    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color);
}

/// Draws the board: snake segments (head distinct from body) then food.
/// Tiles that start beyond the surface are skipped.
pub fn draw_scene<S: Surface + ?Sized>(
    surface: &mut S,
    state: &GameState,
    palette: &Palette,
    tile: TileSize,
) {
    surface.clear();

    for (index, segment) in state.snake.segments().enumerate() {
        let color = if index == 0 {
            palette.snake_head
        } else {
            palette.snake_body
        };
        fill_tile(surface, segment.x, segment.y, tile, color);
    }

    let food = state.food.position;
    fill_tile(surface, food.x, food.y, tile, palette.food);
}

fn fill_tile<S: Surface + ?Sized>(surface: &mut S, x: i32, y: i32, tile: TileSize, color: Color) {
    let (Ok(column), Ok(row)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };

    let left = column.saturating_mul(tile.width);
    let top = row.saturating_mul(tile.height);
    let (width, height) = surface.size();
    if left >= width || top >= height {
        return;
    }

    surface.fill_rect(left, top, tile.width, tile.height, color);
}
