use std::time::Duration;

use ratatui::style::Color;

use crate::snake::Position;

/// Logical grid dimensions in tiles.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns a square grid with `tiles` cells per side.
    #[must_use]
    pub fn square(tiles: u16) -> Self {
        Self {
            width: tiles,
            height: tiles,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the fixed spawn cell: the grid centre, rounded down-right.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

/// Size of one tile on the drawing surface, in surface cells.
///
/// Terminal cells are roughly twice as tall as they are wide, so the default
/// tile spans two columns and one row to look square.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TileSize {
    pub width: u16,
    pub height: u16,
}

pub const DEFAULT_TILE_SIZE: TileSize = TileSize {
    width: 2,
    height: 1,
};

/// Colors used by the board and the dialog chrome.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub board_bg: Color,
    pub board_border: Color,
    pub prompt: Color,
    pub game_over: Color,
    pub button_fg: Color,
    pub button_bg: Color,
    pub backdrop: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::Rgb(0x27, 0xae, 0x60),
    snake_body: Color::Rgb(0x2e, 0xcc, 0x71),
    food: Color::Rgb(0xe7, 0x4c, 0x3c),
    board_bg: Color::Rgb(0xec, 0xf0, 0xf1),
    board_border: Color::Rgb(0x2c, 0x3e, 0x50),
    prompt: Color::Rgb(0x34, 0x98, 0xdb),
    game_over: Color::Rgb(0xe7, 0x4c, 0x3c),
    button_fg: Color::White,
    button_bg: Color::Rgb(0x34, 0x98, 0xdb),
    backdrop: Color::DarkGray,
};

/// Default tiles per side (400px canvas / 20px cells).
pub const DEFAULT_TILE_COUNT: u16 = 20;

/// Smallest accepted grid side.
pub const MIN_TILE_COUNT: u16 = 2;

/// Largest accepted grid side.
pub const MAX_TILE_COUNT: u16 = 64;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Upper bound on how long the frame loop waits for input.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Length of the dialog's closing animation.
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(250);
