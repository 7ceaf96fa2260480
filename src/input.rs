use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// Movement direction of the snake. `None` means the snake is waiting.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Returns the opposite direction. `None` is its own opposite.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// Returns the unit grid delta `(dx, dy)`; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }

    /// Maps a raw delta back to a direction. Diagonal and non-unit deltas
    /// have no direction.
    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            (0, 0) => Some(Self::None),
            _ => None,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != Direction::None && next != current.opposite()
}

/// High-level commands the host page and dialog react to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Open,
    Close,
    Start,
    Steer(Direction),
    Click { column: u16, row: u16 },
    Quit,
}

/// Maps a key press to a command. `dialog_open` selects between the page and
/// the dialog bindings; arrow keys steer in both, like a document-level
/// key listener.
#[must_use]
pub fn command_for_key(key: KeyEvent, dialog_open: bool) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up => Some(Command::Steer(Direction::Up)),
        KeyCode::Down => Some(Command::Steer(Direction::Down)),
        KeyCode::Left => Some(Command::Steer(Direction::Left)),
        KeyCode::Right => Some(Command::Steer(Direction::Right)),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Enter | KeyCode::Char('o') if !dialog_open => Some(Command::Open),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') if dialog_open => {
            Some(Command::Start)
        }
        KeyCode::Esc | KeyCode::Char('x') if dialog_open => Some(Command::Close),
        _ => None,
    }
}

/// Maps a left mouse press to a click command.
#[must_use]
pub fn command_for_mouse(mouse: MouseEvent) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Command::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Polls crossterm for keyboard and mouse events.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one event and maps it to a command.
    pub fn poll_command(
        &mut self,
        timeout: Duration,
        dialog_open: bool,
    ) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let command = match event::read()? {
            Event::Key(key) => command_for_key(key, dialog_open),
            Event::Mouse(mouse) => command_for_mouse(mouse),
            _ => None,
        };

        Ok(command)
    }
}
