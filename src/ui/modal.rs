use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Layout, Margin, Position as ScreenPosition, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::canvas::BufferSurface;
use crate::config::{GridSize, Palette, TileSize, CLOSE_ANIMATION};
use crate::game::GameState;
use crate::input::Direction;
use crate::renderer::draw_scene;
use crate::ui::panel::{StatusPanel, START_LABEL};

const CLOSE_GLYPH: &str = "[x]";
const MIN_INNER_WIDTH: u16 = 30;
const PAD_HEIGHT: u16 = 2;
const PAD_BUTTON_WIDTH: u16 = 3;

/// Dialog visibility, including the closing animation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Visibility {
    Hidden,
    Open,
    Closing { since: Instant },
}

/// The dialog that hosts the game.
#[derive(Debug, Clone)]
pub struct Modal {
    visibility: Visibility,
}

impl Default for Modal {
    fn default() -> Self {
        Self {
            visibility: Visibility::Hidden,
        }
    }
}

impl Modal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the dialog. Reopening during the closing animation cancels it.
    pub fn open(&mut self) {
        self.visibility = Visibility::Open;
    }

    /// Starts the closing animation. Returns false when it was not open.
    pub fn close(&mut self, now: Instant) -> bool {
        if self.visibility != Visibility::Open {
            return false;
        }

        self.visibility = Visibility::Closing { since: now };
        true
    }

    /// Hides the dialog once the closing animation has finished.
    pub fn advance(&mut self, now: Instant) {
        if let Visibility::Closing { since } = self.visibility {
            if now.saturating_duration_since(since) >= CLOSE_ANIMATION {
                self.visibility = Visibility::Hidden;
            }
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility != Visibility::Hidden
    }

    /// Remaining size of the dialog: 1.0 when open, shrinking to 0.0 while
    /// closing.
    #[must_use]
    pub fn scale(&self, now: Instant) -> f32 {
        match self.visibility {
            Visibility::Hidden => 0.0,
            Visibility::Open => 1.0,
            Visibility::Closing { since } => {
                let elapsed = now.saturating_duration_since(since).as_secs_f32();
                (1.0 - elapsed / CLOSE_ANIMATION.as_secs_f32()).clamp(0.0, 1.0)
            }
        }
    }
}

/// On-screen direction buttons.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionPad {
    pub up: Rect,
    pub down: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl DirectionPad {
    fn new(area: Rect) -> Self {
        let center = area.x + area.width / 2;
        let top = area.y;
        let bottom = area.y.saturating_add(1);
        let button = |x: u16, y: u16| Rect::new(x, y, PAD_BUTTON_WIDTH, 1).intersection(area);

        Self {
            up: button(center.saturating_sub(1), top),
            left: button(center.saturating_sub(5), bottom),
            down: button(center.saturating_sub(1), bottom),
            right: button(center.saturating_add(3), bottom),
        }
    }

    #[must_use]
    pub fn buttons(&self) -> [(Direction, Rect); 4] {
        [
            (Direction::Up, self.up),
            (Direction::Left, self.left),
            (Direction::Down, self.down),
            (Direction::Right, self.right),
        ]
    }
}

/// What a click inside the dialog's screen area landed on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ModalTarget {
    Close,
    Start,
    Steer(Direction),
    /// Outside the dialog.
    Backdrop,
}

/// Screen rectangles of every dialog element.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ModalLayout {
    pub popup: Rect,
    pub close_button: Rect,
    pub score: Rect,
    pub board: Rect,
    pub message: Rect,
    pub start_button: Rect,
    pub pad: Option<DirectionPad>,
}

impl ModalLayout {
    /// Computes the dialog centred in `area`, sized to fit the board.
    #[must_use]
    pub fn new(area: Rect, grid: GridSize, tile: TileSize, show_buttons: bool) -> Self {
        let board_width = grid.width.saturating_mul(tile.width).saturating_add(2);
        let board_height = grid.height.saturating_mul(tile.height).saturating_add(2);
        let pad_height = if show_buttons { PAD_HEIGHT } else { 0 };

        let inner_width = board_width.max(MIN_INNER_WIDTH);
        let popup_width = inner_width.saturating_add(4);
        let popup_height = board_height.saturating_add(pad_height).saturating_add(5);
        let popup = centered_rect(area, popup_width, popup_height);

        let close_button = Rect::new(
            popup.right().saturating_sub(CLOSE_GLYPH.width() as u16 + 1),
            popup.y,
            CLOSE_GLYPH.width() as u16,
            1,
        )
        .intersection(popup);

        let inner = popup.inner(Margin::new(2, 1));
        let [score, board_row, message, button_row, pad_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(board_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(pad_height),
        ])
        .areas(inner);

        let board = centered_rect(board_row, board_width, board_height);
        let start_button = centered_rect(button_row, button_text(START_LABEL).width() as u16, 1);
        let pad = show_buttons.then(|| DirectionPad::new(pad_row));

        Self {
            popup,
            close_button,
            score,
            board,
            message,
            start_button,
            pad,
        }
    }

    /// Resolves a mouse click to the element under it.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ModalTarget> {
        let position = ScreenPosition::new(column, row);

        if self.close_button.contains(position) {
            return Some(ModalTarget::Close);
        }
        if !self.popup.contains(position) {
            return Some(ModalTarget::Backdrop);
        }
        if self.start_button.contains(position) {
            return Some(ModalTarget::Start);
        }

        self.pad.and_then(|pad| {
            pad.buttons()
                .into_iter()
                .find(|(_, rect)| rect.contains(position))
                .map(|(direction, _)| ModalTarget::Steer(direction))
        })
    }
}

/// Draws the dialog over whatever is already in the frame.
pub fn render_modal(
    frame: &mut Frame<'_>,
    layout: &ModalLayout,
    state: &GameState,
    panel: &StatusPanel,
    palette: &Palette,
    tile: TileSize,
    scale: f32,
) {
    let area = frame.area();
    frame.render_widget(Block::new().style(Style::new().bg(palette.backdrop)), area);

    if scale < 1.0 {
        let shrunk = shrink(layout.popup, scale);
        frame.render_widget(Clear, shrunk);
        frame.render_widget(
            Block::bordered().border_style(Style::new().fg(palette.board_border)),
            shrunk,
        );
        return;
    }

    frame.render_widget(Clear, layout.popup);
    frame.render_widget(
        Block::bordered()
            .title(" Snake ")
            .border_style(Style::new().fg(palette.board_border)),
        layout.popup,
    );
    frame.render_widget(
        Paragraph::new(CLOSE_GLYPH).style(Style::new().add_modifier(Modifier::BOLD)),
        layout.close_button,
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Score: "),
            Span::styled(
                panel.score().to_string(),
                Style::new().add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center),
        layout.score,
    );

    let board_block = Block::bordered().border_style(Style::new().fg(palette.board_border));
    let board_inner = board_block.inner(layout.board);
    frame.render_widget(board_block, layout.board);
    let mut surface = BufferSurface::new(frame.buffer_mut(), board_inner, palette.board_bg);
    draw_scene(&mut surface, state, palette, tile);

    let message = panel.message();
    frame.render_widget(
        Paragraph::new(message.text())
            .alignment(Alignment::Center)
            .style(Style::new().fg(message.color(palette))),
        layout.message,
    );

    frame.render_widget(
        Paragraph::new(button_text(panel.start_label()))
            .alignment(Alignment::Center)
            .style(
                Style::new()
                    .fg(palette.button_fg)
                    .bg(palette.button_bg)
                    .add_modifier(Modifier::BOLD),
            ),
        layout.start_button,
    );

    if let Some(pad) = layout.pad {
        for (direction, rect) in pad.buttons() {
            frame.render_widget(
                Paragraph::new(pad_glyph(direction))
                    .style(Style::new().fg(palette.button_fg).bg(palette.button_bg)),
                rect,
            );
        }
    }
}

fn button_text(label: &str) -> String {
    format!("[ {label} ]")
}

fn pad_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "[▲]",
        Direction::Down => "[▼]",
        Direction::Left => "[◀]",
        Direction::Right => "[▶]",
        Direction::None => "[ ]",
    }
}

/// Centres a `width × height` rectangle in `area`, clamped to fit.
#[must_use]
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn shrink(rect: Rect, scale: f32) -> Rect {
    let width = (f32::from(rect.width) * scale).round() as u16;
    let height = (f32::from(rect.height) * scale).round() as u16;
    centered_rect(rect, width, height)
}
