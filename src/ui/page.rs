use ratatui::layout::{Alignment, Constraint, Layout, Margin, Position as ScreenPosition, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Palette;
use crate::ui::modal::centered_rect;

const OPEN_BUTTON_TEXT: &str = "[ Play Snake ]";

/// Screen rectangles of the host page behind the dialog.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PageLayout {
    pub title: Rect,
    pub body: Rect,
    pub open_button: Rect,
    pub footer: Rect,
}

impl PageLayout {
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let [title, body, button_row, _, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            title,
            body,
            open_button: centered_rect(button_row, OPEN_BUTTON_TEXT.width() as u16, 1),
            footer,
        }
    }

    /// Returns true when a click at `(column, row)` hits the open button.
    #[must_use]
    pub fn hits_open_button(&self, column: u16, row: u16) -> bool {
        self.open_button.contains(ScreenPosition::new(column, row))
    }
}

/// Draws the page: a heading, a short blurb and the button that opens the
/// game dialog.
pub fn render_page(frame: &mut Frame<'_>, layout: &PageLayout, palette: &Palette) {
    frame.render_widget(
        Paragraph::new(Line::from("ARCADE CORNER"))
            .alignment(Alignment::Center)
            .style(Style::new().fg(palette.snake_head).add_modifier(Modifier::BOLD)),
        layout.title.inner(Margin::new(0, 1)),
    );

    frame.render_widget(
        Paragraph::new(vec![
            Line::from("Need a break? Guide the snake to the food,"),
            Line::from("avoid the walls and don't bite your own tail."),
        ])
        .alignment(Alignment::Center),
        layout.body,
    );

    frame.render_widget(
        Paragraph::new(OPEN_BUTTON_TEXT).style(
            Style::new()
                .fg(palette.button_fg)
                .bg(palette.button_bg)
                .add_modifier(Modifier::BOLD),
        ),
        layout.open_button,
    );

    frame.render_widget(
        Paragraph::new(Line::from("[Enter]/[O] Open game   [Q] Quit"))
            .alignment(Alignment::Center)
            .style(Style::new().fg(palette.backdrop)),
        layout.footer,
    );
}
