use ratatui::style::Color;

use crate::config::Palette;
use crate::game::{GameState, GameStatus};
use crate::renderer::Render;

pub const START_LABEL: &str = "Start game";
pub const RESTART_LABEL: &str = "Play again";

/// Text shown under the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StatusMessage {
    Prompt,
    Blank,
    GameOver { score: u32 },
}

impl StatusMessage {
    #[must_use]
    pub fn text(self) -> String {
        match self {
            Self::Prompt => format!("Press \"{START_LABEL}\" to begin."),
            Self::Blank => String::new(),
            Self::GameOver { score } => format!("Game over! Your score: {score}."),
        }
    }

    #[must_use]
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Self::GameOver { .. } => palette.game_over,
            Self::Prompt | Self::Blank => palette.prompt,
        }
    }
}

/// Score display, status message and start-button label, kept current by
/// the engine's render callbacks.
#[derive(Debug, Clone)]
pub struct StatusPanel {
    score: u32,
    message: StatusMessage,
    start_label: &'static str,
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self {
            score: 0,
            message: StatusMessage::Prompt,
            start_label: START_LABEL,
        }
    }
}

impl StatusPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn message(&self) -> StatusMessage {
        self.message
    }

    #[must_use]
    pub fn start_label(&self) -> &'static str {
        self.start_label
    }
}

impl Render for StatusPanel {
    fn render(&mut self, state: &GameState) {
        self.score = state.score;
        match state.status {
            GameStatus::Idle => self.message = StatusMessage::Prompt,
            GameStatus::Running => self.message = StatusMessage::Blank,
            GameStatus::GameOver(_) => {}
        }
    }

    fn game_over(&mut self, final_score: u32) {
        self.message = StatusMessage::GameOver { score: final_score };
        // The label stays on "Play again" for the rest of the session.
        self.start_label = RESTART_LABEL;
    }
}
