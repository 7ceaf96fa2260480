use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::Frame;
use tracing::debug;

use crate::config::{TileSize, DEFAULT_TILE_SIZE, FRAME_INTERVAL, PALETTE};
use crate::engine::{EngineConfig, GameEngine};
use crate::error::EngineError;
use crate::input::Command;
use crate::ui::modal::{render_modal, Modal, ModalLayout, ModalTarget};
use crate::ui::page::{render_page, PageLayout};
use crate::ui::panel::StatusPanel;

/// The host page, its game dialog and the engine behind it.
#[derive(Debug)]
pub struct App {
    engine: GameEngine<StatusPanel>,
    modal: Modal,
    tile: TileSize,
    show_buttons: bool,
    viewport: Rect,
    should_quit: bool,
}

impl App {
    /// Creates the app with the dialog closed and an idle board.
    pub fn new(config: EngineConfig, show_buttons: bool) -> Result<Self, EngineError> {
        let mut engine = GameEngine::new(config, StatusPanel::new())?;
        engine.reset();

        Ok(Self {
            engine,
            modal: Modal::new(),
            tile: DEFAULT_TILE_SIZE,
            show_buttons,
            viewport: Rect::default(),
            should_quit: false,
        })
    }

    /// Applies one user command.
    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Open => {
                if !self.modal.is_open() {
                    self.modal.open();
                    self.engine.reset();
                }
            }
            Command::Close => {
                if self.modal.close(now) {
                    self.engine.stop();
                }
            }
            Command::Start => {
                if self.modal.is_open() {
                    self.engine.start(now);
                }
            }
            Command::Steer(direction) => {
                self.engine.set_direction(direction);
            }
            Command::Click { column, row } => {
                if let Some(resolved) = self.resolve_click(column, row) {
                    debug!(column, row, ?resolved, "click");
                    self.apply(resolved, now);
                }
            }
            Command::Quit => {
                self.engine.stop();
                self.should_quit = true;
            }
        }
    }

    fn resolve_click(&self, column: u16, row: u16) -> Option<Command> {
        if self.modal.is_open() {
            let layout = self.modal_layout();
            return match layout.hit_test(column, row)? {
                ModalTarget::Close | ModalTarget::Backdrop => Some(Command::Close),
                ModalTarget::Start => Some(Command::Start),
                ModalTarget::Steer(direction) => Some(Command::Steer(direction)),
            };
        }

        if self.modal.is_visible() {
            return None;
        }

        PageLayout::new(self.viewport)
            .hits_open_button(column, row)
            .then_some(Command::Open)
    }

    /// Advances the game timer and the dialog animation.
    pub fn update(&mut self, now: Instant) {
        self.engine.poll(now);
        self.modal.advance(now);
    }

    /// How long the frame loop may wait for input before calling `update`.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.engine
            .time_until_next_tick(now)
            .map_or(FRAME_INTERVAL, |remaining| remaining.min(FRAME_INTERVAL))
    }

    /// Draws the page and, when visible, the dialog on top of it.
    pub fn draw(&mut self, frame: &mut Frame<'_>, now: Instant) {
        self.viewport = frame.area();

        render_page(frame, &PageLayout::new(self.viewport), &PALETTE);

        if self.modal.is_visible() {
            render_modal(
                frame,
                &self.modal_layout(),
                self.engine.state(),
                self.engine.renderer(),
                &PALETTE,
                self.tile,
                self.modal.scale(now),
            );
        }
    }

    fn modal_layout(&self) -> ModalLayout {
        ModalLayout::new(
            self.viewport,
            self.engine.state().bounds(),
            self.tile,
            self.show_buttons,
        )
    }

    #[must_use]
    pub fn dialog_open(&self) -> bool {
        self.modal.is_open()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine<StatusPanel> {
        &self.engine
    }

    #[must_use]
    pub fn modal(&self) -> &Modal {
        &self.modal
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::config::{GridSize, PALETTE};
    use crate::engine::EngineConfig;
    use crate::game::GameStatus;
    use crate::input::{command_for_key, Command, Direction};
    use crate::snake::Position;
    use crate::ui::modal::ModalLayout;
    use crate::ui::page::PageLayout;
    use crate::ui::panel::StatusMessage;

    use super::App;

    const INTERVAL: Duration = Duration::from_millis(150);

    fn app(show_buttons: bool) -> App {
        App::new(
            EngineConfig {
                grid: GridSize::square(10),
                tick_interval: INTERVAL,
                seed: Some(5),
            },
            show_buttons,
        )
        .expect("10x10 grid is valid")
    }

    fn draw(app: &mut App, now: Instant) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("test backend");
        terminal
            .draw(|frame| app.draw(frame, now))
            .expect("draw should succeed");
        terminal
    }

    #[test]
    fn open_start_close_drives_engine() {
        let now = Instant::now();
        let mut app = app(false);

        app.apply(Command::Start, now);
        assert!(!app.engine().is_running(), "start needs the dialog open");

        app.apply(Command::Open, now);
        assert!(app.dialog_open());
        assert_eq!(app.engine().renderer().message(), StatusMessage::Prompt);

        app.apply(Command::Start, now);
        assert!(app.engine().is_running());
        assert_eq!(app.engine().renderer().message(), StatusMessage::Blank);

        app.apply(Command::Close, now);
        assert!(!app.engine().is_running());
        assert!(app.modal().is_visible());

        app.update(now + Duration::from_secs(1));
        assert!(!app.modal().is_visible());
    }

    #[test]
    fn clicks_resolve_against_drawn_layout() {
        let now = Instant::now();
        let mut app = app(true);
        let _ = draw(&mut app, now);

        let page = PageLayout::new(ratatui::layout::Rect::new(0, 0, 80, 30));
        app.apply(
            Command::Click {
                column: page.open_button.x,
                row: page.open_button.y,
            },
            now,
        );
        assert!(app.dialog_open());

        let layout = ModalLayout::new(
            ratatui::layout::Rect::new(0, 0, 80, 30),
            GridSize::square(10),
            crate::config::DEFAULT_TILE_SIZE,
            true,
        );
        app.apply(
            Command::Click {
                column: layout.start_button.x,
                row: layout.start_button.y,
            },
            now,
        );
        assert_eq!(app.engine().state().status, GameStatus::Running);

        let pad = layout.pad.expect("pad shown");
        app.apply(
            Command::Click {
                column: pad.up.x,
                row: pad.up.y,
            },
            now,
        );
        assert_eq!(app.engine().state().direction, Direction::Up);

        app.apply(Command::Click { column: 0, row: 0 }, now);
        assert!(!app.dialog_open());
        assert!(!app.engine().is_running());
    }

    #[test]
    fn game_over_updates_panel() {
        let now = Instant::now();
        let mut app = app(false);
        app.apply(Command::Open, now);
        app.apply(Command::Start, now);
        app.apply(Command::Steer(Direction::Up), now);

        let mut tick = now;
        for _ in 0..10 {
            tick += INTERVAL;
            app.update(tick);
        }

        assert!(matches!(app.engine().state().status, GameStatus::GameOver(_)));
        assert_eq!(
            app.engine().renderer().message(),
            StatusMessage::GameOver {
                score: app.engine().state().score
            }
        );
        assert_eq!(app.engine().renderer().start_label(), "Play again");
    }

    #[test]
    fn dialog_draws_board_with_snake_head() {
        let now = Instant::now();
        let mut app = app(false);
        app.apply(Command::Open, now);

        let terminal = draw(&mut app, now);
        let layout = ModalLayout::new(
            ratatui::layout::Rect::new(0, 0, 80, 30),
            GridSize::square(10),
            crate::config::DEFAULT_TILE_SIZE,
            false,
        );
        let head = app.engine().state().snake.head();
        assert_eq!(head, Position { x: 5, y: 5 });

        let x = layout.board.x + 1 + 5 * 2;
        let y = layout.board.y + 1 + 5;
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(x, y)].bg, PALETTE.snake_head);
        assert_eq!(buffer[(x + 1, y)].bg, PALETTE.snake_head);
    }

    #[test]
    fn poll_timeout_tracks_next_tick() {
        let now = Instant::now();
        let mut app = app(false);
        assert_eq!(app.poll_timeout(now), crate::config::FRAME_INTERVAL);

        app.apply(Command::Open, now);
        app.apply(Command::Start, now);
        assert_eq!(
            app.poll_timeout(now + INTERVAL - Duration::from_millis(5)),
            Duration::from_millis(5)
        );
    }

    #[test]
    fn quit_stops_engine() {
        let now = Instant::now();
        let mut app = app(false);
        app.apply(Command::Open, now);
        app.apply(Command::Start, now);

        app.apply(Command::Quit, now);

        assert!(app.should_quit());
        assert!(!app.engine().is_running());
    }

    #[test]
    fn escape_twice_during_close_animation_keeps_running() {
        let now = Instant::now();
        let mut app = app(false);
        app.apply(Command::Open, now);

        let press_escape = |app: &mut App, at: Instant| {
            let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
            if let Some(command) = command_for_key(key, app.dialog_open()) {
                app.apply(command, at);
            }
        };

        press_escape(&mut app, now);
        assert!(!app.dialog_open());
        assert!(app.modal().is_visible());

        press_escape(&mut app, now + Duration::from_millis(50));
        app.update(now + Duration::from_millis(50));

        assert!(!app.should_quit());
        assert!(app.modal().is_visible());
    }
}
