use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::config::{GridSize, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TILE_COUNT, MIN_TILE_COUNT};
use crate::error::EngineError;
use crate::game::{EndReason, GameState, GameStatus, TickOutcome};
use crate::input::Direction;
use crate::renderer::Render;
use crate::scheduler::TickHandle;

/// Construction parameters for [`GameEngine`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub tick_interval: Duration,
    /// Fixed seed for food placement; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::square(DEFAULT_TILE_COUNT),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            seed: None,
        }
    }
}

/// Owns the game state, the repeating tick, and the render collaborator.
#[derive(Debug)]
pub struct GameEngine<R> {
    state: GameState,
    timer: Option<TickHandle>,
    tick_interval: Duration,
    renderer: R,
}

impl<R: Render> GameEngine<R> {
    /// Creates an idle engine. Nothing is rendered until the first `reset`.
    ///
    /// Grids narrower or shorter than two tiles are rejected: the snake would
    /// leave no free cell for the food.
    pub fn new(config: EngineConfig, renderer: R) -> Result<Self, EngineError> {
        let GridSize { width, height } = config.grid;
        if width < MIN_TILE_COUNT || height < MIN_TILE_COUNT {
            return Err(EngineError::GridTooSmall {
                width,
                height,
                min: MIN_TILE_COUNT,
            });
        }

        let state = match config.seed {
            Some(seed) => GameState::new_with_seed(config.grid, seed),
            None => GameState::new(config.grid),
        };

        Ok(Self {
            state,
            timer: None,
            tick_interval: config.tick_interval,
            renderer,
        })
    }

    /// Cancels any running round and returns to the idle board.
    pub fn reset(&mut self) {
        self.release_timer();
        self.state.reset();
        info!(food = ?self.state.food.position, "game reset");
        self.renderer.render(&self.state);
    }

    /// Starts a new round unless one is already running.
    pub fn start(&mut self, now: Instant) {
        if !self.state.is_over() {
            return;
        }

        self.reset();
        self.state.status = GameStatus::Running;
        self.timer = Some(TickHandle::schedule(self.tick_interval, now));
        info!(interval_ms = self.tick_interval.as_millis() as u64, "game started");
        self.renderer.render(&self.state);
    }

    /// Cancels the repeating tick. Safe to call when nothing is running.
    pub fn stop(&mut self) {
        self.release_timer();
        if self.state.status == GameStatus::Running {
            self.state.status = GameStatus::Idle;
            info!(score = self.state.score, "game stopped");
        }
        self.state.direction = Direction::None;
    }

    /// Requests a direction change; see [`GameState::set_direction`].
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let accepted = self.state.set_direction(direction);
        if accepted {
            debug!(?direction, "direction accepted");
        }
        accepted
    }

    /// Raw-delta form of [`Self::set_direction`]. Deltas that are not a unit
    /// step along one axis are ignored.
    pub fn set_direction_delta(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_delta(dx, dy) {
            Some(direction) => self.set_direction(direction),
            None => {
                debug!(dx, dy, "ignoring non-unit direction delta");
                false
            }
        }
    }

    /// Runs one tick if the timer is due. Returns whether a tick ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = self.timer.as_mut().is_some_and(|timer| timer.poll(now));
        if due {
            self.tick();
        }
        due
    }

    /// Time until the next scheduled tick, or `None` when stopped.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.as_ref().map(|timer| timer.remaining(now))
    }

    /// One tick of the game loop: unlock input, update, render.
    pub fn tick(&mut self) {
        self.state.begin_tick();
        if self.state.is_over() {
            return;
        }

        match self.state.update() {
            TickOutcome::Ended(reason) => self.end_game(reason),
            TickOutcome::Ate => debug!(
                score = self.state.score,
                food = ?self.state.food.position,
                "food eaten"
            ),
            outcome => trace!(?outcome, head = ?self.state.snake.head(), "tick"),
        }

        self.renderer.render(&self.state);
    }

    fn end_game(&mut self, reason: EndReason) {
        self.stop();
        self.state.status = GameStatus::GameOver(reason);
        info!(
            score = self.state.score,
            ticks = self.state.tick_count,
            ?reason,
            "game over"
        );
        self.renderer.game_over(self.state.score);
    }

    fn release_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(
                fired = timer.fired(),
                interval_ms = timer.interval().as_millis() as u64,
                "tick timer cancelled"
            );
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for scripted test scenarios only. Gameplay goes
    /// through the engine operations above.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
