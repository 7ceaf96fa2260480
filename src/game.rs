use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GridSize;
use crate::food::Food;
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::{Position, Snake};

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    Wall,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Current high-level gameplay state.
///
/// `Idle` and `GameOver` both mean "not running"; they only differ in the
/// message shown to the player.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Running,
    GameOver(EndReason),
}

/// Result of one [`GameState::update`] step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Direction is `None`; nothing moved.
    Waiting,
    Moved,
    Ate,
    Ended(EndReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub input_locked: bool,
    pub tick_count: u64,
    grid: GridSize,
    spawn: Position,
    rng: StdRng,
}

impl GameState {
    /// Creates an idle state with entropy-seeded food placement.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSize, rng: StdRng) -> Self {
        let spawn = grid.center();
        let mut state = Self {
            snake: Snake::new(spawn),
            food: Food::new(spawn),
            direction: Direction::None,
            score: 0,
            status: GameStatus::Idle,
            input_locked: false,
            tick_count: 0,
            grid,
            spawn,
            rng,
        };
        state.reset();
        state
    }

    /// Puts a single-segment snake back on the spawn cell and places new food.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.spawn);
        self.direction = Direction::None;
        self.score = 0;
        self.status = GameStatus::Idle;
        self.input_locked = false;
        self.tick_count = 0;
        self.generate_food();
    }

    /// Returns true unless a round is in progress.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Running
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.grid
    }

    /// Requests a new direction for the next tick.
    ///
    /// Ignored while input is locked or the game is over; reversals and
    /// `None` are rejected. An accepted change locks input until the next
    /// tick begins. Returns whether the change was accepted.
    pub fn set_direction(&mut self, next: Direction) -> bool {
        if self.input_locked || self.is_over() {
            return false;
        }

        if !direction_change_is_valid(self.direction, next) {
            return false;
        }

        self.direction = next;
        self.input_locked = true;
        true
    }

    /// Clears the per-tick input lock.
    pub fn begin_tick(&mut self) {
        self.input_locked = false;
    }

    /// Places food on a random free cell. Leaves the current food in place
    /// and returns `false` when the board is full.
    pub fn generate_food(&mut self) -> bool {
        match Food::spawn(&mut self.rng, self.grid, &self.snake) {
            Some(food) => {
                self.food = food;
                true
            }
            None => false,
        }
    }

    /// Advances the snake by one cell.
    ///
    /// Does not change `status`; a [`TickOutcome::Ended`] result is for the
    /// caller to act on.
    pub fn update(&mut self) -> TickOutcome {
        if self.direction == Direction::None {
            return TickOutcome::Waiting;
        }

        self.tick_count += 1;
        let next_head = self.snake.head().step(self.direction);

        if !next_head.is_within_bounds(self.grid) {
            return TickOutcome::Ended(EndReason::Wall);
        }

        if self.snake.occupies(next_head) {
            return TickOutcome::Ended(EndReason::SelfCollision);
        }

        let ate = next_head == self.food.position;
        self.snake.advance(next_head, ate);

        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        if self.generate_food() {
            TickOutcome::Ate
        } else {
            TickOutcome::Ended(EndReason::BoardFilled)
        }
    }
}
