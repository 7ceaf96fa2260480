use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws attempted before falling back to scanning free cells.
const MAX_RANDOM_ATTEMPTS: usize = 64;

/// The single food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food on a cell the snake does not occupy, or `None` when the
    /// snake covers the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Picks a uniformly random free cell.
///
/// Draws random cells until one misses the snake. A long snake makes misses
/// rare, so after [`MAX_RANDOM_ATTEMPTS`] draws the free cells are enumerated
/// and one is chosen directly. Returns `None` only when no free cell exists.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if bounds.width == 0 || bounds.height == 0 {
        return None;
    }

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(snake.len()));
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;

    use super::{spawn_position, Food};
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 2, y: 0 },
        ]);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let food_position =
                spawn_position(&mut rng, bounds, &snake).expect("board has free cells");
            assert!(!snake.occupies(food_position));
            assert!(food_position.is_within_bounds(bounds));
        }
    }

    #[test]
    fn nearly_full_board_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize::square(3);
        let mut segments = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (2, 2) {
                    segments.push(Position { x, y });
                }
            }
        }
        let snake = Snake::from_segments(segments);

        let food = Food::spawn(&mut rng, bounds, &snake).expect("one free cell remains");

        assert_eq!(food.position, Position { x: 2, y: 2 });
    }

    #[test]
    fn full_board_has_no_food_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize {
            width: 2,
            height: 1,
        };
        let snake = Snake::from_segments(vec![Position { x: 0, y: 0 }, Position { x: 1, y: 0 }]);

        assert_eq!(spawn_position(&mut rng, bounds, &snake), None);
    }
}
