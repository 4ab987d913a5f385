//! Snake simulation. Pure grid logic with an injected RNG; timing, input
//! mapping and score persistence live in the app module wrapping it.

use std::time::Duration;

use rand::Rng;

pub const GRID_WIDTH: i16 = 28;
pub const GRID_HEIGHT: i16 = 16;

/// One cell advance per tick while playing.
pub const TICK: Duration = Duration::from_millis(200);

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub x: i16,
    pub y: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn offset(self, p: Pos) -> Pos {
        match self {
            Direction::Up => Pos { x: p.x, y: p.y - 1 },
            Direction::Down => Pos { x: p.x, y: p.y + 1 },
            Direction::Left => Pos { x: p.x - 1, y: p.y },
            Direction::Right => Pos { x: p.x + 1, y: p.y },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

// ── Game state ────────────────────────────────────────────────────────────────

pub struct SnakeGame {
    /// Head first, no duplicates, in-bounds while playing.
    snake: Vec<Pos>,
    direction: Direction,
    /// Buffered direction change, applied at the next tick boundary so a
    /// change can neither be skipped nor applied twice within one tick.
    next_direction: Direction,
    food: Pos,
    score: u32,
    status: GameStatus,
    width: i16,
    height: i16,
}

impl SnakeGame {
    pub fn new(rng: &mut impl Rng) -> Self {
        let snake = vec![
            Pos { x: 14, y: 8 },
            Pos { x: 13, y: 8 },
            Pos { x: 12, y: 8 },
        ];
        let food = random_free_cell(rng, GRID_WIDTH, GRID_HEIGHT, &snake);
        Self {
            snake,
            direction: Direction::Right,
            next_direction: Direction::Right,
            food,
            score: 0,
            status: GameStatus::Playing,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }

    /// Start a fresh game. The only way out of game over.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        *self = Self::new(rng);
    }

    /// Buffer a direction change for the next tick. An exact 180° reversal of
    /// the currently applied direction is rejected — it would mean instant
    /// self-collision.
    pub fn change_direction(&mut self, dir: Direction) {
        if dir == self.direction.opposite() {
            return;
        }
        self.next_direction = dir;
    }

    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::GameOver => GameStatus::GameOver,
        };
    }

    /// Advance one tick. No-op unless playing; after a collision the game sits
    /// in game over until reset.
    pub fn step(&mut self, rng: &mut impl Rng) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.direction = self.next_direction;
        let head = self.snake[0];
        let new_head = self.direction.offset(head);

        let out_of_bounds = new_head.x < 0
            || new_head.x >= self.width
            || new_head.y < 0
            || new_head.y >= self.height;
        if out_of_bounds || self.snake.contains(&new_head) {
            self.status = GameStatus::GameOver;
            return;
        }

        self.snake.insert(0, new_head);
        if new_head == self.food {
            self.score += 1;
            self.food = random_free_cell(rng, self.width, self.height, &self.snake);
        } else {
            self.snake.pop();
        }
    }

    pub fn snake(&self) -> &[Pos] {
        &self.snake
    }

    pub fn occupies(&self, p: Pos) -> bool {
        self.snake.contains(&p)
    }

    pub fn food(&self) -> Pos {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }
}

/// Uniform rejection sampling over cells not covered by the snake body.
/// Terminates because the grid is always larger than the snake.
fn random_free_cell(rng: &mut impl Rng, width: i16, height: i16, snake: &[Pos]) -> Pos {
    loop {
        let p = Pos {
            x: rng.gen_range(0..width),
            y: rng.gen_range(0..height),
        };
        if !snake.contains(&p) {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn game_with(snake: Vec<Pos>, direction: Direction, food: Pos) -> SnakeGame {
        SnakeGame {
            snake,
            direction,
            next_direction: direction,
            food,
            score: 0,
            status: GameStatus::Playing,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }

    fn initial_fixture() -> Vec<Pos> {
        vec![
            Pos { x: 14, y: 8 },
            Pos { x: 13, y: 8 },
            Pos { x: 12, y: 8 },
        ]
    }

    #[test]
    fn plain_move_advances_head_and_drops_tail() {
        let mut g = game_with(initial_fixture(), Direction::Right, Pos { x: 0, y: 0 });
        g.step(&mut rng());
        assert_eq!(g.snake()[0], Pos { x: 15, y: 8 });
        assert_eq!(g.snake().len(), 3);
        assert!(!g.occupies(Pos { x: 12, y: 8 }));
    }

    #[test]
    fn reversal_is_rejected_and_movement_continues() {
        let mut g = game_with(initial_fixture(), Direction::Right, Pos { x: 0, y: 0 });
        g.change_direction(Direction::Left);
        g.step(&mut rng());
        assert_eq!(g.snake()[0], Pos { x: 15, y: 8 });
        assert_eq!(g.status(), GameStatus::Playing);
    }

    #[test]
    fn buffered_turn_applies_at_the_next_tick_only() {
        let mut g = game_with(initial_fixture(), Direction::Right, Pos { x: 0, y: 0 });
        g.change_direction(Direction::Up);
        g.change_direction(Direction::Down); // overwrites the buffer, legal vs RIGHT
        g.step(&mut rng());
        assert_eq!(g.snake()[0], Pos { x: 14, y: 9 });
    }

    #[test]
    fn eating_food_grows_scores_and_relocates_food_off_the_body() {
        let mut g = game_with(initial_fixture(), Direction::Right, Pos { x: 15, y: 8 });
        let mut r = rng();
        g.step(&mut r);
        assert_eq!(g.snake().len(), 4);
        assert_eq!(g.score(), 1);
        assert!(!g.occupies(g.food()));
    }

    #[test]
    fn wall_collision_ends_the_game_and_halts_ticking() {
        let snake = vec![
            Pos { x: 0, y: 5 },
            Pos { x: 1, y: 5 },
            Pos { x: 2, y: 5 },
        ];
        let mut g = game_with(snake, Direction::Left, Pos { x: 20, y: 5 });
        let mut r = rng();
        g.step(&mut r); // head would move to x = -1
        assert_eq!(g.status(), GameStatus::GameOver);

        let frozen: Vec<Pos> = g.snake().to_vec();
        g.step(&mut r);
        g.step(&mut r);
        assert_eq!(g.snake(), frozen.as_slice());
        assert_eq!(g.status(), GameStatus::GameOver);
    }

    #[test]
    fn right_wall_collision_ends_the_game() {
        let snake = vec![
            Pos { x: GRID_WIDTH - 1, y: 5 },
            Pos { x: GRID_WIDTH - 2, y: 5 },
        ];
        let mut g = game_with(snake, Direction::Right, Pos { x: 0, y: 0 });
        g.step(&mut rng());
        assert_eq!(g.status(), GameStatus::GameOver);
    }

    #[test]
    fn self_collision_ends_the_game() {
        // A hook shape where moving up runs into the body.
        let snake = vec![
            Pos { x: 5, y: 5 },
            Pos { x: 5, y: 4 },
            Pos { x: 6, y: 4 },
            Pos { x: 6, y: 5 },
            Pos { x: 6, y: 6 },
        ];
        let mut g = game_with(snake, Direction::Up, Pos { x: 0, y: 0 });
        g.step(&mut rng());
        assert_eq!(g.status(), GameStatus::GameOver);
    }

    #[test]
    fn pause_toggles_but_never_leaves_game_over() {
        let mut g = SnakeGame::new(&mut rng());
        g.toggle_pause();
        assert_eq!(g.status(), GameStatus::Paused);
        g.toggle_pause();
        assert_eq!(g.status(), GameStatus::Playing);

        let snake = vec![Pos { x: 0, y: 0 }, Pos { x: 1, y: 0 }];
        let mut dead = game_with(snake, Direction::Left, Pos { x: 5, y: 5 });
        dead.step(&mut rng());
        assert_eq!(dead.status(), GameStatus::GameOver);
        dead.toggle_pause();
        assert_eq!(dead.status(), GameStatus::GameOver);
    }

    #[test]
    fn paused_games_do_not_advance() {
        let mut g = game_with(initial_fixture(), Direction::Right, Pos { x: 0, y: 0 });
        g.toggle_pause();
        g.step(&mut rng());
        assert_eq!(g.snake()[0], Pos { x: 14, y: 8 });
    }

    #[test]
    fn reset_starts_a_fresh_playing_game() {
        let mut r = rng();
        let snake = vec![Pos { x: 0, y: 0 }, Pos { x: 1, y: 0 }];
        let mut g = game_with(snake, Direction::Left, Pos { x: 5, y: 5 });
        g.step(&mut r);
        assert_eq!(g.status(), GameStatus::GameOver);

        g.reset(&mut r);
        assert_eq!(g.status(), GameStatus::Playing);
        assert_eq!(g.score(), 0);
        assert_eq!(g.snake().len(), 3);
        assert_eq!(g.snake()[0], Pos { x: 14, y: 8 });
        assert!(!g.occupies(g.food()));
    }

    #[test]
    fn food_is_always_placed_in_bounds() {
        let mut r = rng();
        for _ in 0..200 {
            let p = random_free_cell(&mut r, GRID_WIDTH, GRID_HEIGHT, &initial_fixture());
            assert!(p.x >= 0 && p.x < GRID_WIDTH);
            assert!(p.y >= 0 && p.y < GRID_HEIGHT);
        }
    }
}
