use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::config::Config;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    SelfCollision,
    BoardFull,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Running,
    Over(Outcome),
}

/// State for one round. The body is ordered tail to head, so the head is
/// always the back of the deque.
pub struct Game {
    config: Config,
    body: VecDeque<Cell>,
    capacity: usize,
    dir: Direction,
    next_dir: Direction,
    food: Cell,
    food_timer: u32,
    score: u32,
    status: Status,
    rng: SmallRng,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    #[cfg(test)]
    fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: SmallRng) -> Self {
        let cx = config.grid_width / 2;
        let cy = config.grid_height / 2;
        let mut body = VecDeque::with_capacity(config.initial_length);
        for i in 0..config.initial_length as i32 {
            let x = (cx - config.initial_length as i32 / 2 + i).rem_euclid(config.grid_width);
            body.push_back(Cell::new(x, cy));
        }

        let mut game = Self {
            config,
            body,
            capacity: config.initial_length,
            dir: Direction::Right,
            next_dir: Direction::Right,
            food: Cell::new(0, 0),
            food_timer: 0,
            score: 0,
            status: Status::Running,
            rng,
        };
        game.place_food();
        game
    }

    /// Buffers a turn for the next tick. The latest valid call before a tick
    /// wins.
    pub fn set_direction(&mut self, new_dir: Direction) {
        // Prevent 180 degree turns
        if new_dir != self.dir.opposite() {
            self.next_dir = new_dir;
        }
    }

    /// Advances the game by one tick, applying the buffered turn first.
    pub fn advance(&mut self) {
        if self.is_over() {
            return;
        }

        self.dir = self.next_dir;

        self.food_timer += self.config.food_tick_increment;
        if self.food_timer >= self.config.food_refresh_threshold {
            self.food_timer = 0;
            debug!(
                "food at ({}, {}) went stale, moving it",
                self.food.x, self.food.y
            );
            self.place_food();
        }

        // The board wraps, so the next cell is always in bounds.
        let (dx, dy) = self.dir.delta();
        let head = *self.body.back().unwrap();
        let next = self.wrapped(head.x + dx, head.y + dy);

        if next == self.food {
            self.capacity += 1;
            self.score += 1;
            self.food_timer = 0;
            self.body.push_back(next);
            debug!(
                "ate food at ({}, {}), length {}",
                next.x,
                next.y,
                self.body.len()
            );
            self.place_food();
        } else if self.contains(next) {
            // The tail cell counts too; it has not moved out of the way yet.
            self.status = Status::Over(Outcome::SelfCollision);
            info!(
                "ran into own body at ({}, {}) with score {}",
                next.x, next.y, self.score
            );
            return;
        } else {
            self.body.push_back(next);
        }

        while self.body.len() > self.capacity {
            self.body.pop_front();
        }
    }

    fn place_food(&mut self) {
        let total = (self.config.grid_width * self.config.grid_height) as usize;
        if self.body.len() >= total {
            self.status = Status::Over(Outcome::BoardFull);
            info!("board full at length {}, you win", self.body.len());
            return;
        }

        // Try random cells first.
        for _ in 0..64 {
            let p = Cell::new(
                self.rng.gen_range(0..self.config.grid_width),
                self.rng.gen_range(0..self.config.grid_height),
            );
            if !self.contains(p) {
                self.food = p;
                return;
            }
        }

        // Crowded board: scan for the free cells and pick one of those.
        let mut free = Vec::new();
        for y in 0..self.config.grid_height {
            for x in 0..self.config.grid_width {
                let p = Cell::new(x, y);
                if !self.contains(p) {
                    free.push(p);
                }
            }
        }
        self.food = free[self.rng.gen_range(0..free.len())];
    }

    fn wrapped(&self, x: i32, y: i32) -> Cell {
        Cell::new(
            x.rem_euclid(self.config.grid_width),
            y.rem_euclid(self.config.grid_height),
        )
    }

    fn contains(&self, cell: Cell) -> bool {
        self.body.iter().any(|&c| c == cell)
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        *self.body.back().unwrap()
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_game(seed: u64) -> Game {
        Game::with_seed(Config::default(), seed)
    }

    fn body_cells(game: &Game) -> Vec<Cell> {
        game.body().iter().copied().collect()
    }

    fn row(x0: i32, x1: i32, y: i32) -> Vec<Cell> {
        (x0..=x1).map(|x| Cell::new(x, y)).collect()
    }

    fn single_cell_game(at: Cell, dir: Direction) -> Game {
        let mut game = test_game(7);
        game.body.clear();
        game.body.push_back(at);
        game.capacity = 1;
        game.dir = dir;
        game.next_dir = dir;
        game.food = Cell::new(10, 10);
        game
    }

    fn crashed_game() -> Game {
        let mut game = test_game(3);
        game.body.clear();
        for cell in [
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
        ] {
            game.body.push_back(cell);
        }
        game.capacity = 4;
        game.dir = Direction::Up;
        game.next_dir = Direction::Up;
        game.food = Cell::new(0, 0);
        game.advance();
        game
    }

    #[test]
    fn spawns_centered_on_the_middle_row_facing_right() {
        let game = test_game(1);
        assert_eq!(body_cells(&game), row(12, 18, 7));
        assert_eq!(game.head(), Cell::new(18, 7));
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), Status::Running);
        assert!(!game.body().iter().any(|&c| c == game.food()));
    }

    #[test]
    fn food_is_never_placed_on_the_body() {
        for seed in 0..20 {
            let game = test_game(seed);
            assert!(!game.body().iter().any(|&c| c == game.food()));
        }
    }

    #[test]
    fn advancing_moves_the_head_and_evicts_the_tail() {
        let mut game = test_game(1);
        game.food = Cell::new(0, 0);
        game.advance();
        assert_eq!(body_cells(&game), row(13, 19, 7));
        assert_eq!(game.head(), Cell::new(19, 7));
        assert_eq!(game.body().len(), 7);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn eating_grows_the_snake_without_evicting_the_tail() {
        let mut game = test_game(1);
        game.food = Cell::new(19, 7);
        game.food_timer = 300;
        game.advance();
        assert_eq!(body_cells(&game), row(12, 19, 7));
        assert_eq!(game.body().len(), 8);
        assert_eq!(game.capacity, 8);
        assert_eq!(game.score(), 1);
        assert_eq!(game.food_timer, 0);
        assert!(!game.body().iter().any(|&c| c == game.food()));
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn reversing_into_the_neck_is_ignored() {
        let mut game = test_game(2);
        game.food = Cell::new(0, 0);
        game.set_direction(Direction::Left);
        game.advance();
        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.head(), Cell::new(19, 7));
    }

    #[test]
    fn turns_apply_on_the_following_tick() {
        let mut game = test_game(2);
        game.food = Cell::new(0, 0);
        game.set_direction(Direction::Up);
        assert_eq!(game.direction(), Direction::Right);
        game.advance();
        assert_eq!(game.direction(), Direction::Up);
        assert_eq!(game.head(), Cell::new(18, 6));
    }

    #[test]
    fn the_last_direction_pressed_before_a_tick_wins() {
        let mut game = test_game(2);
        game.food = Cell::new(0, 0);
        game.set_direction(Direction::Up);
        game.set_direction(Direction::Down);
        game.advance();
        assert_eq!(game.head(), Cell::new(18, 8));
    }

    #[test]
    fn the_head_wraps_across_every_edge() {
        let cases = [
            (Cell::new(0, 0), Direction::Left, Cell::new(29, 0)),
            (Cell::new(29, 14), Direction::Right, Cell::new(0, 14)),
            (Cell::new(0, 0), Direction::Up, Cell::new(0, 14)),
            (Cell::new(29, 14), Direction::Down, Cell::new(29, 0)),
        ];
        for (start, dir, expected) in cases {
            let mut game = single_cell_game(start, dir);
            game.advance();
            assert_eq!(game.head(), expected);
            assert_eq!(game.body().len(), 1);
            assert_eq!(game.status(), Status::Running);
        }
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        let game = crashed_game();
        assert_eq!(game.status(), Status::Over(Outcome::SelfCollision));
        // The fatal tick appends and evicts nothing
        assert_eq!(
            body_cells(&game),
            vec![
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6)
            ]
        );
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn the_departing_tail_cell_still_blocks() {
        let mut game = test_game(3);
        game.body.clear();
        for cell in [
            Cell::new(4, 5),
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(4, 6),
        ] {
            game.body.push_back(cell);
        }
        game.capacity = 4;
        game.dir = Direction::Up;
        game.next_dir = Direction::Up;
        game.food = Cell::new(0, 0);

        game.advance();
        assert_eq!(game.status(), Status::Over(Outcome::SelfCollision));
    }

    #[test]
    fn a_finished_game_no_longer_advances() {
        let mut game = crashed_game();
        assert!(game.is_over());
        let before = body_cells(&game);
        game.set_direction(Direction::Left);
        game.advance();
        game.advance();
        assert_eq!(body_cells(&game), before);
        assert_eq!(game.status(), Status::Over(Outcome::SelfCollision));
    }

    #[test]
    fn stale_food_moves_after_fifty_ticks() {
        let mut game = test_game(42);
        game.food = Cell::new(5, 2);
        for _ in 0..49 {
            game.advance();
            assert_eq!(game.food(), Cell::new(5, 2));
        }
        assert_eq!(game.food_timer, 4900);

        game.advance();
        assert_eq!(game.food_timer, 0);
        assert_eq!(game.status(), Status::Running);
        assert!(!game.body().iter().any(|&c| c == game.food()));
    }

    #[test]
    fn filling_the_board_wins_the_game() {
        let config = Config {
            grid_width: 2,
            grid_height: 2,
            initial_length: 1,
            ..Config::default()
        };
        let mut game = Game::with_seed(config, 5);
        game.body.clear();
        for cell in [Cell::new(1, 1), Cell::new(0, 1), Cell::new(0, 0)] {
            game.body.push_back(cell);
        }
        game.capacity = 3;
        game.dir = Direction::Right;
        game.next_dir = Direction::Right;
        game.food = Cell::new(1, 0);

        game.advance();
        assert_eq!(game.status(), Status::Over(Outcome::BoardFull));
        assert_eq!(game.body().len(), 4);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn food_placement_finds_the_last_free_cell() {
        let config = Config {
            grid_width: 2,
            grid_height: 2,
            initial_length: 1,
            ..Config::default()
        };
        let mut game = Game::with_seed(config, 11);
        game.body.clear();
        for cell in [Cell::new(1, 1), Cell::new(0, 1), Cell::new(0, 0)] {
            game.body.push_back(cell);
        }
        game.capacity = 3;
        game.place_food();
        assert_eq!(game.food(), Cell::new(1, 0));
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn a_random_walk_never_breaks_the_core_invariants() {
        let mut game = test_game(99);
        let mut rng = SmallRng::seed_from_u64(1234);
        for _ in 0..500 {
            if game.is_over() {
                break;
            }
            let dir = match rng.gen_range(0..4u8) {
                0 => Direction::Up,
                1 => Direction::Down,
                2 => Direction::Left,
                _ => Direction::Right,
            };
            game.set_direction(dir);
            game.advance();

            assert!(game.body().len() <= game.capacity);
            let distinct: HashSet<Cell> = game.body().iter().copied().collect();
            assert_eq!(distinct.len(), game.body().len());
            for &cell in game.body() {
                assert!(cell.x >= 0 && cell.x < 30);
                assert!(cell.y >= 0 && cell.y < 15);
            }
            if !game.is_over() {
                assert!(!game.body().iter().any(|&c| c == game.food()));
            }
        }
    }

    #[test]
    fn opposites_cancel() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
