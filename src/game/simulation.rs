use super::direction::Direction;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Rect, Size};

/// Where a game is in its lifecycle
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Status {
    /// Waiting for the first arrow key
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// What happened during a call to [`Simulation::step()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StepOutcome {
    /// The game was not running, so nothing happened
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food, ate it, and grew
    Ate,
    /// The snake tried to leave the field
    HitWall,
    /// The snake tried to move into one of its own segments
    HitSelf,
    /// The snake ate the food and there was nowhere left to put more
    BoardFull,
}

impl StepOutcome {
    pub(crate) fn ended_game(self) -> bool {
        matches!(
            self,
            StepOutcome::HitWall | StepOutcome::HitSelf | StepOutcome::BoardFull
        )
    }
}

/// The authoritative state of a game of Snake along with the rules for
/// advancing it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Simulation<R> {
    rng: R,
    bounds: Size,
    pub(super) snake: Snake,
    /// `None` only once the snake has filled the entire field
    pub(super) food: Option<Position>,
    pub(super) score: u32,
    pub(super) status: Status,
    /// Whether the direction has already been changed since the last step
    turned: bool,
}

impl<R: Rng> Simulation<R> {
    pub(crate) fn new(rng: R) -> Simulation<R> {
        let mut sim = Simulation {
            rng,
            bounds: Size::new(consts::GRID_SIZE, consts::GRID_SIZE),
            snake: Snake::new(),
            food: None,
            score: 0,
            status: Status::NotStarted,
            turned: false,
        };
        sim.food = sim.place_food();
        sim
    }

    /// Put everything back the way it was when the simulation was created
    pub(crate) fn reset(&mut self) {
        self.snake = Snake::new();
        self.score = 0;
        self.status = Status::NotStarted;
        self.turned = false;
        self.food = self.place_food();
    }

    /// Begin a game that hasn't started yet, with the snake heading in
    /// `direction`
    pub(crate) fn start(&mut self, direction: Direction) {
        if self.status == Status::NotStarted {
            self.snake.turn(direction);
            self.status = Status::Running;
            self.turned = false;
        }
    }

    /// Ask the snake to turn.  At most one turn is accepted per step, and
    /// turning around to face the opposite direction is never allowed.
    /// Returns `true` if the snake's direction was changed.
    pub(crate) fn request_direction(&mut self, direction: Direction) -> bool {
        if self.status != Status::Running
            || self.turned
            || direction == self.snake.direction().reverse()
        {
            return false;
        }
        self.snake.turn(direction);
        self.turned = true;
        true
    }

    pub(crate) fn toggle_pause(&mut self) {
        match self.status {
            Status::Running => self.status = Status::Paused,
            Status::Paused => self.status = Status::Running,
            Status::NotStarted | Status::GameOver => (),
        }
    }

    /// Advance the game by one tick
    pub(crate) fn step(&mut self) -> StepOutcome {
        if self.status != Status::Running {
            return StepOutcome::Idle;
        }
        let Some(head) = self.snake.next_head(self.bounds) else {
            self.status = Status::GameOver;
            return StepOutcome::HitWall;
        };
        if self.snake.contains(head) {
            self.status = Status::GameOver;
            return StepOutcome::HitSelf;
        }
        self.snake.push_head(head);
        let outcome = if self.food == Some(head) {
            self.score += consts::FOOD_VALUE;
            self.food = self.place_food();
            if self.food.is_none() {
                self.status = Status::GameOver;
                StepOutcome::BoardFull
            } else {
                StepOutcome::Ate
            }
        } else {
            self.snake.drop_tail();
            StepOutcome::Moved
        };
        self.turned = false;
        outcome
    }

    /// Pick a random cell not occupied by the snake.  Random cells are tried
    /// a bounded number of times before falling back to choosing among all
    /// free cells, which is `None` if there aren't any.
    fn place_food(&mut self) -> Option<Position> {
        for _ in 0..consts::MAX_FOOD_PLACEMENT_ATTEMPTS {
            let pos = Position::new(
                self.rng.random_range(0..self.bounds.width),
                self.rng.random_range(0..self.bounds.height),
            );
            if !self.snake.contains(pos) {
                return Some(pos);
            }
        }
        Rect::from((Position::ORIGIN, self.bounds))
            .positions()
            .filter(|&p| !self.snake.contains(p))
            .choose(&mut self.rng)
    }
}

impl<R> Simulation<R> {
    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub(crate) fn bounds(&self) -> Size {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::{HashSet, VecDeque};

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_sim() -> Simulation<ChaCha12Rng> {
        Simulation::new(ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn segments(sim: &Simulation<ChaCha12Rng>) -> Vec<Position> {
        sim.snake().segments().iter().copied().collect()
    }

    fn assert_unique_segments(sim: &Simulation<ChaCha12Rng>) {
        let unique = sim.snake().segments().iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), sim.snake().len(), "snake overlaps itself");
    }

    /// Build a snake from `(x, y)` pairs, head first
    fn snake_at(cells: &[(u16, u16)], direction: Direction) -> Snake {
        Snake {
            segments: cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
        }
    }

    #[test]
    fn new_simulation() {
        let sim = new_sim();
        assert_eq!(sim.status(), Status::NotStarted);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.direction(), Direction::Up);
        assert_eq!(sim.direction().offset(), (0, -1));
        assert_eq!(
            segments(&sim),
            [
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12)
            ]
        );
        let food = sim.food().unwrap();
        assert!(!sim.snake().contains(food));
        assert!(food.x < consts::GRID_SIZE && food.y < consts::GRID_SIZE);
    }

    #[test]
    fn step_before_start_does_nothing() {
        let mut sim = new_sim();
        let before = sim.clone();
        assert_eq!(sim.step(), StepOutcome::Idle);
        assert_eq!(sim, before);
    }

    #[test]
    fn start_only_from_not_started() {
        let mut sim = new_sim();
        sim.start(Direction::Left);
        assert_eq!(sim.status(), Status::Running);
        assert_eq!(sim.direction(), Direction::Left);
        sim.start(Direction::Up);
        assert_eq!(sim.direction(), Direction::Left);
        sim.toggle_pause();
        sim.start(Direction::Up);
        assert_eq!(sim.status(), Status::Paused);
        assert_eq!(sim.direction(), Direction::Left);
    }

    #[test]
    fn move_without_eating() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(0, 0));
        sim.start(Direction::Up);
        assert_eq!(sim.step(), StepOutcome::Moved);
        assert_eq!(
            segments(&sim),
            [
                Position::new(10, 9),
                Position::new(10, 10),
                Position::new(10, 11)
            ]
        );
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.food(), Some(Position::new(0, 0)));
    }

    #[test]
    fn eat_food() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(10, 9));
        sim.start(Direction::Up);
        assert_eq!(sim.step(), StepOutcome::Ate);
        assert_eq!(sim.score(), 10);
        assert_eq!(sim.snake().len(), 4);
        assert_eq!(sim.snake().head(), Position::new(10, 9));
        let food = sim.food().unwrap();
        assert!(!sim.snake().contains(food));
        assert_eq!(sim.status(), Status::Running);
    }

    #[test]
    fn reverse_is_rejected() {
        let mut sim = new_sim();
        sim.start(Direction::Up);
        assert!(!sim.request_direction(Direction::Down));
        assert_eq!(sim.direction(), Direction::Up);
        assert_eq!(sim.direction().offset(), (0, -1));
        // The rejected request does not use up the tick's turn
        assert!(sim.request_direction(Direction::Left));
        assert_eq!(sim.direction(), Direction::Left);
    }

    #[test]
    fn one_turn_per_tick() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(0, 0));
        sim.start(Direction::Up);
        assert!(sim.request_direction(Direction::Left));
        assert!(!sim.request_direction(Direction::Down));
        assert!(!sim.request_direction(Direction::Up));
        assert_eq!(sim.direction(), Direction::Left);
        assert_eq!(sim.step(), StepOutcome::Moved);
        assert_eq!(sim.snake().head(), Position::new(9, 10));
        assert!(sim.request_direction(Direction::Down));
        assert_eq!(sim.direction(), Direction::Down);
    }

    #[test]
    fn turn_then_reverse_of_new_direction_is_rejected() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(0, 0));
        sim.start(Direction::Up);
        assert!(sim.request_direction(Direction::Right));
        assert_eq!(sim.step(), StepOutcome::Moved);
        assert!(!sim.request_direction(Direction::Left));
        assert_eq!(sim.direction(), Direction::Right);
    }

    #[test]
    fn requests_ignored_unless_running() {
        let mut sim = new_sim();
        assert!(!sim.request_direction(Direction::Left));
        assert_eq!(sim.direction(), Direction::Up);
        sim.start(Direction::Up);
        sim.toggle_pause();
        assert!(!sim.request_direction(Direction::Left));
        assert_eq!(sim.direction(), Direction::Up);
        sim.status = Status::GameOver;
        assert!(!sim.request_direction(Direction::Left));
        assert_eq!(sim.direction(), Direction::Up);
    }

    #[test]
    fn toggle_pause() {
        let mut sim = new_sim();
        sim.toggle_pause();
        assert_eq!(sim.status(), Status::NotStarted);
        sim.start(Direction::Up);
        sim.toggle_pause();
        assert_eq!(sim.status(), Status::Paused);
        let before = sim.clone();
        assert_eq!(sim.step(), StepOutcome::Idle);
        assert_eq!(sim, before);
        sim.toggle_pause();
        assert_eq!(sim.status(), Status::Running);
        sim.status = Status::GameOver;
        sim.toggle_pause();
        assert_eq!(sim.status(), Status::GameOver);
    }

    #[test]
    fn wall_collision() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(5, 5));
        sim.snake = snake_at(&[(3, 0), (3, 1), (3, 2)], Direction::Up);
        sim.start(Direction::Up);
        let snake_before = sim.snake().clone();
        assert_eq!(sim.step(), StepOutcome::HitWall);
        assert_eq!(sim.status(), Status::GameOver);
        assert_eq!(sim.snake(), &snake_before);
        assert_eq!(sim.food(), Some(Position::new(5, 5)));
        assert_eq!(sim.step(), StepOutcome::Idle);
    }

    #[test]
    fn wall_collision_far_edges() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(5, 5));
        sim.snake = snake_at(&[(19, 19), (18, 19), (17, 19)], Direction::Right);
        sim.start(Direction::Right);
        assert_eq!(sim.step(), StepOutcome::HitWall);

        sim.reset();
        sim.food = Some(Position::new(5, 5));
        sim.snake = snake_at(&[(19, 19), (19, 18), (19, 17)], Direction::Down);
        sim.start(Direction::Down);
        assert_eq!(sim.step(), StepOutcome::HitWall);
        assert_eq!(sim.snake().head(), Position::new(19, 19));
    }

    #[test]
    fn self_collision() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(0, 0));
        sim.snake = snake_at(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6), (4, 5)],
            Direction::Up,
        );
        sim.start(Direction::Up);
        assert!(sim.request_direction(Direction::Right));
        let snake_before = sim.snake().clone();
        assert_eq!(sim.step(), StepOutcome::HitSelf);
        assert_eq!(sim.status(), Status::GameOver);
        assert_eq!(sim.snake(), &snake_before);
    }

    #[test]
    fn moving_into_tail_cell_is_a_collision() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(0, 0));
        sim.snake = snake_at(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Down);
        sim.start(Direction::Down);
        assert_eq!(sim.step(), StepOutcome::HitSelf);
    }

    #[test]
    fn reset_after_game_over() {
        let mut sim = new_sim();
        sim.food = Some(Position::new(10, 9));
        sim.start(Direction::Up);
        assert_eq!(sim.step(), StepOutcome::Ate);
        sim.request_direction(Direction::Left);
        while !sim.step().ended_game() {}
        assert_eq!(sim.status(), Status::GameOver);
        sim.reset();
        assert_eq!(sim.status(), Status::NotStarted);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.direction(), Direction::Up);
        assert_eq!(
            segments(&sim),
            [
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12)
            ]
        );
        assert!(!sim.snake().contains(sim.food().unwrap()));
    }

    /// A snake filling every cell of the field except `(0, 19)`, winding
    /// back and forth along the rows with its head at `(1, 19)` facing left
    fn almost_full_snake() -> Snake {
        let mut segments = VecDeque::new();
        for y in 0..consts::GRID_SIZE {
            let row: Vec<u16> = if y % 2 == 0 {
                (0..consts::GRID_SIZE).collect()
            } else {
                (0..consts::GRID_SIZE).rev().collect()
            };
            for x in row {
                segments.push_front(Position::new(x, y));
            }
        }
        assert_eq!(segments.pop_front(), Some(Position::new(0, 19)));
        assert_eq!(segments.front(), Some(&Position::new(1, 19)));
        Snake {
            segments,
            direction: Direction::Left,
        }
    }

    #[test]
    fn food_goes_to_last_free_cell() {
        let mut sim = new_sim();
        sim.snake = almost_full_snake();
        for _ in 0..5 {
            assert_eq!(sim.place_food(), Some(Position::new(0, 19)));
        }
    }

    #[test]
    fn board_full_ends_game() {
        let mut sim = new_sim();
        sim.snake = almost_full_snake();
        sim.food = Some(Position::new(0, 19));
        sim.status = Status::Running;
        assert_eq!(sim.step(), StepOutcome::BoardFull);
        assert_eq!(sim.status(), Status::GameOver);
        assert_eq!(sim.food(), None);
        assert_eq!(sim.snake().len(), 400);
        assert_eq!(sim.score(), 10);
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut sim = new_sim();
        let mut driver = ChaCha12Rng::seed_from_u64(42);
        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for _ in 0..20 {
            sim.reset();
            sim.start(Direction::Up);
            loop {
                let d = dirs[driver.random_range(0..dirs.len())];
                sim.request_direction(d);
                let len_before = sim.snake().len();
                let score_before = sim.score();
                let outcome = sim.step();
                match outcome {
                    StepOutcome::Moved => {
                        assert_eq!(sim.snake().len(), len_before);
                        assert_eq!(sim.score(), score_before);
                    }
                    StepOutcome::Ate => {
                        assert_eq!(sim.snake().len(), len_before + 1);
                        assert_eq!(sim.score(), score_before + 10);
                    }
                    StepOutcome::HitWall | StepOutcome::HitSelf => {
                        assert_eq!(sim.snake().len(), len_before);
                        assert_eq!(sim.status(), Status::GameOver);
                        break;
                    }
                    StepOutcome::Idle | StepOutcome::BoardFull => {
                        panic!("unexpected outcome {outcome:?}")
                    }
                }
                assert_unique_segments(&sim);
                let food = sim.food().unwrap();
                assert!(!sim.snake().contains(food));
            }
        }
    }
}
