mod direction;
mod overlay;
mod simulation;
mod snake;
mod ticker;
use self::direction::Direction;
use self::overlay::Overlay;
use self::simulation::{Simulation, Status, StepOutcome};
use self::ticker::Ticker;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::home::HomeScreen;
use crate::speed::Speed;
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::{rngs::ThreadRng, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The game screen: a [`Simulation`] plus the timer that drives it and the
/// input handling & rendering around it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = ThreadRng> {
    sim: Simulation<R>,
    ticker: Ticker,
    globals: Globals,
    /// Whether the run that just ended set a new high score
    new_high_score: bool,
    /// Whether the run ended by running into something (as opposed to
    /// filling the board)
    crashed: bool,
}

impl Game<ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        Game {
            sim: Simulation::new(rng),
            ticker: Ticker::new(globals.speed.period()),
            globals,
            new_high_score: false,
            crashed: false,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        self.sync_ticker(Instant::now());
        match self.ticker.remaining(Instant::now()) {
            Some(wait) => {
                if wait.is_zero() || !poll(wait)? {
                    let now = Instant::now();
                    if self.ticker.fire(now) {
                        self.tick(now);
                    }
                    Ok(None)
                } else {
                    Ok(self.handle_event(read()?, Instant::now()))
                }
            }
            None => Ok(self.handle_event(read()?, Instant::now())),
        }
    }

    /// Advance the simulation by one step in response to the ticker firing
    fn tick(&mut self, now: Instant) {
        let outcome = self.sim.step();
        if outcome == StepOutcome::Ate {
            tracing::debug!(score = self.sim.score(), "ate food");
        } else if outcome.ended_game() {
            let score = self.sim.score();
            tracing::info!(?outcome, score, length = self.sim.snake().len(), "game over");
            self.crashed = outcome != StepOutcome::BoardFull;
            self.new_high_score = self.globals.record_score(score);
        }
        self.sync_ticker(now);
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> Option<Screen> {
        let screen = self.dispatch(event, now);
        self.sync_ticker(now);
        screen
    }

    fn dispatch(&mut self, event: Event, now: Instant) -> Option<Screen> {
        if event == Event::FocusLost {
            if self.sim.status() == Status::Running {
                self.sim.toggle_pause();
            }
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match cmd {
            Command::Quit => return Some(Screen::Quit),
            Command::Faster => self.set_speed(self.globals.speed.faster(), now),
            Command::Slower => self.set_speed(self.globals.speed.slower(), now),
            _ => (),
        }
        match (self.sim.status(), direction_for(cmd), cmd) {
            (Status::NotStarted, Some(d), _) => {
                self.sim.start(Direction::Up);
                self.sim.request_direction(d);
                tracing::info!(
                    period_ms = self.globals.speed.period_ms(),
                    direction = ?self.sim.direction(),
                    "game started"
                );
            }
            (Status::Running, Some(d), _) => {
                self.sim.request_direction(d);
            }
            (Status::Running | Status::Paused, _, Command::Space) => self.sim.toggle_pause(),
            (Status::GameOver, _, Command::R | Command::Enter) => self.restart(),
            (Status::GameOver, _, Command::Q) => return Some(Screen::Quit),
            (Status::GameOver, _, Command::M) | (_, _, Command::Esc) => {
                return Some(Screen::Home(HomeScreen::new(self.globals.clone())));
            }
            _ => (),
        }
        None
    }

    fn restart(&mut self) {
        tracing::debug!("restarting game");
        self.sim.reset();
        self.new_high_score = false;
        self.crashed = false;
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Make sure a tick is scheduled if & only if the snake is moving
    fn sync_ticker(&mut self, now: Instant) {
        if self.sim.status() == Status::Running {
            self.ticker.arm(now);
        } else if self.ticker.is_armed() {
            tracing::trace!(status = ?self.sim.status(), "cancelling tick");
            self.ticker.cancel();
        }
    }

    fn set_speed(&mut self, speed: Speed, now: Instant) {
        if speed != self.globals.speed {
            self.globals.speed = speed;
            self.ticker.set_period(speed.period(), now);
            tracing::info!(%speed, period = ?self.ticker.period(), "speed changed");
        }
    }

    fn overlay(&self) -> Option<Overlay> {
        match self.sim.status() {
            Status::NotStarted => Some(Overlay::Start),
            Status::Running => None,
            Status::Paused => Some(Overlay::Paused),
            Status::GameOver => Some(Overlay::GameOver {
                score: self.sim.score(),
                new_high_score: self.new_high_score,
            }),
        }
    }
}

fn direction_for(cmd: Command) -> Option<Direction> {
    match cmd {
        Command::Up => Some(Direction::Up),
        Command::Down => Some(Direction::Down),
        Command::Left => Some(Direction::Left),
        Command::Right => Some(Direction::Right),
        _ => None,
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {} │ High Score: {} │ Speed: {}",
                self.sim.score(),
                self.globals.high_score,
                self.globals.speed.gauge()
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let bounds = self.sim.bounds();
        let board_size = Size {
            width: bounds
                .width
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: bounds.height.saturating_add(2),
        };
        let board_area = center_rect(board_area, board_size);
        Block::bordered().render(board_area, buf);

        let mut field = Canvas {
            area: board_area.inner(Margin::new(1, 1)),
            buf,
        };
        if let Some(food) = self.sim.food() {
            field.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        let snake = self.sim.snake();
        for &p in snake.segments().iter().skip(1) {
            field.draw_cell(p, consts::SNAKE_SYMBOL, consts::SNAKE_STYLE);
        }
        let head_style = if self.crashed {
            consts::COLLISION_STYLE
        } else {
            consts::SNAKE_HEAD_STYLE
        };
        field.draw_cell(snake.head(), consts::SNAKE_SYMBOL, head_style);

        if let Some(overlay) = self.overlay() {
            overlay.render(board_area, buf);
        }

        if self.sim.status() != Status::GameOver {
            Line::from_iter([
                Span::raw(" "),
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(" pause   "),
                Span::styled("+", consts::KEY_STYLE),
                Span::raw("/"),
                Span::styled("-", consts::KEY_STYLE),
                Span::raw(" speed   "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(" home"),
            ])
            .render(hint_area, buf);
        }
    }
}

/// The playing field inside the board's border.  Each grid cell is
/// [`consts::CELL_WIDTH`] terminal columns wide.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for (x, ch) in (x..).zip(symbol.chars()) {
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}
