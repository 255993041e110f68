use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::speed::Speed;
use crate::util::{get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::Widget,
    Frame,
};

/// The landing page shown at startup and between games
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HomeScreen {
    selection: Selection,
    globals: Globals,
}

impl HomeScreen {
    pub(crate) fn new(globals: Globals) -> HomeScreen {
        HomeScreen {
            selection: Selection::default(),
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit | Command::Q) | (Selection::Quit, Command::Enter) => {
                return Some(Screen::Quit)
            }
            (_, Command::P) | (Selection::Play, Command::Enter) => {
                return Some(Screen::Game(Game::new(self.globals.clone())))
            }
            (Selection::Speed, Command::Left) | (_, Command::Slower) => {
                self.set_speed(self.globals.speed.slower());
            }
            (Selection::Speed, Command::Right) | (_, Command::Faster) => {
                self.set_speed(self.globals.speed.faster());
            }
            (_, Command::Home) => self.selection = Selection::min(),
            (_, Command::End) => self.selection = Selection::max(),
            (sel, Command::Up) => self.selection = sel.prev().unwrap_or(sel),
            (sel, Command::Down) => self.selection = sel.next().unwrap_or(sel),
            (sel, Command::Prev) => self.selection = sel.prev().unwrap_or_else(Selection::max),
            (sel, Command::Next) => self.selection = sel.next().unwrap_or_else(Selection::min),
            _ => (),
        }
        None
    }

    fn set_speed(&mut self, speed: Speed) {
        if speed != self.globals.speed {
            tracing::debug!(%speed, "speed selected");
            self.globals.speed = speed;
        }
    }

    fn selection_style(&self, sel: Selection) -> Style {
        if self.selection == sel {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        }
    }
}

impl Widget for &HomeScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, high_score_area, play_area, speed_area, quit_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        Line::from_iter([
            Span::raw("High Score: "),
            Span::styled(
                self.globals.high_score.to_string(),
                consts::HIGH_SCORE_STYLE,
            ),
        ])
        .centered()
        .render(high_score_area, buf);

        let play_style = self.selection_style(Selection::Play);
        Line::from_iter([
            Span::styled("[Play (", play_style),
            Span::styled("p", consts::KEY_STYLE.patch(play_style)),
            Span::styled(")]", play_style),
        ])
        .centered()
        .render(play_area, buf);

        let speed = self.globals.speed;
        let speed_style = self.selection_style(Selection::Speed);
        Line::from_iter([
            Span::styled("Speed: ", speed_style),
            Span::styled(
                if speed.can_go_slower() { "◀ " } else { "◁ " },
                speed_style,
            ),
            Span::styled(speed.to_string(), speed_style),
            Span::styled(
                if speed.can_go_faster() { " ▶" } else { " ▷" },
                speed_style,
            ),
        ])
        .centered()
        .render(speed_area, buf);

        let quit_style = self.selection_style(Selection::Quit);
        Line::from_iter([
            Span::styled("[Quit (", quit_style),
            Span::styled("q", consts::KEY_STYLE.patch(quit_style)),
            Span::styled(")]", quit_style),
        ])
        .centered()
        .render(quit_area, buf);
    }
}

/// The focusable items on the landing page, top to bottom
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum Selection {
    #[default]
    Play,
    Speed,
    Quit,
}

/// The game's name in big letters above a little snake chasing its food
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Logo;

impl Logo {
    const TEXT_HEIGHT: u16 = 5;
    const BODY_WIDTH: u16 = 4 * consts::CELL_WIDTH;
    const SNAKE_FOOD_GUTTER: u16 = 3;
    const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    const WIDTH: u16 = 28;

    #[rustfmt::skip]
    const TEXT: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        Text::from_iter(Self::TEXT)
            .style(consts::SNAKE_STYLE)
            .render(words_area, buf);
        let [body_area, head_area, _, food_area] = Layout::horizontal([
            Self::BODY_WIDTH,
            consts::CELL_WIDTH,
            Self::SNAKE_FOOD_GUTTER,
            1,
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        paint(buf, body_area, consts::SNAKE_SYMBOL, consts::SNAKE_STYLE);
        paint(buf, head_area, consts::SNAKE_SYMBOL, consts::SNAKE_HEAD_STYLE);
        paint(buf, food_area, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
    }
}

/// Fill `area` with repetitions of `symbol`
fn paint(buf: &mut Buffer, area: Rect, symbol: &str, style: Style) {
    for (p, ch) in area.positions().zip(symbol.chars().cycle()) {
        if let Some(cell) = buf.cell_mut(p) {
            cell.set_char(ch);
            cell.set_style(style);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Instructions;

impl Instructions {
    const HEIGHT: u16 = 4;
    const WIDTH: u16 = 28;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from_iter([
                Span::raw("Move the snake with: "),
                Span::styled("←", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↓", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↑", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("→", consts::KEY_STYLE),
            ]),
            Line::from_iter([
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(" pauses, "),
                Span::styled("+", consts::KEY_STYLE),
                Span::raw("/"),
                Span::styled("-", consts::KEY_STYLE),
                Span::raw(" sets speed"),
            ]),
            Line::from("Eat the food, but don't hit"),
            Line::from("the walls or yourself!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
