use crate::game::Game;
use crate::home::HomeScreen;
use crate::util::Globals;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        App {
            screen: Screen::Home(HomeScreen::new(globals)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        tracing::info!("quitting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Home(ref home) => {
                terminal.draw(|frame| home.draw(frame))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Home(ref mut home) => home.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            tracing::debug!(screen = screen.name(), "switching screens");
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

/// The screen currently being shown, each holding its own state
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Home(HomeScreen),
    Game(Game),
    Quit,
}

impl Screen {
    fn name(&self) -> &'static str {
        match self {
            Screen::Home(_) => "home",
            Screen::Game(_) => "game",
            Screen::Quit => "quit",
        }
    }
}
