mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod home;
mod logging;
mod speed;
mod util;
use crate::app::App;
use crate::config::{Config, ConfigError};
use crate::speed::Speed;
use crate::util::Globals;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: gridsnake [<options>]

Play Snake on a 20x20 grid in the terminal

Options:
  -c, --config <path>   Read configuration from the given file
  -s, --speed <ms>      Time between snake movements, in milliseconds
                        (50 to 500, in steps of 50)
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

/// Command-line arguments
#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run {
        config: Option<PathBuf>,
        speed: Option<Speed>,
    },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        let mut speed = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('s') | Arg::Long("speed") => {
                    speed = Some(parser.value()?.parse::<Speed>()?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config, speed })
    }

    fn run(self) -> ExitCode {
        match self {
            Arguments::Run { config, speed } => {
                let globals = match setup(config, speed) {
                    Ok(globals) => globals,
                    Err(e) => {
                        eprintln!("gridsnake: {e:?}");
                        return ExitCode::from(2);
                    }
                };
                let terminal = ratatui::init();
                let r = App::new(globals).run(terminal);
                ratatui::restore();
                io_exit(r)
            }
            Arguments::Help => {
                print!("{USAGE}");
                ExitCode::SUCCESS
            }
            Arguments::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(Parser::from_env()) {
        Ok(args) => args.run(),
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage");
            ExitCode::from(2)
        }
    }
}

/// Load the configuration, start logging if configured, and build the
/// session state the screens share
fn setup(config_path: Option<PathBuf>, speed: Option<Speed>) -> anyhow::Result<Globals> {
    let (config, path) = match config_path {
        Some(path) => (Config::load(&path, false)?, Some(path)),
        None => match Config::default_path() {
            Ok(path) => (Config::load(&path, true)?, Some(path)),
            Err(ConfigError::NoPath) => (Config::default(), None),
            Err(e) => return Err(e.into()),
        },
    };
    if let Some(ref log_file) = config.files.log_file {
        logging::init(log_file)
            .with_context(|| format!("failed to set up logging to {}", log_file.display()))?;
    }
    tracing::info!(config = ?path, "loaded configuration");
    let speed = speed.unwrap_or(config.game.speed);
    let store = config.high_score_store();
    let globals = Globals::new(speed, store);
    tracing::info!(%speed, high_score = globals.high_score, "starting");
    Ok(globals)
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}
