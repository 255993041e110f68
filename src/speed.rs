use crate::consts::{
    DEFAULT_PERIOD_MS, GAUGE_EMPTY_SYMBOL, GAUGE_FILLED_SYMBOL, MAX_PERIOD_MS, MIN_PERIOD_MS,
    PERIOD_STEP_MS, SLIDER_MAX,
};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// How quickly the snake moves, stored as the time between movements in
/// milliseconds.  Always a multiple of [`PERIOD_STEP_MS`] between
/// [`MIN_PERIOD_MS`] and [`MAX_PERIOD_MS`], inclusive.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[serde(try_from = "u16")]
pub(crate) struct Speed(u16);

impl Speed {
    /// The number of distinct speeds
    pub(crate) const LEVELS: u16 = (MAX_PERIOD_MS - MIN_PERIOD_MS) / PERIOD_STEP_MS + 1;

    pub(crate) const FASTEST: Speed = Speed(MIN_PERIOD_MS);
    pub(crate) const SLOWEST: Speed = Speed(MAX_PERIOD_MS);

    pub(crate) fn from_period_ms(ms: u16) -> Result<Speed, SpeedError> {
        if !(MIN_PERIOD_MS..=MAX_PERIOD_MS).contains(&ms) {
            Err(SpeedError::OutOfRange(ms))
        } else if ms % PERIOD_STEP_MS != 0 {
            Err(SpeedError::Step(ms))
        } else {
            Ok(Speed(ms))
        }
    }

    /// Construct from the value of an inverted speed slider, on which higher
    /// values mean faster movement
    pub(crate) fn from_slider_value(value: u16) -> Result<Speed, SpeedError> {
        Speed::from_period_ms(SLIDER_MAX.saturating_sub(value))
    }

    pub(crate) fn period_ms(self) -> u16 {
        self.0
    }

    pub(crate) fn period(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    pub(crate) fn slider_value(self) -> u16 {
        SLIDER_MAX - self.0
    }

    /// Speed as a number from 1 (slowest) to [`Speed::LEVELS`] (fastest)
    pub(crate) fn level(self) -> u16 {
        (self.slider_value() - MIN_PERIOD_MS) / PERIOD_STEP_MS + 1
    }

    pub(crate) fn can_go_faster(self) -> bool {
        self > Self::FASTEST
    }

    pub(crate) fn can_go_slower(self) -> bool {
        self < Self::SLOWEST
    }

    /// Move the slider one notch towards faster, stopping at the end
    pub(crate) fn faster(self) -> Speed {
        Speed::from_slider_value(self.slider_value() + PERIOD_STEP_MS).unwrap_or(self)
    }

    /// Move the slider one notch towards slower, stopping at the end
    pub(crate) fn slower(self) -> Speed {
        Speed::from_slider_value(self.slider_value().saturating_sub(PERIOD_STEP_MS))
            .unwrap_or(self)
    }

    /// Render as a row of [`Speed::LEVELS`] notches, one filled per level
    pub(crate) fn gauge(self) -> String {
        let level = usize::from(self.level());
        let mut s = String::with_capacity(usize::from(Self::LEVELS) * 3);
        s.extend(std::iter::repeat_n(GAUGE_FILLED_SYMBOL, level));
        s.extend(std::iter::repeat_n(
            GAUGE_EMPTY_SYMBOL,
            usize::from(Self::LEVELS) - level,
        ));
        s
    }
}

impl Default for Speed {
    fn default() -> Speed {
        Speed(DEFAULT_PERIOD_MS)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}/{}", self.level(), Self::LEVELS))
    }
}

impl TryFrom<u16> for Speed {
    type Error = SpeedError;

    fn try_from(ms: u16) -> Result<Speed, SpeedError> {
        Speed::from_period_ms(ms)
    }
}

impl FromStr for Speed {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Speed, SpeedError> {
        let ms = s
            .trim()
            .parse::<u16>()
            .map_err(|_| SpeedError::Parse(s.to_owned()))?;
        Speed::from_period_ms(ms)
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub(crate) enum SpeedError {
    #[error("tick period must be between {MIN_PERIOD_MS} and {MAX_PERIOD_MS} ms; got {0}")]
    OutOfRange(u16),
    #[error("tick period must be a multiple of {PERIOD_STEP_MS} ms; got {0}")]
    Step(u16),
    #[error("invalid tick period: {0:?}")]
    Parse(String),
}
