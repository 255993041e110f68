use crate::consts;
use crate::highscore::HighScoreFile;
use crate::speed::Speed;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::path::PathBuf;

/// Session-wide state shared by all screens
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Globals {
    /// Current tick period; adjustable from the home screen and during play
    pub(crate) speed: Speed,

    /// The best score seen so far.  Read from `store` once at startup and
    /// kept up to date afterwards.
    pub(crate) high_score: u32,

    /// Where the high score is persisted
    pub(crate) store: HighScoreFile,
}

impl Globals {
    pub(crate) fn new(speed: Speed, store: HighScoreFile) -> Globals {
        let high_score = store.get().unwrap_or_default();
        Globals {
            speed,
            high_score,
            store,
        }
    }

    /// Record the final score of a completed run.  Returns `true` if it beat
    /// the previous high score, in which case the new value is also written
    /// to the store.
    pub(crate) fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            tracing::info!(score, previous = self.high_score, "new high score");
            self.high_score = score;
            self.store.set(score);
            true
        } else {
            false
        }
    }
}

impl Default for Globals {
    fn default() -> Globals {
        Globals {
            speed: Speed::default(),
            high_score: 0,
            store: HighScoreFile::disabled(),
        }
    }
}

pub(crate) trait EnumExt: Enum {
    fn min() -> Self;
    fn max() -> Self;
    fn next(self) -> Option<Self>;
    fn prev(self) -> Option<Self>;
}

impl<T: Enum> EnumExt for T {
    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

/// Return a `Rect` of the given size centered within `area`.  If `area` is
/// too small, the result is clipped to it.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Default location of the file in which the high score is stored
pub(crate) fn high_score_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("gridsnake").join("highscore.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Abc {
        A,
        B,
        C,
    }

    #[test]
    fn enum_ext() {
        assert_eq!(Abc::min(), Abc::A);
        assert_eq!(Abc::max(), Abc::C);
        assert_eq!(Abc::A.next(), Some(Abc::B));
        assert_eq!(Abc::C.next(), None);
        assert_eq!(Abc::B.prev(), Some(Abc::A));
        assert_eq!(Abc::A.prev(), None);
    }

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(42, 22), Rect::new(19, 1, 42, 22))]
    #[case(Rect::new(0, 0, 100, 30), Size::new(80, 24), Rect::new(10, 3, 80, 24))]
    #[case(Rect::new(5, 5, 10, 4), Size::new(10, 4), Rect::new(5, 5, 10, 4))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }

    #[test]
    fn record_score() {
        let mut globals = Globals {
            high_score: 20,
            ..Globals::default()
        };
        assert!(!globals.record_score(10));
        assert_eq!(globals.high_score, 20);
        assert!(!globals.record_score(20));
        assert_eq!(globals.high_score, 20);
        assert!(globals.record_score(30));
        assert_eq!(globals.high_score, 30);
    }
}
