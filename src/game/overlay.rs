use crate::consts;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A message box drawn over the board whenever the snake isn't moving
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Overlay {
    /// Waiting for the first arrow key
    Start,
    Paused,
    GameOver {
        score: u32,
        /// Whether `score` beat the previous high score
        new_high_score: bool,
    },
}

impl Overlay {
    /// Outer width of the message box
    pub(super) const WIDTH: u16 = 38;

    fn title(self) -> &'static str {
        match self {
            Overlay::Start => " READY ",
            Overlay::Paused => " PAUSED ",
            Overlay::GameOver { .. } => " GAME OVER ",
        }
    }

    fn lines(self) -> Vec<Line<'static>> {
        match self {
            Overlay::Start => vec![Line::from_iter([
                Span::raw("Press an "),
                Span::styled("arrow key", consts::KEY_STYLE),
                Span::raw(" to start"),
            ])],
            Overlay::Paused => vec![Line::from_iter([
                Span::raw("Press "),
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(" to resume"),
            ])],
            Overlay::GameOver {
                score,
                new_high_score,
            } => {
                let mut lines = vec![Line::from(format!("Score: {score}"))];
                if new_high_score {
                    lines.push(Line::from(Span::styled(
                        "New high score!",
                        consts::HIGH_SCORE_STYLE,
                    )));
                }
                lines.push(Line::default());
                lines.push(Line::from_iter([
                    Span::raw("Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") | Home ("),
                    Span::styled("m", consts::KEY_STYLE),
                    Span::raw(") | Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ]));
                lines
            }
        }
    }
}

impl Widget for Overlay {
    /// Dims everything in `area` and draws the message box in its center:
    ///
    /// ```text
    /// ┌────────────── PAUSED ──────────────┐
    /// │                                    │
    /// │       Press Space to resume        │
    /// │                                    │
    /// └────────────────────────────────────┘
    /// ```
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, consts::DIM_STYLE);
        let lines = self.lines();
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let box_area = center_rect(
            area,
            Size {
                width: Self::WIDTH,
                height,
            },
        );
        Clear.render(box_area, buf);
        let block = Block::bordered()
            .title(self.title())
            .title_alignment(Alignment::Center)
            .padding(Padding::symmetric(1, 1))
            .style(Style::reset());
        let inner = block.inner(box_area);
        block.render(box_area, buf);
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.centered().render(row, buf);
        }
    }
}
