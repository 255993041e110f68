//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Width & height of the (square) playing field, in grid cells
pub(crate) const GRID_SIZE: u16 = 20;

/// Number of terminal columns used to draw a single grid cell.  Terminal
/// cells are roughly twice as tall as they are wide, so this keeps the board
/// square on screen.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Where the snake's segments are placed at the start of a game, as `(x, y)`
/// pairs, head first
pub(crate) const INITIAL_SNAKE: [(u16, u16); 3] = [(10, 10), (10, 11), (10, 12)];

/// Points awarded for each piece of food eaten
pub(crate) const FOOD_VALUE: u32 = 10;

/// How many random cells to try when placing food before falling back to a
/// scan of every free cell
pub(crate) const MAX_FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Shortest allowed time between snake movements, in milliseconds
pub(crate) const MIN_PERIOD_MS: u16 = 50;

/// Longest allowed time between snake movements, in milliseconds
pub(crate) const MAX_PERIOD_MS: u16 = 500;

/// Granularity of speed adjustments, in milliseconds
pub(crate) const PERIOD_STEP_MS: u16 = 50;

/// Time between snake movements when nothing else is configured
pub(crate) const DEFAULT_PERIOD_MS: u16 = 150;

/// The speed slider shows `SLIDER_MAX - period`, so faster games have higher
/// slider values.
pub(crate) const SLIDER_MAX: u16 = MAX_PERIOD_MS + MIN_PERIOD_MS;

/// Glyphs for one snake segment
pub(crate) const SNAKE_SYMBOL: &str = "██";

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: &str = "●";

/// Glyph for a filled notch of the speed gauge
pub(crate) const GAUGE_FILLED_SYMBOL: char = '■';

/// Glyph for an empty notch of the speed gauge
pub(crate) const GAUGE_EMPTY_SYMBOL: char = '□';

/// Style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new().fg(Color::LightGreen);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the snake's head after it has crashed
pub(crate) const COLLISION_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style applied to the board underneath an overlay message
pub(crate) const DIM_STYLE: Style = Style::new().add_modifier(Modifier::DIM);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the "new high score" announcement
pub(crate) const HIGH_SCORE_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);
