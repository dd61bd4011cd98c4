//! Full-frame terminal drawing.
//!
//! Every frame is a repaint from the top-left: header box, grid, then
//! whatever overlay the current interaction calls for. The board is small
//! enough that diffing against the previous frame buys nothing.

use std::io::{self, BufWriter, Stdout, Write};
use std::sync::OnceLock;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, PrintStyledContent, ResetColor, Stylize},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use twenty48_engine::engine::state::{Score, Tile};
use twenty48_engine::engine::Board;

const CELL_W: usize = 7;
const CELL_H: usize = 3;

const HELP_LINES: [&str; 9] = [
    "╭╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╮",
    "╎ Choose slide direction with:  ╎",
    "╎                               ╎",
    "╎               w        ↑      ╎",
    "╎  h j k l,   a s d,   ← ↓ →.   ╎",
    "╰╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╯",
    "╭╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╮",
    "╎ Undo with:     u, z, space.   ╎",
    "╰╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╌╯",
];

/// Extra content drawn under the grid for the current frame.
pub enum Overlay {
    None,
    /// Key reference shown until the first keypress.
    Help,
    UnknownKey(char),
    GameOver { can_undo: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileStyle {
    Plain,
    /// Reverse video with the given foreground; reads as a solid block in
    /// the terminal's dim palette.
    Reverse(Color),
    /// Bright background fill for the high tiles.
    Solid(Color),
}

/// Owns stdout and the terminal modes for the lifetime of the session.
///
/// `init` switches to the alternate screen in raw mode; `restore` (also run
/// on drop) puts the terminal back even when the app unwinds early.
pub struct Renderer {
    out: BufWriter<Stdout>,
    active: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            out: BufWriter::with_capacity(16 * 1024, io::stdout()),
            active: false,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        ramp();
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide)?;
        self.active = true;
        Ok(())
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    pub fn draw(&mut self, board: &Board, overlay: &Overlay) -> io::Result<()> {
        let dim = board.dimension();
        queue!(self.out, Clear(ClearType::All))?;

        let mut row: u16 = 1;
        self.line(&mut row, "╭───────────────────────────────╮")?;
        self.line(&mut row, &score_line(board.score(), board.undos_left()))?;
        self.line(&mut row, "╰───────────────────────────────╯")?;

        for i in 0..=dim {
            self.line(&mut row, &border_line(i, dim))?;
            if i == dim {
                break;
            }
            for text_row in 0..CELL_H {
                queue!(self.out, MoveTo(0, row))?;
                for j in 0..dim {
                    queue!(self.out, Print("│"))?;
                    let value = board.get(i, j).unwrap_or(0);
                    let field = tile_field(value, text_row);
                    match style_for(value) {
                        TileStyle::Plain => queue!(self.out, Print(field))?,
                        TileStyle::Reverse(color) => {
                            queue!(self.out, PrintStyledContent(field.with(color).reverse()))?
                        }
                        TileStyle::Solid(color) => {
                            queue!(self.out, PrintStyledContent(field.on(color)))?
                        }
                    }
                }
                queue!(self.out, Print("│"))?;
                row += 1;
            }
        }

        match overlay {
            Overlay::None => {}
            Overlay::Help => {
                for text in HELP_LINES {
                    self.line(&mut row, text)?;
                }
            }
            Overlay::UnknownKey(ch) => {
                row += 1;
                self.line(&mut row, &format!("unknown key '{ch}'"))?;
            }
            Overlay::GameOver { can_undo } => {
                row += 1;
                let prompt = if *can_undo {
                    "Game Over! Press 'q' to quit or 'u/z/space' to undo."
                } else {
                    "Game Over! Press 'q' to quit."
                };
                self.line(&mut row, prompt)?;
            }
        }

        self.out.flush()
    }

    fn line(&mut self, row: &mut u16, text: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(0, *row), Print(text))?;
        *row += 1;
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn score_line(score: Score, undos_left: usize) -> String {
    if undos_left != 0 {
        format!("│ Score: {score:<10}  Undos: {undos_left:<3} │")
    } else {
        format!("│ Score: {score:<10}             │")
    }
}

/// Horizontal rule `i` of a `dim`-row grid, junction glyphs included.
fn border_line(i: usize, dim: usize) -> String {
    let mut line = String::new();
    for j in 0..=dim {
        let glyph = if i == 0 && j == 0 {
            '╭'
        } else if i == 0 && j == dim {
            '╮'
        } else if i == dim && j == 0 {
            '╰'
        } else if i == dim && j == dim {
            '╯'
        } else if i == 0 {
            '┬'
        } else if i == dim {
            '┴'
        } else if j == 0 {
            '├'
        } else if j == dim {
            '┤'
        } else {
            '┼'
        };
        line.push(glyph);
        if j < dim {
            for _ in 0..CELL_W {
                line.push('─');
            }
        }
    }
    line
}

/// One `CELL_W`-wide slice of a tile: the value centered on the middle
/// text row, blank elsewhere.
fn tile_field(value: Tile, text_row: usize) -> String {
    if text_row == CELL_H / 2 && value != 0 {
        format!("{value:^CELL_W$}")
    } else {
        " ".repeat(CELL_W)
    }
}

const RAMP_LEN: usize = 14;

static RAMP: OnceLock<[TileStyle; RAMP_LEN]> = OnceLock::new();

/// The color ramp, indexed by tile exponent, built once per process.
/// `Renderer::init` forces it before the first paint.
fn ramp() -> &'static [TileStyle; RAMP_LEN] {
    RAMP.get_or_init(|| {
        let low = [
            Color::Black,
            Color::Grey,
            Color::DarkRed,
            Color::DarkYellow,
            Color::DarkGreen,
            Color::DarkCyan,
            Color::DarkBlue,
            Color::DarkMagenta,
        ];
        let high = [
            Color::Red,
            Color::Yellow,
            Color::Green,
            Color::Cyan,
            Color::Blue,
            Color::Magenta,
        ];
        let mut steps = [TileStyle::Plain; RAMP_LEN];
        for (k, color) in low.into_iter().enumerate() {
            steps[k] = TileStyle::Reverse(color);
        }
        for (k, color) in high.into_iter().enumerate() {
            steps[low.len() + k] = TileStyle::Solid(color);
        }
        steps
    })
}

fn style_for(value: Tile) -> TileStyle {
    if value == 0 {
        return TileStyle::Plain;
    }
    if value.is_power_of_two() {
        let exponent = value.trailing_zeros() as usize;
        if exponent < RAMP_LEN {
            return ramp()[exponent];
        }
    }
    TileStyle::Solid(Color::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_lines_pick_the_right_junctions() {
        assert_eq!(border_line(0, 3), "╭───────┬───────┬───────╮");
        assert_eq!(border_line(1, 3), "├───────┼───────┼───────┤");
        assert_eq!(border_line(3, 3), "╰───────┴───────┴───────╯");
    }

    #[test]
    fn border_lines_scale_with_dimension() {
        for dim in 3..=8 {
            for i in [0, 1, dim] {
                let expected = dim + 1 + dim * CELL_W;
                assert_eq!(border_line(i, dim).chars().count(), expected);
            }
        }
    }

    #[test]
    fn score_line_is_a_fixed_width_banner() {
        let with_undos = score_line(1024, 3);
        assert_eq!(with_undos.chars().count(), 33);
        assert!(with_undos.contains("Score: 1024"));
        assert!(with_undos.contains("Undos: 3"));

        let exhausted = score_line(1024, 0);
        assert_eq!(exhausted.chars().count(), 33);
        assert!(!exhausted.contains("Undos"));
    }

    #[test]
    fn tile_values_center_on_the_middle_row() {
        assert_eq!(tile_field(16, 1), "  16   ");
        assert_eq!(tile_field(2, 1), "   2   ");
        assert_eq!(tile_field(131072, 1), "131072 ");
        assert_eq!(tile_field(16, 0), "       ");
        assert_eq!(tile_field(16, 2), "       ");
        assert_eq!(tile_field(0, 1), "       ");
    }

    #[test]
    fn styles_climb_the_ramp() {
        assert_eq!(style_for(0), TileStyle::Plain);
        assert_eq!(style_for(2), TileStyle::Reverse(Color::Grey));
        assert_eq!(style_for(128), TileStyle::Reverse(Color::DarkMagenta));
        assert_eq!(style_for(256), TileStyle::Solid(Color::Red));
        assert_eq!(style_for(8192), TileStyle::Solid(Color::Magenta));
        assert_eq!(style_for(16384), TileStyle::Solid(Color::White));
        assert_eq!(style_for(65536), TileStyle::Solid(Color::White));
    }
}
