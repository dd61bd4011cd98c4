use rand::Rng;
use std::fmt;

use super::ops;
use serde::{Deserialize, Serialize};

/// Cell value: 0 for empty, otherwise a power of two (2, 4, 8, ...).
pub type Tile = u32;
/// Accumulated merge score.
pub type Score = u32;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// One N×N grid snapshot with its score and remaining undo budget.
///
/// Cells are stored row-major. A board is a value: moves never mutate it in
/// place at the session level, they clone it and work on the clone, which is
/// what makes the undo history a plain sequence of boards.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub(crate) dim: usize,
    pub(crate) cells: Vec<Tile>,
    pub(crate) score: Score,
    pub(crate) undos_left: usize,
}

impl Board {
    /// Construct an all-empty board. Fails below the 3×3 minimum.
    ///
    /// ```
    /// use twenty48_engine::engine::Board;
    /// let b = Board::empty(4, 3).unwrap();
    /// assert_eq!(b.dimension(), 4);
    /// assert!(b.tiles().all(|v| v == 0));
    /// assert!(Board::empty(2, 3).is_err());
    /// ```
    pub fn empty(dimension: usize, undo_budget: usize) -> crate::Result<Self> {
        if dimension < 3 {
            return Err(crate::Error::DimensionTooSmall { dimension });
        }
        Ok(Board {
            dim: dimension,
            cells: vec![0; dimension * dimension],
            score: 0,
            undos_left: undo_budget,
        })
    }

    /// Side length of the grid.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Score accumulated by merges up to this snapshot.
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Undo operations still usable from this snapshot onward.
    #[inline]
    pub fn undos_left(&self) -> usize {
        self.undos_left
    }

    /// Bounds-checked cell read: `None` out of range, `Some(0)` for an
    /// in-range empty cell.
    ///
    /// ```
    /// use twenty48_engine::engine::Board;
    /// let b = Board::empty(4, 0).unwrap();
    /// assert_eq!(b.get(0, 0), Some(0));
    /// assert_eq!(b.get(4, 0), None);
    /// ```
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.dim && col < self.dim {
            Some(self.cells[row * self.dim + col])
        } else {
            None
        }
    }

    /// Bounds-checked cell write; out of range is a no-op reporting `false`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Tile) -> bool {
        if row < self.dim && col < self.dim {
            self.cells[row * self.dim + col] = value;
            true
        } else {
            false
        }
    }

    /// Write a 2 (90%) or 4 (10%) into a uniformly chosen empty cell, using
    /// the provided RNG. Returns `false` when the board is full.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48_engine::engine::{count_empty, Board};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let mut b = Board::empty(4, 0).unwrap();
    /// assert!(b.add_random_tile(&mut rng));
    /// assert!(b.add_random_tile(&mut rng));
    /// assert_eq!(count_empty(&b), 14);
    /// ```
    pub fn add_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let empties: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &value)| value == 0)
            .map(|(idx, _)| idx)
            .collect();
        if empties.is_empty() {
            return false;
        }
        let idx = empties[rng.gen_range(0..empties.len())];
        self.cells[idx] = ops::generate_random_tile(rng);
        true
    }

    /// True while any move could still change the board: an empty cell
    /// exists, or some cell equals its neighbor to the right or below.
    ///
    /// ```
    /// use twenty48_engine::engine::Board;
    /// let b = Board::empty(3, 0).unwrap();
    /// assert!(b.can_move());
    /// ```
    #[inline]
    pub fn can_move(&self) -> bool {
        ops::can_move(self)
    }

    /// True when both boards have the same dimension and identical cells.
    /// Score and undo budget are not compared; this is the move no-op check.
    pub fn same_cells(&self, other: &Board) -> bool {
        self.dim == other.dim && self.cells == other.cells
    }

    /// Iterate over cell values in row-major order.
    #[inline]
    pub fn tiles(&self) -> std::iter::Copied<std::slice::Iter<'_, Tile>> {
        self.cells.iter().copied()
    }

    /// Iterate over the grid one row slice at a time.
    #[inline]
    pub fn rows(&self) -> std::slice::Chunks<'_, Tile> {
        self.cells.chunks(self.dim)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board({dim}x{dim}, score={score}, undos={undos})",
            dim = self.dim,
            score = self.score,
            undos = self.undos_left
        )
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for (col, &value) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                if value == 0 {
                    write!(f, "[    ]")?;
                } else {
                    write!(f, "[{value:4}]")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = Tile;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Tile>>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
