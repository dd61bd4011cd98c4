//! Engine module: N×N board state, slide/merge/rotation ops, and the
//! bounded-undo game session. Public API stays small and ergonomic.
//!
//! - `Board` is one grid snapshot with useful methods.
//! - `Game` owns the live board, its retained history, and the RNG.
//! - Free functions mirror the methods when convenient (e.g., `shift`).

mod history;
mod ops;
pub mod state;

pub use history::{Game, StepResult};
pub use state::{Board, Move};

pub use ops::{
    can_move, count_empty, merge_right, reverse_cols, reverse_rows, rotate180, rotate270,
    rotate90, shift, slide_right, transpose,
};
