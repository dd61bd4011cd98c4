//! twenty48-engine: the rule engine of an N×N sliding-tile merge puzzle.
//!
//! This crate provides:
//! - A `Board` type: one grid snapshot with its score and undo budget
//! - Slide/merge/rotation ops (`engine` module free functions)
//! - A `Game` session owning the live board, bounded undo history, and RNG
//!
//! Quick start:
//! ```
//! use twenty48_engine::engine::{Game, Move};
//!
//! // Deterministic session with a seeded RNG
//! let mut game = Game::with_seed(4, 3, 42).unwrap();
//! let result = game.step(Move::Left);
//! if result.changed {
//!     assert!(game.score() >= result.delta);
//! }
//! ```
//!
//! Note: free functions in `engine` mirror the `Board`/`Game` methods where
//! convenient (e.g., `engine::shift`, `engine::can_move`). All randomness is
//! injected through `rand::Rng`, so seeded runs replay exactly.

pub mod engine;
pub mod error;

pub use error::{Error, Result};
