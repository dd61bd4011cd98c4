use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::ops;
use super::state::{Board, Move, Score, Tile};
use crate::error::{Error, Result};

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// False when the move was rejected as a no-op.
    pub changed: bool,
    /// Score gained by merges in this step.
    pub delta: Score,
    /// True once no further move can change the board.
    pub game_over: bool,
}

impl StepResult {
    const NO_CHANGE: StepResult = StepResult {
        changed: false,
        delta: 0,
        game_over: false,
    };
}

/// A play session: the live board plus as much history as the undo budget
/// keeps reachable, and the RNG that feeds tile spawns.
///
/// Boards are retained in a deque, oldest first, live board at the back.
/// The deque never holds more than `undos_left + 1` boards, so memory stays
/// bounded no matter how long the game runs, and dropping the session drops
/// the whole history in one loop.
pub struct Game {
    boards: VecDeque<Board>,
    rng: StdRng,
}

impl Game {
    /// Start a session with an entropy-seeded RNG. The opening board gets
    /// two random tiles, per the usual opening.
    pub fn new(dimension: usize, undo_budget: usize) -> Result<Self> {
        Self::with_rng(dimension, undo_budget, StdRng::from_entropy())
    }

    /// Start a session whose every spawn is replayable from `seed`.
    ///
    /// ```
    /// use twenty48_engine::engine::Game;
    /// let a = Game::with_seed(4, 3, 7).unwrap();
    /// let b = Game::with_seed(4, 3, 7).unwrap();
    /// assert!(a.board().same_cells(b.board()));
    /// ```
    pub fn with_seed(dimension: usize, undo_budget: usize, seed: u64) -> Result<Self> {
        Self::with_rng(dimension, undo_budget, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dimension: usize, undo_budget: usize, mut rng: StdRng) -> Result<Self> {
        let mut board = Board::empty(dimension, undo_budget)?;
        board.add_random_tile(&mut rng);
        board.add_random_tile(&mut rng);
        let mut boards = VecDeque::new();
        boards.push_back(board);
        Ok(Game { boards, rng })
    }

    /// The live board.
    #[inline]
    pub fn board(&self) -> &Board {
        self.boards.back().expect("session always holds a live board")
    }

    /// Bounds-checked cell read on the live board.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.board().get(row, col)
    }

    /// Score of the live board.
    #[inline]
    pub fn score(&self) -> Score {
        self.board().score()
    }

    /// Undo operations still available.
    #[inline]
    pub fn undos_left(&self) -> usize {
        self.board().undos_left()
    }

    /// Side length of the grid.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.board().dimension()
    }

    /// True while the live board still has a playable move.
    #[inline]
    pub fn can_move(&self) -> bool {
        self.board().can_move()
    }

    /// Number of boards currently retained, the live one included.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.boards.len()
    }

    /// Spawn a tile into the live board; `false` means the board is full.
    pub fn add_random(&mut self) -> bool {
        let board = self
            .boards
            .back_mut()
            .expect("session always holds a live board");
        board.add_random_tile(&mut self.rng)
    }

    /// Apply one directional move.
    ///
    /// A move that changes no cell is a no-op: the live board, the history,
    /// and the RNG are all left untouched. A move that changes the board
    /// becomes the new live board, history is pruned to the retention
    /// window, a tile is spawned, and the terminal check runs, in that
    /// order. Spawn failure or an immobile board ends the game.
    pub fn step(&mut self, direction: Move) -> StepResult {
        let candidate = ops::shift(self.board(), direction);
        if candidate.same_cells(self.board()) {
            return StepResult::NO_CHANGE;
        }
        let delta = candidate.score() - self.board().score();
        self.boards.push_back(candidate);
        self.prune();

        let spawned = self
            .boards
            .back_mut()
            .expect("session always holds a live board")
            .add_random_tile(&mut self.rng);
        let game_over = !spawned || !self.board().can_move();
        StepResult {
            changed: true,
            delta,
            game_over,
        }
    }

    /// Step back to the previous board.
    ///
    /// The live board is dropped, its predecessor becomes live, and the
    /// predecessor's undo budget becomes the dropped board's minus one.
    /// No spawn and no terminal check happen here.
    pub fn undo(&mut self) -> Result<()> {
        if self.boards.len() < 2 || self.board().undos_left() == 0 {
            return Err(Error::UndoUnavailable);
        }
        let popped = self
            .boards
            .pop_back()
            .expect("session always holds a live board");
        let promoted = self
            .boards
            .back_mut()
            .expect("undo checked a predecessor exists");
        promoted.undos_left = popped.undos_left() - 1;
        Ok(())
    }

    fn prune(&mut self) {
        let window = self.board().undos_left() + 1;
        while self.boards.len() > window {
            self.boards.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_game(cells: &[Tile], dim: usize, undos: usize) -> Game {
        assert_eq!(cells.len(), dim * dim);
        let board = Board {
            dim,
            cells: cells.to_vec(),
            score: 0,
            undos_left: undos,
        };
        let mut boards = VecDeque::new();
        boards.push_back(board);
        Game {
            boards,
            rng: StdRng::seed_from_u64(1),
        }
    }

    #[test]
    fn step_applies_move_and_spawns_one_tile() {
        let mut game = fixed_game(
            &[
                2, 2, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0,
            ],
            4,
            3,
        );
        let result = game.step(Move::Right);
        assert!(result.changed);
        assert_eq!(result.delta, 4);
        assert!(!result.game_over);
        assert_eq!(game.score(), 4);
        assert_eq!(game.get(0, 3), Some(4));
        // the merge left 15 empties, the spawn consumed one
        assert_eq!(game.board().tiles().filter(|&v| v != 0).count(), 2);
        assert_eq!(game.history_len(), 2);
    }

    #[test]
    fn noop_step_touches_nothing() {
        let mut game = fixed_game(
            &[
                2, 4, 8, //
                16, 32, 64, //
                128, 256, 512,
            ],
            3,
            3,
        );
        let before = game.board().clone();
        let result = game.step(Move::Left);
        assert_eq!(result, StepResult::NO_CHANGE);
        assert_eq!(game.board(), &before);
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn step_reports_game_over_when_the_spawn_blocks_the_board() {
        // sliding row 2 left leaves exactly one empty corner whose neighbors
        // are 8 and 32, so neither a spawned 2 nor a spawned 4 can merge
        let mut game = fixed_game(
            &[
                2, 4, 2, //
                4, 16, 8, //
                0, 2, 32,
            ],
            3,
            3,
        );
        let result = game.step(Move::Left);
        assert!(result.changed);
        assert!(result.game_over);
        assert!(!game.can_move());
    }

    #[test]
    fn undo_restores_cells_and_decrements_budget() {
        let mut game = fixed_game(
            &[
                2, 2, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 4, 0, //
                0, 0, 0, 0,
            ],
            4,
            2,
        );
        let before = game.board().clone();
        assert!(game.step(Move::Right).changed);
        game.undo().unwrap();
        assert!(game.board().same_cells(&before));
        assert_eq!(game.score(), before.score());
        assert_eq!(game.undos_left(), 1);
        assert_eq!(game.history_len(), 1);
    }

    #[test]
    fn undo_fails_without_history_or_budget() {
        let mut game = fixed_game(
            &[
                2, 2, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0,
            ],
            4,
            0,
        );
        assert!(matches!(game.undo(), Err(Error::UndoUnavailable)));
        // a zero-budget move retains only the live board
        assert!(game.step(Move::Right).changed);
        assert_eq!(game.history_len(), 1);
        assert!(matches!(game.undo(), Err(Error::UndoUnavailable)));
    }

    #[test]
    fn prune_keeps_budget_plus_one_boards() {
        let mut game = fixed_game(
            &[
                2, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0, //
                0, 0, 0, 0,
            ],
            4,
            2,
        );
        let mut applied = 0;
        for direction in [
            Move::Right,
            Move::Left,
            Move::Right,
            Move::Left,
            Move::Right,
            Move::Left,
        ] {
            if game.step(direction).changed {
                applied += 1;
            }
            assert_eq!(game.history_len(), applied.min(2) + 1);
        }
        assert!(applied >= 3);
    }
}
