use rand::Rng;

use super::state::{Board, Move, Score, Tile};

/// Slide/merge tiles in the given direction, returning the moved board with
/// its score advanced by the merge delta. No randomness, no history.
///
/// Every direction is the rightward pass conjugated with a rotation, so
/// there is exactly one slide/merge algorithm to get wrong.
pub fn shift(board: &Board, direction: Move) -> Board {
    let mut next = board.clone();
    let delta = match direction {
        Move::Right => slide_merge_right(&mut next),
        Move::Left => {
            rotate180(&mut next);
            let delta = slide_merge_right(&mut next);
            rotate180(&mut next);
            delta
        }
        Move::Up => {
            rotate90(&mut next);
            let delta = slide_merge_right(&mut next);
            rotate270(&mut next);
            delta
        }
        Move::Down => {
            rotate270(&mut next);
            let delta = slide_merge_right(&mut next);
            rotate90(&mut next);
            delta
        }
    };
    next.score += delta;
    next
}

/// The full rightward pass: pack tiles, merge neighbors, close the gaps.
fn slide_merge_right(board: &mut Board) -> Score {
    slide_right(board);
    let delta = merge_right(board);
    slide_right(board);
    delta
}

/// Slide every tile as far right as its row allows, without merging.
/// Relative order within a row is preserved.
pub fn slide_right(board: &mut Board) {
    let dim = board.dim;
    for row in 0..dim {
        for col in (0..dim - 1).rev() {
            let tile = board.cells[row * dim + col];
            if tile == 0 {
                continue;
            }
            let mut target = col;
            while target + 1 < dim && board.cells[row * dim + target + 1] == 0 {
                target += 1;
            }
            if target != col {
                board.cells[row * dim + target] = tile;
                board.cells[row * dim + col] = 0;
            }
        }
    }
}

/// Merge equal horizontal neighbors into their right cell, scanning each row
/// right to left so a cell merges at most once per call. Returns the score
/// delta: the sum of the values produced by the merges.
pub fn merge_right(board: &mut Board) -> Score {
    let dim = board.dim;
    let mut delta = 0;
    for row in 0..dim {
        for col in (1..dim).rev() {
            let right = board.cells[row * dim + col];
            let left = board.cells[row * dim + col - 1];
            if right != 0 && right == left {
                let merged = right * 2;
                board.cells[row * dim + col] = merged;
                board.cells[row * dim + col - 1] = 0;
                delta += merged;
            }
        }
    }
    delta
}

/// Mirror the grid across its main diagonal.
pub fn transpose(board: &mut Board) {
    let dim = board.dim;
    for row in 0..dim {
        for col in (row + 1)..dim {
            board.cells.swap(row * dim + col, col * dim + row);
        }
    }
}

/// Mirror each row left-to-right.
pub fn reverse_rows(board: &mut Board) {
    let dim = board.dim;
    for row_cells in board.cells.chunks_mut(dim) {
        row_cells.reverse();
    }
}

/// Mirror each column top-to-bottom.
pub fn reverse_cols(board: &mut Board) {
    let dim = board.dim;
    for row in 0..dim / 2 {
        for col in 0..dim {
            board.cells.swap(row * dim + col, (dim - 1 - row) * dim + col);
        }
    }
}

/// Quarter turn clockwise: transpose, then mirror each row.
pub fn rotate90(board: &mut Board) {
    transpose(board);
    reverse_rows(board);
}

/// Half turn.
pub fn rotate180(board: &mut Board) {
    reverse_rows(board);
    reverse_cols(board);
}

/// Quarter turn counterclockwise: mirror each row, then transpose.
pub fn rotate270(board: &mut Board) {
    reverse_rows(board);
    transpose(board);
}

/// True while any move could still change the board: an empty cell exists,
/// or some cell equals its neighbor to the right or below.
pub fn can_move(board: &Board) -> bool {
    let dim = board.dim;
    for row in 0..dim {
        for col in 0..dim {
            let value = board.cells[row * dim + col];
            if value == 0 {
                return true;
            }
            if col + 1 < dim && board.cells[row * dim + col + 1] == value {
                return true;
            }
            if row + 1 < dim && board.cells[(row + 1) * dim + col] == value {
                return true;
            }
        }
    }
    false
}

/// Count the number of empty cells.
pub fn count_empty(board: &Board) -> usize {
    board.cells.iter().filter(|&&value| value == 0).count()
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 {
        2
    } else {
        4
    }
}
