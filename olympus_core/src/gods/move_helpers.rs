//! Predicates shared by the per-god generators and validators.
//!
//! "Free" always means the square on the board as it stands before the move:
//! not domed and not occupied. The one exception is building on the mover's
//! own from-square, which `build_ok` allows explicitly because the worker has
//! left it by the time the build happens.

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    player::Player,
    square::{NEIGHBORS, Square},
};

pub fn adjacent(a: Square, b: Square) -> bool {
    NEIGHBORS[a as usize].contains(&b)
}

/// At most one level up; any number of levels down.
pub fn climb_ok(board: &Board, from: Square, to: Square) -> bool {
    board.height(to) as i8 - board.height(from) as i8 <= 1
}

/// A legal single step ignoring god powers and the no-climb flag.
pub fn step_ok(board: &Board, from: Square, to: Square) -> bool {
    adjacent(from, to) && climb_ok(board, from, to) && board.is_free(to)
}

/// A legal build on `build` after the active worker ended on `final_sq`,
/// having started on `from`.
pub fn build_ok(board: &Board, from: Square, final_sq: Square, build: Square) -> bool {
    adjacent(final_sq, build)
        && build != final_sq
        && (build == from || board.is_free(build))
}

/// All legal build squares around `final_sq` for a worker that started on
/// `from`.
pub fn build_squares(board: &Board, from: Square, final_sq: Square) -> ArrayVec<Square, 8> {
    NEIGHBORS[final_sq as usize]
        .iter()
        .copied()
        .filter(|&build| build != final_sq && (build == from || board.is_free(build)))
        .collect()
}

/// The square an opponent is shoved onto: one more step along the from -> to
/// line. None when that square falls off the board.
pub fn push_square(from: Square, to: Square) -> Option<Square> {
    let dr = to.row() - from.row();
    let dc = to.col() - from.col();
    Square::from_row_col(to.row() + dr, to.col() + dc)
}

/// Runs `f` for every (from, to) pair that is a plain legal step for the side
/// to move, honoring the no-climb flag. Gods whose movement is standard build
/// their generators on top of this.
pub(crate) fn for_each_standard_step<F: FnMut(Square, Square)>(board: &Board, mut f: F) {
    for slot in board.current_player.worker_slots() {
        let from = board.workers[slot];
        for &to in NEIGHBORS[from as usize] {
            if !board.is_free(to) || !climb_ok(board, from, to) {
                continue;
            }
            if board.athena_flag && board.height(to) > board.height(from) {
                continue;
            }
            f(from, to);
        }
    }
}

pub fn is_opponent_slot(board: &Board, slot: usize) -> bool {
    Player::owner_of_slot(slot) != board.current_player
}
