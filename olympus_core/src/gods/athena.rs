//! Athena moves and builds like a mortal. Her power lives in the board
//! itself: whenever her move climbed, the opponent's next turn may not
//! climb. `Board::apply` recomputes that flag after every move.

use crate::{
    board::Board,
    gods::move_helpers::{build_ok, build_squares, for_each_standard_step, step_ok},
    moves::{AthenaMove, Move, MoveList},
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for_each_standard_step(board, |from, to| {
        for build in build_squares(board, from, to) {
            moves.push(Move::Athena(AthenaMove::new(from, to, build)));
        }
    });
}

pub fn is_valid(board: &Board, mv: &AthenaMove) -> bool {
    step_ok(board, mv.from, mv.to) && build_ok(board, mv.from, mv.to, mv.build)
}

pub fn apply(board: &mut Board, mv: &mut AthenaMove) {
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    board.move_worker(mover, mv.to);
    board.add_block(mv.build);
}

pub fn undo(board: &mut Board, mv: &AthenaMove) {
    board.remove_block(mv.build);
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    board.move_worker(mover, mv.from);
}
