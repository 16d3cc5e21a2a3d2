//! Atlas may cap any legal build square with a dome instead of the normal
//! block, whatever its height. The move remembers the height it buried so
//! the dome can be lifted again on unmake.

use crate::{
    board::Board,
    gods::move_helpers::{build_ok, build_squares, for_each_standard_step, step_ok},
    moves::{AtlasMove, Move, MoveList},
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for_each_standard_step(board, |from, to| {
        for build in build_squares(board, from, to) {
            moves.push(Move::Atlas(AtlasMove::new(from, to, build, false)));
            moves.push(Move::Atlas(AtlasMove::new(from, to, build, true)));
        }
    });
}

pub fn is_valid(board: &Board, mv: &AtlasMove) -> bool {
    step_ok(board, mv.from, mv.to) && build_ok(board, mv.from, mv.to, mv.build)
}

pub fn apply(board: &mut Board, mv: &mut AtlasMove) {
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    board.move_worker(mover, mv.to);
    if mv.dome {
        mv.prior_height = board.height(mv.build);
        board.set_dome(mv.build);
    } else {
        board.add_block(mv.build);
    }
}

pub fn undo(board: &mut Board, mv: &AtlasMove) {
    if mv.dome {
        board.clear_dome(mv.build, mv.prior_height);
    } else {
        board.remove_block(mv.build);
    }
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    board.move_worker(mover, mv.from);
}
