//! Demeter may build a second time on a different square. The two builds are
//! judged against the pre-move board, so enumerating unordered pairs once
//! covers every distinct outcome.

use itertools::Itertools;

use crate::{
    board::Board,
    gods::move_helpers::{build_ok, build_squares, for_each_standard_step, step_ok},
    moves::{DemeterMove, Move, MoveList},
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for_each_standard_step(board, |from, to| {
        let builds = build_squares(board, from, to);
        for &build in &builds {
            moves.push(Move::Demeter(DemeterMove::new(from, to, build, None)));
        }
        for (&first, &second) in builds.iter().tuple_combinations() {
            moves.push(Move::Demeter(DemeterMove::new(from, to, first, Some(second))));
        }
    });
}

pub fn is_valid(board: &Board, mv: &DemeterMove) -> bool {
    if !step_ok(board, mv.from, mv.to) || !build_ok(board, mv.from, mv.to, mv.build) {
        return false;
    }
    match mv.second_build {
        None => true,
        Some(second) => second != mv.build && build_ok(board, mv.from, mv.to, second),
    }
}

pub fn apply(board: &mut Board, mv: &mut DemeterMove) {
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    board.move_worker(mover, mv.to);
    board.add_block(mv.build);
    if let Some(second) = mv.second_build {
        board.add_block(second);
    }
}

pub fn undo(board: &mut Board, mv: &DemeterMove) {
    if let Some(second) = mv.second_build {
        board.remove_block(second);
    }
    board.remove_block(mv.build);
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    board.move_worker(mover, mv.from);
}
