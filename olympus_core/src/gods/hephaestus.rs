//! Hephaestus may build a second block on top of his first, as long as the
//! double build does not finish a dome: the square must have been at height
//! one or less before the first block went down.

use crate::{
    board::Board,
    gods::move_helpers::{build_ok, build_squares, for_each_standard_step, step_ok},
    moves::{HephaestusMove, Move, MoveList},
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for_each_standard_step(board, |from, to| {
        for build in build_squares(board, from, to) {
            moves.push(Move::Hephaestus(HephaestusMove::new(from, to, build, false)));
            if board.height(build) <= 1 {
                moves.push(Move::Hephaestus(HephaestusMove::new(from, to, build, true)));
            }
        }
    });
}

pub fn is_valid(board: &Board, mv: &HephaestusMove) -> bool {
    if !step_ok(board, mv.from, mv.to) || !build_ok(board, mv.from, mv.to, mv.build) {
        return false;
    }
    !mv.double || board.height(mv.build) <= 1
}

pub fn apply(board: &mut Board, mv: &mut HephaestusMove) {
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    board.move_worker(mover, mv.to);
    board.add_block(mv.build);
    if mv.double {
        board.add_block(mv.build);
    }
}

pub fn undo(board: &mut Board, mv: &HephaestusMove) {
    if mv.double {
        board.remove_block(mv.build);
    }
    board.remove_block(mv.build);
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    board.move_worker(mover, mv.from);
}
