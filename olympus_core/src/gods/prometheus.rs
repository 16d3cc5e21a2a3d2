//! Prometheus may build before moving, at the price of not climbing on that
//! move. A pre-build on the target square counts toward its height, and the
//! closing build is checked against the board as the pre-build left it, so a
//! square the pre-build domed cannot take another block.

use crate::{
    board::Board,
    gods::move_helpers::{adjacent, build_ok, build_squares, step_ok},
    moves::{Move, MoveList, PrometheusMove},
    square::NEIGHBORS,
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for slot in board.current_player.worker_slots() {
        let from = board.workers[slot];
        let from_h = board.height(from);

        // Plain move-then-build turns.
        for &to in NEIGHBORS[from as usize] {
            if !step_ok(board, from, to) {
                continue;
            }
            if board.athena_flag && board.height(to) > from_h {
                continue;
            }
            for build in build_squares(board, from, to) {
                moves.push(Move::Prometheus(PrometheusMove::new(from, to, build, None)));
            }
        }

        // Build first, then a move that may not climb.
        for &pre in NEIGHBORS[from as usize] {
            if !board.is_free(pre) {
                continue;
            }
            for &to in NEIGHBORS[from as usize] {
                if !board.is_free(to) {
                    continue;
                }
                if board.height(to) + (to == pre) as u8 > from_h {
                    continue;
                }
                for build in build_squares(board, from, to) {
                    if build == pre && board.height(pre) >= 3 {
                        continue;
                    }
                    moves.push(Move::Prometheus(PrometheusMove::new(
                        from,
                        to,
                        build,
                        Some(pre),
                    )));
                }
            }
        }
    }
}

pub fn is_valid(board: &Board, mv: &PrometheusMove) -> bool {
    let Some(pre) = mv.pre_build else {
        return step_ok(board, mv.from, mv.to) && build_ok(board, mv.from, mv.to, mv.build);
    };

    if !adjacent(mv.from, pre) || !board.is_free(pre) {
        return false;
    }
    if board.height(mv.to) + (mv.to == pre) as u8 > board.height(mv.from) {
        return false;
    }
    if !adjacent(mv.from, mv.to) || !board.is_free(mv.to) {
        return false;
    }
    if !build_ok(board, mv.from, mv.to, mv.build) {
        return false;
    }
    // The pre-build may have finished a dome here.
    if mv.build == pre && board.height(pre) >= 3 {
        return false;
    }
    true
}

pub fn apply(board: &mut Board, mv: &mut PrometheusMove) {
    if let Some(pre) = mv.pre_build {
        board.add_block(pre);
    }
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    board.move_worker(mover, mv.to);
    board.add_block(mv.build);
}

pub fn undo(board: &mut Board, mv: &PrometheusMove) {
    board.remove_block(mv.build);
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    board.move_worker(mover, mv.from);
    if let Some(pre) = mv.pre_build {
        board.remove_block(pre);
    }
}
