//! Hermes may stay put, take one ordinary step, or walk any distance across
//! squares at exactly his starting height. The walk search emits one move
//! per reachable square, not one per path, since walks at a constant height
//! are interchangeable. Ordinary single steps cover only the
//! strictly-up/strictly-down targets so the two forms never overlap.

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    gods::move_helpers::{build_ok, build_squares, step_ok},
    moves::{HermesMove, MAX_WALK_LEN, Move, MoveList},
    square::{NEIGHBORS, Square},
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for slot in board.current_player.worker_slots() {
        let from = board.workers[slot];
        let from_h = board.height(from);

        // Stay put and build next to the start.
        for &build in NEIGHBORS[from as usize] {
            if board.is_free(build) {
                moves.push(Move::Hermes(HermesMove::new(from, &[], build)));
            }
        }

        // One ordinary step to a different level.
        for &to in NEIGHBORS[from as usize] {
            if !step_ok(board, from, to) || board.height(to) == from_h {
                continue;
            }
            if board.athena_flag && board.height(to) > from_h {
                continue;
            }
            for build in build_squares(board, from, to) {
                moves.push(Move::Hermes(HermesMove::new(from, &[to], build)));
            }
        }

        // Walk the connected component at the starting height.
        let mut visited: u32 = 1 << from as u8;
        let mut stack: Vec<(Square, ArrayVec<Square, MAX_WALK_LEN>)> =
            vec![(from, ArrayVec::new())];
        while let Some((current, path)) = stack.pop() {
            for &next in NEIGHBORS[current as usize] {
                if visited & (1 << next as u8) != 0 {
                    continue;
                }
                if !board.is_free(next) || board.height(next) != from_h {
                    continue;
                }
                visited |= 1 << next as u8;
                let mut longer = path.clone();
                longer.push(next);
                for build in build_squares(board, from, next) {
                    moves.push(Move::Hermes(HermesMove::new(from, &longer, build)));
                }
                stack.push((next, longer));
            }
        }
    }
}

pub fn is_valid(board: &Board, mv: &HermesMove) -> bool {
    let final_sq = mv.final_sq();
    let walk_ok = match mv.path.len() {
        0 => true,
        1 => step_ok(board, mv.from, mv.path[0]),
        _ => {
            let start_h = board.height(mv.from);
            let mut current = mv.from;
            let mut ok = true;
            for &next in &mv.path {
                if board.height(next) != start_h || !step_ok(board, current, next) {
                    ok = false;
                    break;
                }
                current = next;
            }
            ok
        }
    };
    walk_ok && build_ok(board, mv.from, final_sq, mv.build)
}

pub fn apply(board: &mut Board, mv: &mut HermesMove) {
    let final_sq = mv.final_sq();
    if final_sq != mv.from {
        let mover = board.worker_at(mv.from).expect("no worker on from-square");
        board.move_worker(mover, final_sq);
    }
    board.add_block(mv.build);
}

pub fn undo(board: &mut Board, mv: &HermesMove) {
    board.remove_block(mv.build);
    let final_sq = mv.final_sq();
    if final_sq != mv.from {
        let mover = board.worker_at(final_sq).expect("no worker on final square");
        board.move_worker(mover, mv.from);
    }
}
