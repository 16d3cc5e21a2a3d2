//! Artemis may take a second step, but never back onto her starting square.
//! The generator emits one move per reachable final square: single-step
//! targets first, then the strictly-new squares a double step can reach.

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    gods::move_helpers::{build_ok, build_squares, step_ok},
    moves::{ArtemisMove, Move, MoveList},
    square::NEIGHBORS,
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for slot in board.current_player.worker_slots() {
        let from = board.workers[slot];
        let from_h = board.height(from);

        let steps: ArrayVec<_, 8> = NEIGHBORS[from as usize]
            .iter()
            .copied()
            .filter(|&to| step_ok(board, from, to))
            .collect();

        let mut seen: u32 = 1 << from as u8;
        for &to in &steps {
            seen |= 1 << to as u8;
        }

        for &to in &steps {
            if board.athena_flag && board.height(to) > from_h {
                continue;
            }
            for build in build_squares(board, from, to) {
                moves.push(Move::Artemis(ArtemisMove::new(from, None, to, build)));
            }
        }

        for &mid in &steps {
            for &to in NEIGHBORS[mid as usize] {
                if seen & (1 << to as u8) != 0 {
                    continue;
                }
                if !step_ok(board, mid, to) {
                    continue;
                }
                seen |= 1 << to as u8;
                if board.athena_flag && board.height(to) > from_h {
                    continue;
                }
                for build in build_squares(board, from, to) {
                    moves.push(Move::Artemis(ArtemisMove::new(from, Some(mid), to, build)));
                }
            }
        }
    }
}

pub fn is_valid(board: &Board, mv: &ArtemisMove) -> bool {
    let steps_ok = match mv.mid {
        None => step_ok(board, mv.from, mv.to),
        Some(mid) => {
            step_ok(board, mv.from, mid) && step_ok(board, mid, mv.to) && mv.to != mv.from
        }
    };
    steps_ok && build_ok(board, mv.from, mv.to, mv.build)
}

pub fn apply(board: &mut Board, mv: &mut ArtemisMove) {
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    board.move_worker(mover, mv.to);
    board.add_block(mv.build);
}

pub fn undo(board: &mut Board, mv: &ArtemisMove) {
    board.remove_block(mv.build);
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    board.move_worker(mover, mv.from);
}

#[cfg(test)]
mod tests {
    use crate::{gods::GodName, moves::Move, test_utils::make_board};

    #[test]
    fn test_cannot_move_back_to_start() {
        let board = make_board(
            &[0u8; 25],
            (0, 10),
            (23, 24),
            1,
            GodName::Artemis,
            GodName::Artemis,
        );
        let mv = Move::from_text(GodName::Artemis, "a1b1a1a2").unwrap();
        assert!(!board.is_legal(&mv));
    }

    #[test]
    fn test_single_step_is_allowed() {
        let board = make_board(
            &[0u8; 25],
            (0, 10),
            (23, 24),
            1,
            GodName::Artemis,
            GodName::Artemis,
        );
        let mv = Move::from_text(GodName::Artemis, "a1b2a2").unwrap();
        assert!(board.is_legal(&mv));
    }

    #[test]
    fn test_two_step_reaches_distance_two() {
        let board = make_board(
            &[0u8; 25],
            (0, 10),
            (23, 24),
            1,
            GodName::Artemis,
            GodName::Artemis,
        );
        let mv = Move::from_text(GodName::Artemis, "a1b1c1d1").unwrap();
        assert!(board.is_legal(&mv));
    }

    #[test]
    fn test_each_final_square_emitted_once() {
        let board = make_board(
            &[0u8; 25],
            (0, 10),
            (23, 24),
            1,
            GodName::Artemis,
            GodName::Artemis,
        );
        let mut moves = Vec::new();
        board.generate_moves(&mut moves);

        let mut finals = std::collections::HashSet::new();
        for mv in &moves {
            let Move::Artemis(inner) = mv else {
                panic!("wrong variant")
            };
            finals.insert((inner.from, inner.to, inner.build));
        }
        // No (from, final, build) triple may be produced twice.
        assert_eq!(finals.len(), moves.len());
    }

    #[test]
    fn test_climb_then_descend_under_no_climb_flag() {
        // b1 is one up; stepping up there and back down to c1 keeps the net
        // height change at zero, which the flag allows.
        let mut blocks = [0u8; 25];
        blocks[1] = 1;
        let position = crate::test_utils::make_position(
            &blocks,
            (0, 10),
            (23, 24),
            1,
            GodName::Artemis,
            GodName::Artemis,
            true,
        );
        let board = crate::board::Board::try_from(position.as_str()).unwrap();

        let over_the_top = Move::from_text(GodName::Artemis, "a1b1c1d1").unwrap();
        assert!(board.is_legal(&over_the_top));

        let ending_high = Move::from_text(GodName::Artemis, "a1b1a2").unwrap();
        assert!(!board.is_legal(&ending_high));
    }
}
