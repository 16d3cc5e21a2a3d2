//! The Minotaur may move onto an opponent's square, shoving that worker one
//! further square along the same line. The push target must be a real, free
//! square, and the build may not land on it.

use crate::{
    board::Board,
    gods::move_helpers::{adjacent, build_ok, build_squares, climb_ok, is_opponent_slot, push_square},
    moves::{MinotaurMove, Move, MoveList},
    square::NEIGHBORS,
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for slot in board.current_player.worker_slots() {
        let from = board.workers[slot];
        for &to in NEIGHBORS[from as usize] {
            if !climb_ok(board, from, to) {
                continue;
            }
            if board.athena_flag && board.height(to) > board.height(from) {
                continue;
            }
            match board.worker_at(to) {
                None => {
                    if board.height(to) == 4 {
                        continue;
                    }
                    for build in build_squares(board, from, to) {
                        moves.push(Move::Minotaur(MinotaurMove::new(from, to, build)));
                    }
                }
                Some(occupant) => {
                    if !is_opponent_slot(board, occupant) {
                        continue;
                    }
                    let Some(shove) = push_square(from, to) else {
                        continue;
                    };
                    if !board.is_free(shove) {
                        continue;
                    }
                    for build in build_squares(board, from, to) {
                        if build != shove {
                            moves.push(Move::Minotaur(MinotaurMove::new(from, to, build)));
                        }
                    }
                }
            }
        }
    }
}

pub fn is_valid(board: &Board, mv: &MinotaurMove) -> bool {
    if !adjacent(mv.from, mv.to) || !climb_ok(board, mv.from, mv.to) {
        return false;
    }

    match board.worker_at(mv.to) {
        None => board.height(mv.to) != 4 && build_ok(board, mv.from, mv.to, mv.build),
        Some(occupant) => {
            if !is_opponent_slot(board, occupant) {
                return false;
            }
            let Some(shove) = push_square(mv.from, mv.to) else {
                return false;
            };
            board.is_free(shove)
                && build_ok(board, mv.from, mv.to, mv.build)
                && mv.build != shove
        }
    }
}

pub fn apply(board: &mut Board, mv: &mut MinotaurMove) {
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    match board.worker_at(mv.to) {
        Some(occupant) => {
            let shove = push_square(mv.from, mv.to).expect("push square off the board");
            board.move_worker(occupant, shove);
            mv.pushed = true;
        }
        None => {
            mv.pushed = false;
        }
    }
    board.move_worker(mover, mv.to);
    board.add_block(mv.build);
}

pub fn undo(board: &mut Board, mv: &MinotaurMove) {
    board.remove_block(mv.build);
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    board.move_worker(mover, mv.from);
    if mv.pushed {
        let shove = push_square(mv.from, mv.to).expect("push square off the board");
        let occupant = board.worker_at(shove).expect("no worker on push square");
        board.move_worker(occupant, mv.to);
    }
}

#[cfg(test)]
mod tests {
    use crate::{gods::GodName, moves::Move, test_utils::make_board};

    #[test]
    fn test_can_only_push_where_you_can_move() {
        let mut blocks = [0u8; 25];
        blocks[1] = 2;
        let board = make_board(&blocks, (0, 2), (1, 3), 1, GodName::Minotaur, GodName::Apollo);
        // Two levels up is out of reach even with an opponent to shove.
        let mv = Move::from_text(GodName::Minotaur, "a1b1a2").unwrap();
        assert!(!board.is_legal(&mv));
    }

    #[test]
    fn test_cannot_push_off_the_edge() {
        let board = make_board(
            &[0u8; 25],
            (5, 10),
            (0, 15),
            1,
            GodName::Minotaur,
            GodName::Apollo,
        );
        // a2 -> a1 would shove the defender off the bottom edge.
        let mv = Move::from_text(GodName::Minotaur, "a2a1b1").unwrap();
        assert!(!board.is_legal(&mv));
    }

    #[test]
    fn test_cannot_build_on_the_push_square() {
        let board = make_board(
            &[0u8; 25],
            (0, 1),
            (2, 4),
            1,
            GodName::Minotaur,
            GodName::Apollo,
        );
        // b1 -> c1 shoves the defender to d1; d1 may not take the build.
        let mv = Move::from_text(GodName::Minotaur, "b1c1d1").unwrap();
        assert!(!board.is_legal(&mv));

        let beside = Move::from_text(GodName::Minotaur, "b1c1c2").unwrap();
        assert!(board.is_legal(&beside));
    }

    #[test]
    fn test_pushed_worker_on_level_three_does_not_win() {
        let mut blocks = [0u8; 25];
        blocks[2] = 2;
        blocks[3] = 2;
        blocks[4] = 3;
        let mut board = make_board(&blocks, (0, 2), (3, 5), 1, GodName::Minotaur, GodName::Apollo);

        let mut mv = Move::from_text(GodName::Minotaur, "c1d1c1").unwrap();
        assert!(board.is_legal(&mv));
        board.apply(&mut mv);
        assert_eq!(board.state(), 0);
        assert_eq!(board.workers[2].to_string(), "e1");
    }

    #[test]
    fn test_push_round_trip() {
        let mut board = make_board(
            &[0u8; 25],
            (0, 1),
            (2, 4),
            1,
            GodName::Minotaur,
            GodName::Apollo,
        );
        let before = board.clone();

        let mut mv = Move::from_text(GodName::Minotaur, "b1c1c2").unwrap();
        board.apply(&mut mv);
        assert_eq!(board.workers[1].to_string(), "c1");
        assert_eq!(board.workers[2].to_string(), "d1");

        board.undo(&mv);
        assert_eq!(board, before);
    }

    #[test]
    fn test_plain_moves_are_generated_too() {
        let board = make_board(
            &[0u8; 25],
            (0, 10),
            (23, 24),
            1,
            GodName::Minotaur,
            GodName::Apollo,
        );
        let mut moves = Vec::new();
        board.generate_moves(&mut moves);
        assert!(!moves.is_empty());
        for mv in &moves {
            assert!(board.is_legal(mv), "generated illegal move {mv}");
        }
    }
}
