//! Apollo may move into an opponent's square; the two workers trade places.
//! After a swap the vacated from-square is occupied again, so it is no
//! longer a legal build target.

use crate::{
    board::Board,
    gods::move_helpers::{adjacent, build_ok, climb_ok, is_opponent_slot},
    moves::{ApolloMove, Move, MoveList},
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
            let swap = match board.worker_at(to) {
                Some(occupant) => {
                    if !is_opponent_slot(board, occupant) {
                        continue;
                    }
                    true
                }
                None => {
                    if board.height(to) == 4 {
                        continue;
                    }
                    false
                }
            };

            for &build in NEIGHBORS[to as usize] {
                if build == to {
                    continue;
                }
                let buildable = if swap {
                    board.is_free(build)
                } else {
                    build == from || board.is_free(build)
                };
                if buildable {
                    moves.push(Move::Apollo(ApolloMove::new(from, to, build)));
                }
            }
        }
    }
}

pub fn is_valid(board: &Board, mv: &ApolloMove) -> bool {
    if !adjacent(mv.from, mv.to) || !climb_ok(board, mv.from, mv.to) {
        return false;
    }

    let swap = match board.worker_at(mv.to) {
        Some(occupant) => {
            if !is_opponent_slot(board, occupant) {
                return false;
            }
            true
        }
        None => {
            if board.height(mv.to) == 4 {
                return false;
            }
            false
        }
    };

    if !build_ok(board, mv.from, mv.to, mv.build) {
        return false;
    }
    if swap && mv.build == mv.from {
        return false;
    }
    true
}

pub fn apply(board: &mut Board, mv: &mut ApolloMove) {
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    if let Some(occupant) = board.worker_at(mv.to) {
        board.move_worker(occupant, mv.from);
    }
    board.move_worker(mover, mv.to);
    board.add_block(mv.build);
}

pub fn undo(board: &mut Board, mv: &ApolloMove) {
    board.remove_block(mv.build);
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    let swapped = board.worker_at(mv.from);
    board.move_worker(mover, mv.from);
    if let Some(occupant) = swapped {
        board.move_worker(occupant, mv.to);
    }
}

#[cfg(test)]
mod tests {
    use crate::{gods::GodName, moves::Move, test_utils::make_board};

    #[test]
    fn test_swap_up_one_height() {
        let mut blocks = [0u8; 25];
        blocks[1] = 1;
        let mut board = make_board(&blocks, (0, 2), (1, 3), 1, GodName::Apollo, GodName::Apollo);

        let mut mv = Move::from_text(GodName::Apollo, "a1b1b2").unwrap();
        assert!(board.is_legal(&mv));
        board.apply(&mut mv);

        assert_eq!(board.workers[0].to_string(), "b1");
        assert_eq!(board.workers[2].to_string(), "a1");
        assert_eq!(board.height("b2".parse().unwrap()), 1);
    }

    #[test]
    fn test_can_only_swap_with_enemy() {
        let board = make_board(
            &[0u8; 25],
            (0, 1),
            (23, 24),
            1,
            GodName::Apollo,
            GodName::Artemis,
        );
        let mv = Move::from_text(GodName::Apollo, "a1b1c1").unwrap();
        assert!(!board.is_legal(&mv));
    }

    #[test]
    fn test_no_build_on_from_when_swapping() {
        let board = make_board(
            &[0u8; 25],
            (0, 1),
            (2, 3),
            1,
            GodName::Apollo,
            GodName::Apollo,
        );
        // b1 -> c1 swaps; building back on b1 is taken by the displaced worker.
        let mv = Move::from_text(GodName::Apollo, "b1c1b1").unwrap();
        assert!(!board.is_legal(&mv));
    }

    #[test]
    fn test_swap_saves_you_from_mate() {
        let mut blocks = [4u8; 25];
        blocks[0] = 2;
        blocks[1] = 2;
        blocks[2] = 2;
        blocks[3] = 2;
        blocks[7] = 3;
        let mut board = make_board(&blocks, (0, 2), (1, 3), 1, GodName::Apollo, GodName::Apollo);

        assert_eq!(board.state(), 0);
        let mut mv = Move::from_text(GodName::Apollo, "a1b1c2").unwrap();
        assert!(board.is_legal(&mv));
        board.apply(&mut mv);
        assert_eq!(board.workers[0].to_string(), "b1");
        assert_eq!(board.workers[2].to_string(), "a1");
    }

    #[test]
    fn test_undo_restores_swap() {
        let mut blocks = [0u8; 25];
        blocks[1] = 1;
        let mut board = make_board(&blocks, (0, 2), (1, 3), 1, GodName::Apollo, GodName::Apollo);
        let before = board.clone();

        let mut mv = Move::from_text(GodName::Apollo, "a1b1b2").unwrap();
        board.apply(&mut mv);
        board.undo(&mv);
        assert_eq!(board, before);
    }
}
