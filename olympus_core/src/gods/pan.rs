//! Pan moves and builds like a mortal but also wins by dropping two or more
//! levels. The drop itself is recorded on the board by `Board::apply`; the
//! terminal check reads it back.

use crate::{
    board::Board,
    gods::move_helpers::{build_ok, build_squares, for_each_standard_step, step_ok},
    moves::{Move, MoveList, PanMove},
};

pub fn generate(board: &Board, moves: &mut MoveList) {
    for_each_standard_step(board, |from, to| {
        for build in build_squares(board, from, to) {
            moves.push(Move::Pan(PanMove::new(from, to, build)));
        }
    });
}

pub fn is_valid(board: &Board, mv: &PanMove) -> bool {
    step_ok(board, mv.from, mv.to) && build_ok(board, mv.from, mv.to, mv.build)
}

pub fn apply(board: &mut Board, mv: &mut PanMove) {
    let mover = board.worker_at(mv.from).expect("no worker on from-square");
    board.move_worker(mover, mv.to);
    board.add_block(mv.build);
}

pub fn undo(board: &mut Board, mv: &PanMove) {
    board.remove_block(mv.build);
    let mover = board.worker_at(mv.to).expect("no worker on to-square");
    board.move_worker(mover, mv.from);
}

#[cfg(test)]
mod tests {
    use crate::{gods::GodName, moves::Move, test_utils::make_board};

    #[test]
    fn test_drop_of_two_wins_for_gray() {
        let mut blocks = [0u8; 25];
        blocks[0] = 2;
        let mut board = make_board(&blocks, (0, 2), (23, 24), 1, GodName::Pan, GodName::Artemis);

        let mut drop = Move::from_text(GodName::Pan, "a1b1a2").unwrap();
        assert!(board.is_legal(&drop));
        board.apply(&mut drop);
        assert_eq!(board.last_height_diff, -2);
        assert_eq!(board.state(), 1);
    }

    #[test]
    fn test_drop_of_two_wins_for_blue() {
        let mut blocks = [0u8; 25];
        blocks[0] = 2;
        let mut board = make_board(&blocks, (22, 23), (0, 2), -1, GodName::Artemis, GodName::Pan);

        let mut drop = Move::from_text(GodName::Pan, "a1b1a2").unwrap();
        assert!(board.is_legal(&drop));
        board.apply(&mut drop);
        assert_eq!(board.state(), -1);
    }

    #[test]
    fn test_single_step_down_is_not_a_win() {
        let mut blocks = [0u8; 25];
        blocks[0] = 1;
        let mut board = make_board(&blocks, (0, 2), (23, 24), 1, GodName::Pan, GodName::Artemis);

        let mut step = Move::from_text(GodName::Pan, "a1b1a2").unwrap();
        board.apply(&mut step);
        assert_eq!(board.last_height_diff, -1);
        assert_eq!(board.state(), 0);
    }

    #[test]
    fn test_drop_signal_survives_unmake() {
        let mut blocks = [0u8; 25];
        blocks[0] = 2;
        let mut board = make_board(&blocks, (0, 2), (23, 24), 1, GodName::Pan, GodName::Artemis);
        let before = board.clone();

        let mut drop = Move::from_text(GodName::Pan, "a1b1a2").unwrap();
        board.apply(&mut drop);
        board.undo(&drop);
        assert_eq!(board, before);
        assert_eq!(board.last_height_diff, 0);
    }
}
