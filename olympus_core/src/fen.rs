//! The 54-character position string: 25 pairs of (height digit, worker
//! code), then the side to move, the two god digits, and the no-climb flag.
//!
//! `parse_position` and `position_to_text` invert each other exactly;
//! anything malformed is rejected with a message and leaves no board behind.

use crate::{
    board::{Board, NUM_SQUARES},
    gods::GodName,
    player::Player,
    square::Square,
};

pub const POSITION_LEN: usize = 2 * NUM_SQUARES + 4;

pub fn parse_position(s: &str) -> Result<Board, String> {
    if !s.is_ascii() || s.len() != POSITION_LEN {
        return Err(format!(
            "Invalid position: expected {POSITION_LEN} ascii chars, got {}",
            s.len()
        ));
    }
    let bytes = s.as_bytes();

    let mut blocks = [0u8; NUM_SQUARES];
    let mut gray: Vec<Square> = Vec::with_capacity(2);
    let mut blue: Vec<Square> = Vec::with_capacity(2);

    for index in 0..NUM_SQUARES {
        let height_char = bytes[2 * index];
        if !height_char.is_ascii_digit() || height_char > b'4' {
            return Err(format!(
                "Invalid block height '{}' at square {}",
                height_char as char,
                Square::from(index)
            ));
        }
        blocks[index] = height_char - b'0';

        match bytes[2 * index + 1] {
            b'G' => {
                if gray.len() == 2 {
                    return Err("Invalid position: more than 2 gray workers".to_string());
                }
                gray.push(Square::from(index));
            }
            b'B' => {
                if blue.len() == 2 {
                    return Err("Invalid position: more than 2 blue workers".to_string());
                }
                blue.push(Square::from(index));
            }
            b'N' => {}
            code => {
                return Err(format!(
                    "Invalid worker code '{}' at square {}",
                    code as char,
                    Square::from(index)
                ));
            }
        }
    }

    if gray.len() != 2 || blue.len() != 2 {
        return Err(format!(
            "Invalid worker count: found {} gray and {} blue",
            gray.len(),
            blue.len()
        ));
    }

    let current_player = match bytes[2 * NUM_SQUARES] {
        b'0' => Player::Gray,
        b'1' => Player::Blue,
        turn => {
            return Err(format!(
                "Invalid turn: expected '0' or '1', got '{}'",
                turn as char
            ));
        }
    };

    let mut gods = [GodName::Apollo; 2];
    for (player, &digit) in bytes[2 * NUM_SQUARES + 1..2 * NUM_SQUARES + 3]
        .iter()
        .enumerate()
    {
        if !digit.is_ascii_digit() {
            return Err(format!("Invalid god digit '{}'", digit as char));
        }
        gods[player] = GodName::from_index((digit - b'0') as usize)
            .ok_or_else(|| format!("Invalid god digit '{}'", digit as char))?;
    }

    let athena_flag = match bytes[POSITION_LEN - 1] {
        b'0' => false,
        b'1' => true,
        flag => {
            return Err(format!(
                "Invalid athena flag: expected '0' or '1', got '{}'",
                flag as char
            ));
        }
    };

    let workers = [gray[0], gray[1], blue[0], blue[1]];
    for &square in &workers {
        if blocks[square as usize] == 4 {
            return Err(format!("Invalid position: worker on a dome at {square}"));
        }
    }

    Ok(Board::new(blocks, workers, current_player, gods, athena_flag))
}

pub fn position_to_text(board: &Board) -> String {
    let mut result = String::with_capacity(POSITION_LEN);
    for index in 0..NUM_SQUARES {
        result.push((b'0' + board.blocks[index]) as char);
        let code = match board.worker_at(Square::from(index)) {
            Some(slot) => Player::owner_of_slot(slot).worker_code(),
            None => 'N',
        };
        result.push(code);
    }
    result.push(if board.current_player == Player::Gray {
        '0'
    } else {
        '1'
    });
    result.push((b'0' + board.gods[0] as u8) as char);
    result.push((b'0' + board.gods[1] as u8) as char);
    result.push(if board.athena_flag { '1' } else { '0' });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use crate::random_utils::PlayoutFuzzer;
    use crate::test_utils::make_position;

    #[test]
    fn test_valid_parsing() {
        let position = make_position(
            &[0u8; 25],
            (0, 1),
            (23, 24),
            1,
            GodName::Apollo,
            GodName::Artemis,
            false,
        );
        let board = parse_position(&position).unwrap();
        assert_eq!(board.current_player, Player::Gray);
        assert_eq!(board.gods, [GodName::Apollo, GodName::Artemis]);
        assert_eq!(
            board.workers,
            [Square::A1, Square::B1, Square::D5, Square::E5]
        );
        assert_eq!(board.blocks, [0u8; 25]);
        assert!(!board.athena_flag);

        let mut blocks = [1u8; 25];
        blocks[0] = 2;
        blocks[1] = 2;
        blocks[2] = 0;
        blocks[3] = 0;
        blocks[4] = 0;
        let position = make_position(
            &blocks,
            (0, 1),
            (2, 3),
            -1,
            GodName::Pan,
            GodName::Prometheus,
            false,
        );
        let board = parse_position(&position).unwrap();
        assert_eq!(board.current_player, Player::Blue);
        assert_eq!(board.gods, [GodName::Pan, GodName::Prometheus]);
        assert_eq!(board.blocks, blocks);
    }

    #[test]
    fn test_invalid_length() {
        assert!(parse_position("012345").is_err());
        assert!(parse_position(&"0".repeat(54)).is_err());
        assert!(parse_position(&"0N".repeat(27)).is_err());
    }

    #[test]
    fn test_invalid_block_height() {
        let good = make_position(
            &[0u8; 25],
            (0, 1),
            (2, 3),
            1,
            GodName::Apollo,
            GodName::Artemis,
            false,
        );
        let bad = format!("9{}", &good[1..]);
        assert!(parse_position(&bad).is_err());
    }

    #[test]
    fn test_invalid_worker_code() {
        let good = make_position(
            &[0u8; 25],
            (0, 1),
            (2, 3),
            1,
            GodName::Apollo,
            GodName::Artemis,
            false,
        );
        let bad = format!("{}X{}", &good[..1], &good[2..]);
        assert!(parse_position(&bad).is_err());
    }

    #[test]
    fn test_invalid_worker_count() {
        let mut text = String::new();
        for index in 0..25 {
            text.push('0');
            text.push(match index {
                0..=2 => 'G',
                3 | 4 => 'B',
                _ => 'N',
            });
        }
        text += "0010";
        assert!(parse_position(&text).is_err());
    }

    #[test]
    fn test_invalid_turn_and_god_and_flag_chars() {
        let good = make_position(
            &[0u8; 25],
            (0, 1),
            (2, 3),
            1,
            GodName::Apollo,
            GodName::Artemis,
            false,
        );

        let bad_turn = format!("{}5{}", &good[..50], &good[51..]);
        assert!(parse_position(&bad_turn).is_err());

        let bad_god = format!("{}X{}", &good[..51], &good[52..]);
        assert!(parse_position(&bad_god).is_err());

        let bad_flag = format!("{}7", &good[..53]);
        assert!(parse_position(&bad_flag).is_err());
    }

    #[test]
    fn test_worker_on_dome_rejected() {
        let mut blocks = [0u8; 25];
        blocks[0] = 4;
        let position = make_position(
            &blocks,
            (0, 1),
            (2, 3),
            1,
            GodName::Apollo,
            GodName::Artemis,
            false,
        );
        assert!(parse_position(&position).is_err());
    }

    #[test]
    fn test_athena_flag_char_constrains_the_mover() {
        let mut blocks = [0u8; 25];
        blocks[4] = 1;
        let position = make_position(
            &blocks,
            (0, 1),
            (2, 3),
            -1,
            GodName::Athena,
            GodName::Apollo,
            true,
        );
        let board = parse_position(&position).unwrap();
        assert!(board.athena_flag);

        let climbing = Move::from_text(GodName::Apollo, "d1e1d2").unwrap();
        assert!(!board.is_legal(&climbing));
    }

    #[test]
    fn fuzz_position_text_round_trips() {
        for board in PlayoutFuzzer::new(200, 0xF00D) {
            let text = position_to_text(&board);
            let reparsed = parse_position(&text).unwrap();
            assert_eq!(position_to_text(&reparsed), text);
            assert_eq!(reparsed.blocks, board.blocks);
            assert_eq!(reparsed.workers, board.workers);
            assert_eq!(reparsed.current_player, board.current_player);
            assert_eq!(reparsed.athena_flag, board.athena_flag);
        }
    }
}
