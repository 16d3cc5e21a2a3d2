use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A board square, row-major from the a1 corner: `sq % 5` is the column
/// (letter) and `sq / 5` is the row (digit minus one).
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1,
    A2, B2, C2, D2, E2,
    A3, B3, C3, D3, E3,
    A4, B4, C4, D4, E4,
    A5, B5, C5, D5, E5,
}
use Square::*;

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::STR[*self as usize])
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = Self::STR
            .iter()
            .position(|&tgt| tgt == s.to_lowercase())
            .ok_or_else(|| format!("Invalid square: {s}"))?;

        Ok(Square::from(index))
    }
}

impl From<usize> for Square {
    fn from(index: usize) -> Self {
        Self::ALL[index]
    }
}

impl Square {
    pub const COUNT: usize = 25;

    #[rustfmt::skip]
    pub const ALL: [Self; Self::COUNT] = [
        A1, B1, C1, D1, E1,
        A2, B2, C2, D2, E2,
        A3, B3, C3, D3, E3,
        A4, B4, C4, D4, E4,
        A5, B5, C5, D5, E5,
    ];

    #[rustfmt::skip]
    const STR: [&str; Self::COUNT] = [
        "a1", "b1", "c1", "d1", "e1",
        "a2", "b2", "c2", "d2", "e2",
        "a3", "b3", "c3", "d3", "e3",
        "a4", "b4", "c4", "d4", "e4",
        "a5", "b5", "c5", "d5", "e5",
    ];

    pub const fn row(self) -> i8 {
        self as i8 / 5
    }

    pub const fn col(self) -> i8 {
        self as i8 % 5
    }

    pub const fn from_row_col(row: i8, col: i8) -> Option<Self> {
        if row < 0 || row >= 5 || col < 0 || col >= 5 {
            None
        } else {
            Some(Self::ALL[(row * 5 + col) as usize])
        }
    }
}

impl Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Square::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// King-move adjacency for each square.
#[rustfmt::skip]
pub static NEIGHBORS: [&[Square]; Square::COUNT] = [
    &[B1, A2, B2],
    &[A1, C1, A2, B2, C2],
    &[B1, D1, B2, C2, D2],
    &[C1, E1, C2, D2, E2],
    &[D1, D2, E2],
    &[A1, B1, B2, A3, B3],
    &[A1, B1, C1, A2, C2, A3, B3, C3],
    &[B1, C1, D1, B2, D2, B3, C3, D3],
    &[C1, D1, E1, C2, E2, C3, D3, E3],
    &[D1, E1, D2, D3, E3],
    &[A2, B2, B3, A4, B4],
    &[A2, B2, C2, A3, C3, A4, B4, C4],
    &[B2, C2, D2, B3, D3, B4, C4, D4],
    &[C2, D2, E2, C3, E3, C4, D4, E4],
    &[D2, E2, D3, D4, E4],
    &[A3, B3, B4, A5, B5],
    &[A3, B3, C3, A4, C4, A5, B5, C5],
    &[B3, C3, D3, B4, D4, B5, C5, D5],
    &[C3, D3, E3, C4, E4, C5, D5, E5],
    &[D3, E3, D4, D5, E5],
    &[A4, B4, B5],
    &[A4, B4, C4, A5, C5],
    &[B4, C4, D4, B5, D5],
    &[C4, D4, E4, C5, E5],
    &[D4, E4, D5],
];

/// Number of squares within two king steps of each square (the square
/// itself excluded). Central squares dominate, which is what the move
/// ordering wants.
#[rustfmt::skip]
pub static DOUBLE_NEIGHBORS: [i32; Square::COUNT] = [
    8, 11, 14, 11, 8,
    11, 15, 19, 15, 11,
    14, 19, 24, 19, 14,
    11, 15, 19, 15, 11,
    8, 11, 14, 11, 8,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        for index in 0..Square::COUNT {
            let square = Square::from(index);
            let text = square.to_string();
            assert_eq!(text.parse::<Square>().unwrap(), square);
        }
        assert_eq!("a1".parse::<Square>().unwrap(), A1);
        assert_eq!("e5".parse::<Square>().unwrap(), E5);
        assert_eq!(C3 as usize, 12);
        assert!("z9".parse::<Square>().is_err());
    }

    #[test]
    fn test_serde_square() {
        for index in 0..Square::COUNT {
            let square = Square::from(index);
            let square_str = serde_json::to_string(&square).unwrap();
            let parsed: Square = serde_json::from_str(&square_str).unwrap();

            assert_eq!(square, parsed);
        }
    }

    #[test]
    fn test_neighbor_table_matches_coordinates() {
        for index in 0..Square::COUNT {
            let square = Square::from(index);
            let mut expected = Vec::new();
            for dr in -1i8..=1 {
                for dc in -1i8..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    if let Some(n) = Square::from_row_col(square.row() + dr, square.col() + dc) {
                        expected.push(n);
                    }
                }
            }
            expected.sort();

            let mut actual = NEIGHBORS[index].to_vec();
            actual.sort();
            assert_eq!(actual, expected, "neighbors of {square}");
        }
    }

    #[test]
    fn test_double_neighbor_table_matches_coordinates() {
        for index in 0..Square::COUNT {
            let square = Square::from(index);
            let mut count = 0;
            for other in 0..Square::COUNT {
                if other == index {
                    continue;
                }
                let o = Square::from(other);
                let dist = (o.row() - square.row())
                    .abs()
                    .max((o.col() - square.col()).abs());
                if dist <= 2 {
                    count += 1;
                }
            }
            assert_eq!(DOUBLE_NEIGHBORS[index], count, "reach of {square}");
        }
    }
}
