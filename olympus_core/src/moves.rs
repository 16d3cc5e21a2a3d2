//! Move value types, one per god, and their wire text forms.
//!
//! Every variant carries two unmake slots (`athena_flag_before`,
//! `height_diff_before`) written when the move is generated or applied, so
//! undo can restore the board field-for-field. Atlas additionally remembers
//! the height it domed over, and Minotaur whether a push happened; both are
//! filled in by `apply`.

use std::fmt;

use arrayvec::ArrayVec;

use crate::{gods::GodName, square::Square};

/// Caller-provided buffer the generators write into.
pub type MoveList = Vec<Move>;

/// Longest possible Hermes walk: the whole board minus the start square.
pub const MAX_WALK_LEN: usize = 24;

macro_rules! move_struct {
    ($name:ident { $($field:ident: $ty:ty),* $(,)? }) => {
        #[derive(Clone, PartialEq, Eq, Debug)]
        pub struct $name {
            $(pub $field: $ty,)*
            pub athena_flag_before: bool,
            pub height_diff_before: i8,
        }
    };
}

move_struct!(ApolloMove {
    from: Square,
    to: Square,
    build: Square,
});

move_struct!(ArtemisMove {
    from: Square,
    mid: Option<Square>,
    to: Square,
    build: Square,
});

move_struct!(AthenaMove {
    from: Square,
    to: Square,
    build: Square,
});

move_struct!(AtlasMove {
    from: Square,
    to: Square,
    build: Square,
    dome: bool,
    // Height the dome replaced; written by apply, read by undo.
    prior_height: u8,
});

move_struct!(DemeterMove {
    from: Square,
    to: Square,
    build: Square,
    second_build: Option<Square>,
});

move_struct!(HephaestusMove {
    from: Square,
    to: Square,
    build: Square,
    double: bool,
});

move_struct!(HermesMove {
    from: Square,
    // Walk path excluding the start square; empty means stay put.
    path: ArrayVec<Square, MAX_WALK_LEN>,
    build: Square,
});

move_struct!(MinotaurMove {
    from: Square,
    to: Square,
    build: Square,
    // Whether an opponent was displaced; written by apply, read by undo.
    pushed: bool,
});

move_struct!(PanMove {
    from: Square,
    to: Square,
    build: Square,
});

move_struct!(PrometheusMove {
    from: Square,
    to: Square,
    build: Square,
    pre_build: Option<Square>,
});

impl ApolloMove {
    pub fn new(from: Square, to: Square, build: Square) -> Self {
        ApolloMove {
            from,
            to,
            build,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

impl ArtemisMove {
    pub fn new(from: Square, mid: Option<Square>, to: Square, build: Square) -> Self {
        ArtemisMove {
            from,
            mid,
            to,
            build,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

impl AthenaMove {
    pub fn new(from: Square, to: Square, build: Square) -> Self {
        AthenaMove {
            from,
            to,
            build,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

impl AtlasMove {
    pub fn new(from: Square, to: Square, build: Square, dome: bool) -> Self {
        AtlasMove {
            from,
            to,
            build,
            dome,
            prior_height: 0,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

impl DemeterMove {
    pub fn new(from: Square, to: Square, build: Square, second_build: Option<Square>) -> Self {
        DemeterMove {
            from,
            to,
            build,
            second_build,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

impl HephaestusMove {
    pub fn new(from: Square, to: Square, build: Square, double: bool) -> Self {
        HephaestusMove {
            from,
            to,
            build,
            double,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

impl HermesMove {
    pub fn new(from: Square, path: &[Square], build: Square) -> Self {
        HermesMove {
            from,
            path: path.iter().copied().collect(),
            build,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }

    pub fn final_sq(&self) -> Square {
        *self.path.last().unwrap_or(&self.from)
    }
}

impl MinotaurMove {
    pub fn new(from: Square, to: Square, build: Square) -> Self {
        MinotaurMove {
            from,
            to,
            build,
            pushed: false,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

impl PanMove {
    pub fn new(from: Square, to: Square, build: Square) -> Self {
        PanMove {
            from,
            to,
            build,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

impl PrometheusMove {
    pub fn new(from: Square, to: Square, build: Square, pre_build: Option<Square>) -> Self {
        PrometheusMove {
            from,
            to,
            build,
            pre_build,
            athena_flag_before: false,
            height_diff_before: 0,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Move {
    Apollo(ApolloMove),
    Artemis(ArtemisMove),
    Athena(AthenaMove),
    Atlas(AtlasMove),
    Demeter(DemeterMove),
    Hephaestus(HephaestusMove),
    Hermes(HermesMove),
    Minotaur(MinotaurMove),
    Pan(PanMove),
    Prometheus(PrometheusMove),
}

macro_rules! on_move {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            Move::Apollo($m) => $body,
            Move::Artemis($m) => $body,
            Move::Athena($m) => $body,
            Move::Atlas($m) => $body,
            Move::Demeter($m) => $body,
            Move::Hephaestus($m) => $body,
            Move::Hermes($m) => $body,
            Move::Minotaur($m) => $body,
            Move::Pan($m) => $body,
            Move::Prometheus($m) => $body,
        }
    };
}

impl Move {
    pub fn god(&self) -> GodName {
        match self {
            Move::Apollo(_) => GodName::Apollo,
            Move::Artemis(_) => GodName::Artemis,
            Move::Athena(_) => GodName::Athena,
            Move::Atlas(_) => GodName::Atlas,
            Move::Demeter(_) => GodName::Demeter,
            Move::Hephaestus(_) => GodName::Hephaestus,
            Move::Hermes(_) => GodName::Hermes,
            Move::Minotaur(_) => GodName::Minotaur,
            Move::Pan(_) => GodName::Pan,
            Move::Prometheus(_) => GodName::Prometheus,
        }
    }

    pub fn from_sq(&self) -> Square {
        on_move!(self, m => m.from)
    }

    /// The square the active worker ends the turn on.
    pub fn final_sq(&self) -> Square {
        match self {
            Move::Hermes(m) => m.final_sq(),
            Move::Apollo(m) => m.to,
            Move::Artemis(m) => m.to,
            Move::Athena(m) => m.to,
            Move::Atlas(m) => m.to,
            Move::Demeter(m) => m.to,
            Move::Hephaestus(m) => m.to,
            Move::Minotaur(m) => m.to,
            Move::Pan(m) => m.to,
            Move::Prometheus(m) => m.to,
        }
    }

    pub fn athena_flag_before(&self) -> bool {
        on_move!(self, m => m.athena_flag_before)
    }

    pub fn height_diff_before(&self) -> i8 {
        on_move!(self, m => m.height_diff_before)
    }

    /// Records the pre-move transient state so undo can restore it.
    pub fn stamp(&mut self, athena_flag: bool, height_diff: i8) {
        on_move!(self, m => {
            m.athena_flag_before = athena_flag;
            m.height_diff_before = height_diff;
        })
    }

    pub fn to_text(&self) -> String {
        match self {
            Move::Apollo(m) => format!("{}{}{}", m.from, m.to, m.build),
            Move::Artemis(m) => match m.mid {
                None => format!("{}{}{}", m.from, m.to, m.build),
                Some(mid) => format!("{}{}{}{}", m.from, mid, m.to, m.build),
            },
            Move::Athena(m) => format!("{}{}{}", m.from, m.to, m.build),
            Move::Atlas(m) => {
                let suffix = if m.dome { "D" } else { "" };
                format!("{}{}{}{}", m.from, m.to, m.build, suffix)
            }
            Move::Demeter(m) => match m.second_build {
                None => format!("{}{}{}", m.from, m.to, m.build),
                Some(second) => format!("{}{}{}{}", m.from, m.to, m.build, second),
            },
            Move::Hephaestus(m) => {
                if m.double {
                    format!("{}{}{}{}", m.from, m.to, m.build, m.build)
                } else {
                    format!("{}{}{}", m.from, m.to, m.build)
                }
            }
            Move::Hermes(m) => {
                let mut text = m.from.to_string();
                for square in &m.path {
                    text += &square.to_string();
                }
                text + &m.build.to_string()
            }
            Move::Minotaur(m) => format!("{}{}{}", m.from, m.to, m.build),
            Move::Pan(m) => format!("{}{}{}", m.from, m.to, m.build),
            Move::Prometheus(m) => match m.pre_build {
                None => format!("{}{}{}", m.from, m.to, m.build),
                Some(pre) => format!("{}{}{}{}", m.from, m.to, m.build, pre),
            },
        }
    }

    /// Parses move text for the given god. The god decides how the square
    /// tokens are interpreted, so it must be supplied by the caller.
    pub fn from_text(god: GodName, text: &str) -> Result<Move, String> {
        match god {
            GodName::Apollo => {
                let [from, to, build] = squares_exact::<3>(text)?;
                Ok(Move::Apollo(ApolloMove::new(from, to, build)))
            }
            GodName::Artemis => match text.len() {
                6 => {
                    let [from, to, build] = squares_exact::<3>(text)?;
                    Ok(Move::Artemis(ArtemisMove::new(from, None, to, build)))
                }
                8 => {
                    let [from, mid, to, build] = squares_exact::<4>(text)?;
                    Ok(Move::Artemis(ArtemisMove::new(from, Some(mid), to, build)))
                }
                n => Err(format!("Artemis move text must be 6 or 8 chars, got {n}")),
            },
            GodName::Athena => {
                let [from, to, build] = squares_exact::<3>(text)?;
                Ok(Move::Athena(AthenaMove::new(from, to, build)))
            }
            GodName::Atlas => {
                let (body, dome) = match text.len() {
                    6 => (text, false),
                    7 if text.ends_with('D') => (&text[..6], true),
                    7 => return Err("Atlas 7th char must be 'D' if present".to_string()),
                    n => return Err(format!("Atlas move text must be 6 or 7 chars, got {n}")),
                };
                let [from, to, build] = squares_exact::<3>(body)?;
                Ok(Move::Atlas(AtlasMove::new(from, to, build, dome)))
            }
            GodName::Demeter => match text.len() {
                6 => {
                    let [from, to, build] = squares_exact::<3>(text)?;
                    Ok(Move::Demeter(DemeterMove::new(from, to, build, None)))
                }
                8 => {
                    let [from, to, build, second] = squares_exact::<4>(text)?;
                    Ok(Move::Demeter(DemeterMove::new(from, to, build, Some(second))))
                }
                n => Err(format!("Demeter move text must be 6 or 8 chars, got {n}")),
            },
            GodName::Hephaestus => match text.len() {
                6 => {
                    let [from, to, build] = squares_exact::<3>(text)?;
                    Ok(Move::Hephaestus(HephaestusMove::new(from, to, build, false)))
                }
                8 => {
                    let [from, to, build, second] = squares_exact::<4>(text)?;
                    if second != build {
                        return Err("Hephaestus must build twice on the same square".to_string());
                    }
                    Ok(Move::Hephaestus(HephaestusMove::new(from, to, build, true)))
                }
                n => Err(format!("Hephaestus move text must be 6 or 8 chars, got {n}")),
            },
            GodName::Hermes => {
                let squares = split_squares(text)?;
                if squares.len() < 2 {
                    return Err("Hermes move text must name at least 2 squares".to_string());
                }
                let from = squares[0];
                let build = squares[squares.len() - 1];
                let path = &squares[1..squares.len() - 1];
                if path.len() > MAX_WALK_LEN {
                    return Err("Hermes walk is longer than the board".to_string());
                }
                Ok(Move::Hermes(HermesMove::new(from, path, build)))
            }
            GodName::Minotaur => {
                let [from, to, build] = squares_exact::<3>(text)?;
                Ok(Move::Minotaur(MinotaurMove::new(from, to, build)))
            }
            GodName::Pan => {
                let [from, to, build] = squares_exact::<3>(text)?;
                Ok(Move::Pan(PanMove::new(from, to, build)))
            }
            GodName::Prometheus => match text.len() {
                6 => {
                    let [from, to, build] = squares_exact::<3>(text)?;
                    Ok(Move::Prometheus(PrometheusMove::new(from, to, build, None)))
                }
                8 => {
                    let [from, to, build, pre] = squares_exact::<4>(text)?;
                    Ok(Move::Prometheus(PrometheusMove::new(from, to, build, Some(pre))))
                }
                n => Err(format!("Prometheus move text must be 6 or 8 chars, got {n}")),
            },
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

fn split_squares(text: &str) -> Result<Vec<Square>, String> {
    if !text.is_ascii() || text.len() % 2 != 0 {
        return Err(format!("Malformed move text: {text}"));
    }
    text.as_bytes()
        .chunks(2)
        .map(|pair| std::str::from_utf8(pair).unwrap_or("").parse::<Square>())
        .collect()
}

fn squares_exact<const N: usize>(text: &str) -> Result<[Square; N], String> {
    let squares = split_squares(text)?;
    squares
        .try_into()
        .map_err(|_| format!("Expected {N} squares in move text: {text}"))
}
