//! Built-in sample levels
//!
//! Rows are concatenated without separators; the decoder learns the width
//! from the top border.

/// 6x6 playfield, exit on the right edge of row 3
pub const CLASSIC: &str = concat!(
    "+------+",
    "|      |",
    "|  C T |",
    "|c    CX",
    "|t     |",
    "|CCC c |",
    "|    c |",
    "+------+"
);

/// 5x4 playfield, exit on the right edge of row 3
pub const SMALL: &str = concat!(
    "+-----+",
    "|     |",
    "|  C T|",
    "|c    X",
    "|t    |",
    "+-----+"
);

/// Name/level pairs for lookup by name
pub const ALL: &[(&str, &str)] = &[("classic", CLASSIC), ("small", SMALL)];

/// Look up a built-in level by name (case-insensitive)
pub fn by_name(name: &str) -> Option<&'static str> {
    ALL.iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, level)| level)
}
