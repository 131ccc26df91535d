use std::fmt;

/// A maze coordinate as `(row, column)`, 0-indexed.
pub type Coord = (u16, u16);

/// State of a single maze cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Passable,
    Blocked,
}

impl Tile {
    /// The integer used for this tile in a 0/1 maze matrix.
    pub fn as_digit(self) -> u8 {
        match self {
            Tile::Passable => 0,
            Tile::Blocked => 1,
        }
    }

    /// Inverse of [`Tile::as_digit`]. Any value other than 0 or 1 yields `None`.
    pub fn from_digit(digit: u8) -> Option<Tile> {
        match digit {
            0 => Some(Tile::Passable),
            1 => Some(Tile::Blocked),
            _ => None,
        }
    }

    pub fn is_passable(self) -> bool {
        self == Tile::Passable
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_convention() {
        assert_eq!(Tile::Passable.as_digit(), 0);
        assert_eq!(Tile::Blocked.as_digit(), 1);
        assert_eq!(Tile::from_digit(0), Some(Tile::Passable));
        assert_eq!(Tile::from_digit(1), Some(Tile::Blocked));
        assert_eq!(Tile::from_digit(2), None);
    }
}
