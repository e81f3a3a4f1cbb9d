use crate::error::GridError;
use core::fmt;
use std::str::FromStr;

/// A cell position given as (row, col). Signed so that the neighbours of edge cells can be
/// formed and then rejected by a bounds check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The 4-neighbourhood in the fixed order up, down, left, right. Points may be out of bounds.
    pub fn neumann_neighborhood(&self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row + 1, self.col),
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row, self.col + 1),
        ]
    }

    /// True if the two coordinates are exactly one orthogonal step apart.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"row,col"`, tolerating whitespace around either number and optional parentheses.
impl FromStr for Coord {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GridError::ParseCoord(s.to_owned());
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(trimmed);
        let (row, col) = inner.split_once(',').ok_or_else(malformed)?;
        let row = row.trim().parse::<i32>().map_err(|_| malformed())?;
        let col = col.trim().parse::<i32>().map_err(|_| malformed())?;
        Ok(Coord::new(row, col))
    }
}
