use crate::coord::Coord;

/// Errors surfaced by grid construction, grid queries and search validation.
///
/// An unreachable goal is not an error; it is reported as
/// [PathResult::NotFound](crate::PathResult::NotFound).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("coordinate {coord} is outside the {rows}x{cols} grid")]
    InvalidCoordinate { coord: Coord, rows: usize, cols: usize },

    #[error("cell {0} is blocked")]
    Impassable(Coord),

    #[error("cannot place {requested} water cells, only {available} free cells remain")]
    InsufficientFreeCells { requested: usize, available: usize },

    #[error("malformed coordinate {0:?}, expected \"row,col\"")]
    ParseCoord(String),
}
