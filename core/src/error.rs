use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid rows are missing or of unequal length")]
    InvalidGridShape,
    #[error("Word list has no entries")]
    EmptyWordList,
    #[error("Word does not fold to plain letters")]
    InvalidWord,
    #[error("Word is not one of the puzzle targets")]
    UnknownWord,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
