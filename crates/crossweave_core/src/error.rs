use crate::{Line, Position};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum GridError {
    #[error("Position {pos} lies outside the {rows}x{cols} grid")]
    TooLarge {
        pos: Position,
        rows: usize,
        cols: usize,
    },

    #[error("Cell {pos} already holds '{found}' (tried to write '{tried}')")]
    ConflictingLetter {
        pos: Position,
        found: char,
        tried: char,
    },

    #[error("No offset in {line} can take '{word}'")]
    NoPosition { word: String, line: Line },

    #[error("'{0}' is already placed in the grid")]
    DuplicateWord(String),

    #[error("'{0}' is not placed in the grid")]
    UnknownWord(String),

    #[error("No entry '{0}' to derive a word handle from")]
    WordNotFound(String),
}

pub type Result<T> = core::result::Result<T, GridError>;
