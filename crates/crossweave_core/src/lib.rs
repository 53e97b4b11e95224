#![cfg_attr(docsrs, feature(doc_cfg))]

mod alphabit;
mod error;
mod grid;
mod line;
mod position;
mod word;

pub use alphabit::*;
pub use error::*;
pub use grid::*;
pub use line::*;
pub use position::*;
pub use word::*;

/// Normalises a candidate answer to the single casing used throughout the grid.
pub fn normalise(word: &str) -> String {
    word.to_ascii_uppercase()
}
