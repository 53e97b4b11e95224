use std::fmt;

use crate::{Grid, Position};

/// Default glyph for empty cells in the canonical text form
pub const EMPTY_CELL: char = ':';

impl Grid {
    /// Canonical text form: one string per row, empty cells as the given
    /// glyph, rows joined by newlines without a trailing separator
    pub fn as_text_with(&self, empty: char) -> String {
        (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| self.letter(Position::new(row, col)).unwrap_or(empty))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn as_text(&self) -> String {
        self.as_text_with(EMPTY_CELL)
    }

    /// Renders the grid as an [exolve](https://github.com/viresh-ratnakar/exolve)
    /// puzzle skeleton
    pub fn as_exolve(&self) -> String {
        let grid = (0..self.rows())
            .map(|row| {
                (0..self.cols())
                    .map(|col| match self.letter(Position::new(row, col)) {
                        Some(letter) => exolve_cell(letter),
                        None => ".".to_string(),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n    ");

        format!(
            "exolve-begin\n  \
               exolve-id: crossweave\n  \
               exolve-title: Crossweave\n  \
               exolve-width: {}\n  \
               exolve-height: {}\n  \
               exolve-grid:\n    \
               {}\n\
             exolve-end\n",
            self.cols(),
            self.rows(),
            grid,
        )
    }
}

/// Exolve escapes spaces and dashes with a trailing `!`
fn exolve_cell(letter: char) -> String {
    match letter {
        ' ' | '-' => format!("{letter}!"),
        _ => letter.to_string(),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}
