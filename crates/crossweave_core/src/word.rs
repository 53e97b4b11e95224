use std::collections::BTreeSet;

use crate::{Grid, GridError, Line, Position, Result, normalise};

/// Projection of one placed entry and the cells it occupies
///
/// A handle borrows the grid read-only and is derived on demand; removing the
/// entry invalidates it. All methods are pure views.
#[derive(Debug, Clone, Copy)]
pub struct WordRef<'g> {
    grid: &'g Grid,
    line: Line,
    text: &'g str,
    cells: &'g BTreeSet<Position>,
}

impl<'g> WordRef<'g> {
    /// Resolves a placed answer to its handle, failing with
    /// [`WordNotFound`](GridError::WordNotFound) when the grid does not hold it
    pub fn from_grid(grid: &'g Grid, word: &str) -> Result<Self> {
        let word = normalise(word);

        let (text, cells, line) =
            if let Some((text, cells)) = grid.words_across().get_key_value(&word) {
                let first = cells.first().ok_or(GridError::WordNotFound(word.clone()))?;
                (text, cells, Line::Row(first.row))
            } else if let Some((text, cells)) = grid.words_down().get_key_value(&word) {
                let first = cells.first().ok_or(GridError::WordNotFound(word.clone()))?;
                (text, cells, Line::Col(first.col))
            } else {
                return Err(GridError::WordNotFound(word));
            };

        Ok(Self {
            grid,
            line,
            text: text.as_str(),
            cells,
        })
    }

    pub fn text(&self) -> &'g str {
        self.text
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn cells(&self) -> &'g BTreeSet<Position> {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The cells where this entry crosses an orthogonal one
    pub fn crossings(&self) -> impl Iterator<Item = Position> + 'g {
        let grid = self.grid;

        self.cells
            .iter()
            .copied()
            .filter(move |&pos| grid.is_crossing(pos))
    }

    /// The orthogonal lines running through this entry's cells
    pub fn cross_lines(&self) -> impl Iterator<Item = Line> + 'g {
        let line = self.line;

        self.cells
            .iter()
            .map(move |&pos| line.orthogonal(line.offset_of(pos)))
    }

    /// The orthogonal entries sharing a cell with this one
    pub fn cross_words(&self) -> Vec<WordRef<'g>> {
        self.grid
            .view(self.line)
            .cross_words()
            .into_iter()
            .filter(|(_, cells)| !self.cells.is_disjoint(cells))
            .map(|(text, _)| {
                WordRef::from_grid(self.grid, text).expect("crossing entry is placed")
            })
            .collect()
    }
}
