mod place;
mod text;
mod view;

pub use view::*;

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use crate::{GridError, Line, Position, Result, normalise};

/// A bounded crossword surface under construction
///
/// The grid tracks a sparse letter map, the placed across and down entries
/// (keyed by answer text, each with the set of cells it occupies) and the set
/// of crossing cells. Entries are delimited by the grid edges; there are no
/// blocked cells.
///
/// Every cell moves through at most three states: empty, filled with a letter,
/// and crossed (a second entry confirmed the same letter). A filled cell never
/// changes its letter; writing a different one fails with
/// [`ConflictingLetter`](GridError::ConflictingLetter).
///
/// [`add`](Grid::add) applies the raw placement rules only; the stricter
/// conflict-aware rules live in [`place`](Grid::place).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    letters: BTreeMap<Position, char>,
    across: BTreeMap<String, BTreeSet<Position>>,
    down: BTreeMap<String, BTreeSet<Position>>,
    crossings: BTreeSet<Position>,
}

/// # Constructors
impl Grid {
    /// Constructs an empty grid of the given width and height
    pub fn empty(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            letters: BTreeMap::new(),
            across: BTreeMap::new(),
            down: BTreeMap::new(),
            crossings: BTreeSet::new(),
        }
    }

    /// Constructs a grid with `word` placed as an across entry in the top-left
    /// corner. Fails with [`TooLarge`](GridError::TooLarge) when the word does
    /// not fit the width.
    pub fn make(word: &str, cols: usize, rows: usize) -> Result<Self> {
        let mut grid = Self::empty(cols, rows);
        grid.add_at(&normalise(word), Line::Row(0), 0)?;

        Ok(grid)
    }
}

/// # Getters
impl Grid {
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells, filled or not
    pub fn size(&self) -> usize {
        self.cols * self.rows
    }

    pub fn letter(&self, pos: Position) -> Option<char> {
        self.letters.get(&pos).copied()
    }

    pub fn letters(&self) -> &BTreeMap<Position, char> {
        &self.letters
    }

    /// Number of filled cells
    pub fn filled(&self) -> usize {
        self.letters.len()
    }

    pub fn crossings(&self) -> &BTreeSet<Position> {
        &self.crossings
    }

    pub fn is_crossing(&self, pos: Position) -> bool {
        self.crossings.contains(&pos)
    }

    pub fn words_across(&self) -> &BTreeMap<String, BTreeSet<Position>> {
        &self.across
    }

    pub fn words_down(&self) -> &BTreeMap<String, BTreeSet<Position>> {
        &self.down
    }

    pub fn word_count(&self) -> usize {
        self.across.len() + self.down.len()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        let word = normalise(word);

        self.across.contains_key(&word) || self.down.contains_key(&word)
    }

    /// Iterates the answer texts of all placed entries, across before down
    pub fn word_names(&self) -> impl Iterator<Item = &String> {
        self.across.keys().chain(self.down.keys())
    }

    /// The cells occupied by a placed entry
    pub fn cells_of(&self, word: &str) -> Option<&BTreeSet<Position>> {
        let word = normalise(word);

        self.across.get(&word).or_else(|| self.down.get(&word))
    }

    /// The line a placed entry lies on
    pub fn line_of(&self, word: &str) -> Option<Line> {
        let word = normalise(word);

        if let Some(cells) = self.across.get(&word) {
            let first = cells.first()?;
            return Some(Line::Row(first.row));
        }
        if let Some(cells) = self.down.get(&word) {
            let first = cells.first()?;
            return Some(Line::Col(first.col));
        }

        None
    }

    /// Iterates the entries covering a cell (at most one per axis)
    pub fn words_at(&self, pos: Position) -> impl Iterator<Item = &String> {
        self.across
            .iter()
            .chain(self.down.iter())
            .filter(move |(_, cells)| cells.contains(&pos))
            .map(|(word, _)| word)
    }

    /// Iterates all line identifiers of the grid, rows before columns
    pub fn lines(&self) -> impl Iterator<Item = Line> + use<> {
        let rows = (0..self.rows).map(Line::Row);
        let cols = (0..self.cols).map(Line::Col);

        rows.chain(cols)
    }
}

/// # Mutation
impl Grid {
    fn check_bounds(&self, pos: Position) -> Result<()> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return Err(GridError::TooLarge {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(())
    }

    /// Writes a single letter
    ///
    /// An empty cell is filled, a cell already holding the same letter becomes
    /// a crossing, and any other letter is refused.
    pub fn add_letter(&mut self, pos: Position, letter: char) -> Result<()> {
        self.check_bounds(pos)?;

        match self.letters.get(&pos) {
            None => {
                self.letters.insert(pos, letter);
            }
            Some(&found) if found == letter => {
                self.crossings.insert(pos);
            }
            Some(&found) => {
                return Err(GridError::ConflictingLetter {
                    pos,
                    found,
                    tried: letter,
                });
            }
        }

        Ok(())
    }

    /// Adds a word to a line, picking a compatible offset at random (weighted
    /// towards offsets that reuse more existing letters)
    ///
    /// The write is atomic: when any cell refuses its letter, the previous
    /// letter and crossing state is restored before the error surfaces.
    pub fn add<R: Rng + ?Sized>(&mut self, word: &str, line: Line, rng: &mut R) -> Result<()> {
        let word = normalise(word);
        if self.contains_word(&word) {
            return Err(GridError::DuplicateWord(word));
        }

        let offset = self.view(line).pos_of_word(&word, rng)?;
        self.add_at(&word, line, offset)
    }

    /// Writes `word` starting at `offset` along `line`, rolling back on failure
    pub(crate) fn add_at(&mut self, word: &str, line: Line, offset: usize) -> Result<()> {
        if self.contains_word(word) {
            return Err(GridError::DuplicateWord(word.to_string()));
        }

        let old_letters = self.letters.clone();
        let old_crossings = self.crossings.clone();

        let mut cells = BTreeSet::new();
        for (nth, letter) in word.chars().enumerate() {
            let pos = line.position_at(offset + nth);

            if let Err(err) = self.add_letter(pos, letter) {
                self.letters = old_letters;
                self.crossings = old_crossings;
                return Err(err);
            }

            cells.insert(pos);
        }

        let words = match line {
            Line::Row(_) => &mut self.across,
            Line::Col(_) => &mut self.down,
        };
        words.insert(word.to_string(), cells);

        Ok(())
    }

    /// Removes a placed entry
    ///
    /// Cells shared with an orthogonal entry keep their letter and stop being
    /// crossings; all other cells of the entry are cleared. Removing the final
    /// remaining entry is refused and reported as `Ok(false)`.
    pub fn remove(&mut self, word: &str) -> Result<bool> {
        let word = normalise(word);

        let cells = match self.across.get(&word).or_else(|| self.down.get(&word)) {
            Some(cells) => cells.clone(),
            None => return Err(GridError::UnknownWord(word)),
        };

        if self.word_count() == 1 {
            tracing::debug!("Refusing to remove '{word}', it is the last entry");
            return Ok(false);
        }

        self.across.remove(&word);
        self.down.remove(&word);

        for pos in cells {
            // a crossing cell still carries the orthogonal entry's letter
            if !self.crossings.remove(&pos) {
                self.letters.remove(&pos);
            }
        }

        Ok(true)
    }

    /// Transposes the grid in place: rows become columns, across entries
    /// become down entries and vice versa
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.cols, &mut self.rows);

        self.letters = self
            .letters
            .iter()
            .map(|(pos, &letter)| (pos.transposed(), letter))
            .collect();

        self.crossings = self.crossings.iter().map(Position::transposed).collect();

        let transpose = |words: &BTreeMap<String, BTreeSet<Position>>| -> BTreeMap<String, BTreeSet<Position>> {
            words
                .iter()
                .map(|(word, cells)| {
                    let cells = cells.iter().map(Position::transposed).collect();
                    (word.clone(), cells)
                })
                .collect()
        };

        let across = transpose(&self.down);
        let down = transpose(&self.across);

        self.across = across;
        self.down = down;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    /// 4x4 grid holding DUPA across row 0 and PEJA down column 2
    fn two_word_cross() -> Grid {
        let mut grid = Grid::make("DUPA", 4, 4).unwrap();
        grid.add("PEJA", Line::Col(2), &mut rng()).unwrap();

        grid
    }

    #[test]
    fn make_places_the_start_word() {
        let grid = Grid::make("DUPA", 4, 4).unwrap();

        assert_eq!(grid.letter(Position::new(0, 0)), Some('D'));
        assert_eq!(grid.letter(Position::new(0, 3)), Some('A'));
        assert_eq!(grid.word_count(), 1);
        assert!(grid.crossings().is_empty());
    }

    #[test]
    fn make_rejects_too_long_words() {
        let err = Grid::make("DUPAB", 4, 4).unwrap_err();

        assert!(matches!(err, GridError::TooLarge { .. }));
    }

    #[test]
    fn crossing_entries_agree() {
        let grid = two_word_cross();

        assert_eq!(grid.letter(Position::new(0, 2)), Some('P'));
        assert_eq!(grid.letter(Position::new(1, 2)), Some('E'));
        assert_eq!(grid.letter(Position::new(2, 2)), Some('J'));
        assert_eq!(grid.letter(Position::new(3, 2)), Some('A'));

        let crossings: Vec<_> = grid.crossings().iter().copied().collect();
        assert_eq!(crossings, vec![Position::new(0, 2)]);
    }

    #[test]
    fn conflicting_insertion_leaves_the_grid_untouched() {
        let mut grid = two_word_cross();
        let before = grid.clone();

        let err = grid.add("DOG", Line::Row(0), &mut rng()).unwrap_err();

        assert!(matches!(
            err,
            GridError::NoPosition { .. } | GridError::ConflictingLetter { .. }
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn duplicate_insertion_is_refused() {
        let mut grid = two_word_cross();
        let before = grid.clone();

        let err = grid.add("DUPA", Line::Col(0), &mut rng()).unwrap_err();

        assert_eq!(err, GridError::DuplicateWord("DUPA".to_string()));
        assert_eq!(grid, before);
    }

    #[test]
    fn add_then_remove_restores_the_grid() {
        let mut grid = Grid::make("DUPA", 4, 4).unwrap();
        let before = grid.clone();

        grid.add("PEJA", Line::Col(2), &mut rng()).unwrap();
        assert!(grid.remove("PEJA").unwrap());

        assert_eq!(grid, before);
    }

    #[test]
    fn remove_keeps_crossing_letters() {
        let mut grid = two_word_cross();

        assert!(grid.remove("DUPA").unwrap());

        // the crossing cell still serves PEJA, the rest of DUPA is gone
        assert_eq!(grid.letter(Position::new(0, 2)), Some('P'));
        assert_eq!(grid.letter(Position::new(0, 0)), None);
        assert_eq!(grid.letter(Position::new(0, 1)), None);
        assert_eq!(grid.letter(Position::new(0, 3)), None);
        assert!(grid.crossings().is_empty());
        assert_eq!(grid.word_count(), 1);
    }

    #[test]
    fn remove_refuses_the_last_entry() {
        let mut grid = Grid::make("DUPA", 4, 4).unwrap();
        let before = grid.clone();

        assert!(!grid.remove("DUPA").unwrap());
        assert_eq!(grid, before);
    }

    #[test]
    fn failed_insertions_roll_back_letters_and_crossings() {
        let mut grid = two_word_cross();
        let before = grid.clone();

        // offset 1 on row 2 writes the J, then trips over PEJA's J at column 2
        let err = grid.add_at("JAB", Line::Row(2), 1).unwrap_err();

        assert!(matches!(err, GridError::ConflictingLetter { .. }));
        assert_eq!(grid, before);
    }

    #[test]
    fn remove_unknown_word_fails() {
        let mut grid = two_word_cross();

        let err = grid.remove("TACO").unwrap_err();
        assert_eq!(err, GridError::UnknownWord("TACO".to_string()));
    }

    #[test]
    fn rotate_twice_is_identity() {
        let mut grid = two_word_cross();
        let before = grid.clone();

        grid.rotate();
        grid.rotate();

        assert_eq!(grid, before);
    }

    #[test]
    fn rotate_transposes_entries() {
        let mut grid = two_word_cross();
        grid.rotate();

        assert!(grid.words_down().contains_key("DUPA"));
        assert!(grid.words_across().contains_key("PEJA"));
        assert_eq!(grid.letter(Position::new(2, 0)), Some('P'));
        assert_eq!(grid.crossings().iter().next(), Some(&Position::new(2, 0)));
    }

    #[test]
    fn copies_do_not_share_state() {
        let grid = two_word_cross();
        let mut copy = grid.clone();

        copy.remove("DUPA").unwrap();

        assert!(grid.contains_word("DUPA"));
        assert_eq!(grid.word_count(), 2);
    }

    #[test]
    fn crossings_match_entry_intersections() {
        let grid = two_word_cross();

        for &pos in grid.crossings() {
            let across = grid.words_across().values().any(|cells| cells.contains(&pos));
            let down = grid.words_down().values().any(|cells| cells.contains(&pos));

            assert!(across && down);
        }

        // and nothing else intersects
        for (_, across_cells) in grid.words_across() {
            for (_, down_cells) in grid.words_down() {
                for pos in across_cells.intersection(down_cells) {
                    assert!(grid.is_crossing(*pos));
                }
            }
        }
    }
}
