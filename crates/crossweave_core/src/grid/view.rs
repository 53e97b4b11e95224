use std::collections::{BTreeSet, HashSet};
use std::iter::once;
use std::ops::Range;

use rand::Rng;

use crate::{Grid, GridError, Line, Position, Result};

impl Grid {
    /// Borrows a [line](Line) of the grid as a [`LineView`]
    pub fn view(&self, line: Line) -> LineView<'_> {
        LineView { grid: self, line }
    }
}

/// Read-only view onto one row or column of a [`Grid`]
///
/// The view is the unit the candidate machinery works on: it enumerates the
/// line's letters, derives the regex patterns that interrogate the dictionary
/// and locates offsets where a candidate answer fits the letters already
/// present. A view borrows the grid and is invalidated by rotation.
#[derive(Debug, Clone, Copy)]
pub struct LineView<'g> {
    grid: &'g Grid,
    line: Line,
}

impl<'g> LineView<'g> {
    pub fn line(&self) -> Line {
        self.line
    }

    /// Length of the line: the grid width for rows, the height for columns
    pub fn len(&self) -> usize {
        match self.line {
            Line::Row(_) => self.grid.cols(),
            Line::Col(_) => self.grid.rows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The letters along the line, `None` for empty cells
    pub fn cells(&self) -> Vec<Option<char>> {
        (0..self.len())
            .map(|offset| self.grid.letter(self.line.position_at(offset)))
            .collect()
    }

    /// Number of filled cells on the line
    pub fn filled(&self) -> usize {
        self.cells().iter().flatten().count()
    }

    /// Maximal runs of empty cells, as half-open offset ranges
    pub fn empty_slices(&self) -> Vec<Range<usize>> {
        Self::empty_runs(&self.cells())
    }

    pub(crate) fn empty_runs(cells: &[Option<char>]) -> Vec<Range<usize>> {
        let mut runs = Vec::new();
        let mut begin = None;

        for (nth, cell) in cells.iter().enumerate() {
            match (cell, begin) {
                (None, None) => begin = Some(nth),
                (Some(_), Some(start)) => {
                    runs.push(start..nth);
                    begin = None;
                }
                _ => {}
            }
        }

        if let Some(start) = begin {
            runs.push(start..cells.len());
        }

        runs
    }

    /// Interrogation windows of a line fragment, largest empty run first
    ///
    /// Each recursion step locates the largest empty run and emits the window
    /// ending with it and the window starting with it, then recurses into the
    /// fragments on either side. Slack inherited from an enclosing fragment is
    /// carried along as padding, so every window still describes how much room
    /// a match has on both sides.
    pub(crate) fn subparts(cells: &[Option<char>]) -> Vec<Vec<Option<char>>> {
        let mut parts = Vec::new();
        Self::subparts_into(cells, 0, 0, &mut parts);

        parts
    }

    fn subparts_into(
        cells: &[Option<char>],
        left_pad: usize,
        right_pad: usize,
        parts: &mut Vec<Vec<Option<char>>>,
    ) {
        // first-largest wins on ties, so earlier fragments stay stable
        let mut biggest: Option<Range<usize>> = None;
        for run in Self::empty_runs(cells) {
            if biggest.as_ref().is_none_or(|found| run.len() > found.len()) {
                biggest = Some(run);
            }
        }
        let Some(biggest) = biggest else {
            return;
        };

        let mut left = vec![None; left_pad];
        left.extend_from_slice(&cells[..biggest.end]);
        parts.push(left);

        let mut right = cells[biggest.start..].to_vec();
        right.extend(std::iter::repeat_n(None, right_pad));
        parts.push(right);

        Self::subparts_into(&cells[..biggest.start], left_pad, biggest.len(), parts);
        Self::subparts_into(&cells[biggest.end..], biggest.len(), right_pad, parts);
    }

    /// Builds the anchored pattern describing a window of cells
    ///
    /// Leading and trailing empty cells turn into bounded slack (`.{0,n}`),
    /// inner empty runs into exact gaps (`.{n}`), letters into escaped
    /// literals.
    pub(crate) fn regex_of_part(part: &[Option<char>]) -> String {
        let mut tokens: Vec<String> = Vec::new();
        let mut slack_before = 0;
        let mut run = 0;

        for cell in part {
            match cell {
                None => run += 1,
                Some(letter) => {
                    if tokens.is_empty() {
                        slack_before = run;
                    } else if run > 0 {
                        tokens.push(format!(".{{{run}}}"));
                    }
                    run = 0;

                    tokens.push(Self::escape_letter(*letter));
                }
            }
        }
        let slack_after = run;

        let mut pattern = String::from("^");
        if slack_before > 0 {
            pattern.push_str(&format!(".{{0,{slack_before}}}"));
        }
        for token in tokens {
            pattern.push_str(&token);
        }
        if slack_after > 0 {
            pattern.push_str(&format!(".{{0,{slack_after}}}"));
        }
        pattern.push('$');

        pattern
    }

    fn escape_letter(letter: char) -> String {
        if letter.is_ascii_alphanumeric() {
            letter.to_string()
        } else {
            format!("\\{letter}")
        }
    }

    /// The dictionary patterns for this line, most constrained first
    ///
    /// The whole line is interrogated first (it carries every known letter and
    /// is therefore the most selective query), followed by the
    /// [subpart](Self::subparts) windows. Patterns are deduplicated.
    pub fn regexes(&self) -> Vec<String> {
        let cells = self.cells();

        let mut seen = HashSet::new();
        let mut patterns = Vec::new();

        for part in once(cells.clone()).chain(Self::subparts(&cells)) {
            let pattern = Self::regex_of_part(&part);
            if seen.insert(pattern.clone()) {
                patterns.push(pattern);
            }
        }

        patterns
    }

    /// Offsets where `word` is compatible with the letters on the line,
    /// paired with how many existing letters it would reuse
    pub fn fit_offsets(&self, word: &str) -> Vec<(usize, usize)> {
        let cells = self.cells();
        let letters: Vec<char> = word.chars().collect();

        if letters.is_empty() || letters.len() > cells.len() {
            return Vec::new();
        }

        (0..=cells.len() - letters.len())
            .filter_map(|offset| {
                let mut agreements = 0;

                for (nth, &letter) in letters.iter().enumerate() {
                    match cells[offset + nth] {
                        None => {}
                        Some(found) if found == letter => agreements += 1,
                        Some(_) => return None,
                    }
                }

                Some((offset, agreements))
            })
            .collect()
    }

    /// Picks an offset for `word` among the compatible ones that stay clear of
    /// [reserved](Grid::reserved_positions) cells, weighted by one plus the
    /// number of letters the placement would reuse
    pub fn pos_of_word<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> Result<usize> {
        let reserved = self.grid.reserved_positions(self.line);
        let len = word.chars().count();

        let options: Vec<_> = self
            .fit_offsets(word)
            .into_iter()
            .filter(|&(offset, _)| {
                (0..len).all(|nth| !reserved.contains(&self.line.position_at(offset + nth)))
            })
            .collect();

        Self::pick_weighted(&options, rng).ok_or_else(|| GridError::NoPosition {
            word: word.to_string(),
            line: self.line,
        })
    }

    pub(crate) fn pick_weighted<R: Rng + ?Sized>(
        options: &[(usize, usize)],
        rng: &mut R,
    ) -> Option<usize> {
        if options.is_empty() {
            return None;
        }

        let total: usize = options.iter().map(|&(_, agreements)| agreements + 1).sum();
        let mut ticket = rng.gen_range(0..total);

        for &(offset, agreements) in options {
            let weight = agreements + 1;
            if ticket < weight {
                return Some(offset);
            }
            ticket -= weight;
        }

        unreachable!("tickets are drawn below the total weight")
    }

    fn covers(&self, pos: Position) -> bool {
        match self.line {
            Line::Row(row) => pos.row == row,
            Line::Col(col) => pos.col == col,
        }
    }

    /// Entries on the orthogonal axis that cross this line
    pub fn cross_words(&self) -> Vec<(&'g str, &'g BTreeSet<Position>)> {
        let words = match self.line {
            Line::Row(_) => self.grid.words_down(),
            Line::Col(_) => self.grid.words_across(),
        };

        words
            .iter()
            .filter(|(_, cells)| cells.iter().any(|&pos| self.covers(pos)))
            .map(|(word, cells)| (word.as_str(), cells))
            .collect()
    }

    /// Entries on this line's own axis that lie on it
    pub fn in_words(&self) -> Vec<(&'g str, &'g BTreeSet<Position>)> {
        let words = match self.line {
            Line::Row(_) => self.grid.words_across(),
            Line::Col(_) => self.grid.words_down(),
        };

        words
            .iter()
            .filter(|(_, cells)| cells.iter().all(|&pos| self.covers(pos)))
            .map(|(word, cells)| (word.as_str(), cells))
            .collect()
    }

    /// Entries contained in this line together with their crossing counts
    pub fn removable_words(&self) -> Vec<(&'g str, usize)> {
        self.in_words()
            .into_iter()
            .map(|(word, cells)| {
                let crossings = cells
                    .iter()
                    .filter(|&&pos| self.grid.is_crossing(pos))
                    .count();

                (word, crossings)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rstest::rstest;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    fn two_word_cross() -> Grid {
        let mut grid = Grid::make("DUPA", 4, 4).unwrap();
        grid.add("PEJA", Line::Col(2), &mut rng()).unwrap();

        grid
    }

    #[test]
    fn cells_follow_the_axis() {
        let grid = two_word_cross();

        let row = grid.view(Line::Row(0));
        assert_eq!(row.cells(), vec![Some('D'), Some('U'), Some('P'), Some('A')]);

        let col = grid.view(Line::Col(2));
        assert_eq!(col.cells(), vec![Some('P'), Some('E'), Some('J'), Some('A')]);

        let empty = grid.view(Line::Col(0));
        assert_eq!(empty.cells(), vec![Some('D'), None, None, None]);
    }

    #[rstest]
    #[case::leading(vec![None, Some('A'), Some('B')], vec![0..1])]
    #[case::trailing(vec![Some('A'), None, None], vec![1..3])]
    #[case::split(vec![None, Some('A'), None, None, Some('B'), None], vec![0..1, 2..4, 5..6])]
    #[case::full(vec![Some('A'), Some('B')], vec![])]
    fn empty_runs_are_maximal(
        #[case] cells: Vec<Option<char>>,
        #[case] expected: Vec<Range<usize>>,
    ) {
        assert_eq!(LineView::empty_runs(&cells), expected);
    }

    #[test]
    fn regexes_interrogate_the_most_constrained_window_first() {
        let cells = vec![
            None,
            Some('A'),
            None,
            None,
            None,
            Some('B'),
            None,
            Some('S'),
            None,
        ];
        let mut grid = Grid::empty(9, 1);
        for (col, cell) in cells.iter().enumerate() {
            if let Some(letter) = cell {
                grid.add_letter(Position::new(0, col), *letter).unwrap();
            }
        }

        let patterns = grid.view(Line::Row(0)).regexes();

        assert_eq!(patterns[0], "^.{0,1}A.{3}B.{1}S.{0,1}$");
        assert!(patterns.contains(&"^.{0,1}A.{0,3}$".to_string()));
        assert!(patterns.contains(&"^.{0,3}B.{1}S.{0,1}$".to_string()));

        // deduplicated
        let unique: HashSet<_> = patterns.iter().collect();
        assert_eq!(unique.len(), patterns.len());
    }

    #[test]
    fn every_line_satisfies_its_own_regexes() {
        let grid = two_word_cross();

        for line in grid.lines() {
            let view = grid.view(line);
            let chars: Vec<char> = view
                .cells()
                .into_iter()
                .map(|cell| cell.unwrap_or('X'))
                .collect();

            let patterns = view.regexes();

            // the first pattern interrogates the whole line
            assert!(
                regex_lite(&patterns[0]).matches_window(&chars),
                "line {line} failed its full pattern {}",
                patterns[0]
            );

            // every other pattern describes a contiguous window of the line
            for pattern in &patterns {
                let regex = regex_lite(pattern);
                let found = (0..=chars.len()).any(|start| {
                    (start..=chars.len()).any(|end| regex.matches_window(&chars[start..end]))
                });

                assert!(found, "no window of line {line} satisfies {pattern}");
            }
        }
    }

    /// Tiny matcher for the anchored `^.{{a,b}}LIT.{{n}}$` patterns the view
    /// produces, to keep the core free of a regex dependency
    fn regex_lite(pattern: &str) -> Matcher {
        Matcher(pattern.to_string())
    }

    struct Matcher(String);

    impl Matcher {
        fn matches_window(&self, chars: &[char]) -> bool {
            let pattern = self.0.trim_start_matches('^').trim_end_matches('$');

            Self::matches(pattern, chars)
        }

        fn matches(pattern: &str, text: &[char]) -> bool {
            if pattern.is_empty() {
                return text.is_empty();
            }

            if let Some(rest) = pattern.strip_prefix(".{") {
                let (spec, rest) = rest.split_once('}').expect("balanced braces");

                let (low, high) = match spec.split_once(',') {
                    Some((low, high)) => (low.parse().unwrap(), high.parse().unwrap()),
                    None => {
                        let exact: usize = spec.parse().unwrap();
                        (exact, exact)
                    }
                };

                return (low..=high.min(text.len()))
                    .any(|taken| Self::matches(rest, &text[taken..]));
            }

            let mut pattern_chars = pattern.chars();
            let expected = pattern_chars.next().unwrap();

            match text.first() {
                Some(&found) if found == expected => {
                    Self::matches(pattern_chars.as_str(), &text[1..])
                }
                _ => false,
            }
        }
    }

    #[test]
    fn fit_offsets_respect_existing_letters() {
        let grid = two_word_cross();
        let view = grid.view(Line::Row(1));

        // row 1 holds E at column 2
        let offsets = view.fit_offsets("EX");
        assert_eq!(offsets, vec![(0, 0), (2, 1)]);

        let offsets = view.fit_offsets("AX");
        assert_eq!(offsets, vec![(0, 0)]);
    }

    #[test]
    fn pos_of_word_rejects_words_longer_than_the_line() {
        let grid = two_word_cross();
        let view = grid.view(Line::Row(1));

        let err = view.pos_of_word("TOOLONGWORD", &mut rng()).unwrap_err();
        assert!(matches!(err, GridError::NoPosition { .. }));
    }

    #[test]
    fn pos_of_word_prefers_agreeing_offsets() {
        let grid = two_word_cross();
        let view = grid.view(Line::Row(1));

        // offset 2 reuses the E of PEJA and carries weight 2 of 3; with enough
        // draws both offsets have to show up
        let mut rng = rng();
        let mut seen = HashSet::new();
        for _ in 0..64 {
            seen.insert(view.pos_of_word("EX", &mut rng).unwrap());
        }

        assert_eq!(seen, HashSet::from([0, 2]));
    }

    #[test]
    fn cross_and_in_words_split_by_axis() {
        let grid = two_word_cross();

        let row = grid.view(Line::Row(0));
        let cross: Vec<_> = row.cross_words().iter().map(|(word, _)| *word).collect();
        assert_eq!(cross, vec!["PEJA"]);

        let in_words: Vec<_> = row.in_words().iter().map(|(word, _)| *word).collect();
        assert_eq!(in_words, vec!["DUPA"]);

        let col = grid.view(Line::Col(2));
        let cross: Vec<_> = col.cross_words().iter().map(|(word, _)| *word).collect();
        assert_eq!(cross, vec!["DUPA"]);
    }

    #[test]
    fn removable_words_count_crossings() {
        let grid = two_word_cross();

        let removable = grid.view(Line::Row(0)).removable_words();
        assert_eq!(removable, vec![("DUPA", 1)]);
    }
}
