use std::collections::{BTreeSet, HashSet};
use std::iter::once;

use rand::Rng;

use crate::{Grid, GridError, Line, LineView, Offset, Position, Result, normalise};

/// Conflict-aware placement
///
/// [`Grid::add`] only guarantees letter agreement. The methods here refuse
/// placements that would merge entries into unintended third ones: a new cell
/// may not touch a filled cell of an unrelated entry (4-neighbour sense), and
/// an entry needs a blank cell or the grid edge directly before its first and
/// after its last letter.
impl Grid {
    /// Whether writing at `pos` would collide with a filled neighbour that
    /// does not belong to one of the `exempt` cells (the entries legitimately
    /// crossing the target line)
    pub(crate) fn conflicts_at(&self, pos: Position, exempt: &BTreeSet<Position>) -> bool {
        Offset::NEUMANN
            .iter()
            .filter_map(|&offset| pos.checked_offset(offset))
            .any(|neighbour| self.letter(neighbour).is_some() && !exempt.contains(&neighbour))
    }

    /// The cells of all entries crossing `line` from the orthogonal axis
    pub fn cross_fields(&self, line: Line) -> BTreeSet<Position> {
        self.view(line)
            .cross_words()
            .into_iter()
            .flat_map(|(_, cells)| cells.iter().copied())
            .collect()
    }

    /// The cells on `line` no new entry may claim: cells of entries already on
    /// this axis, plus the boundary cap directly before and after each
    pub fn reserved_positions(&self, line: Line) -> BTreeSet<Position> {
        let mut reserved = BTreeSet::new();

        for (_, cells) in self.view(line).in_words() {
            reserved.extend(cells.iter().copied());

            if let (Some(&first), Some(&last)) = (cells.first(), cells.last()) {
                let before = match line {
                    Line::Row(_) => first.checked_offset(Offset::LEFT),
                    Line::Col(_) => first.checked_offset(Offset::UP),
                };
                let after = match line {
                    Line::Row(_) => Some(last + Offset::RIGHT),
                    Line::Col(_) => Some(last + Offset::DOWN),
                };

                reserved.extend(before);
                reserved.extend(after.filter(|pos| pos.row < self.rows && pos.col < self.cols));
            }
        }

        reserved
    }

    /// Adds `word` to `line` under the conflict rules
    ///
    /// Like [`add`](Grid::add) the offset is drawn randomly among the viable
    /// ones, weighted by the letters it would reuse; unlike `add`, offsets
    /// that produce phantom intersections or missing end caps are dropped
    /// before the draw.
    pub fn place<R: Rng + ?Sized>(&mut self, word: &str, line: Line, rng: &mut R) -> Result<()> {
        let word = normalise(word);
        if self.contains_word(&word) {
            return Err(GridError::DuplicateWord(word));
        }

        let exempt = self.cross_fields(line);
        let reserved = self.reserved_positions(line);

        let view = self.view(line);
        let len = word.chars().count();

        let mut viable = Vec::new();
        for (offset, agreements) in view.fit_offsets(&word) {
            let positions: Vec<Position> = (0..len).map(|nth| line.position_at(offset + nth)).collect();

            if positions.iter().any(|pos| reserved.contains(pos)) {
                continue;
            }

            // the cell before the first and after the last letter must be
            // blank or off-grid, even when the occupant crosses this line
            let before = (offset > 0).then(|| line.position_at(offset - 1));
            let after = (offset + len < view.len()).then(|| line.position_at(offset + len));
            if before.into_iter().chain(after).any(|cap| self.letter(cap).is_some()) {
                continue;
            }

            if positions.iter().any(|&pos| self.conflicts_at(pos, &exempt)) {
                tracing::debug!("'{word}' at {line}+{offset} would create a phantom intersection");
                continue;
            }

            viable.push((offset, agreements));
        }

        let offset = LineView::pick_weighted(&viable, rng).ok_or_else(|| GridError::NoPosition {
            word: word.clone(),
            line,
        })?;

        self.add_at(&word, line, offset)
    }

    /// Splits `line` into the maximal segments a new entry could occupy
    ///
    /// Cells belonging to on-axis entries, their boundary caps, and cells that
    /// would conflict with unrelated neighbours act as hard separators; the
    /// fragments in between feed the subpart recursion.
    pub fn pattern_segments(&self, line: Line) -> Vec<Vec<Option<char>>> {
        let exempt = self.cross_fields(line);
        let reserved = self.reserved_positions(line);
        let view = self.view(line);

        let mut segments = Vec::new();
        let mut segment = Vec::new();

        for offset in 0..view.len() {
            let pos = line.position_at(offset);

            if reserved.contains(&pos) || self.conflicts_at(pos, &exempt) {
                if !segment.is_empty() {
                    segments.push(std::mem::take(&mut segment));
                }
            } else {
                segment.push(self.letter(pos));
            }
        }
        if !segment.is_empty() {
            segments.push(segment);
        }

        segments
    }

    /// The dictionary patterns a new entry on `line` could satisfy, derived
    /// per [segment](Grid::pattern_segments) and deduplicated
    pub fn placement_regexes(&self, line: Line) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut patterns = Vec::new();

        for segment in self.pattern_segments(line) {
            for part in once(segment.clone()).chain(LineView::subparts(&segment)) {
                let pattern = LineView::regex_of_part(&part);
                if seen.insert(pattern.clone()) {
                    patterns.push(pattern);
                }
            }
        }

        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(3)
    }

    fn two_word_cross() -> Grid {
        let mut grid = Grid::make("DUPA", 4, 4).unwrap();
        grid.place("PEJA", Line::Col(2), &mut rng()).unwrap();

        grid
    }

    #[test]
    fn placement_through_a_crossing_is_allowed() {
        let grid = two_word_cross();

        assert!(grid.contains_word("PEJA"));
        assert_eq!(grid.crossings().len(), 1);
    }

    #[test]
    fn adjacent_parallel_words_are_phantom_intersections() {
        let mut grid = Grid::make("DUPA", 4, 4).unwrap();

        // a row directly under DUPA with no crossing would merge columns
        let err = grid.place("DOG", Line::Row(1), &mut rng()).unwrap_err();
        assert!(matches!(err, GridError::NoPosition { .. }));
    }

    #[test]
    fn crossing_makes_the_neighbouring_row_viable() {
        let mut grid = two_word_cross();

        // row 2 holds the J of PEJA; the only surviving offset runs through
        // it, since starting at column 0 would butt against the J head-on
        grid.place("JA", Line::Row(2), &mut rng()).unwrap();

        let cells = grid.cells_of("JA").unwrap();
        assert!(cells.contains(&Position::new(2, 2)));
        assert!(grid.is_crossing(Position::new(2, 2)));
    }

    #[test]
    fn end_caps_must_be_blank() {
        let grid = Grid::make("PEJA", 5, 5).unwrap();

        // XE down column 1 may not start right under the E of PEJA: the E
        // belongs to a crossing entry (so the neighbour rule would let it
        // through), but it would sit directly before the new entry's head
        let mut rng = rng();
        for _ in 0..32 {
            let mut trial = grid.clone();
            trial.place("XE", Line::Col(1), &mut rng).unwrap();

            let head = trial.cells_of("XE").unwrap().first().copied().unwrap();
            assert!(head.row >= 2, "XE started at {head}, abutting PEJA");
        }
    }

    #[test]
    fn on_axis_entries_and_caps_are_reserved() {
        let grid = two_word_cross();

        let reserved = grid.reserved_positions(Line::Row(0));
        for col in 0..4 {
            assert!(reserved.contains(&Position::new(0, col)));
        }

        // the cap after DUPA falls off-grid, the one before at the edge
        assert_eq!(reserved.len(), 4);
    }

    #[test]
    fn segments_split_at_reserved_and_conflicting_cells() {
        let grid = two_word_cross();

        // row 0 is fully reserved by DUPA
        assert!(grid.pattern_segments(Line::Row(0)).is_empty());

        // row 2 passes through the J of PEJA without other obstacles
        let segments = grid.pattern_segments(Line::Row(2));
        assert_eq!(segments, vec![vec![None, None, Some('J'), None]]);

        // row 1 is hemmed in by DUPA above; only the crossing E survives
        let segments = grid.pattern_segments(Line::Row(1));
        assert_eq!(segments, vec![vec![Some('E')]]);
    }

    #[test]
    fn placement_regexes_are_deduplicated() {
        let grid = two_word_cross();
        let patterns = grid.placement_regexes(Line::Row(1));

        let unique: HashSet<_> = patterns.iter().collect();
        assert_eq!(unique.len(), patterns.len());
    }
}
