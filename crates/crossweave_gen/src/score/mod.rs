mod local;

pub use local::*;

use crossweave_core::{Grid, LineView, Position, WordRef};

/// Per-field, per-word and per-line goal contributions
///
/// The three hooks feed the [`LocalScores`] evaluator; everything else
/// (smoothing, caching, worst-first ordering) is shared. Low values mark
/// the spots most in need of work.
pub trait Scorer {
    /// Goal contribution of a single cell
    fn field_goal(&self, grid: &Grid, pos: Position) -> f64;

    /// Goal of a placed entry
    fn word_goal(&self, word: &WordRef<'_>) -> f64;

    /// Goal of a full row or column
    fn line_goal(&self, view: &LineView<'_>) -> f64;
}

/// English letters ordered by frequency, most common first
pub const LETTER_FREQ_EN: &str = "ETAONIHSRLDUCMWYFGPBVKJXQZ";

/// Letter-frequency scorer for English dictionaries
///
/// Fields holding common letters score low (they are the cheapest spots to
/// cross and therefore the most promising to work on), entries score by
/// crossings per letter, lines by fill ratio plus crossing entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishScorer;

impl Scorer for EnglishScorer {
    fn field_goal(&self, grid: &Grid, pos: Position) -> f64 {
        let alphabet = LETTER_FREQ_EN.len();
        let rank = grid
            .letter(pos)
            .and_then(|letter| LETTER_FREQ_EN.find(letter))
            .unwrap_or(alphabet);

        rank as f64 / (alphabet + 1) as f64
    }

    fn word_goal(&self, word: &WordRef<'_>) -> f64 {
        word.crossings().count() as f64 / word.len() as f64
    }

    fn line_goal(&self, view: &LineView<'_>) -> f64 {
        view.filled() as f64 / view.len() as f64 + view.cross_words().len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossweave_core::Line;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn two_word_cross() -> Grid {
        let mut grid = Grid::make("DUPA", 4, 4).unwrap();
        grid.add("PEJA", Line::Col(2), &mut SmallRng::seed_from_u64(2))
            .unwrap();

        grid
    }

    #[test]
    fn common_letters_score_low() {
        let grid = two_word_cross();
        let scorer = EnglishScorer;

        // E is the most frequent letter, rank 0
        let e = scorer.field_goal(&grid, Position::new(1, 2));
        assert_eq!(e, 0.0);

        // an empty field ranks below the whole alphabet
        let empty = scorer.field_goal(&grid, Position::new(3, 3));
        assert_eq!(empty, 26.0 / 27.0);

        let p = scorer.field_goal(&grid, Position::new(0, 2));
        assert!(e < p && p < empty);
    }

    #[test]
    fn word_goal_is_crossings_per_letter() {
        let grid = two_word_cross();
        let scorer = EnglishScorer;

        let dupa = WordRef::from_grid(&grid, "DUPA").unwrap();
        assert_eq!(scorer.word_goal(&dupa), 0.25);
    }

    #[test]
    fn line_goal_rewards_fill_and_crossings() {
        let grid = two_word_cross();
        let scorer = EnglishScorer;

        // row 0 is fully filled and crossed by PEJA
        let full = scorer.line_goal(&grid.view(Line::Row(0)));
        assert_eq!(full, 1.0 + 1.0);

        // row 1 holds a single letter of PEJA
        let sparse = scorer.line_goal(&grid.view(Line::Row(1)));
        assert_eq!(sparse, 0.25 + 1.0);

        // column 1 is empty and uncrossed... except by DUPA passing through
        let col = scorer.line_goal(&grid.view(Line::Col(1)));
        assert_eq!(col, 0.25 + 1.0);
    }
}
