use std::fmt;

/// Number of letters tracked by an [`Alphabit`]
pub const ALPHABET_LEN: u32 = 26;

/// 26-bit presence mask of the letters occurring in a string
///
/// Bit 0 corresponds to `Z` and bit 25 to `A` (reverse alphabetical order).
/// The ordering is an external contract: dictionary stores persist the mask
/// verbatim, so it has to line up across ecosystems.
///
/// The mask is used as a cheap prefilter in front of the regex engine: every
/// match of a pattern has to contain each of the pattern's literal letters,
/// and exactly those candidates satisfy
/// `popcount(query_mask | candidate_mask) == 26`, where the query mask is the
/// complement of the pattern's own mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alphabit(u32);

impl Alphabit {
    const MASK: u32 = (1 << ALPHABET_LEN) - 1;

    /// Mask with no letters present
    pub const EMPTY: Self = Self(0);

    /// Mask with every letter present
    pub const FULL: Self = Self(Self::MASK);

    /// Computes the mask of all (case-folded) ASCII letters in `text`
    ///
    /// Non-letter characters are ignored, so a whole regex pattern can be
    /// thrown at this and only its literals register.
    pub fn from_text(text: &str) -> Self {
        let bits = text
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|letter| letter.to_ascii_uppercase())
            .fold(0u32, |acc, letter| acc | 1 << (b'Z' - letter as u8));

        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// The complement mask sent along with a dictionary query: every bit set
    /// marks a letter the pattern does *not* contain.
    pub fn as_query_mask(&self) -> Self {
        Self(!self.0 & Self::MASK)
    }

    /// Whether a candidate mask passes this query mask, i.e. the candidate
    /// contains every letter of the original pattern.
    pub fn admits(&self, candidate: Alphabit) -> bool {
        (self.0 | candidate.0).count_ones() == ALPHABET_LEN
    }
}

impl fmt::Display for Alphabit {
    /// Renders the mask as the 26-character bit string stored by dictionaries
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in (0..ALPHABET_LEN).rev() {
            let char = if self.0 & (1 << bit) != 0 { '1' } else { '0' };
            write!(f, "{char}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bit_order_is_reverse_alphabetical() {
        assert_eq!(Alphabit::from_text("Z").bits(), 1);
        assert_eq!(Alphabit::from_text("A").bits(), 1 << 25);
        assert_eq!(Alphabit::from_text("Y").bits(), 1 << 1);
    }

    #[rstest]
    #[case::folds_case("abc", "CBA")]
    #[case::ignores_symbols("^A.{0,3}Z$", "AZ")]
    #[case::dedups("AAAA", "A")]
    fn masks_match(#[case] left: &str, #[case] right: &str) {
        assert_eq!(Alphabit::from_text(left), Alphabit::from_text(right));
    }

    #[rstest]
    #[case::same_letters("ETA", "ATE", true)]
    #[case::superset("ETA", "LATE", true)]
    #[case::missing_letter("ETA", "AT", false)]
    #[case::disjoint("ETA", "RON", false)]
    #[case::partial_overlap("ETA", "TAR", false)]
    fn query_mask_requires_all_pattern_letters(
        #[case] pattern: &str,
        #[case] word: &str,
        #[case] ok: bool,
    ) {
        let query = Alphabit::from_text(pattern).as_query_mask();
        assert_eq!(query.admits(Alphabit::from_text(word)), ok);
    }

    #[test]
    fn renders_as_bit_string() {
        assert_eq!(Alphabit::EMPTY.to_string(), "0".repeat(26));
        assert_eq!(Alphabit::FULL.to_string(), "1".repeat(26));
        assert_eq!(
            Alphabit::from_text("Z").to_string(),
            format!("{}1", "0".repeat(25))
        );
    }
}
