use std::fmt;
use std::ops;

/// 2-dimensional coordinate within a [grid](crate::Grid)
///
/// An [`Offset`] can be used to easily create a new position from an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row (y) coordinate
    pub row: usize,

    /// Column (x) coordinate
    pub col: usize,
}

impl Position {
    /// Origin position at (0, 0)
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Construct a new position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, offset: Offset) -> Self {
        let row = (self.row as isize)
            .saturating_add(offset.rows)
            .clamp(0, isize::MAX) as usize;

        let col = (self.col as isize)
            .saturating_add(offset.cols)
            .clamp(0, isize::MAX) as usize;

        Self { row, col }
    }

    /// Moves the position by the given offset, or `None` when it would leave the grid
    /// at the top or left.
    pub fn checked_offset(&self, offset: Offset) -> Option<Self> {
        let row = self.row.checked_add_signed(offset.rows)?;
        let col = self.col.checked_add_signed(offset.cols)?;

        Some(Self { row, col })
    }

    /// Mirrors the position along the main diagonal
    pub fn transposed(&self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl ops::Add<Offset> for Position {
    type Output = Self;

    /// Moves the position by the given offset.
    ///
    /// Values that would move the position outside the `usize` range are clamped
    fn add(self, offset: Offset) -> Self {
        self.offset(offset)
    }
}

impl ops::Sub<Offset> for Position {
    type Output = Self;

    /// Moves the position by the inverse of the given offset.
    ///
    /// Values that would move the position outside the `usize` range are clamped
    fn sub(self, offset: Offset) -> Self {
        self.offset(-offset)
    }
}

impl ops::AddAssign<Offset> for Position {
    fn add_assign(&mut self, offset: Offset) {
        *self = *self + offset;
    }
}

/// Amounts by which to move a [`Position`].
///
/// Positive numbers move to the right/bottom and negative to the left/top.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Offset {
    /// How many rows to move over by
    pub rows: isize,

    /// How many columns to move over by
    pub cols: isize,
}

impl Offset {
    /// A zero offset
    pub const ZERO: Self = Self { rows: 0, cols: 0 };
    /// A left offset
    pub const LEFT: Self = Self { rows: 0, cols: -1 };
    /// A right offset
    pub const RIGHT: Self = Self { rows: 0, cols: 1 };
    /// An up offset
    pub const UP: Self = Self { rows: -1, cols: 0 };
    /// A down offset
    pub const DOWN: Self = Self { rows: 1, cols: 0 };

    /// The four von-Neumann neighbour offsets
    pub const NEUMANN: [Self; 4] = [Self::LEFT, Self::RIGHT, Self::UP, Self::DOWN];
}

impl ops::Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Self::Output {
        Self {
            rows: -self.rows,
            cols: -self.cols,
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Deserialize, Serialize};

    use crate::Position;

    type PositionData = [usize; 2];

    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    impl Serialize for Position {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            let data: PositionData = [self.row, self.col];
            data.serialize(serializer)
        }
    }

    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    impl<'de> Deserialize<'de> for Position {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let [row, col] = PositionData::deserialize(deserializer)?;
            let pos = Position { row, col };

            Ok(pos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_clamps_at_origin() {
        let pos = Position::ORIGIN + Offset::LEFT;
        assert_eq!(pos, Position::ORIGIN);

        assert_eq!(Position::ORIGIN.checked_offset(Offset::UP), None);
        assert_eq!(
            Position::new(1, 0).checked_offset(Offset::UP),
            Some(Position::ORIGIN)
        );
    }

    #[test]
    fn transpose_swaps_axes() {
        assert_eq!(Position::new(2, 5).transposed(), Position::new(5, 2));
    }
}
