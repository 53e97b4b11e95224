use std::fmt;

use crate::Position;

/// Identifier of a full row or column of a [grid](crate::Grid)
///
/// A `Line` only carries the axis and index; resolving it against actual grid
/// contents happens through [`Grid::view`](crate::Grid::view). Across entries
/// live on rows, down entries on columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    Row(usize),
    Col(usize),
}

impl Line {
    pub fn index(&self) -> usize {
        match self {
            Self::Row(row) => *row,
            Self::Col(col) => *col,
        }
    }

    pub fn is_row(&self) -> bool {
        matches!(self, Self::Row(_))
    }

    /// The line on the orthogonal axis with the given index
    pub fn orthogonal(&self, index: usize) -> Self {
        match self {
            Self::Row(_) => Self::Col(index),
            Self::Col(_) => Self::Row(index),
        }
    }

    /// Same-axis line as seen after transposing the grid
    pub fn transposed(&self) -> Self {
        match self {
            Self::Row(row) => Self::Col(*row),
            Self::Col(col) => Self::Row(*col),
        }
    }

    /// The row and column through a position
    pub fn through(pos: Position) -> [Self; 2] {
        [Self::Row(pos.row), Self::Col(pos.col)]
    }

    /// Resolves an offset along the line to a grid position
    pub fn position_at(&self, offset: usize) -> Position {
        match self {
            Self::Row(row) => Position::new(*row, offset),
            Self::Col(col) => Position::new(offset, *col),
        }
    }

    /// The offset of a position along the line
    pub fn offset_of(&self, pos: Position) -> usize {
        match self {
            Self::Row(_) => pos.col,
            Self::Col(_) => pos.row,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (num, char) = match self {
            Self::Row(row) => (row, 'R'),
            Self::Col(col) => (col, 'C'),
        };

        write!(f, "{char}{num}")
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{Deserialize, Serialize};

    use crate::Line;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum LineData {
        Row(usize),
        Col(usize),
    }

    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    impl Serialize for Line {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            let data = match self {
                Self::Row(row) => LineData::Row(*row),
                Self::Col(col) => LineData::Col(*col),
            };

            data.serialize(serializer)
        }
    }

    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    impl<'de> Deserialize<'de> for Line {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let data = LineData::deserialize(deserializer)?;
            let line = match data {
                LineData::Row(row) => Line::Row(row),
                LineData::Col(col) => Line::Col(col),
            };

            Ok(line)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_follow_the_axis() {
        assert_eq!(Line::Row(2).position_at(3), Position::new(2, 3));
        assert_eq!(Line::Col(2).position_at(3), Position::new(3, 2));
    }

    #[test]
    fn through_yields_row_then_col() {
        let pos = Position::new(1, 4);
        assert_eq!(Line::through(pos), [Line::Row(1), Line::Col(4)]);
    }

    #[test]
    fn offsets_round_trip() {
        let line = Line::Col(7);
        let pos = line.position_at(5);

        assert_eq!(line.offset_of(pos), 5);
    }
}
