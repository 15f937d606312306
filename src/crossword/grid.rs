//! Black/white cell structure of a crossword grid

use super::PuzzleError;
use std::fmt;

/// Character marking a fillable cell in a structure row
pub const WHITE_CELL: char = '_';
/// Character marking a blocked cell in a structure row
pub const BLACK_CELL: char = '#';

/// The fixed shape of a crossword: which cells take letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Structure {
    /// Create a structure where every cell is white
    pub fn open(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![true; width * height],
        }
    }

    /// Create a structure from a 2D "is white" matrix
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self, PuzzleError> {
        if cells.is_empty() {
            return Err(PuzzleError::EmptyStructure);
        }

        let height = cells.len();
        let width = cells[0].len();

        if width == 0 {
            return Err(PuzzleError::EmptyStructure);
        }

        for (row, line) in cells.iter().enumerate() {
            if line.len() != width {
                return Err(PuzzleError::RaggedRow {
                    row,
                    length: line.len(),
                    expected: width,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Create a structure from rows of `_` (white) and `#` (black)
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, PuzzleError> {
        let mut cells = Vec::with_capacity(rows.len());

        for (row, line) in rows.iter().enumerate() {
            let mut parsed = Vec::with_capacity(line.as_ref().len());
            for (col, ch) in line.as_ref().chars().enumerate() {
                match ch {
                    WHITE_CELL => parsed.push(true),
                    BLACK_CELL => parsed.push(false),
                    _ => return Err(PuzzleError::InvalidCell { ch, row, col }),
                }
            }
            cells.push(parsed);
        }

        Self::from_cells(cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether the cell takes a letter; out-of-bounds cells count as black
    pub fn is_white(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[self.index(row, col)]
    }

    /// Count fillable cells
    pub fn white_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Rows in the `_`/`#` notation accepted by [`Structure::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| if self.is_white(row, col) { WHITE_CELL } else { BLACK_CELL })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let structure = Structure::from_rows(&["#___", "_#__"]).unwrap();
        assert_eq!(structure.width(), 4);
        assert_eq!(structure.height(), 2);
        assert_eq!(structure.white_count(), 6);
        assert!(!structure.is_white(0, 0));
        assert!(structure.is_white(0, 1));
        assert!(!structure.is_white(1, 1));
    }

    #[test]
    fn test_out_of_bounds_is_black() {
        let structure = Structure::open(2, 2);
        assert!(structure.is_white(1, 1));
        assert!(!structure.is_white(2, 0));
        assert!(!structure.is_white(0, 2));
    }

    #[test]
    fn test_dimensions_match_cells() {
        let structure = Structure::from_cells(vec![vec![true, false, true]; 2]).unwrap();
        assert_eq!(structure.width() * structure.height(), 6);
        assert_eq!(structure.white_count(), 4);
        assert!(!structure.is_white(1, 1));
        assert!(!structure.is_white(5, 5));
    }

    #[test]
    fn test_to_rows_matches_input() {
        let rows = vec!["_#_".to_string(), "___".to_string()];
        let structure = Structure::from_rows(&rows).unwrap();
        assert_eq!(structure.to_rows(), rows);
    }

    #[test]
    fn test_invalid_structures() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(Structure::from_rows(&empty), Err(PuzzleError::EmptyStructure)));

        assert!(matches!(
            Structure::from_rows(&["___", "__"]),
            Err(PuzzleError::RaggedRow { row: 1, length: 2, expected: 3 })
        ));

        assert!(matches!(
            Structure::from_rows(&["_X_"]),
            Err(PuzzleError::InvalidCell { ch: 'X', row: 0, col: 1 })
        ));
    }
}
