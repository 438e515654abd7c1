//! Grid: fixed-size 2D field of binary pixels.
//!
//! Cells are stored column-major to match the on-disk shape: a grid is a
//! width-length list of height-length columns, each cell 0 or 1. All
//! constructors validate shape and cell values; there is no unchecked
//! mutation path, so a `Grid` in hand is always well-formed.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Columns of the display the editor targets by default.
pub const DEFAULT_WIDTH: usize = 9;
/// Rows of the display the editor targets by default.
pub const DEFAULT_HEIGHT: usize = 34;

/// Validation errors for grid construction and cell access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height of zero.
    EmptyDimensions,
    /// Outer sequence is not `width` columns long.
    WidthMismatch { expected: usize, found: usize },
    /// One column is not `height` cells long.
    HeightMismatch { col: usize, expected: usize, found: usize },
    /// A cell holds something other than 0 or 1.
    BadCell { col: usize, row: usize, value: u8 },
    /// Cell coordinates outside the grid.
    OutOfBounds { col: usize, row: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyDimensions => write!(f, "grid dimensions must be positive"),
            GridError::WidthMismatch { expected, found } => {
                write!(f, "expected {} columns, found {}", expected, found)
            }
            GridError::HeightMismatch {
                col,
                expected,
                found,
            } => write!(f, "column {}: expected {} cells, found {}", col, expected, found),
            GridError::BadCell { col, row, value } => {
                write!(f, "cell ({}, {}) must be 0 or 1, got {}", col, row, value)
            }
            GridError::OutOfBounds { col, row } => {
                write!(f, "cell ({}, {}) is outside the grid", col, row)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Binary pixel grid with a fixed width and height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>, // column-major: cells[col * height + row]
}

impl Grid {
    /// Create an all-dark grid of the given shape.
    pub fn blank(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions);
        }
        Ok(Self {
            width,
            height,
            cells: vec![0; width * height],
        })
    }

    /// Build a grid from column vectors, validating against the required
    /// shape: `width` columns of `height` cells, each cell 0 or 1.
    pub fn from_columns(
        columns: Vec<Vec<u8>>,
        width: usize,
        height: usize,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions);
        }
        if columns.len() != width {
            return Err(GridError::WidthMismatch {
                expected: width,
                found: columns.len(),
            });
        }
        let mut cells = Vec::with_capacity(width * height);
        for (col, column) in columns.iter().enumerate() {
            if column.len() != height {
                return Err(GridError::HeightMismatch {
                    col,
                    expected: height,
                    found: column.len(),
                });
            }
            for (row, &cell) in column.iter().enumerate() {
                if cell > 1 {
                    return Err(GridError::BadCell {
                        col,
                        row,
                        value: cell,
                    });
                }
                cells.push(cell);
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height) pair, the unit shape checks compare.
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| col * self.height + row)
    }

    /// Whether the cell is lit; `None` outside the grid.
    pub fn get(&self, col: usize, row: usize) -> Option<bool> {
        self.index(col, row).map(|i| self.cells[i] == 1)
    }

    /// Flip one cell and return its new state.
    pub fn toggle(&mut self, col: usize, row: usize) -> Result<bool, GridError> {
        let idx = self
            .index(col, row)
            .ok_or(GridError::OutOfBounds { col, row })?;
        self.cells[idx] ^= 1;
        Ok(self.cells[idx] == 1)
    }

    /// Number of lit cells.
    pub fn lit(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    fn column(&self, col: usize) -> &[u8] {
        &self.cells[col * self.height..(col + 1) * self.height]
    }

    /// Materialize the column vectors, matching the serialized shape.
    pub fn columns(&self) -> Vec<Vec<u8>> {
        (0..self.width).map(|c| self.column(c).to_vec()).collect()
    }

    /// Row-major text rendering: `#` lit, `.` dark, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                out.push(if self.cells[col * self.height + row] == 1 {
                    '#'
                } else {
                    '.'
                });
            }
            if row + 1 < self.height {
                out.push('\n');
            }
        }
        out
    }
}

/// Serializes as the wire shape: a width-length array of height-length
/// arrays of 0/1.
impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.width))?;
        for col in 0..self.width {
            seq.serialize_element(self.column(col))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: blank grid construction
    /// Validates: shape is honored and every cell starts dark
    #[test]
    fn test_blank_grid() {
        let grid = Grid::blank(9, 34).unwrap();
        assert_eq!(grid.shape(), (9, 34));
        assert_eq!(grid.lit(), 0);
        assert_eq!(grid.get(0, 0), Some(false));
        assert_eq!(grid.get(8, 33), Some(false));
        assert_eq!(grid.get(9, 0), None);
    }

    /// Test: zero dimensions rejected
    /// Validates: EmptyDimensions from both constructors
    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(Grid::blank(0, 10), Err(GridError::EmptyDimensions));
        assert_eq!(Grid::blank(10, 0), Err(GridError::EmptyDimensions));
        assert_eq!(
            Grid::from_columns(vec![], 0, 4),
            Err(GridError::EmptyDimensions)
        );
    }

    /// Test: from_columns validation
    /// Validates: width, per-column height and cell values are all checked
    #[test]
    fn test_from_columns_validates_shape_and_cells() {
        // Wrong number of columns
        assert_eq!(
            Grid::from_columns(vec![vec![0, 0]], 2, 2),
            Err(GridError::WidthMismatch {
                expected: 2,
                found: 1
            })
        );
        // Ragged column
        assert_eq!(
            Grid::from_columns(vec![vec![0, 0], vec![0]], 2, 2),
            Err(GridError::HeightMismatch {
                col: 1,
                expected: 2,
                found: 1
            })
        );
        // Non-binary cell
        assert_eq!(
            Grid::from_columns(vec![vec![0, 7], vec![0, 0]], 2, 2),
            Err(GridError::BadCell {
                col: 0,
                row: 1,
                value: 7
            })
        );
    }

    /// Test: columns round trip
    /// Validates: from_columns(columns()) reproduces the grid
    #[test]
    fn test_columns_round_trip() {
        let mut grid = Grid::blank(3, 2).unwrap();
        grid.toggle(1, 0).unwrap();
        grid.toggle(2, 1).unwrap();
        let columns = grid.columns();
        assert_eq!(columns, vec![vec![0, 0], vec![1, 0], vec![0, 1]]);
        let rebuilt = Grid::from_columns(columns, 3, 2).unwrap();
        assert_eq!(rebuilt, grid);
    }

    /// Test: toggle pair restores the grid
    /// Validates: toggling a cell twice is an exact no-op
    #[test]
    fn test_toggle_twice_restores() {
        let mut grid = Grid::blank(4, 4).unwrap();
        let before = grid.clone();
        assert_eq!(grid.toggle(2, 3), Ok(true));
        assert_eq!(grid.get(2, 3), Some(true));
        assert_eq!(grid.toggle(2, 3), Ok(false));
        assert_eq!(grid, before);
    }

    /// Test: toggle bounds
    /// Validates: out-of-range coordinates are a typed error, state unchanged
    #[test]
    fn test_toggle_out_of_bounds() {
        let mut grid = Grid::blank(2, 2).unwrap();
        assert_eq!(
            grid.toggle(2, 0),
            Err(GridError::OutOfBounds { col: 2, row: 0 })
        );
        assert_eq!(grid.lit(), 0);
    }

    /// Test: serialization shape
    /// Validates: a grid serializes as width arrays of height 0/1 integers
    #[test]
    fn test_serializes_as_nested_arrays() {
        let mut grid = Grid::blank(2, 3).unwrap();
        grid.toggle(0, 1).unwrap();
        let value = serde_json::to_value(&grid).unwrap();
        assert_eq!(value, serde_json::json!([[0, 1, 0], [0, 0, 0]]));
    }

    #[test]
    fn test_to_ascii() {
        let mut grid = Grid::blank(3, 2).unwrap();
        grid.toggle(0, 0).unwrap();
        grid.toggle(2, 1).unwrap();
        assert_eq!(grid.to_ascii(), "#..\n..#");
    }
}
