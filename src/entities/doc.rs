//! On-disk document format for grids and animations.
//!
//! The format is plain JSON nested arrays, kept byte-compatible with files
//! written by earlier tools:
//!   - one frame saves as a bare grid: `[[0,1,...], ...]`
//!   - several frames save as a list of grids: `[[[...]], [[...]], ...]`
//! Durations are not part of the format, so a multi-frame round trip comes
//! back with default durations.
//!
//! Loading never trusts the file: the raw JSON is classified against the
//! expected shape first, and anything else is an `UnrecognizedShape` error.

use super::animation::Animation;
use super::grid::Grid;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// Errors raised while saving or loading documents.
#[derive(Debug)]
pub enum DocError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Parsed fine as JSON but is neither a grid of the expected shape nor
    /// a non-empty list of such grids.
    UnrecognizedShape { width: usize, height: usize },
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocError::Io(e) => write!(f, "i/o error: {}", e),
            DocError::Parse(e) => write!(f, "JSON error: {}", e),
            DocError::UnrecognizedShape { width, height } => write!(
                f,
                "not a {}x{} grid or a non-empty list of such grids",
                width, height
            ),
        }
    }
}

impl std::error::Error for DocError {}

/// A saved document: either a single grid or an ordered list of grids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Single(Grid),
    Sequence(Vec<Grid>),
}

impl Document {
    /// Snapshot an animation using the legacy convention: exactly one frame
    /// exports as a bare grid, anything longer as a list of grids.
    pub fn from_animation(animation: &Animation) -> Self {
        let mut grids: Vec<Grid> = animation
            .frames()
            .iter()
            .map(|frame| frame.grid().clone())
            .collect();
        if grids.len() == 1 {
            Document::Single(grids.remove(0))
        } else {
            Document::Sequence(grids)
        }
    }

    /// The grids in document order.
    pub fn grids(self) -> Vec<Grid> {
        match self {
            Document::Single(grid) => vec![grid],
            Document::Sequence(grids) => grids,
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            Document::Single(_) => 1,
            Document::Sequence(grids) => grids.len(),
        }
    }

    /// Write the document as compact JSON.
    pub fn save(&self, path: &Path) -> Result<(), DocError> {
        let json = serde_json::to_string(self).map_err(DocError::Parse)?;
        fs::write(path, json).map_err(DocError::Io)
    }

    /// Read and classify a document, validating every grid against the
    /// expected shape.
    pub fn load(path: &Path, width: usize, height: usize) -> Result<Self, DocError> {
        let text = fs::read_to_string(path).map_err(DocError::Io)?;
        let value: Value = serde_json::from_str(&text).map_err(DocError::Parse)?;
        Self::classify(&value, width, height)
    }

    /// Decide what a parsed JSON value is. A single grid wins over a list,
    /// which only matters for shapes where one value could read as both.
    pub fn classify(value: &Value, width: usize, height: usize) -> Result<Self, DocError> {
        if let Some(grid) = grid_from_value(value, width, height) {
            return Ok(Document::Single(grid));
        }
        if let Some(grids) = grids_from_value(value, width, height) {
            return Ok(Document::Sequence(grids));
        }
        Err(DocError::UnrecognizedShape { width, height })
    }
}

fn cell_from_value(value: &Value) -> Option<u8> {
    match value.as_u64() {
        Some(0) => Some(0),
        Some(1) => Some(1),
        _ => None,
    }
}

fn grid_from_value(value: &Value, width: usize, height: usize) -> Option<Grid> {
    let columns = value.as_array()?;
    if columns.len() != width {
        return None;
    }
    let mut cells: Vec<Vec<u8>> = Vec::with_capacity(width);
    for column in columns {
        let column = column.as_array()?;
        if column.len() != height {
            return None;
        }
        let mut out = Vec::with_capacity(height);
        for cell in column {
            out.push(cell_from_value(cell)?);
        }
        cells.push(out);
    }
    Grid::from_columns(cells, width, height).ok()
}

fn grids_from_value(value: &Value, width: usize, height: usize) -> Option<Vec<Grid>> {
    let entries = value.as_array()?;
    if entries.is_empty() {
        return None;
    }
    entries
        .iter()
        .map(|entry| grid_from_value(entry, width, height))
        .collect()
}
