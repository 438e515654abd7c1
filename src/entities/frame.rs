//! Frame: one grid plus how long it stays on screen.
//!
//! The duration is seconds as `f64`, default 1.0, and must be a finite
//! positive number. Both fields are guarded by setters; the grid can only
//! be replaced by another grid of the same shape.

use super::grid::{Grid, GridError};
use std::fmt;

/// Seconds a frame is shown when no duration was given.
pub const DEFAULT_DURATION: f64 = 1.0;

/// Frame and sequence validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Replacement grid or frame does not match the established shape.
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Duration is not a finite positive number of seconds.
    BadDuration(f64),
    /// A sequence of frames must hold at least one frame.
    EmptySequence,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::ShapeMismatch { expected, found } => write!(
                f,
                "expected a {}x{} grid, got {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            FrameError::BadDuration(value) => {
                write!(f, "duration must be a positive number of seconds, got {}", value)
            }
            FrameError::EmptySequence => write!(f, "animation needs at least one frame"),
        }
    }
}

impl std::error::Error for FrameError {}

fn check_duration(secs: f64) -> Result<(), FrameError> {
    if secs.is_finite() && secs > 0.0 {
        Ok(())
    } else {
        Err(FrameError::BadDuration(secs))
    }
}

/// One animation step: a grid and its display duration in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    grid: Grid,
    duration: f64,
}

impl Frame {
    /// Wrap a grid with the default one-second duration.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            duration: DEFAULT_DURATION,
        }
    }

    /// Wrap a grid with an explicit duration.
    pub fn with_duration(grid: Grid, secs: f64) -> Result<Self, FrameError> {
        check_duration(secs)?;
        Ok(Self {
            grid,
            duration: secs,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replace the grid. The new grid must keep the frame's shape.
    pub fn set_grid(&mut self, grid: Grid) -> Result<(), FrameError> {
        if grid.shape() != self.grid.shape() {
            return Err(FrameError::ShapeMismatch {
                expected: self.grid.shape(),
                found: grid.shape(),
            });
        }
        self.grid = grid;
        Ok(())
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, secs: f64) -> Result<(), FrameError> {
        check_duration(secs)?;
        self.duration = secs;
        Ok(())
    }

    /// Flip one cell of the frame's grid.
    pub fn toggle(&mut self, col: usize, row: usize) -> Result<bool, GridError> {
        self.grid.toggle(col, row)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }
}
