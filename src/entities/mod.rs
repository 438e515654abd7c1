//! Core data model: grids, frames, animations and their on-disk form.

pub mod animation;
pub mod doc;
pub mod frame;
pub mod grid;

pub use animation::Animation;
pub use doc::{DocError, Document};
pub use frame::{Frame, FrameError, DEFAULT_DURATION};
pub use grid::{Grid, GridError, DEFAULT_HEIGHT, DEFAULT_WIDTH};
