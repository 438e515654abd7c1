//! Animation: an ordered, never-empty sequence of frames with a cursor.
//!
//! The shape is fixed at construction; every frame added or swapped in must
//! match it. The cursor always points at a real frame, so `current_frame`
//! cannot fail.

use super::frame::{Frame, FrameError};
use super::grid::{Grid, GridError};

/// Frame sequence sharing one grid shape, plus the currently edited index.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    width: usize,
    height: usize,
    frames: Vec<Frame>,
    current: usize,
}

impl Animation {
    /// Start a new animation with a single blank frame.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let grid = Grid::blank(width, height)?;
        Ok(Self {
            width,
            height,
            frames: vec![Frame::new(grid)],
            current: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current]
    }

    pub fn current_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current]
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Append a copy of the current frame's grid as a new frame with the
    /// default duration, and select it. Returns the new index.
    pub fn add_frame(&mut self) -> usize {
        let grid = self.current_frame().grid().clone();
        self.frames.push(Frame::new(grid));
        self.current = self.frames.len() - 1;
        self.current
    }

    /// Append an existing frame without moving the cursor.
    pub fn push(&mut self, frame: Frame) -> Result<(), FrameError> {
        if frame.shape() != self.shape() {
            return Err(FrameError::ShapeMismatch {
                expected: self.shape(),
                found: frame.shape(),
            });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Step the cursor back one frame; no-op at the first frame.
    /// Returns whether the cursor moved.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Step the cursor forward one frame; no-op at the last frame.
    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.frames.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor to an absolute index. Returns false if out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.frames.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Flip one cell of the current frame.
    pub fn toggle(&mut self, col: usize, row: usize) -> Result<bool, GridError> {
        self.frames[self.current].toggle(col, row)
    }

    /// Swap in a whole new frame list and reset the cursor to the first
    /// frame. The list must be non-empty and every frame must match the
    /// animation's shape; on error the existing frames are untouched.
    pub fn replace(&mut self, frames: Vec<Frame>) -> Result<(), FrameError> {
        if frames.is_empty() {
            return Err(FrameError::EmptySequence);
        }
        for frame in &frames {
            if frame.shape() != self.shape() {
                return Err(FrameError::ShapeMismatch {
                    expected: self.shape(),
                    found: frame.shape(),
                });
            }
        }
        self.frames = frames;
        self.current = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: fresh animation
    /// Validates: one blank frame, cursor on it
    #[test]
    fn test_new_animation_has_one_blank_frame() {
        let anim = Animation::new(9, 34).unwrap();
        assert_eq!(anim.frame_count(), 1);
        assert_eq!(anim.current_index(), 0);
        assert_eq!(anim.current_frame().grid().lit(), 0);
    }

    /// Test: add_frame copies the current grid
    /// Validates: the copy is independent, no aliasing between frames
    #[test]
    fn test_add_frame_copies_without_aliasing() {
        let mut anim = Animation::new(4, 4).unwrap();
        anim.toggle(1, 1).unwrap();

        let index = anim.add_frame();
        assert_eq!(index, 1);
        assert_eq!(anim.current_index(), 1);
        assert_eq!(anim.frame_count(), 2);
        // Copy starts with the same pixels...
        assert_eq!(anim.current_frame().grid().get(1, 1), Some(true));

        // ...but edits to it never touch the source frame.
        anim.toggle(2, 2).unwrap();
        assert_eq!(anim.frames()[0].grid().get(2, 2), Some(false));
        assert_eq!(anim.frames()[1].grid().get(2, 2), Some(true));
    }

    /// Test: cursor clamping
    /// Validates: prev at the first frame and next at the last are no-ops
    #[test]
    fn test_prev_next_clamped_at_ends() {
        let mut anim = Animation::new(2, 2).unwrap();
        assert!(!anim.prev());
        assert_eq!(anim.current_index(), 0);

        anim.add_frame();
        anim.add_frame();
        assert!(!anim.next());
        assert_eq!(anim.current_index(), 2);

        assert!(anim.prev());
        assert!(anim.prev());
        assert!(!anim.prev());
        assert_eq!(anim.current_index(), 0);
    }

    /// Test: push shape guard
    /// Validates: frames of a different shape are rejected
    #[test]
    fn test_push_rejects_wrong_shape() {
        let mut anim = Animation::new(3, 3).unwrap();
        let err = anim.push(Frame::new(Grid::blank(3, 4).unwrap())).unwrap_err();
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));
        assert_eq!(anim.frame_count(), 1);
    }

    /// Test: replace semantics
    /// Validates: cursor resets to 0; empty or mis-shaped lists leave the
    /// animation untouched
    #[test]
    fn test_replace_resets_cursor_and_validates() {
        let mut anim = Animation::new(2, 2).unwrap();
        anim.add_frame();
        assert_eq!(anim.current_index(), 1);

        assert_eq!(anim.replace(vec![]), Err(FrameError::EmptySequence));
        assert_eq!(anim.frame_count(), 2);
        assert_eq!(anim.current_index(), 1);

        let wrong = vec![Frame::new(Grid::blank(2, 3).unwrap())];
        assert!(matches!(
            anim.replace(wrong),
            Err(FrameError::ShapeMismatch { .. })
        ));
        assert_eq!(anim.frame_count(), 2);

        let mut lit = Grid::blank(2, 2).unwrap();
        lit.toggle(0, 0).unwrap();
        anim.replace(vec![
            Frame::new(lit),
            Frame::new(Grid::blank(2, 2).unwrap()),
            Frame::new(Grid::blank(2, 2).unwrap()),
        ])
        .unwrap();
        assert_eq!(anim.frame_count(), 3);
        assert_eq!(anim.current_index(), 0);
        assert_eq!(anim.current_frame().grid().lit(), 1);
    }
}
