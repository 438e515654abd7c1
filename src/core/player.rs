//! Playback engine: advances an animation by per-frame durations.
//!
//! Player does not own the Animation. It receives `&mut Animation` when a
//! method needs it, so the editor stays the single source of truth for
//! frames. Timing is wall-clock against each frame's own duration; the
//! clock-free `advance()` carries the sequencing rules and is what tests
//! drive.

use crate::entities::Animation;
use log::trace;
use std::time::Instant;

/// Playback state over an externally-owned animation.
#[derive(Debug)]
pub struct Player {
    playing: bool,
    loop_enabled: bool,
    last_tick: Option<Instant>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            playing: false,
            loop_enabled: false,
            last_tick: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn set_loop_enabled(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Start playing from the animation's current frame.
    pub fn play(&mut self) {
        self.playing = true;
        self.last_tick = None;
        trace!("playback started");
    }

    pub fn stop(&mut self) {
        if self.playing {
            self.playing = false;
            self.last_tick = None;
            trace!("playback stopped");
        }
    }

    /// Drive playback; call frequently (the frame rate is set by frame
    /// durations, not the call rate). Returns the new frame index when the
    /// current frame's duration has elapsed and the cursor moved.
    pub fn update(&mut self, animation: &mut Animation) -> Option<usize> {
        if !self.playing {
            return None;
        }
        let now = Instant::now();
        let Some(last) = self.last_tick else {
            // First tick after play(): start timing the current frame.
            self.last_tick = Some(now);
            return None;
        };
        let due = animation.current_frame().duration();
        if now.duration_since(last).as_secs_f64() < due {
            return None;
        }
        let moved = self.advance(animation);
        if moved.is_some() {
            self.last_tick = Some(now);
        }
        moved
    }

    /// Step to the next frame: wraps to 0 when looping, otherwise stops at
    /// the last frame. Returns the new index, or `None` when playback ended.
    pub fn advance(&mut self, animation: &mut Animation) -> Option<usize> {
        let next = animation.current_index() + 1;
        if next < animation.frame_count() {
            animation.set_current(next);
            trace!("advance -> frame {}", next);
            Some(next)
        } else if self.loop_enabled {
            animation.set_current(0);
            trace!("loop -> frame 0");
            Some(0)
        } else {
            trace!("reached last frame");
            self.stop();
            None
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_frames() -> Animation {
        let mut anim = Animation::new(2, 2).unwrap();
        anim.add_frame();
        anim.add_frame();
        anim.set_current(0);
        anim
    }

    /// Test: advance without looping
    /// Validates: steps to the end, then stops with the cursor on the last
    /// frame
    #[test]
    fn test_advance_stops_at_end() {
        let mut anim = three_frames();
        let mut player = Player::new();
        player.play();

        assert_eq!(player.advance(&mut anim), Some(1));
        assert_eq!(player.advance(&mut anim), Some(2));
        assert_eq!(player.advance(&mut anim), None);
        assert!(!player.is_playing());
        assert_eq!(anim.current_index(), 2);
    }

    /// Test: advance with looping
    /// Validates: wraps to frame 0 and keeps playing
    #[test]
    fn test_advance_wraps_when_looping() {
        let mut anim = three_frames();
        let mut player = Player::new();
        player.set_loop_enabled(true);
        player.play();

        assert_eq!(player.advance(&mut anim), Some(1));
        assert_eq!(player.advance(&mut anim), Some(2));
        assert_eq!(player.advance(&mut anim), Some(0));
        assert_eq!(player.advance(&mut anim), Some(1));
        assert!(player.is_playing());
    }

    /// Test: update gating
    /// Validates: a stopped player never moves the cursor, and the first
    /// update after play() only arms the clock
    #[test]
    fn test_update_requires_play() {
        let mut anim = three_frames();
        let mut player = Player::new();
        assert_eq!(player.update(&mut anim), None);
        assert_eq!(anim.current_index(), 0);

        player.play();
        assert_eq!(player.update(&mut anim), None);
        assert!(player.is_playing());
        assert_eq!(anim.current_index(), 0);
    }

    /// Test: single frame, no loop
    /// Validates: playback of one frame ends immediately on advance
    #[test]
    fn test_single_frame_ends() {
        let mut anim = Animation::new(2, 2).unwrap();
        let mut player = Player::new();
        player.play();
        assert_eq!(player.advance(&mut anim), None);
        assert!(!player.is_playing());
    }
}
