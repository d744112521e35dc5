//! Frame letters, subsprite digits, and frame ranges.
//!
//! Every rendered frame is named by a letter (`A`..`Z`, repeating every 26
//! frames). Past the first 26 frames a subsprite digit is added so that up to
//! 260 frames can be addressed. The digit advances once per 26-frame cycle,
//! but only after frame 52, and its cycle counter is seeded from the host's
//! frame cursor when the run starts.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SpriteError;

/// Frame letters in order.
pub const FRAME_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Subsprite digits in order.
pub const SUBSPRITE_DIGITS: &str = "0123456789";

/// Frames per letter cycle.
pub const LETTER_COUNT: i32 = FRAME_LETTERS.len() as i32;

/// Highest frame number a run may end on (26 letters x 10 digits).
pub const MAX_FRAMES: i32 = LETTER_COUNT * SUBSPRITE_DIGITS.len() as i32;

/// Returns the frame letter for a 1-based frame number.
pub fn frame_letter(frame: i32) -> char {
    let idx = (i64::from(frame) - 1).rem_euclid(i64::from(LETTER_COUNT)) as usize;
    FRAME_LETTERS.as_bytes()[idx] as char
}

/// Looks up a subsprite digit. Indices past the table are an error; they are
/// never wrapped.
pub fn subsprite_digit(index: usize) -> Result<char, SpriteError> {
    SUBSPRITE_DIGITS
        .as_bytes()
        .get(index)
        .map(|&b| b as char)
        .ok_or(SpriteError::SubspriteOverflow { index })
}

/// Inclusive range of animation frames to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    /// First frame (1-based).
    pub start: i32,
    /// Last frame, inclusive.
    pub end: i32,
}

impl FrameRange {
    /// Creates a new frame range without validating it.
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Checks the range can be named.
    ///
    /// The ceiling is checked against the end frame only. An end before the
    /// start is valid and simply renders nothing.
    pub fn validate(&self) -> Result<(), SpriteError> {
        if self.end > MAX_FRAMES {
            return Err(SpriteError::FrameRangeTooLong {
                end_frame: self.end,
            });
        }
        if self.start < 1 {
            return Err(SpriteError::InvalidFrameRange {
                start_frame: self.start,
            });
        }
        Ok(())
    }

    /// Frame numbers in render order.
    pub fn frames(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Number of frames in the range.
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (i64::from(self.end) - i64::from(self.start) + 1) as usize
        }
    }

    /// Returns true if the range contains no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Naming components for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSlot {
    /// Absolute frame number.
    pub frame: i32,
    /// Frame letter.
    pub letter: char,
    /// Subsprite digit; `None` during the first letter cycle.
    pub subsprite: Option<char>,
}

impl FrameSlot {
    /// Returns true while frames still fit in a single letter cycle, in which
    /// case the full sprite name is used and no digit is written.
    pub fn is_first_cycle(&self) -> bool {
        self.subsprite.is_none()
    }
}

/// Running subsprite state for one object run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameIndexer {
    counter: i64,
    subsprite: usize,
}

impl FrameIndexer {
    /// Starts a run with the host's frame cursor as it was before rendering.
    pub fn new(frame_cursor: i32) -> Self {
        Self {
            counter: i64::from(frame_cursor) - 1,
            subsprite: 0,
        }
    }

    /// Current subsprite index.
    pub fn subsprite_index(&self) -> usize {
        self.subsprite
    }

    /// Advances to `frame` and returns its naming components.
    ///
    /// Must be called once per processed frame, in order.
    pub fn advance(&mut self, frame: i32) -> Result<FrameSlot, SpriteError> {
        self.counter += 1;
        if self.counter > i64::from(LETTER_COUNT) {
            self.counter = 1;
            if frame > LETTER_COUNT * 2 {
                self.subsprite += 1;
            }
        }

        let subsprite = if frame > LETTER_COUNT {
            Some(subsprite_digit(self.subsprite)?)
        } else {
            None
        };

        Ok(FrameSlot {
            frame,
            letter: frame_letter(frame),
            subsprite,
        })
    }
}
