//! Typewriter reveal state
//!
//! `Typing` holds a cursor into the target text instead of concatenating
//! strings from timer callbacks, so a second animation cannot interleave with
//! the first: there is only ever one cursor.

use std::time::Duration;

use tokio::time::Instant;

/// One step of the reveal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingFrame {
    /// Text revealed so far (replaces the previous frame)
    Update(String),
    /// Everything is revealed; emitted exactly once
    Complete,
}

/// Character-by-character reveal of a known string
#[derive(Clone, Debug)]
pub struct TypingAnimator {
    /// Target text as chars so the cursor never splits a code point
    target: Vec<char>,
    /// Number of chars revealed
    cursor: usize,
    /// Time between ticks
    interval: Duration,
    /// When the next tick is due
    next_tick: Instant,
    /// Completion already emitted
    finished: bool,
}

impl TypingAnimator {
    /// Start revealing `text`; the first tick is due one interval after `now`
    pub fn new(text: &str, interval: Duration, now: Instant) -> Self {
        Self {
            target: text.chars().collect(),
            cursor: 0,
            interval,
            next_tick: now + interval,
            finished: false,
        }
    }

    /// Advance by exactly one tick
    ///
    /// Returns `None` once completion has been emitted.
    pub fn tick(&mut self) -> Option<TypingFrame> {
        if self.finished {
            return None;
        }
        if self.cursor < self.target.len() {
            self.cursor += 1;
            Some(TypingFrame::Update(self.revealed()))
        } else {
            self.finished = true;
            Some(TypingFrame::Complete)
        }
    }

    /// Run every tick that is due at `now`, in order
    pub fn due_frames(&mut self, now: Instant) -> Vec<TypingFrame> {
        let mut frames = Vec::new();
        while !self.finished && now >= self.next_tick {
            if let Some(frame) = self.tick() {
                frames.push(frame);
            }
            self.next_tick += self.interval;
        }
        frames
    }

    /// Text revealed so far
    pub fn revealed(&self) -> String {
        self.target[..self.cursor].iter().collect()
    }

    /// Whether completion has been emitted
    pub fn is_complete(&self) -> bool {
        self.finished
    }

    /// When the next tick is due
    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TICK: Duration = Duration::from_millis(30);

    #[test]
    fn test_reveals_one_char_per_tick() {
        let mut anim = TypingAnimator::new("ABC", TICK, Instant::now());
        assert_eq!(anim.tick(), Some(TypingFrame::Update("A".into())));
        assert_eq!(anim.tick(), Some(TypingFrame::Update("AB".into())));
        assert_eq!(anim.tick(), Some(TypingFrame::Update("ABC".into())));
        assert_eq!(anim.tick(), Some(TypingFrame::Complete));
        assert!(anim.is_complete());
        assert_eq!(anim.tick(), None);
    }

    #[test]
    fn test_empty_text_completes_on_first_tick() {
        let mut anim = TypingAnimator::new("", TICK, Instant::now());
        assert_eq!(anim.tick(), Some(TypingFrame::Complete));
        assert_eq!(anim.tick(), None);
    }

    #[test]
    fn test_multibyte_chars_are_not_split() {
        let mut anim = TypingAnimator::new("©1983", TICK, Instant::now());
        assert_eq!(anim.tick(), Some(TypingFrame::Update("©".into())));
        assert_eq!(anim.tick(), Some(TypingFrame::Update("©1".into())));
    }

    #[test]
    fn test_due_frames_follow_the_clock() {
        let start = Instant::now();
        let mut anim = TypingAnimator::new("HI", TICK, start);

        assert!(anim.due_frames(start).is_empty());
        assert!(anim.due_frames(start + Duration::from_millis(29)).is_empty());

        assert_eq!(
            anim.due_frames(start + TICK),
            vec![TypingFrame::Update("H".into())]
        );

        // A late poll catches up every missed tick, in order
        assert_eq!(
            anim.due_frames(start + TICK * 10),
            vec![TypingFrame::Update("HI".into()), TypingFrame::Complete]
        );
        assert!(anim.due_frames(start + TICK * 20).is_empty());
    }

    #[test]
    fn test_revealed_follows_cursor() {
        let start = Instant::now();
        let mut anim = TypingAnimator::new("ABCD", TICK, start);
        assert_eq!(anim.revealed(), "");
        anim.due_frames(start + TICK * 2);
        assert_eq!(anim.revealed(), "AB");
    }
}
