//! Reveals a line one character at a time.
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    total_chars: usize,
    shown_chars: usize,
    interval: Duration,
    carry: Duration,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval: Duration) -> Self {
        let text = text.into();
        let total_chars = text.chars().count();
        Self {
            text,
            total_chars,
            shown_chars: 0,
            interval,
            carry: Duration::ZERO,
        }
    }

    /// The revealed prefix.
    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.shown_chars) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.shown_chars < self.total_chars
    }

    pub fn finish(&mut self) {
        self.shown_chars = self.total_chars;
        self.carry = Duration::ZERO;
    }

    /// Reveals characters for `delta`. True if anything new became visible.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.is_typing() {
            return false;
        }
        if self.interval.is_zero() {
            self.finish();
            return true;
        }

        self.carry += delta;
        let mut revealed = 0;
        while self.carry >= self.interval && self.shown_chars < self.total_chars {
            self.carry -= self.interval;
            self.shown_chars += 1;
            revealed += 1;
        }
        revealed > 0
    }
}
