//! Character-by-character title reveal.

use crate::transition::ease_out;

/// Reveals one more character every `interval_ms`; each character then fades
/// in over `fade_ms`, starting `char_delay_ms * index` after it appears.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    interval_ms: u64,
    fade_ms: u64,
    char_delay_ms: u64,
    started_at: Option<u64>,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            interval_ms: 80,
            fade_ms: 500,
            char_delay_ms: 40,
            started_at: None,
        }
    }

    pub fn with_timing(mut self, interval_ms: u64, fade_ms: u64, char_delay_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self.fade_ms = fade_ms;
        self.char_delay_ms = char_delay_ms;
        self
    }

    /// Start the clock. Later calls keep the first start time.
    pub fn start(&mut self, now_ms: u64) {
        self.started_at.get_or_insert(now_ms);
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of characters that have appeared at `now_ms`.
    pub fn visible_chars(&self, now_ms: u64) -> usize {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        if self.interval_ms == 0 {
            return self.chars.len();
        }
        let ticks = now_ms.saturating_sub(started_at) / self.interval_ms;
        (ticks as usize).min(self.chars.len())
    }

    /// Opacity of the character at `index`, in `[0, 1]`.
    pub fn char_opacity(&self, index: usize, now_ms: u64) -> f32 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        if index >= self.visible_chars(now_ms) {
            return 0.0;
        }
        let appears_at = started_at
            + (index as u64 + 1) * self.interval_ms
            + index as u64 * self.char_delay_ms;
        if now_ms < appears_at {
            return 0.0;
        }
        if self.fade_ms == 0 {
            return 1.0;
        }
        ease_out((now_ms - appears_at) as f32 / self.fade_ms as f32)
    }

    /// Every character is fully opaque.
    pub fn is_complete(&self, now_ms: u64) -> bool {
        if self.chars.is_empty() {
            return self.started_at.is_some();
        }
        self.char_opacity(self.chars.len() - 1, now_ms) >= 1.0
    }
}
