//! Timed fade/slide transitions driven by a visibility flag.

use crate::detector::{IntersectionSource, VisibilityDetector, VisibilityHandle};

/// Cubic ease-out on `[0, 1]`.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// How a revealed element animates in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTransition {
    /// Wait after the reveal before starting.
    pub delay_ms: u64,
    pub duration_ms: u64,
    /// Distance (in rows or columns) the element travels while appearing.
    pub travel: f32,
}

impl Default for RevealTransition {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            duration_ms: 700,
            travel: 2.0,
        }
    }
}

impl RevealTransition {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_travel(mut self, travel: f32) -> Self {
        self.travel = travel;
        self
    }

    /// The `index`-th item of a group, delayed by `index * stagger_ms`.
    pub fn staggered(self, index: usize, stagger_ms: u64) -> Self {
        self.with_delay(self.delay_ms + index as u64 * stagger_ms)
    }

    /// Eased completion in `[0, 1]` at `now_ms` for an element revealed at
    /// `revealed_at`. Not yet revealed means 0.
    pub fn progress(&self, revealed_at: Option<u64>, now_ms: u64) -> f32 {
        let Some(revealed_at) = revealed_at else {
            return 0.0;
        };
        let start = revealed_at.saturating_add(self.delay_ms);
        if now_ms < start {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        ease_out((now_ms - start) as f32 / self.duration_ms as f32)
    }

    /// Remaining displacement for a given progress.
    pub fn offset(&self, progress: f32) -> f32 {
        self.travel * (1.0 - progress.clamp(0.0, 1.0))
    }
}

/// A transition bound to one visibility handle.
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    handle: VisibilityHandle,
    transition: RevealTransition,
    revealed_at: Option<u64>,
}

impl Reveal {
    pub fn new(handle: VisibilityHandle, transition: RevealTransition) -> Self {
        Self {
            handle,
            transition,
            revealed_at: None,
        }
    }

    pub fn handle(&self) -> VisibilityHandle {
        self.handle
    }

    pub fn transition(&self) -> RevealTransition {
        self.transition
    }

    pub fn revealed_at(&self) -> Option<u64> {
        self.revealed_at
    }

    /// Poll the detector and return the current progress.
    ///
    /// The first call that sees the handle visible pins the start time.
    pub fn update<S: IntersectionSource>(
        &mut self,
        detector: &VisibilityDetector<S>,
        now_ms: u64,
    ) -> f32 {
        if self.revealed_at.is_none() && detector.is_visible(self.handle) {
            self.revealed_at = Some(now_ms);
        }
        self.progress(now_ms)
    }

    /// Progress without polling.
    pub fn progress(&self, now_ms: u64) -> f32 {
        self.transition.progress(self.revealed_at, now_ms)
    }

    pub fn offset(&self, now_ms: u64) -> f32 {
        self.transition.offset(self.progress(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::VisibilityDetector;
    use crate::viewport::{Region, ScrollViewport};

    #[test]
    fn test_ease_out_bounds() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(-3.0), 0.0);
        assert_eq!(ease_out(7.0), 1.0);
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn test_progress_waits_for_reveal_and_delay() {
        let transition = RevealTransition::new(1000).with_delay(300);
        assert_eq!(transition.progress(None, 5000), 0.0);
        assert_eq!(transition.progress(Some(1000), 1200), 0.0);
        assert_eq!(transition.progress(Some(1000), 1300), 0.0);
        assert!(transition.progress(Some(1000), 1800) > 0.5);
        assert_eq!(transition.progress(Some(1000), 2300), 1.0);
        assert_eq!(transition.progress(Some(1000), 9000), 1.0);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let transition = RevealTransition::new(0);
        assert_eq!(transition.progress(Some(10), 10), 1.0);
    }

    #[test]
    fn test_staggered_delays() {
        let base = RevealTransition::new(700);
        let delays: Vec<u64> = (0..4)
            .map(|i| base.staggered(i, 150).delay_ms)
            .collect();
        assert_eq!(delays, vec![0, 150, 300, 450]);
        assert_eq!(base.with_delay(300).staggered(1, 100).delay_ms, 400);
    }

    #[test]
    fn test_offset_shrinks_to_zero() {
        let transition = RevealTransition::new(500).with_travel(4.0);
        assert_eq!(transition.offset(0.0), 4.0);
        assert_eq!(transition.offset(0.5), 2.0);
        assert_eq!(transition.offset(1.0), 0.0);
    }

    #[test]
    fn test_reveal_pins_start_on_first_visible_poll() {
        let mut detector = VisibilityDetector::new(ScrollViewport::new(100, 10));
        let handle = detector.register(Region::new(50, 5), 0.1);
        detector.pump();
        let mut reveal = Reveal::new(handle, RevealTransition::new(100));

        assert_eq!(reveal.update(&detector, 1000), 0.0);
        assert_eq!(reveal.revealed_at(), None);

        detector.source_mut().unwrap().scroll_to(48);
        detector.pump();
        assert_eq!(reveal.update(&detector, 2000), 0.0);
        assert_eq!(reveal.revealed_at(), Some(2000));

        assert_eq!(reveal.update(&detector, 2100), 1.0);
        assert_eq!(reveal.revealed_at(), Some(2000));
        assert_eq!(reveal.offset(2100), 0.0);
    }
}
