//! Intersection source for a vertically scrolling document measured in rows.

use std::collections::BTreeMap;

use tracing::trace;

use crate::detector::{IntersectionEvent, IntersectionSource, VisibilityHandle};
use crate::error::RevealError;

/// A span of document rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub top: u16,
    pub height: u16,
}

impl Region {
    pub const fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    /// First row past the region.
    pub fn bottom(&self) -> u32 {
        self.top as u32 + self.height as u32
    }
}

/// The visible span of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First visible document row.
    pub offset: u16,
    pub height: u16,
}

impl Viewport {
    pub fn bottom(&self) -> u32 {
        self.offset as u32 + self.height as u32
    }

    /// Fraction of `region` inside the viewport.
    ///
    /// A zero-height region counts as fully visible while its top row is on
    /// screen.
    pub fn intersection_ratio(&self, region: Region) -> f32 {
        if region.height == 0 {
            let row = region.top as u32;
            return if row >= self.offset as u32 && row < self.bottom() {
                1.0
            } else {
                0.0
            };
        }
        let start = (region.top as u32).max(self.offset as u32);
        let end = region.bottom().min(self.bottom());
        let overlap = end.saturating_sub(start);
        overlap as f32 / region.height as f32
    }
}

#[derive(Debug, Clone, Copy)]
struct Observed {
    region: Region,
    last_ratio: Option<f32>,
}

/// Scroll state of a document plus the regions being watched in it.
///
/// Every observed region is reported once when observation starts and again
/// whenever a viewport change alters its ratio.
#[derive(Debug, Default)]
pub struct ScrollViewport {
    document_height: u16,
    viewport: Viewport,
    observed: BTreeMap<VisibilityHandle, Observed>,
    pending: Vec<IntersectionEvent>,
}

impl ScrollViewport {
    pub fn new(document_height: u16, viewport_height: u16) -> Self {
        Self {
            document_height,
            viewport: Viewport {
                offset: 0,
                height: viewport_height,
            },
            observed: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn document_height(&self) -> u16 {
        self.document_height
    }

    /// Largest valid scroll offset.
    pub fn max_offset(&self) -> u16 {
        self.document_height.saturating_sub(self.viewport.height)
    }

    pub fn scroll_to(&mut self, offset: u16) {
        let offset = offset.min(self.max_offset());
        if offset != self.viewport.offset {
            self.viewport.offset = offset;
            self.refresh();
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = (self.viewport.offset as i32 + delta).clamp(0, u16::MAX as i32);
        self.scroll_to(target as u16);
    }

    /// The document was laid out again for a new viewport height.
    ///
    /// Watched regions take their new rows before any ratio is measured, so
    /// only the final geometry is reported. Handles not being observed are
    /// skipped.
    pub fn relayout<I>(&mut self, document_height: u16, viewport_height: u16, regions: I)
    where
        I: IntoIterator<Item = (VisibilityHandle, Region)>,
    {
        for (handle, region) in regions {
            if let Some(observed) = self.observed.get_mut(&handle) {
                observed.region = region;
            }
        }
        self.document_height = document_height;
        self.viewport.height = viewport_height;
        self.viewport.offset = self.viewport.offset.min(self.max_offset());
        self.refresh();
    }

    /// Number of regions still being observed.
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    fn refresh(&mut self) {
        let viewport = self.viewport;
        for (handle, observed) in self.observed.iter_mut() {
            let ratio = viewport.intersection_ratio(observed.region);
            if observed.last_ratio != Some(ratio) {
                trace!(?handle, ratio, "ratio changed");
                observed.last_ratio = Some(ratio);
                self.pending.push(IntersectionEvent {
                    handle: *handle,
                    ratio,
                });
            }
        }
    }
}

impl IntersectionSource for ScrollViewport {
    type Region = Region;

    fn observe(&mut self, handle: VisibilityHandle, region: Region) -> Result<(), RevealError> {
        if self.observed.contains_key(&handle) {
            return Err(RevealError::AlreadyObserved(handle));
        }
        let ratio = self.viewport.intersection_ratio(region);
        self.observed.insert(
            handle,
            Observed {
                region,
                last_ratio: Some(ratio),
            },
        );
        self.pending.push(IntersectionEvent { handle, ratio });
        Ok(())
    }

    fn unobserve(&mut self, handle: VisibilityHandle) {
        self.observed.remove(&handle);
        self.pending.retain(|event| event.handle != handle);
    }

    fn take_events(&mut self) -> Vec<IntersectionEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::VisibilityDetector;

    #[test]
    fn test_intersection_ratio() {
        let viewport = Viewport {
            offset: 10,
            height: 20,
        };
        assert_eq!(viewport.intersection_ratio(Region::new(0, 5)), 0.0);
        assert_eq!(viewport.intersection_ratio(Region::new(12, 4)), 1.0);
        assert_eq!(viewport.intersection_ratio(Region::new(25, 10)), 0.5);
        assert_eq!(viewport.intersection_ratio(Region::new(5, 10)), 0.5);
        assert_eq!(viewport.intersection_ratio(Region::new(30, 10)), 0.0);
        // taller than the viewport
        assert_eq!(viewport.intersection_ratio(Region::new(0, 40)), 0.5);
    }

    #[test]
    fn test_zero_height_region() {
        let viewport = Viewport {
            offset: 10,
            height: 20,
        };
        assert_eq!(viewport.intersection_ratio(Region::new(10, 0)), 1.0);
        assert_eq!(viewport.intersection_ratio(Region::new(30, 0)), 0.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut scroll = ScrollViewport::new(100, 30);
        scroll.scroll_to(500);
        assert_eq!(scroll.viewport().offset, 70);
        scroll.scroll_by(-1000);
        assert_eq!(scroll.viewport().offset, 0);
        scroll.scroll_by(5);
        assert_eq!(scroll.viewport().offset, 5);
    }

    #[test]
    fn test_short_document_never_scrolls() {
        let mut scroll = ScrollViewport::new(10, 30);
        scroll.scroll_by(3);
        assert_eq!(scroll.viewport().offset, 0);
    }

    #[test]
    fn test_relayout_clamps_offset() {
        let mut scroll = ScrollViewport::new(100, 20);
        scroll.scroll_to(80);
        scroll.relayout(100, 40, Vec::<(VisibilityHandle, Region)>::new());
        assert_eq!(scroll.viewport().offset, 60);
        scroll.relayout(50, 40, Vec::<(VisibilityHandle, Region)>::new());
        assert_eq!(scroll.viewport().offset, 10);
    }

    #[test]
    fn test_observe_reports_initial_ratio() {
        let mut detector = VisibilityDetector::new(ScrollViewport::new(100, 20));
        let handle = detector.register(Region::new(5, 5), 0.1);
        let scroll = detector.source_mut().unwrap();
        assert_eq!(
            scroll.take_events(),
            vec![IntersectionEvent { handle, ratio: 1.0 }]
        );
        assert_eq!(
            scroll.observe(handle, Region::new(5, 5)),
            Err(RevealError::AlreadyObserved(handle))
        );
    }

    #[test]
    fn test_only_changed_ratios_are_reported() {
        let mut detector = VisibilityDetector::new(ScrollViewport::new(200, 20));
        let near = detector.register(Region::new(30, 10), 0.5);
        let far = detector.register(Region::new(150, 10), 0.5);
        assert!(detector.pump().is_empty());

        // neither region moves in or out of view
        let scroll = detector.source_mut().unwrap();
        scroll.scroll_to(1);
        assert!(scroll.take_events().is_empty());

        scroll.scroll_to(15);
        let events = scroll.take_events();
        assert_eq!(events, vec![IntersectionEvent { handle: near, ratio: 0.5 }]);
        assert!(!events.iter().any(|e| e.handle == far));
    }

    #[test]
    fn test_page_scroll_reveals_regions_in_order() {
        let mut detector = VisibilityDetector::new(ScrollViewport::new(200, 20));
        let top = detector.register(Region::new(2, 8), 0.1);
        let middle = detector.register(Region::new(60, 8), 0.1);
        let bottom = detector.register(Region::new(180, 8), 0.1);

        assert_eq!(detector.pump(), vec![top]);

        detector.source_mut().unwrap().scroll_to(50);
        assert_eq!(detector.pump(), vec![middle]);
        assert!(!detector.is_visible(bottom));

        detector.source_mut().unwrap().scroll_to(180);
        assert_eq!(detector.pump(), vec![bottom]);

        // all revealed regions were released by the source
        assert_eq!(detector.source().unwrap().observed_count(), 0);
    }

    #[test]
    fn test_relayout_reports_new_ratio() {
        let mut detector = VisibilityDetector::new(ScrollViewport::new(200, 20));
        let handle = detector.register(Region::new(100, 10), 0.5);
        assert!(detector.pump().is_empty());

        detector
            .source_mut()
            .unwrap()
            .relayout(200, 20, [(handle, Region::new(5, 10))]);
        assert_eq!(detector.pump(), vec![handle]);
    }

    #[test]
    fn test_relayout_measures_only_final_geometry() {
        let mut detector = VisibilityDetector::new(ScrollViewport::new(300, 40));
        let handle = detector.register(Region::new(110, 8), 0.1);
        detector.source_mut().unwrap().scroll_to(150);
        assert!(detector.pump().is_empty());

        // the clamped offset puts the old rows on screen, the new ones are not
        let scroll = detector.source_mut().unwrap();
        scroll.relayout(120, 16, [(handle, Region::new(40, 10))]);
        assert_eq!(scroll.viewport().offset, 104);
        assert!(detector.pump().is_empty());
        assert!(!detector.is_visible(handle));
    }
}
