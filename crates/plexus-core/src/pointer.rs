//! Last known pointer position, shared by every particle field on a page.
//!
//! There is exactly one writer (the pointer-move handler) and any number of
//! readers. Readers only ever see the latest value; there is no ordering
//! guarantee beyond last-writer-wins.

use std::cell::Cell;
use std::rc::Rc;

use crate::geometry::Vec2;

/// Write side of the pointer reference.
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Rc<Cell<Option<Vec2>>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move.
    pub fn set(&self, position: Vec2) {
        self.position.set(Some(position));
    }

    /// Forget the pointer, e.g. when it leaves the window.
    pub fn clear(&self) {
        self.position.set(None);
    }

    /// A read-only view of the same position.
    pub fn reader(&self) -> PointerReader {
        PointerReader {
            position: Rc::clone(&self.position),
        }
    }

    /// Number of live readers.
    pub fn reader_count(&self) -> usize {
        Rc::strong_count(&self.position) - 1
    }
}

/// Read side of the pointer reference, handed to each field.
#[derive(Debug, Clone)]
pub struct PointerReader {
    position: Rc<Cell<Option<Vec2>>>,
}

impl PointerReader {
    pub fn get(&self) -> Option<Vec2> {
        self.position.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readers_see_latest_write() {
        let tracker = PointerTracker::new();
        let a = tracker.reader();
        let b = tracker.reader();
        assert_eq!(a.get(), None);

        tracker.set(Vec2::new(10.0, 20.0));
        tracker.set(Vec2::new(30.0, 40.0));
        assert_eq!(a.get(), Some(Vec2::new(30.0, 40.0)));
        assert_eq!(b.get(), Some(Vec2::new(30.0, 40.0)));

        tracker.clear();
        assert_eq!(a.get(), None);

        assert_eq!(tracker.reader_count(), 2);
        drop(b);
        assert_eq!(tracker.reader_count(), 1);
    }
}
