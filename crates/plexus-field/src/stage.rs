//! Owns every particle field on a page and drives their frame loops.

use std::collections::{BTreeMap, BTreeSet};

use plexus_core::{ColorScheme, FieldConfig, PointerReader, PointerTracker, SurfaceSize, Vec2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::field::ParticleField;
use crate::scheduler::{FrameQueue, FrameRequest};
use crate::surface::Surface;

/// Upper bound on particles per field; connections cost O(n²) per frame.
pub const MAX_POINTS: usize = 1000;

/// Identifies a field created on a [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldHandle(u64);

/// A field plus the resources it holds while running.
#[derive(Debug)]
struct FieldRenderer<S> {
    field: ParticleField,
    surface: Option<S>,
    frame: Option<FrameRequest>,
    pointer: Option<PointerReader>,
}

impl<S: Surface> FieldRenderer<S> {
    fn tick(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let pointer = self.pointer.as_ref().and_then(PointerReader::get);
        self.field.step(surface, pointer)
    }
}

/// Composition root for particle fields.
///
/// Every field runs until [`Stage::destroy`]: each frame it draws once and
/// requests the next frame. Pointer moves reach every pointer-reactive field
/// through one shared [`PointerTracker`].
#[derive(Debug)]
pub struct Stage<S> {
    fields: BTreeMap<FieldHandle, FieldRenderer<S>>,
    frames: FrameQueue<FieldHandle>,
    pointer: PointerTracker,
    window_listeners: BTreeSet<FieldHandle>,
    rng: StdRng,
    next_id: u64,
}

impl<S: Surface> Default for Stage<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> Stage<S> {
    /// Stage seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Stage with reproducible particle layouts.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            fields: BTreeMap::new(),
            frames: FrameQueue::new(),
            pointer: PointerTracker::new(),
            window_listeners: BTreeSet::new(),
            rng,
            next_id: 0,
        }
    }

    /// Create a field of `point_count` particles on `surface` and start its
    /// frame loop.
    ///
    /// A missing surface yields an inert field: no frames are requested and
    /// nothing is ever drawn.
    pub fn create(
        &mut self,
        surface: Option<S>,
        point_count: usize,
        config: FieldConfig,
    ) -> FieldHandle {
        let handle = FieldHandle(self.next_id);
        self.next_id += 1;

        let point_count = if point_count > MAX_POINTS {
            warn!(point_count, max = MAX_POINTS, "particle count clamped");
            MAX_POINTS
        } else {
            point_count
        };
        let size = surface.as_ref().map_or(SurfaceSize::default(), |s| s.size());
        let field = ParticleField::new(point_count, size, config, &mut self.rng);

        let running = surface.is_some();
        let pointer = (running && field.config().pointer_enabled()).then(|| self.pointer.reader());
        let frame = running.then(|| self.frames.request(handle));
        debug!(?handle, point_count, running, ?size, "field created");

        self.fields.insert(
            handle,
            FieldRenderer {
                field,
                surface,
                frame,
                pointer,
            },
        );
        handle
    }

    /// Stop a field: cancel its pending frame, drop its pointer and resize
    /// subscriptions, and hand the surface back.
    pub fn destroy(&mut self, handle: FieldHandle) -> Option<S> {
        let renderer = self.fields.remove(&handle)?;
        if let Some(frame) = renderer.frame {
            self.frames.cancel(frame);
        }
        self.window_listeners.remove(&handle);
        debug!(?handle, frames = renderer.field.frames(), "field destroyed");
        renderer.surface
    }

    /// Record a pointer move for every pointer-reactive field.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer.set(position);
    }

    /// The pointer left the window.
    pub fn pointer_left(&mut self) {
        self.pointer.clear();
    }

    /// Resize `handle` together with the window from now on.
    pub fn track_window(&mut self, handle: FieldHandle) -> bool {
        match self.fields.get(&handle) {
            Some(renderer) if renderer.surface.is_some() => self.window_listeners.insert(handle),
            _ => false,
        }
    }

    /// The window changed size. Returns how many fields followed.
    pub fn window_resized(&mut self, size: SurfaceSize) -> usize {
        let listeners: Vec<FieldHandle> = self.window_listeners.iter().copied().collect();
        listeners
            .into_iter()
            .filter(|handle| self.resize(*handle, size))
            .count()
    }

    /// Change one field's drawable size. Particles keep their positions.
    /// The field bounces inside whatever size the surface accepted.
    pub fn resize(&mut self, handle: FieldHandle, size: SurfaceSize) -> bool {
        let Some(renderer) = self.fields.get_mut(&handle) else {
            return false;
        };
        let Some(surface) = renderer.surface.as_mut() else {
            return false;
        };
        surface.set_size(size);
        renderer.field.resize(surface.size());
        true
    }

    /// Run one frame for every field whose request is due. Returns how many
    /// fields drew.
    pub fn advance_frame(&mut self) -> usize {
        let mut drawn = 0;
        for (request, handle) in self.frames.take_due() {
            let Some(renderer) = self.fields.get_mut(&handle) else {
                continue;
            };
            if renderer.frame != Some(request) {
                continue;
            }
            if renderer.tick() {
                drawn += 1;
            }
            renderer.frame = Some(self.frames.request(handle));
        }
        drawn
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        for renderer in self.fields.values_mut() {
            renderer.field.set_color_scheme(scheme);
        }
    }

    pub fn surface(&self, handle: FieldHandle) -> Option<&S> {
        self.fields.get(&handle)?.surface.as_ref()
    }

    pub fn field(&self, handle: FieldHandle) -> Option<&ParticleField> {
        self.fields.get(&handle).map(|r| &r.field)
    }

    /// Particle count of a live field, zero once destroyed.
    pub fn particle_count(&self, handle: FieldHandle) -> usize {
        self.field(handle).map_or(0, ParticleField::len)
    }

    /// Whether the field exists and has a frame pending.
    pub fn is_running(&self, handle: FieldHandle) -> bool {
        self.fields
            .get(&handle)
            .and_then(|r| r.frame)
            .is_some_and(|frame| self.frames.is_pending(frame))
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.pending_len()
    }

    /// Pointer readers still held by fields.
    pub fn pointer_subscribers(&self) -> usize {
        self.pointer.reader_count()
    }

    pub fn window_subscribers(&self) -> usize {
        self.window_listeners.len()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
