//! Terminal cell grid implementing [`Surface`].
//!
//! Each terminal cell covers [`CELL_WIDTH`] x [`CELL_HEIGHT`] logical pixels
//! and keeps an ink level that fades every frame, which produces the trailing
//! effect when particles move.

use plexus_core::{Rgba, SurfaceSize, Vec2};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::warn;

use crate::chars::{EDGE_CHAR, EDGE_MIN_INK, node_char};
use crate::surface::Surface;

/// Logical pixels per terminal column.
pub const CELL_WIDTH: f32 = 8.0;

/// Logical pixels per terminal row.
pub const CELL_HEIGHT: f32 = 16.0;

/// Largest grid a surface allocates, well past any real terminal.
pub(crate) const MAX_COLS: u16 = 1024;
pub(crate) const MAX_ROWS: u16 = 512;

/// Ink below this is treated as cleared.
const MIN_INK: f32 = 0.02;

/// Distance between samples when rasterizing a line.
const LINE_STEP: f32 = CELL_WIDTH / 2.0;

/// Logical size of a `cols` x `rows` grid.
pub fn logical_size(cols: u16, rows: u16) -> SurfaceSize {
    SurfaceSize::new(cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

/// What was last drawn into a cell. Particles win over connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Mark {
    #[default]
    Empty,
    Edge,
    Node,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    color: Rgba,
    ink: f32,
    mark: Mark,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            color: Rgba::rgb(0, 0, 0),
            ink: 0.0,
            mark: Mark::Empty,
        }
    }
}

/// Persistent cell grid backing a particle field in the terminal.
#[derive(Debug, Clone)]
pub struct CellSurface {
    cols: u16,
    rows: u16,
    size: SurfaceSize,
    background: Rgba,
    cells: Vec<Cell>,
}

impl CellSurface {
    /// Grid of `cols` x `rows` terminal cells.
    pub fn new(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols.min(MAX_COLS), rows.min(MAX_ROWS));
        Self {
            cols,
            rows,
            size: logical_size(cols, rows),
            background: Rgba::rgb(2, 4, 18),
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    /// Grid exactly covering `area`.
    pub fn for_area(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Ink level of a cell, 0.0 outside the grid.
    pub fn ink_at(&self, col: u16, row: u16) -> f32 {
        self.index(col, row).map_or(0.0, |i| self.cells[i].ink)
    }

    /// Glyph a cell renders as, a space when blank.
    pub fn glyph_at(&self, col: u16, row: u16) -> char {
        self.index(col, row)
            .map_or(' ', |i| glyph(&self.cells[i]))
    }

    /// Number of cells holding any ink.
    pub fn painted_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.mark != Mark::Empty).count()
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| row as usize * self.cols as usize + col as usize)
    }

    fn cell_at(&self, point: Vec2) -> Option<(u16, u16)> {
        if !(point.x.is_finite() && point.y.is_finite()) || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = (point.x / CELL_WIDTH) as u32;
        let row = (point.y / CELL_HEIGHT) as u32;
        (col < self.cols as u32 && row < self.rows as u32).then_some((col as u16, row as u16))
    }

    /// Source-over blend of `color` into one cell.
    fn paint(&mut self, col: u16, row: u16, color: Rgba, mark: Mark) {
        let alpha = color.a;
        if alpha <= 0.0 {
            return;
        }
        let Some(i) = self.index(col, row) else {
            return;
        };
        let cell = &mut self.cells[i];
        let ink = cell.ink + alpha * (1.0 - cell.ink);
        cell.color = cell.color.mix(color, alpha / ink);
        cell.ink = ink;
        cell.mark = cell.mark.max(mark);
    }
}

impl Surface for CellSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        let max = logical_size(MAX_COLS, MAX_ROWS);
        let size = if size.width > max.width || size.height > max.height {
            warn!(?size, ?max, "surface size clamped");
            SurfaceSize::new(size.width.min(max.width), size.height.min(max.height))
        } else {
            size
        };
        let fit = |extent: f32, cell: f32| -> u16 {
            if extent.is_finite() && extent > 0.0 {
                (extent / cell).ceil() as u16
            } else {
                0
            }
        };
        let cols = fit(size.width, CELL_WIDTH);
        let rows = fit(size.height, CELL_HEIGHT);

        let mut cells = vec![Cell::default(); cols as usize * rows as usize];
        for row in 0..rows.min(self.rows) {
            for col in 0..cols.min(self.cols) {
                if let Some(old) = self.index(col, row) {
                    cells[row as usize * cols as usize + col as usize] = self.cells[old];
                }
            }
        }

        self.cols = cols;
        self.rows = rows;
        self.size = size;
        self.cells = cells;
    }

    fn fade(&mut self, color: Rgba) {
        self.background = color.with_alpha(1.0);
        let keep = 1.0 - color.a.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            cell.ink *= keep;
            if cell.ink < MIN_INK {
                *cell = Cell::default();
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: f32) {
        // A cell is far larger than a particle, so the halo only brightens it.
        let color = color.with_alpha(color.a * (1.0 + glow.max(0.0) / CELL_HEIGHT));
        let radius = radius.max(0.0);
        let corners = (
            self.cell_at(Vec2::new(center.x - radius, center.y - radius)),
            self.cell_at(Vec2::new(center.x + radius, center.y + radius)),
        );
        match corners {
            (Some((c0, r0)), Some((c1, r1))) => {
                for row in r0..=r1 {
                    for col in c0..=c1 {
                        self.paint(col, row, color, Mark::Node);
                    }
                }
            }
            // partly off the grid: only the center counts
            _ => {
                if let Some((col, row)) = self.cell_at(center) {
                    self.paint(col, row, color, Mark::Node);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        let delta = to - from;
        let steps = (delta.length() / LINE_STEP).ceil().max(1.0) as u32;
        let mut last = None;
        for i in 0..=steps {
            let point = from + delta * (i as f32 / steps as f32);
            let cell = self.cell_at(point);
            if let Some((col, row)) = cell
                && cell != last
            {
                self.paint(col, row, color, Mark::Edge);
                last = cell;
            }
        }
    }
}

fn glyph(cell: &Cell) -> char {
    match cell.mark {
        Mark::Empty => ' ',
        Mark::Node => node_char(cell.ink),
        Mark::Edge if cell.ink >= EDGE_MIN_INK => EDGE_CHAR,
        Mark::Edge => ' ',
    }
}

impl Widget for &CellSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..self.rows.min(area.height) {
            for col in 0..self.cols.min(area.width) {
                let Some(i) = self.index(col, row) else {
                    continue;
                };
                let cell = &self.cells[i];
                let ch = glyph(cell);
                if ch == ' ' {
                    continue;
                }
                let fg = self.background.mix(cell.color, cell.ink);
                if let Some(out) = buf.cell_mut((area.x + col, area.y + row)) {
                    out.set_char(ch).set_fg(fg.into());
                }
            }
        }
    }
}
