//! Glyphs used when a cell surface is drawn to the terminal.

/// Particle glyphs from faintest to brightest.
pub const NODE_CHARS: &[char] = &['·', '∙', '•', '●'];

/// Ink levels at which each [`NODE_CHARS`] entry starts.
pub const NODE_LEVELS: &[f32] = &[0.0, 0.12, 0.3, 0.55];

/// Glyph for cells crossed by a connection.
pub const EDGE_CHAR: char = '·';

/// Connections fainter than this are not drawn.
pub const EDGE_MIN_INK: f32 = 0.08;

/// Pick the node glyph for an ink level.
pub fn node_char(ink: f32) -> char {
    NODE_LEVELS
        .iter()
        .rposition(|level| ink >= *level)
        .map_or(NODE_CHARS[0], |i| NODE_CHARS[i])
}
