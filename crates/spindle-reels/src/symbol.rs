//! SymbolCell — retained render state for one visible reel slot.

/// One cell on a reel strip.
///
/// The core mutates these; the rendering layer reads them each frame and
/// maps `texture` to an actual sprite, `y` to a vertical offset in pixels
/// and `brightness` to a color filter (1.0 = neutral).
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolCell {
    /// Texture index into the embedder's symbol atlas.
    pub texture: usize,
    /// Vertical offset in pixels; negative while in the wraparound buffer.
    pub y: f64,
    /// Highlight brightness: 1.0 neutral, >1 lit, <1 dimmed.
    pub brightness: f64,
}

impl SymbolCell {
    pub fn new(texture: usize, y: f64) -> Self {
        Self {
            texture,
            y,
            brightness: 1.0,
        }
    }
}
