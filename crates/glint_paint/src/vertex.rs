//! The engine's fixed vertex layout.

use bytemuck::{Pod, Zeroable};

/// One GUI vertex exactly as the engine lays it out in memory:
/// 2D position, 4x8-bit color, 2D texture coordinates. 20 bytes.
///
/// The paint-mesh callback hands over a raw buffer of these; being `Pod`
/// lets the bridge reinterpret it without copying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in engine screen points.
    pub pos: [f32; 2],
    /// Straight-alpha RGBA color.
    pub color: [u8; 4],
    /// Texture coordinates in the bound atlas.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Size of one vertex on the wire and in GPU buffers.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_the_engine_contract() {
        assert_eq!(Vertex::SIZE, 20);
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
    }
}
