//! The seam between paint logic and the host's actual renderer.
//!
//! Command-buffer submission is the host's business; this trait covers
//! exactly the operations the cache and pool need. Handles are opaque
//! tokens minted by the backend.

use glint_proto::Rect;

use crate::vertex::Vertex;

pub mod recording;
#[cfg(feature = "wgpu-backend")]
pub mod wgpu_backend;

/// Opaque handle to a backend texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Opaque handle to a backend material (a texture binding plus whatever
/// pipeline state the host derives from it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u64);

/// Opaque handle to a backend mesh (vertex and index storage).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub u64);

/// Texture sampling mode requested by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureFilter {
    /// Smooth interpolation; the engine's default for font atlases.
    #[default]
    Bilinear,
    /// Nearest-neighbor; requested for crisp user images.
    Point,
}

impl TextureFilter {
    /// Decodes the engine's raw filter-mode flag (1 = point, else
    /// bilinear).
    #[inline]
    #[must_use]
    pub fn from_raw(value: i32) -> Self {
        if value == 1 {
            Self::Point
        } else {
            Self::Bilinear
        }
    }
}

/// Host renderer capability consumed by [`crate::Painter`].
///
/// All pixel data is RGBA8. `upload_mesh` must fully copy the provided
/// slices into GPU-owned storage before returning; the engine only keeps
/// them valid for the duration of the callback.
pub trait RenderBackend {
    /// Allocates a texture of exactly the given size with initial pixels.
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        filter: TextureFilter,
        pixels: &[u8],
    ) -> TextureId;

    /// Copies a pixel block into a sub-rectangle of an existing texture.
    ///
    /// The caller guarantees the rectangle fits.
    fn write_texture(
        &mut self,
        texture: TextureId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    );

    /// Releases a texture.
    fn destroy_texture(&mut self, texture: TextureId);

    /// Instantiates a material bound to `texture`.
    fn create_material(&mut self, texture: TextureId) -> MaterialId;

    /// Swaps the texture an existing material is bound to.
    fn rebind_material(&mut self, material: MaterialId, texture: TextureId);

    /// Releases a material.
    fn destroy_material(&mut self, material: MaterialId);

    /// Allocates an empty mesh shell.
    fn create_mesh(&mut self) -> MeshId;

    /// Replaces a mesh's vertex and index data and its precomputed bounds.
    fn upload_mesh(&mut self, mesh: MeshId, vertices: &[Vertex], indices: &[u32], bounds: Rect);

    /// Releases a mesh.
    fn destroy_mesh(&mut self, mesh: MeshId);

    /// Enqueues a draw of `mesh` with `material` for this frame.
    fn submit_mesh(&mut self, mesh: MeshId, material: MaterialId);

    /// Opens the frame's command recording scope (clears last frame's
    /// draw list).
    fn begin_frame(&mut self);

    /// Closes the frame's command recording scope.
    fn end_frame(&mut self);

    /// Hints that now is a good moment to reclaim unreferenced resources.
    ///
    /// Called at the generational collection point, never mid-frame.
    fn reclaim_unused(&mut self);
}
