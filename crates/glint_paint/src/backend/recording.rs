//! In-memory backend that retains full resource state.
//!
//! Used by the test suites across the workspace and usable by hosts for
//! golden-image style verification without a GPU. Pixel writes behave
//! exactly like the GPU path: row-by-row copies into an owned RGBA8
//! buffer.

use std::collections::HashMap;

use glint_proto::Rect;

use crate::backend::{MaterialId, MeshId, RenderBackend, TextureFilter, TextureId};
use crate::vertex::Vertex;

/// A texture held by the recording backend.
#[derive(Clone, Debug)]
pub struct RecordedTexture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Sampling mode it was created with.
    pub filter: TextureFilter,
    /// Owned RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
}

/// A mesh held by the recording backend.
#[derive(Clone, Debug, Default)]
pub struct RecordedMesh {
    /// Last uploaded vertices.
    pub vertices: Vec<Vertex>,
    /// Last uploaded indices.
    pub indices: Vec<u32>,
    /// Last uploaded bounds.
    pub bounds: Rect,
    /// How many times this shell has been (re)filled.
    pub upload_count: u32,
}

/// One enqueued draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedDraw {
    /// Mesh that was submitted.
    pub mesh: MeshId,
    /// Material it was bound to.
    pub material: MaterialId,
}

/// Headless [`RenderBackend`] retaining everything it is asked to do.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    textures: HashMap<u64, RecordedTexture>,
    materials: HashMap<u64, TextureId>,
    meshes: HashMap<u64, RecordedMesh>,
    draws: Vec<RecordedDraw>,
    frames_begun: u32,
    frames_ended: u32,
    reclaim_hints: u32,
}

impl RecordingBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Looks up a live texture.
    #[must_use]
    pub fn texture(&self, id: TextureId) -> Option<&RecordedTexture> {
        self.textures.get(&id.0)
    }

    /// Looks up a live mesh.
    #[must_use]
    pub fn mesh(&self, id: MeshId) -> Option<&RecordedMesh> {
        self.meshes.get(&id.0)
    }

    /// The texture a material is currently bound to.
    #[must_use]
    pub fn material_texture(&self, id: MaterialId) -> Option<TextureId> {
        self.materials.get(&id.0).copied()
    }

    /// Draws enqueued since the last `begin_frame`.
    #[must_use]
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Number of live textures.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of live materials.
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Number of live mesh shells.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// How many times the reclaim hint fired.
    #[must_use]
    pub fn reclaim_hints(&self) -> u32 {
        self.reclaim_hints
    }

    /// How many frames have been opened.
    #[must_use]
    pub fn frames_begun(&self) -> u32 {
        self.frames_begun
    }

    /// How many frames have been closed.
    #[must_use]
    pub fn frames_ended(&self) -> u32 {
        self.frames_ended
    }
}

impl RenderBackend for RecordingBackend {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        filter: TextureFilter,
        pixels: &[u8],
    ) -> TextureId {
        let id = self.next_id();
        self.textures.insert(
            id,
            RecordedTexture {
                width,
                height,
                filter,
                pixels: pixels.to_vec(),
            },
        );
        TextureId(id)
    }

    fn write_texture(
        &mut self,
        texture: TextureId,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) {
        let Some(tex) = self.textures.get_mut(&texture.0) else {
            return;
        };
        let dst_stride = tex.width as usize * 4;
        let src_stride = width as usize * 4;
        for row in 0..height as usize {
            let dst_start = (y as usize + row) * dst_stride + x as usize * 4;
            let src_start = row * src_stride;
            tex.pixels[dst_start..dst_start + src_stride]
                .copy_from_slice(&pixels[src_start..src_start + src_stride]);
        }
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture.0);
    }

    fn create_material(&mut self, texture: TextureId) -> MaterialId {
        let id = self.next_id();
        self.materials.insert(id, texture);
        MaterialId(id)
    }

    fn rebind_material(&mut self, material: MaterialId, texture: TextureId) {
        if let Some(bound) = self.materials.get_mut(&material.0) {
            *bound = texture;
        }
    }

    fn destroy_material(&mut self, material: MaterialId) {
        self.materials.remove(&material.0);
    }

    fn create_mesh(&mut self) -> MeshId {
        let id = self.next_id();
        self.meshes.insert(id, RecordedMesh::default());
        MeshId(id)
    }

    fn upload_mesh(&mut self, mesh: MeshId, vertices: &[Vertex], indices: &[u32], bounds: Rect) {
        if let Some(entry) = self.meshes.get_mut(&mesh.0) {
            entry.vertices = vertices.to_vec();
            entry.indices = indices.to_vec();
            entry.bounds = bounds;
            entry.upload_count += 1;
        }
    }

    fn destroy_mesh(&mut self, mesh: MeshId) {
        self.meshes.remove(&mesh.0);
    }

    fn submit_mesh(&mut self, mesh: MeshId, material: MaterialId) {
        self.draws.push(RecordedDraw { mesh, material });
    }

    fn begin_frame(&mut self) {
        self.draws.clear();
        self.frames_begun += 1;
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
    }

    fn reclaim_unused(&mut self) {
        self.reclaim_hints += 1;
    }
}
