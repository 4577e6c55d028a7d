//! Frame orchestration: applies engine paint commands to a backend.
//!
//! The engine drives this through four callback-shaped entry points per
//! frame: texture updates (any time), `begin_paint`, zero or more
//! `paint_mesh` calls, `end_paint`. Every destruction the engine
//! requests is deferred to the next `begin_paint`, the generational
//! collection point, so resources referenced by the frame in flight
//! stay alive until the renderer is done with them.

use glint_proto::Rect;

use crate::backend::{MaterialId, RenderBackend, TextureFilter, TextureId};
use crate::mesh::MeshPool;
use crate::stats::PaintStats;
use crate::texture::{TextureCache, TextureUpdateOutcome};
use crate::vertex::Vertex;

/// Applies engine texture and mesh commands to a [`RenderBackend`].
#[derive(Debug)]
pub struct Painter<B: RenderBackend> {
    backend: B,
    textures: TextureCache,
    pool: MeshPool,
    retired_textures: Vec<TextureId>,
    retired_materials: Vec<MaterialId>,
    stats: PaintStats,
}

impl<B: RenderBackend> Painter<B> {
    /// Wraps a backend in a painter with empty caches.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            textures: TextureCache::new(),
            pool: MeshPool::new(),
            retired_textures: Vec::new(),
            retired_materials: Vec::new(),
            stats: PaintStats::default(),
        }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the wrapped backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Lifetime totals.
    #[must_use]
    pub fn stats(&self) -> PaintStats {
        self.stats
    }

    /// Applies a texture-set command from the engine.
    pub fn set_texture(
        &mut self,
        id: u64,
        offset: (i32, i32),
        size: (i32, i32),
        filter: TextureFilter,
        pixels: &[u8],
    ) {
        let outcome = self.textures.update(
            &mut self.backend,
            id,
            offset.0,
            offset.1,
            size.0,
            size.1,
            filter,
            pixels,
        );
        match outcome {
            TextureUpdateOutcome::Created => {
                self.stats.textures_created += 1;
                tracing::debug!(id, width = size.0, height = size.1, "texture created");
            }
            TextureUpdateOutcome::PartialWrite => {}
            TextureUpdateOutcome::Replaced { retired } => {
                self.stats.textures_created += 1;
                self.retired_textures.push(retired);
                tracing::debug!(id, width = size.0, height = size.1, "texture replaced");
            }
            TextureUpdateOutcome::Rejected => {
                self.stats.invalid_texture_updates += 1;
            }
        }
    }

    /// Applies a texture-remove command. The backing resources stay
    /// alive until the next collection point.
    pub fn remove_texture(&mut self, id: u64) {
        match self.textures.remove(id) {
            Some((texture, material)) => {
                self.retired_textures.push(texture);
                self.retired_materials.push(material);
                self.stats.textures_removed += 1;
                tracing::debug!(id, "texture removed");
            }
            None => {
                tracing::debug!(id, "remove for unknown texture id ignored");
            }
        }
    }

    /// Opens a paint pass. This is the generational collection point:
    /// everything retired since the previous pass is destroyed here.
    ///
    /// A nested begin-paint is dropped whole, keeping the open pass and
    /// its one-rotation-per-frame guarantee intact.
    pub fn begin_paint(&mut self) {
        if self.pool.in_pass() {
            self.stats.protocol_violations += 1;
            tracing::error!("begin-paint while a pass is already open; dropped");
            return;
        }
        self.backend.begin_frame();

        let garbage = self.pool.begin_pass();
        let destroyed =
            garbage.len() + self.retired_materials.len() + self.retired_textures.len();
        for mesh in garbage {
            self.backend.destroy_mesh(mesh);
        }
        for material in self.retired_materials.drain(..) {
            self.backend.destroy_material(material);
        }
        for texture in self.retired_textures.drain(..) {
            self.backend.destroy_texture(texture);
        }
        // The reclaim hint accompanies actual destruction, not every pass.
        if destroyed > 0 {
            self.backend.reclaim_unused();
        }
    }

    /// Uploads one mesh and enqueues it for drawing with the material of
    /// `texture_id`.
    ///
    /// An unknown texture id is a silent no-op; the id may have been
    /// removed with draws still in flight. Drawing outside a pass is a
    /// protocol violation and is logged.
    pub fn paint_mesh(
        &mut self,
        texture_id: u64,
        vertices: &[Vertex],
        indices: &[u32],
        bounds: Rect,
    ) {
        if !self.pool.in_pass() {
            self.stats.protocol_violations += 1;
            self.stats.draws_dropped += 1;
            tracing::error!(texture_id, "paint-mesh outside a pass dropped");
            return;
        }
        let Some(material) = self.textures.material_for(texture_id) else {
            self.stats.draws_dropped += 1;
            tracing::trace!(texture_id, "paint-mesh for unknown texture id skipped");
            return;
        };

        let (mesh, recycled) = self.pool.acquire(&mut self.backend);
        if recycled {
            self.stats.meshes_recycled += 1;
        } else {
            self.stats.meshes_allocated += 1;
        }
        self.backend.upload_mesh(mesh, vertices, indices, bounds);
        self.backend.submit_mesh(mesh, material);
        self.stats.meshes_drawn += 1;
    }

    /// Closes the pass and rotates the mesh generations.
    pub fn end_paint(&mut self) {
        if !self.pool.in_pass() {
            self.stats.protocol_violations += 1;
            tracing::error!("end-paint without an open pass ignored");
            return;
        }
        self.pool.end_pass();
        self.backend.end_frame();
        self.stats.trace();
    }

    /// Destroys every resource the painter still tracks and asks the
    /// host to reclaim what just became unreferenced. For shutdown;
    /// nothing may be in flight on the renderer when this runs.
    pub fn destroy_all(&mut self) {
        for mesh in self.pool.drain_all() {
            self.backend.destroy_mesh(mesh);
        }
        for (texture, material) in self.textures.drain_all() {
            self.retired_textures.push(texture);
            self.retired_materials.push(material);
        }
        for material in self.retired_materials.drain(..) {
            self.backend.destroy_material(material);
        }
        for texture in self.retired_textures.drain(..) {
            self.backend.destroy_texture(texture);
        }
        self.backend.reclaim_unused();
        tracing::debug!("painter resources destroyed");
    }
}

#[cfg(test)]
mod tests {
    use glint_proto::{Pos2, Rect};

    use super::*;
    use crate::backend::recording::RecordingBackend;

    fn painter() -> Painter<RecordingBackend> {
        Painter::new(RecordingBackend::new())
    }

    fn solid(width: u32, height: u32, value: u8) -> Vec<u8> {
        vec![value; width as usize * height as usize * 4]
    }

    fn quad() -> (Vec<Vertex>, Vec<u32>, Rect) {
        let v = |x: f32, y: f32| Vertex {
            pos: [x, y],
            color: [255; 4],
            uv: [0.0, 0.0],
        };
        (
            vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)],
            vec![0, 1, 2, 0, 2, 3],
            Rect::new(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        )
    }

    #[test]
    fn draw_with_known_texture_is_submitted() {
        let mut p = painter();
        p.set_texture(1, (0, 0), (4, 4), TextureFilter::Bilinear, &solid(4, 4, 1));

        let (verts, idx, bounds) = quad();
        p.begin_paint();
        p.paint_mesh(1, &verts, &idx, bounds);
        p.end_paint();

        assert_eq!(p.backend().draws().len(), 1);
        let draw = p.backend().draws()[0];
        let mesh = p.backend().mesh(draw.mesh).expect("uploaded");
        assert_eq!(mesh.vertices, verts);
        assert_eq!(mesh.indices, idx);
        assert_eq!(p.stats().meshes_drawn, 1);
    }

    #[test]
    fn draw_for_unknown_texture_is_a_silent_no_op() {
        let mut p = painter();
        let (verts, idx, bounds) = quad();

        // Normal during teardown races: a remove can land while draws
        // for that id are still arriving. Counted, never an error.
        p.begin_paint();
        p.paint_mesh(42, &verts, &idx, bounds);
        p.end_paint();

        assert!(p.backend().draws().is_empty());
        assert_eq!(p.backend().mesh_count(), 0, "no shell was spent");
        assert_eq!(p.stats().draws_dropped, 1);
        assert_eq!(p.stats().protocol_violations, 0);
    }

    #[test]
    fn removed_texture_survives_until_next_begin_paint() {
        let mut p = painter();
        p.set_texture(1, (0, 0), (4, 4), TextureFilter::Bilinear, &solid(4, 4, 1));
        let handle = p.textures.entry(1).unwrap().texture;

        let (verts, idx, bounds) = quad();
        p.begin_paint();
        p.paint_mesh(1, &verts, &idx, bounds);
        p.remove_texture(1);
        p.end_paint();

        // Frame still in flight: the backend resources must be alive.
        assert!(p.backend().texture(handle).is_some());
        assert_eq!(p.backend().material_count(), 1);

        p.begin_paint();
        assert!(p.backend().texture(handle).is_none());
        assert_eq!(p.backend().material_count(), 0);
        p.end_paint();
    }

    #[test]
    fn replaced_texture_is_destroyed_at_the_collection_point() {
        let mut p = painter();
        p.set_texture(1, (0, 0), (8, 8), TextureFilter::Bilinear, &solid(8, 8, 1));
        let old = p.textures.entry(1).unwrap().texture;

        // Resize forces a replacement mid-frame.
        p.begin_paint();
        p.set_texture(1, (0, 0), (16, 16), TextureFilter::Bilinear, &solid(16, 16, 2));
        p.end_paint();

        assert!(p.backend().texture(old).is_some(), "still referenced");

        p.begin_paint();
        assert!(p.backend().texture(old).is_none());
        p.end_paint();
    }

    #[test]
    fn mesh_shell_is_rewritten_only_two_frames_later() {
        let mut p = painter();
        p.set_texture(1, (0, 0), (4, 4), TextureFilter::Bilinear, &solid(4, 4, 1));
        let (verts, idx, bounds) = quad();

        p.begin_paint();
        p.paint_mesh(1, &verts, &idx, bounds);
        p.end_paint();
        let first = p.backend().draws()[0].mesh;

        p.begin_paint();
        p.paint_mesh(1, &verts, &idx, bounds);
        p.end_paint();
        let second = p.backend().draws()[0].mesh;
        assert_ne!(second, first, "one-frame-old shell must not be reused");
        assert_eq!(p.backend().mesh(first).unwrap().upload_count, 1);

        p.begin_paint();
        p.paint_mesh(1, &verts, &idx, bounds);
        p.end_paint();
        let third = p.backend().draws()[0].mesh;
        assert_eq!(third, first, "two-frames-old shell comes back");
        assert_eq!(p.backend().mesh(first).unwrap().upload_count, 2);
        assert_eq!(p.stats().meshes_recycled, 1);
        assert_eq!(p.stats().meshes_allocated, 2);
    }

    #[test]
    fn reclaim_hint_fires_only_when_something_was_destroyed() {
        let mut p = painter();

        // Empty frames destroy nothing: no hint.
        p.begin_paint();
        p.end_paint();
        p.begin_paint();
        p.end_paint();
        assert_eq!(p.backend().reclaim_hints(), 0);

        // A removed texture makes the next collection point destructive.
        p.set_texture(1, (0, 0), (4, 4), TextureFilter::Bilinear, &solid(4, 4, 1));
        p.remove_texture(1);
        p.begin_paint();
        p.end_paint();
        assert_eq!(p.backend().reclaim_hints(), 1);

        p.begin_paint();
        p.end_paint();
        assert_eq!(p.backend().reclaim_hints(), 1, "nothing new to reclaim");
    }

    #[test]
    fn out_of_order_calls_are_counted_not_fatal() {
        let mut p = painter();
        let (verts, idx, bounds) = quad();

        p.paint_mesh(1, &verts, &idx, bounds);
        p.end_paint();
        p.begin_paint();
        p.begin_paint();
        p.end_paint();

        assert_eq!(p.stats().protocol_violations, 3);
        // The nested begin was dropped whole: the open pass survived and
        // only one frame was recorded.
        assert_eq!(p.backend().frames_begun(), 1);
        assert_eq!(p.backend().frames_ended(), 1);
    }

    #[test]
    fn nested_begin_does_not_rotate_the_open_pass() {
        let mut p = painter();
        p.set_texture(1, (0, 0), (4, 4), TextureFilter::Bilinear, &solid(4, 4, 1));
        let (verts, idx, bounds) = quad();

        p.begin_paint();
        p.paint_mesh(1, &verts, &idx, bounds);
        p.begin_paint();
        p.paint_mesh(1, &verts, &idx, bounds);
        p.end_paint();

        // Both draws landed in the same frame and the same generation.
        assert_eq!(p.backend().draws().len(), 2);
        assert_eq!(p.stats().protocol_violations, 1);
        assert_eq!(p.pool.current_len(), 0);
        assert_eq!(p.pool.retired_len(), 0, "no mid-frame rotation");
    }

    #[test]
    fn destroy_all_leaves_the_backend_empty() {
        let mut p = painter();
        p.set_texture(1, (0, 0), (4, 4), TextureFilter::Bilinear, &solid(4, 4, 1));
        p.set_texture(2, (0, 0), (4, 4), TextureFilter::Point, &solid(4, 4, 2));
        let (verts, idx, bounds) = quad();
        for _ in 0..3 {
            p.begin_paint();
            p.paint_mesh(1, &verts, &idx, bounds);
            p.paint_mesh(2, &verts, &idx, bounds);
            p.end_paint();
        }
        p.remove_texture(2);

        let hints_before = p.backend().reclaim_hints();
        p.destroy_all();
        assert_eq!(p.backend().texture_count(), 0);
        assert_eq!(p.backend().material_count(), 0);
        assert_eq!(p.backend().mesh_count(), 0);
        assert_eq!(
            p.backend().reclaim_hints(),
            hints_before + 1,
            "teardown requests unused-asset reclamation"
        );
    }

    #[test]
    fn first_frame_from_scratch_binds_texture_and_queues_one_draw() {
        let mut p = painter();
        let v = |x: f32, y: f32| Vertex {
            pos: [x, y],
            color: [255; 4],
            uv: [0.0, 0.0],
        };
        let triangle = vec![v(0.0, 0.0), v(2.0, 0.0), v(1.0, 2.0)];
        let indices = vec![0u32, 1, 2];
        let bounds = Rect::new(Pos2::ZERO, Pos2::new(2.0, 2.0));

        // Texture arrives mid-pass, before the draw that references it.
        p.begin_paint();
        p.set_texture(1, (0, 0), (2, 2), TextureFilter::Bilinear, &solid(2, 2, 0x80));
        p.paint_mesh(1, &triangle, &indices, bounds);
        p.end_paint();

        assert_eq!(p.backend().material_count(), 1);
        let entry = p.textures.entry(1).unwrap();
        let tex = p.backend().texture(entry.texture).unwrap();
        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(tex.filter, TextureFilter::Bilinear);

        assert_eq!(p.backend().draws().len(), 1);
        // The shell rotated out of `current`; it is one frame old now
        // and must not be handed out next frame.
        assert_eq!(p.pool.current_len(), 0);
        assert_eq!(p.pool.recycled_len(), 0);
    }

    #[test]
    fn steady_state_frames_allocate_nothing_new() {
        let mut p = painter();
        p.set_texture(1, (0, 0), (4, 4), TextureFilter::Bilinear, &solid(4, 4, 1));
        let (verts, idx, bounds) = quad();

        // Warm up two generations of two meshes each.
        for _ in 0..2 {
            p.begin_paint();
            p.paint_mesh(1, &verts, &idx, bounds);
            p.paint_mesh(1, &verts, &idx, bounds);
            p.end_paint();
        }
        let warm = p.backend().mesh_count();

        for _ in 0..10 {
            p.begin_paint();
            p.paint_mesh(1, &verts, &idx, bounds);
            p.paint_mesh(1, &verts, &idx, bounds);
            p.end_paint();
        }
        assert_eq!(p.backend().mesh_count(), warm);
        assert_eq!(p.stats().meshes_allocated, 4);
    }
}
