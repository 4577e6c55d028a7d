//! Generational mesh pool.
//!
//! The renderer consumes a mesh one frame after it is painted, so a
//! shell painted in frame N must not be rewritten before frame N+2.
//! Rotation through three live generations enforces that:
//!
//! ```text
//!   paint N   : shells move recycled -> current (or fresh allocation)
//!   end pass  : retired <- recycled leftovers
//!               recycled <- previous
//!               previous <- current
//!   paint N+1 : shells from `recycled` were painted in N-1, safe
//!   begin N+2 : `retired` shells are destroyed for real
//! ```
//!
//! Destruction is deferred to the next pass boundary so nothing in
//! flight on the GPU is pulled out from under the renderer.

use crate::backend::{MeshId, RenderBackend};

/// Pool of mesh shells rotated across frame generations.
#[derive(Debug, Default)]
pub struct MeshPool {
    current: Vec<MeshId>,
    previous: Vec<MeshId>,
    recycled: Vec<MeshId>,
    retired: Vec<MeshId>,
    in_pass: bool,
}

impl MeshPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a paint pass is currently open.
    #[must_use]
    pub fn in_pass(&self) -> bool {
        self.in_pass
    }

    /// Opens a pass, returning the shells whose deferred destruction is
    /// now due. The caller destroys them and then fires the backend's
    /// reclaim hint.
    pub fn begin_pass(&mut self) -> Vec<MeshId> {
        self.in_pass = true;
        std::mem::take(&mut self.retired)
    }

    /// Hands out a shell for this frame's next mesh: a two-frames-old
    /// one if available, otherwise a freshly allocated shell.
    ///
    /// Returns the shell and whether it was recycled.
    pub fn acquire<B: RenderBackend>(&mut self, backend: &mut B) -> (MeshId, bool) {
        let (mesh, recycled) = match self.recycled.pop() {
            Some(mesh) => (mesh, true),
            None => (backend.create_mesh(), false),
        };
        self.current.push(mesh);
        (mesh, recycled)
    }

    /// Closes the pass and rotates the generations.
    ///
    /// Recycled shells left unused this frame retire; they will be
    /// destroyed at the next pass boundary.
    pub fn end_pass(&mut self) {
        self.in_pass = false;
        let leftover = std::mem::take(&mut self.recycled);
        self.retired.extend(leftover);
        self.recycled = std::mem::take(&mut self.previous);
        self.previous = std::mem::take(&mut self.current);
    }

    /// Drains every shell the pool still references, for shutdown.
    pub fn drain_all(&mut self) -> Vec<MeshId> {
        self.in_pass = false;
        let mut all = std::mem::take(&mut self.retired);
        all.append(&mut self.recycled);
        all.append(&mut self.previous);
        all.append(&mut self.current);
        all
    }

    /// Shells painted this frame so far.
    #[must_use]
    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    /// Shells eligible for reuse this frame.
    #[must_use]
    pub fn recycled_len(&self) -> usize {
        self.recycled.len()
    }

    /// Shells awaiting deferred destruction.
    #[must_use]
    pub fn retired_len(&self) -> usize {
        self.retired.len()
    }
}
