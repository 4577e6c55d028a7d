//! Paint-side counters, logged once per frame at trace level.

/// Running totals for one painter instance.
///
/// Counters are cumulative over the painter's lifetime; hosts that want
/// per-frame numbers should diff snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Backend textures created (first sightings plus full replacements).
    pub textures_created: u64,
    /// Engine texture ids removed.
    pub textures_removed: u64,
    /// Texture updates rejected by the validity checks.
    pub invalid_texture_updates: u64,
    /// Meshes submitted for drawing.
    pub meshes_drawn: u64,
    /// Paint-mesh calls dropped (unknown texture id or out-of-pass).
    pub draws_dropped: u64,
    /// Fresh mesh shells allocated because the recycle list ran dry.
    pub meshes_allocated: u64,
    /// Mesh shells reused from the two-frames-old generation.
    pub meshes_recycled: u64,
    /// Out-of-order lifecycle calls (begin inside a pass, end outside).
    pub protocol_violations: u64,
}

impl PaintStats {
    /// Emits the frame's totals to the trace log.
    pub fn trace(&self) {
        tracing::trace!(
            textures_created = self.textures_created,
            textures_removed = self.textures_removed,
            invalid_texture_updates = self.invalid_texture_updates,
            meshes_drawn = self.meshes_drawn,
            draws_dropped = self.draws_dropped,
            meshes_allocated = self.meshes_allocated,
            meshes_recycled = self.meshes_recycled,
            protocol_violations = self.protocol_violations,
            "paint stats"
        );
    }
}
