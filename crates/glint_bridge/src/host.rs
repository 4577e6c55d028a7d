//! The host-side surface the engine's callbacks land on.

use glint_paint::{TextureFilter, Vertex};
use glint_proto::Rect;

/// Everything the engine can ask of the host during an update call.
///
/// Implementations must tolerate out-of-order and invalid calls by
/// logging and dropping them; an engine bug must never take the host
/// down mid-frame.
pub trait EngineHost {
    /// Creates or updates a texture per the update policy.
    fn set_texture(
        &mut self,
        id: u64,
        offset: (i32, i32),
        size: (i32, i32),
        filter: TextureFilter,
        pixels: &[u8],
    );

    /// Removes a texture; backing resources are destroyed at the next
    /// collection point.
    fn remove_texture(&mut self, id: u64);

    /// Opens the frame's paint pass.
    fn begin_paint(&mut self);

    /// Draws one mesh with the material of `texture_id`.
    fn paint_mesh(&mut self, texture_id: u64, vertices: &[Vertex], indices: &[u32], bounds: Rect);

    /// Closes the frame's paint pass.
    fn end_paint(&mut self);

    /// Shows or hides the host's on-screen keyboard.
    fn show_keyboard(&mut self, visible: bool);
}
