//! The per-frame input message.

use crate::event::{InputEvent, Modifiers};
use crate::math::Rect;

/// Everything the engine needs to know about one host tick.
///
/// Rebuilt from scratch every frame by the input translator; read-only once
/// handed to the boundary transport. The previous frame's instance is
/// discarded wholesale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Visible screen area in engine coordinates (top-left origin).
    pub screen_rect: Rect,
    /// Largest texture side length the host GPU supports.
    pub max_texture_side: u32,
    /// Wall time in seconds since host startup.
    pub time: f32,
    /// Predicted time until the next frame, in seconds. Zero when the host
    /// has no frame-rate target.
    pub predicted_dt: f32,
    /// Ratio of physical pixels to logical points.
    pub pixels_per_point: f32,
    /// Whether the host application currently has input focus.
    pub has_focus: bool,
    /// Modifier-key state for this frame.
    pub modifiers: Modifiers,
    /// Ordered event stream; ordering is consumed as-is by the engine.
    pub events: Vec<InputEvent>,
}
