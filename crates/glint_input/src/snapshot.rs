//! Raw per-tick input sample supplied by the host.
//!
//! How the host gathers these signals (polling, event queues, platform
//! APIs) is its own business; the translator only ever sees this struct.
//! Positions use the host's convention: origin bottom-left, Y growing up.
//! The translator flips them into engine coordinates.

use glint_proto::{Key, Modifiers, Pos2, PointerButton, TouchPhase};

/// One touch contact as sampled this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    /// Stable finger identifier assigned by the host.
    pub id: u64,
    /// Input device identifier (zero for the primary touchscreen).
    pub device_id: u64,
    /// Phase of the contact this tick.
    pub phase: TouchPhase,
    /// Position in host screen coordinates (bottom-left origin).
    pub position: Pos2,
    /// Normalized contact pressure.
    pub force: f32,
}

/// Everything the host sampled for one tick.
///
/// Edge lists (`keys_pressed` and friends) carry only transitions that
/// happened this tick, in the host's polling order.
#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    /// Screen width in points.
    pub screen_width: f32,
    /// Screen height in points.
    pub screen_height: f32,
    /// Largest texture side length the host GPU supports.
    pub max_texture_side: u32,
    /// Wall time in seconds since host startup.
    pub time: f32,
    /// Whether the host window has input focus.
    pub has_focus: bool,
    /// Whether any key (or mouse button) is currently held.
    ///
    /// Drives the asymmetric edge scan: down edges are only looked for
    /// while something is held, up edges only while nothing is.
    pub any_key_held: bool,
    /// Modifier-key state.
    pub modifiers: Modifiers,
    /// Keys that transitioned to pressed this tick.
    pub keys_pressed: Vec<Key>,
    /// Keys that transitioned to released this tick.
    pub keys_released: Vec<Key>,
    /// Mouse buttons that transitioned to pressed this tick.
    pub buttons_pressed: Vec<PointerButton>,
    /// Mouse buttons that transitioned to released this tick.
    pub buttons_released: Vec<PointerButton>,
    /// Mouse position in host coordinates (bottom-left origin).
    pub mouse_position: Pos2,
    /// Vertical scroll axis value for this tick (unscaled).
    pub scroll_axis: f32,
    /// Touch contacts active this tick.
    pub touches: Vec<TouchSample>,
    /// Characters typed this tick via direct input (desktop path).
    pub text: String,
    /// Current content of the on-screen keyboard buffer, when one is open.
    pub keyboard_buffer: Option<String>,
}

impl InputSnapshot {
    /// Creates an empty snapshot for a screen of the given size.
    #[must_use]
    pub fn for_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }
}
