//! The C ABI shared with the engine module.
//!
//! Layouts here are the wire contract: any change must ship in lockstep
//! with the engine. All pointers passed through these types are only
//! valid for the duration of the call they arrive in.

#![allow(unsafe_code)]

use std::ffi::c_void;

use glint_proto::Rect;

/// A borrowed byte range crossing the ABI.
///
/// `data` may be null only when `len` is zero.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ByteBuffer {
    /// First byte, or null for an empty buffer.
    pub data: *const u8,
    /// Length in bytes.
    pub len: u64,
}

impl ByteBuffer {
    /// Wraps a slice for the duration of one call.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: bytes.as_ptr(),
            len: bytes.len() as u64,
        }
    }

    /// An empty buffer.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: std::ptr::null(),
            len: 0,
        }
    }

    /// Reborrows the range as a slice, if it is well formed.
    ///
    /// # Safety
    ///
    /// `data` must point to `len` readable bytes for the lifetime `'a`.
    #[must_use]
    pub unsafe fn as_slice<'a>(&self) -> Option<&'a [u8]> {
        if self.data.is_null() {
            return (self.len == 0).then_some(&[] as &[u8]);
        }
        Some(std::slice::from_raw_parts(self.data, self.len as usize))
    }
}

/// Texture create/update command from the engine.
pub type SetTextureFn = unsafe extern "C" fn(
    id: u64,
    offset_x: i32,
    offset_y: i32,
    width: i32,
    height: i32,
    filter_mode: i32,
    pixels: ByteBuffer,
);

/// Texture removal command from the engine.
pub type RemTextureFn = unsafe extern "C" fn(id: u64);

/// Opens the frame's paint pass.
pub type BeginPaintFn = unsafe extern "C" fn();

/// One mesh draw. `vertices` is a packed array of
/// [`glint_paint::Vertex`], `indices` of `u32`.
pub type PaintMeshFn = unsafe extern "C" fn(
    texture_id: u64,
    vertices: ByteBuffer,
    indices: ByteBuffer,
    bounds: Rect,
);

/// Closes the frame's paint pass.
pub type EndPaintFn = unsafe extern "C" fn();

/// On-screen keyboard request (nonzero shows it).
pub type ShowKeyboardFn = unsafe extern "C" fn(visible: i32);

/// The callback table handed to the engine at init.
///
/// The engine stores this for its lifetime and calls back only from
/// inside an update call, on the calling thread.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostCallbacks {
    /// Texture create/update.
    pub set_texture: SetTextureFn,
    /// Texture removal.
    pub rem_texture: RemTextureFn,
    /// Pass open.
    pub begin_paint: BeginPaintFn,
    /// Mesh draw.
    pub paint_mesh: PaintMeshFn,
    /// Pass close.
    pub end_paint: EndPaintFn,
    /// Keyboard visibility request.
    pub show_keyboard: ShowKeyboardFn,
}

/// Per-frame engine entry. `destroy` nonzero makes this the final call;
/// the engine tears down and must not call back afterwards.
pub type UpdateFn = unsafe extern "C" fn(input: ByteBuffer, app: *mut c_void, destroy: u32);

/// Engine init entry point, exported as `glint_engine_init`.
pub type InitFn = unsafe extern "C" fn(callbacks: HostCallbacks) -> EngineEntry;

/// What the engine's init hands back.
#[repr(C)]
pub struct EngineEntry {
    /// The per-frame entry; null here is a startup error.
    pub update: Option<UpdateFn>,
    /// Opaque engine state, passed back verbatim on every update.
    pub app: *mut c_void,
}

/// Symbol name of the engine's init entry point.
pub const INIT_SYMBOL: &str = "glint_engine_init";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_buffer_round_trips_a_slice() {
        let bytes = [1u8, 2, 3];
        let buffer = ByteBuffer::from_slice(&bytes);
        let back = unsafe { buffer.as_slice() }.expect("well formed");
        assert_eq!(back, &bytes);
    }

    #[test]
    fn null_data_is_only_valid_when_empty() {
        let empty = ByteBuffer::empty();
        assert_eq!(unsafe { empty.as_slice() }, Some([].as_slice()));

        let bogus = ByteBuffer {
            data: std::ptr::null(),
            len: 4,
        };
        assert_eq!(unsafe { bogus.as_slice() }, None);
    }
}
