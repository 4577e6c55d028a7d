//! Routes the engine's C callbacks to the active [`EngineHost`].
//!
//! The C ABI has no closure captures, so a process-wide slot holds the
//! host for exactly the duration of one update call. The engine
//! contract says callbacks only arrive from inside update on the
//! calling thread; a callback with no installed host means the engine
//! broke that contract, and it is logged and dropped.

#![allow(unsafe_code)]

use parking_lot::Mutex;

use glint_paint::{TextureFilter, Vertex};
use glint_proto::Rect;

use crate::ffi::{ByteBuffer, HostCallbacks};
use crate::host::EngineHost;

struct HostPtr(*mut (dyn EngineHost + 'static));

// Only ever dereferenced on the thread that installed it; the slot is
// just storage that outlives the stack frame of the update call.
unsafe impl Send for HostPtr {}

static ACTIVE: Mutex<Option<HostPtr>> = Mutex::new(None);

/// Clears the active-host slot when the update call unwinds or returns.
pub struct ContextGuard {
    _private: (),
}

impl ContextGuard {
    /// Installs `host` as the callback target until the guard drops.
    pub fn install(host: &mut dyn EngineHost) -> Self {
        let ptr = host as *mut dyn EngineHost;
        // The guard's drop clears the slot before the borrow ends, so
        // the erased lifetime never actually outlives the host.
        let erased: *mut (dyn EngineHost + 'static) = unsafe { std::mem::transmute(ptr) };
        let previous = ACTIVE.lock().replace(HostPtr(erased));
        if previous.is_some() {
            tracing::error!("nested update call detected; replacing active host");
        }
        Self { _private: () }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        *ACTIVE.lock() = None;
    }
}

fn with_host(name: &str, f: impl FnOnce(&mut dyn EngineHost)) {
    let guard = ACTIVE.lock();
    match guard.as_ref() {
        Some(ptr) => {
            // Valid while the slot is occupied; see ContextGuard.
            let host = unsafe { &mut *ptr.0 };
            f(host);
        }
        None => {
            tracing::error!(callback = name, "engine callback outside an update call dropped");
        }
    }
}

unsafe extern "C" fn set_texture(
    id: u64,
    offset_x: i32,
    offset_y: i32,
    width: i32,
    height: i32,
    filter_mode: i32,
    pixels: ByteBuffer,
) {
    let Some(pixels) = pixels.as_slice() else {
        tracing::error!(id, "set-texture with null pixel pointer dropped");
        return;
    };
    with_host("set_texture", |host| {
        host.set_texture(
            id,
            (offset_x, offset_y),
            (width, height),
            TextureFilter::from_raw(filter_mode),
            pixels,
        );
    });
}

unsafe extern "C" fn rem_texture(id: u64) {
    with_host("rem_texture", |host| host.remove_texture(id));
}

unsafe extern "C" fn begin_paint() {
    with_host("begin_paint", |host| host.begin_paint());
}

unsafe extern "C" fn paint_mesh(
    texture_id: u64,
    vertices: ByteBuffer,
    indices: ByteBuffer,
    bounds: Rect,
) {
    let (Some(vertex_bytes), Some(index_bytes)) = (vertices.as_slice(), indices.as_slice())
    else {
        tracing::error!(texture_id, "paint-mesh with null buffer pointer dropped");
        return;
    };
    let Ok(vertices) = bytemuck::try_cast_slice::<u8, Vertex>(vertex_bytes) else {
        tracing::error!(
            texture_id,
            len = vertex_bytes.len(),
            "paint-mesh vertex buffer misaligned or mis-sized, dropped"
        );
        return;
    };
    let Ok(indices) = bytemuck::try_cast_slice::<u8, u32>(index_bytes) else {
        tracing::error!(
            texture_id,
            len = index_bytes.len(),
            "paint-mesh index buffer misaligned or mis-sized, dropped"
        );
        return;
    };
    with_host("paint_mesh", |host| {
        host.paint_mesh(texture_id, vertices, indices, bounds);
    });
}

unsafe extern "C" fn end_paint() {
    with_host("end_paint", |host| host.end_paint());
}

unsafe extern "C" fn show_keyboard(visible: i32) {
    with_host("show_keyboard", |host| host.show_keyboard(visible != 0));
}

impl HostCallbacks {
    /// The callback table routing through the active-host slot.
    #[must_use]
    pub fn trampolines() -> Self {
        Self {
            set_texture,
            rem_texture,
            begin_paint,
            paint_mesh,
            end_paint,
            show_keyboard,
        }
    }
}
