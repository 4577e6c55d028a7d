//! The per-frame call into the engine.

#![allow(unsafe_code)]

use glint_proto::{FrameEncoder, FrameInput};

use crate::ffi::ByteBuffer;
use crate::host::EngineHost;
use crate::loader::EngineSession;
use crate::trampoline::ContextGuard;

/// Owns the engine session and the frame-input encoder.
///
/// One frame is in flight at a time; the encoder's buffer is reused
/// across frames and stays valid for exactly the duration of each
/// update call.
pub struct Bridge {
    session: Option<EngineSession>,
    encoder: FrameEncoder,
}

impl Bridge {
    /// Wraps an initialized engine session.
    #[must_use]
    pub fn new(session: EngineSession) -> Self {
        Self {
            session: Some(session),
            encoder: FrameEncoder::new(),
        }
    }

    /// Whether the engine is still live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Runs one engine update. The engine's callbacks land on `host`
    /// synchronously before this returns.
    pub fn update(&mut self, frame: &FrameInput, host: &mut dyn EngineHost) {
        let Some(session) = &self.session else {
            tracing::warn!("update after shutdown ignored");
            return;
        };
        let bytes = self.encoder.encode(frame);
        let guard = ContextGuard::install(host);
        // Callbacks re-enter through the guard's slot; the input buffer
        // outlives the call because the encoder is not touched again
        // until the next frame.
        unsafe {
            (session.update_fn())(ByteBuffer::from_slice(bytes), session.app(), 0);
        }
        drop(guard);
    }

    /// Tells the engine to tear down. Idempotent; the session is gone
    /// afterwards and further updates are ignored.
    pub fn shutdown(&mut self, host: &mut dyn EngineHost) {
        let Some(session) = self.session.take() else {
            return;
        };
        tracing::info!("shutting down engine");
        let guard = ContextGuard::install(host);
        unsafe {
            (session.update_fn())(ByteBuffer::empty(), session.app(), 1);
        }
        drop(guard);
        // The module (if dynamically loaded) unloads when the session
        // drops, after the final call has returned.
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        if self.session.is_some() {
            tracing::warn!("bridge dropped without shutdown; engine teardown skipped");
        }
    }
}
