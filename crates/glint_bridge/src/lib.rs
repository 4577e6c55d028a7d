//! # Glint Bridge
//!
//! FFI transport between the host's render loop and the external GUI
//! engine module.
//!
//! ## Frame protocol
//!
//! ```text
//!   host tick
//!     |  InputSnapshot
//!     v
//!   translate -> FrameInput -> encode -> update(bytes, app, 0)
//!                                           |
//!                 set/rem texture <---------+  (synchronous callbacks)
//!                 begin/paint/end  <--------+
//!                                           v
//!                                     update returns
//! ```
//!
//! Exactly one update is in flight at a time, always on the host's
//! render thread. Startup and config errors surface as [`BridgeError`];
//! anything that goes wrong per-frame is logged and dropped so the host
//! loop keeps running.

pub mod config;
pub mod context;
pub mod error;
pub mod ffi;
pub mod host;
pub mod lifecycle;
pub mod loader;
pub mod trampoline;
pub mod transport;

pub use config::BridgeConfig;
pub use context::BridgeContext;
pub use error::{BridgeError, BridgeResult};
pub use ffi::{ByteBuffer, EngineEntry, HostCallbacks, InitFn, UpdateFn, INIT_SYMBOL};
pub use host::EngineHost;
pub use lifecycle::GuiRuntime;
#[cfg(feature = "static-engine")]
pub use loader::LinkedEngineLoader;
pub use loader::{default_loader, DylibEngineLoader, EngineLoader, EngineSession};
pub use transport::Bridge;
