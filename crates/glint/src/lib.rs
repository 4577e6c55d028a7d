//! # Glint
//!
//! Host-side bridge between a per-frame render loop and an external
//! immediate-mode GUI engine loaded as a native module.
//!
//! Each host frame: sample input into an [`InputSnapshot`], call
//! [`GuiRuntime::tick`], then render the draws the engine queued on the
//! backend. See `glint_bridge` for the boundary contract.
//!
//! ```no_run
//! use glint::prelude::*;
//!
//! # fn main() -> Result<(), glint::BridgeError> {
//! let config = BridgeConfig::load_toml("glint.toml")?;
//! let loader = default_loader(&config)?;
//! let mut gui = GuiRuntime::startup(&config, RecordingBackend::new(), loader.as_ref())?;
//!
//! let snapshot = InputSnapshot::for_screen(1920.0, 1080.0);
//! gui.tick(&snapshot);
//! gui.shutdown();
//! # Ok(())
//! # }
//! ```

pub use glint_bridge::{
    default_loader, Bridge, BridgeConfig, BridgeContext, BridgeError, BridgeResult,
    DylibEngineLoader, EngineHost, EngineLoader, EngineSession, GuiRuntime,
};
pub use glint_input::{InputSnapshot, InputTranslator, KeyboardPreload, TouchSample, TranslatorConfig};
pub use glint_paint::{
    Painter, PaintStats, RecordingBackend, RenderBackend, TextureFilter, Vertex,
};
#[cfg(feature = "wgpu-backend")]
pub use glint_paint::WgpuBackend;
pub use glint_proto::{FrameInput, InputEvent, Key, Modifiers, PointerButton, Pos2, Rect, TouchPhase};

/// The items a typical host needs in scope.
pub mod prelude {
    pub use crate::{
        default_loader, BridgeConfig, EngineHost, GuiRuntime, InputSnapshot, Painter,
        RecordingBackend, RenderBackend, TextureFilter,
    };
}
