//! Startup / tick / shutdown orchestration for a GUI session.

use glint_input::InputSnapshot;
use glint_paint::RenderBackend;

use crate::config::BridgeConfig;
use crate::context::BridgeContext;
use crate::error::BridgeResult;
use crate::ffi::HostCallbacks;
use crate::loader::EngineLoader;
use crate::transport::Bridge;

/// One running GUI engine session, driven once per host frame.
///
/// ```text
///   startup: load module -> init(callbacks) -> session
///   tick:    snapshot -> FrameInput -> update -> callbacks -> draws
///   shutdown: final update(destroy) -> destroy painter resources
/// ```
pub struct GuiRuntime<B: RenderBackend> {
    context: BridgeContext<B>,
    bridge: Bridge,
}

impl<B: RenderBackend> GuiRuntime<B> {
    /// Loads and initializes the engine, ready to tick.
    pub fn startup(
        config: &BridgeConfig,
        backend: B,
        loader: &dyn EngineLoader,
    ) -> BridgeResult<Self> {
        let session = loader.load(HostCallbacks::trampolines())?;
        tracing::info!(
            target_fps = config.target_fps,
            pixels_per_point = config.pixels_per_point,
            "engine session started"
        );
        Ok(Self {
            context: BridgeContext::new(backend, config),
            bridge: Bridge::new(session),
        })
    }

    /// Runs one frame: translate the snapshot, call the engine, apply
    /// its paint commands.
    pub fn tick(&mut self, snapshot: &InputSnapshot) {
        let frame = self.context.translate(snapshot);
        self.bridge.update(&frame, &mut self.context);
    }

    /// Tears the engine down and destroys every GPU resource the
    /// painter still holds. Idempotent.
    pub fn shutdown(&mut self) {
        let was_running = self.bridge.is_running();
        self.bridge.shutdown(&mut self.context);
        if was_running {
            self.context.painter_mut().destroy_all();
        }
    }

    /// Whether the engine is still live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.bridge.is_running()
    }

    /// The host-side context (painter, translator).
    pub fn context(&self) -> &BridgeContext<B> {
        &self.context
    }

    /// Mutable context access.
    pub fn context_mut(&mut self) -> &mut BridgeContext<B> {
        &mut self.context
    }
}

impl<B: RenderBackend> Drop for GuiRuntime<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
