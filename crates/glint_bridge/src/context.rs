//! The concrete [`EngineHost`] wiring painter and translator together.

use glint_input::{InputSnapshot, InputTranslator, TranslatorConfig};
use glint_paint::{Painter, RenderBackend, TextureFilter, Vertex};
use glint_proto::{FrameInput, Rect};

use crate::config::BridgeConfig;
use crate::host::EngineHost;

/// Host-side state the engine's callbacks operate on.
pub struct BridgeContext<B: RenderBackend> {
    painter: Painter<B>,
    translator: InputTranslator,
}

impl<B: RenderBackend> BridgeContext<B> {
    /// Builds the context over a render backend.
    #[must_use]
    pub fn new(backend: B, config: &BridgeConfig) -> Self {
        Self {
            painter: Painter::new(backend),
            translator: InputTranslator::new(TranslatorConfig {
                pixels_per_point: config.pixels_per_point,
                target_fps: config.target_fps,
                keyboard_preload: config.keyboard_preload,
            }),
        }
    }

    /// Translates one host tick into the engine's frame message.
    pub fn translate(&mut self, snapshot: &InputSnapshot) -> FrameInput {
        self.translator.translate(snapshot)
    }

    /// The painter (for host rendering and stats).
    pub fn painter(&self) -> &Painter<B> {
        &self.painter
    }

    /// Mutable painter access (for host shutdown paths).
    pub fn painter_mut(&mut self) -> &mut Painter<B> {
        &mut self.painter
    }

    /// The input translator.
    pub fn translator(&self) -> &InputTranslator {
        &self.translator
    }
}

impl<B: RenderBackend> EngineHost for BridgeContext<B> {
    fn set_texture(
        &mut self,
        id: u64,
        offset: (i32, i32),
        size: (i32, i32),
        filter: TextureFilter,
        pixels: &[u8],
    ) {
        self.painter.set_texture(id, offset, size, filter, pixels);
    }

    fn remove_texture(&mut self, id: u64) {
        self.painter.remove_texture(id);
    }

    fn begin_paint(&mut self) {
        self.painter.begin_paint();
    }

    fn paint_mesh(&mut self, texture_id: u64, vertices: &[Vertex], indices: &[u32], bounds: Rect) {
        self.painter.paint_mesh(texture_id, vertices, indices, bounds);
    }

    fn end_paint(&mut self) {
        self.painter.end_paint();
    }

    fn show_keyboard(&mut self, visible: bool) {
        self.translator.show_keyboard(visible);
    }
}
