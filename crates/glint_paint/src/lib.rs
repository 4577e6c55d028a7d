//! # Glint Paint
//!
//! Applies the engine's texture and mesh commands to host GPU resources
//! with correct lifetime semantics.
//!
//! ## Architecture
//!
//! ```text
//!   engine callbacks          this crate                host renderer
//!   ────────────────   ┌──────────────────────┐   ──────────────────
//!   set/rem texture ──>│ TextureCache         │
//!   begin paint ──────>│ Painter ── MeshPool  │──> RenderBackend impl
//!   paint mesh ───────>│   (two-generation    │    (wgpu, recording,
//!   end paint ────────>│    rotation)         │     host's own)
//!                      └──────────────────────┘
//! ```
//!
//! A mesh painted in frame N is consumed by the renderer during frame
//! N+1 and only becomes reusable in frame N+2; the pool rotation
//! guarantees that without reference counting.

pub mod backend;
pub mod mesh;
pub mod painter;
pub mod stats;
pub mod texture;
pub mod vertex;

pub use backend::recording::RecordingBackend;
pub use backend::{MaterialId, MeshId, RenderBackend, TextureFilter, TextureId};
#[cfg(feature = "wgpu-backend")]
pub use backend::wgpu_backend::WgpuBackend;
pub use mesh::MeshPool;
pub use painter::Painter;
pub use stats::PaintStats;
pub use texture::{TextureCache, TextureUpdateOutcome};
pub use vertex::Vertex;
