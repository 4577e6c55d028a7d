//! # Glint Protocol
//!
//! The logical frame-input schema sent to the external GUI engine, and the
//! byte-level codec that flattens it into one contiguous buffer per frame.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - GPU or window-related crates
//! - the FFI layer
//!
//! It is the shared language between the input translator (producer) and
//! the boundary transport (consumer). The wire layout is internal to the
//! bridge; nothing outside this workspace parses it.

pub mod codec;
pub mod event;
pub mod frame;
pub mod math;

pub use codec::{FrameDecoder, FrameEncoder};
pub use event::{InputEvent, Key, Modifiers, PointerButton, TouchPhase};
pub use frame::FrameInput;
pub use math::{Pos2, Rect};
