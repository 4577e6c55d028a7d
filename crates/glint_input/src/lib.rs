//! # Glint Input
//!
//! Turns one host tick's raw input signals into the ordered, delta-encoded
//! event stream the engine consumes.
//!
//! The translator is a pure function of the host snapshot plus a small
//! amount of cross-frame state: last pointer position, the active primary
//! touch, and the on-screen keyboard text baseline.

pub mod keyboard;
pub mod snapshot;
pub mod translator;

pub use keyboard::{KeyboardPreload, OnScreenKeyboard};
pub use snapshot::{InputSnapshot, TouchSample};
pub use translator::{InputTranslator, TranslatorConfig};
