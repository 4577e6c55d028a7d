//! On-screen keyboard state machine.
//!
//! The engine asks for the keyboard via the show-keyboard callback; the
//! host feeds the current buffer content back each tick. We only ever send
//! the engine the *appended* suffix, diffed against a baseline that resets
//! on open and clears on close.

use glint_proto::{InputEvent, Key};
use serde::{Deserialize, Serialize};

/// What the diff baseline is seeded with when the keyboard opens.
///
/// Observed host implementations disagree here, so it is a configuration
/// choice rather than a hard-coded behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardPreload {
    /// Baseline starts empty; the whole buffer counts as appended text.
    #[default]
    Empty,
    /// Baseline is seeded with the text already in the target field, so
    /// only characters typed after opening are appended.
    CurrentText,
}

/// Show/hide state plus the text-diff baseline.
#[derive(Debug, Default)]
pub struct OnScreenKeyboard {
    preload: KeyboardPreload,
    visible: bool,
    baseline: String,
}

impl OnScreenKeyboard {
    /// Creates a closed keyboard with the given preload policy.
    #[must_use]
    pub fn new(preload: KeyboardPreload) -> Self {
        Self {
            preload,
            visible: false,
            baseline: String::new(),
        }
    }

    /// Whether the keyboard is currently shown.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Handles the engine's show-keyboard signal.
    ///
    /// `current_text` is the content of the field being edited, used only
    /// when the preload policy asks for it.
    pub fn set_visible(&mut self, show: bool, current_text: &str) {
        if show && !self.visible {
            tracing::debug!("opening on-screen keyboard");
            self.visible = true;
            self.baseline = match self.preload {
                KeyboardPreload::Empty => String::new(),
                KeyboardPreload::CurrentText => current_text.to_string(),
            };
        } else if !show && self.visible {
            tracing::debug!("closing on-screen keyboard");
            self.visible = false;
            self.baseline.clear();
        }
    }

    /// Diffs the host's keyboard buffer against the baseline and pushes
    /// the resulting events.
    ///
    /// The normal case is a pure extension: emit just the appended suffix.
    /// If the buffer diverged (user edited mid-string, host replaced the
    /// content), fall back to erasing the old baseline with backspace
    /// edges and retyping the whole buffer.
    pub fn drain_buffer(&mut self, buffer: &str, events: &mut Vec<InputEvent>) {
        if !self.visible || buffer == self.baseline {
            return;
        }

        if let Some(appended) = buffer.strip_prefix(self.baseline.as_str()) {
            events.push(InputEvent::Text(appended.to_string()));
        } else {
            for _ in self.baseline.chars() {
                events.push(InputEvent::Key { key: Key::Backspace, pressed: true });
                events.push(InputEvent::Key { key: Key::Backspace, pressed: false });
            }
            if !buffer.is_empty() {
                events.push(InputEvent::Text(buffer.to_string()));
            }
        }
        self.baseline = buffer.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_with_empty_preload_sends_whole_buffer() {
        let mut kb = OnScreenKeyboard::new(KeyboardPreload::Empty);
        kb.set_visible(true, "prefilled");

        let mut events = Vec::new();
        kb.drain_buffer("prefilled", &mut events);
        assert_eq!(events, vec![InputEvent::Text("prefilled".to_string())]);
    }

    #[test]
    fn open_with_current_text_preload_sends_only_appended() {
        let mut kb = OnScreenKeyboard::new(KeyboardPreload::CurrentText);
        kb.set_visible(true, "abc");

        let mut events = Vec::new();
        kb.drain_buffer("abcde", &mut events);
        assert_eq!(events, vec![InputEvent::Text("de".to_string())]);
    }

    #[test]
    fn unchanged_buffer_emits_nothing() {
        let mut kb = OnScreenKeyboard::new(KeyboardPreload::CurrentText);
        kb.set_visible(true, "abc");

        let mut events = Vec::new();
        kb.drain_buffer("abc", &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn diverged_buffer_falls_back_to_retype() {
        let mut kb = OnScreenKeyboard::new(KeyboardPreload::CurrentText);
        kb.set_visible(true, "abc");

        let mut events = Vec::new();
        kb.drain_buffer("xyz", &mut events);

        // Three chars erased (down+up edges each), then the new content.
        assert_eq!(events.len(), 7);
        assert_eq!(events[6], InputEvent::Text("xyz".to_string()));
        assert!(matches!(
            events[0],
            InputEvent::Key { key: Key::Backspace, pressed: true }
        ));
    }

    #[test]
    fn close_clears_baseline_and_mutes_diffing() {
        let mut kb = OnScreenKeyboard::new(KeyboardPreload::Empty);
        kb.set_visible(true, "");
        let mut events = Vec::new();
        kb.drain_buffer("abc", &mut events);
        events.clear();

        kb.set_visible(false, "");
        kb.drain_buffer("abcdef", &mut events);
        assert!(events.is_empty());
        assert!(!kb.is_visible());
    }
}
