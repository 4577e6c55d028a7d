//! Host-tick to frame-input translation.
//!
//! Emission order within a frame is a contract with the engine's input
//! state machine: key edges, mouse button edges, touches (with their
//! synthetic pointer events), text, pointer movement, scroll. A key-down
//! must land before any text it produced.

use glint_proto::{FrameInput, InputEvent, PointerButton, Pos2, Rect, TouchPhase};

use crate::keyboard::{KeyboardPreload, OnScreenKeyboard};
use crate::snapshot::InputSnapshot;

/// Scroll-axis units per host scroll tick.
const SCROLL_SCALE: f32 = 30.0;

/// Frame-level knobs the translator needs from the host configuration.
#[derive(Clone, Copy, Debug)]
pub struct TranslatorConfig {
    /// Ratio of physical pixels to logical points reported to the engine.
    pub pixels_per_point: f32,
    /// Host frame-rate target; zero disables the predicted delta-time.
    pub target_fps: u32,
    /// On-screen keyboard baseline policy.
    pub keyboard_preload: KeyboardPreload,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            pixels_per_point: 1.0,
            target_fps: 60,
            keyboard_preload: KeyboardPreload::Empty,
        }
    }
}

/// Builds one [`FrameInput`] per host tick.
///
/// Holds the minimal cross-frame state needed for delta encoding; all
/// other inputs come fresh from the snapshot each tick.
#[derive(Debug)]
pub struct InputTranslator {
    config: TranslatorConfig,
    keyboard: OnScreenKeyboard,
    last_mouse: Pos2,
    /// Finger currently mapped to the synthetic pointer, if any.
    primary_touch: Option<u64>,
    /// Last keyboard buffer seen, kept for the open-preload policy.
    last_keyboard_buffer: String,
}

impl InputTranslator {
    /// Creates a translator with the given configuration.
    #[must_use]
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            keyboard: OnScreenKeyboard::new(config.keyboard_preload),
            last_mouse: Pos2::ZERO,
            primary_touch: None,
            last_keyboard_buffer: String::new(),
        }
    }

    /// Forwards the engine's show-keyboard signal to the keyboard state
    /// machine.
    pub fn show_keyboard(&mut self, show: bool) {
        let current = self.last_keyboard_buffer.clone();
        self.keyboard.set_visible(show, &current);
    }

    /// Read access to the keyboard state machine (for hosts and tests).
    #[must_use]
    pub const fn keyboard(&self) -> &OnScreenKeyboard {
        &self.keyboard
    }

    /// Translates one host tick into the frame message.
    pub fn translate(&mut self, snap: &InputSnapshot) -> FrameInput {
        let mut events = Vec::new();

        self.gather_key_edges(snap, &mut events);
        self.gather_touches(snap, &mut events);
        self.gather_text(snap, &mut events);
        self.gather_pointer(snap, &mut events);
        self.gather_scroll(snap, &mut events);

        FrameInput {
            screen_rect: Rect::from_size(snap.screen_width, snap.screen_height),
            max_texture_side: snap.max_texture_side,
            time: snap.time,
            predicted_dt: if self.config.target_fps > 0 {
                1.0 / self.config.target_fps as f32
            } else {
                0.0
            },
            pixels_per_point: self.config.pixels_per_point,
            has_focus: snap.has_focus,
            modifiers: snap.modifiers,
            events,
        }
    }

    /// Key and mouse-button edges, with the asymmetric held-key fast path.
    ///
    /// Down edges are scanned only while something is held, up edges only
    /// while nothing is. A press and release landing in the same tick is
    /// therefore not representable; the release surfaces one tick later.
    fn gather_key_edges(&self, snap: &InputSnapshot, events: &mut Vec<InputEvent>) {
        if snap.any_key_held {
            for key in &snap.keys_pressed {
                events.push(InputEvent::Key { key: *key, pressed: true });
            }
            for button in &snap.buttons_pressed {
                events.push(InputEvent::PointerButton {
                    pos: flip_y(snap, snap.mouse_position),
                    button: *button,
                    pressed: true,
                });
            }
        } else {
            for key in &snap.keys_released {
                events.push(InputEvent::Key { key: *key, pressed: false });
            }
            for button in &snap.buttons_released {
                events.push(InputEvent::PointerButton {
                    pos: flip_y(snap, snap.mouse_position),
                    button: *button,
                    pressed: false,
                });
            }
        }
    }

    /// Touch events plus the synthetic pointer stream for the primary
    /// finger.
    fn gather_touches(&mut self, snap: &InputSnapshot, events: &mut Vec<InputEvent>) {
        for touch in &snap.touches {
            let pos = flip_y(snap, touch.position);
            events.push(InputEvent::Touch {
                id: touch.id,
                device_id: touch.device_id,
                phase: touch.phase,
                pos,
                force: touch.force,
            });

            match touch.phase {
                TouchPhase::Start => {
                    if self.primary_touch.is_none() {
                        self.primary_touch = Some(touch.id);
                        events.push(InputEvent::PointerMoved(pos));
                        events.push(InputEvent::PointerButton {
                            pos,
                            button: PointerButton::Primary,
                            pressed: true,
                        });
                    }
                }
                TouchPhase::Move => {
                    if self.primary_touch == Some(touch.id) {
                        events.push(InputEvent::PointerMoved(pos));
                    }
                }
                TouchPhase::End => {
                    if self.primary_touch == Some(touch.id) {
                        self.primary_touch = None;
                        events.push(InputEvent::PointerButton {
                            pos,
                            button: PointerButton::Primary,
                            pressed: false,
                        });
                        events.push(InputEvent::PointerGone);
                    }
                }
                TouchPhase::Cancel => {
                    if self.primary_touch == Some(touch.id) {
                        self.primary_touch = None;
                        events.push(InputEvent::PointerGone);
                    }
                }
                TouchPhase::Stationary => {}
            }
        }
    }

    /// Direct text input plus the on-screen keyboard diff.
    fn gather_text(&mut self, snap: &InputSnapshot, events: &mut Vec<InputEvent>) {
        if !snap.text.is_empty() {
            let cleaned = sanitize_text(&snap.text);
            if !cleaned.is_empty() {
                events.push(InputEvent::Text(cleaned));
            }
        }

        if let Some(buffer) = &snap.keyboard_buffer {
            self.keyboard.drain_buffer(buffer, events);
            self.last_keyboard_buffer.clear();
            self.last_keyboard_buffer.push_str(buffer);
        }
    }

    /// Pointer movement, with out-of-bounds mapping to pointer-gone.
    ///
    /// The last position is recorded whenever it changed, in or out of
    /// bounds, so re-entering the screen at the same spot stays silent.
    fn gather_pointer(&mut self, snap: &InputSnapshot, events: &mut Vec<InputEvent>) {
        if snap.mouse_position == self.last_mouse {
            return;
        }

        let p = snap.mouse_position;
        let out_of_bounds =
            p.x < 0.0 || p.y < 0.0 || p.x > snap.screen_width || p.y > snap.screen_height;
        if out_of_bounds {
            events.push(InputEvent::PointerGone);
        } else {
            events.push(InputEvent::PointerMoved(flip_y(snap, p)));
        }
        self.last_mouse = p;
    }

    fn gather_scroll(&self, snap: &InputSnapshot, events: &mut Vec<InputEvent>) {
        if snap.scroll_axis != 0.0 {
            events.push(InputEvent::Scroll(Pos2::new(
                0.0,
                snap.scroll_axis * SCROLL_SCALE,
            )));
        }
    }

}

/// Converts a host bottom-left-origin position into engine top-left.
#[inline]
fn flip_y(snap: &InputSnapshot, pos: Pos2) -> Pos2 {
    Pos2::new(pos.x, snap.screen_height - pos.y)
}

/// Filters direct text the way the host's raw input string needs:
/// backspace characters are dropped (they arrive as key edges already),
/// and carriage returns gain a newline for the engine's line handling.
fn sanitize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '\u{8}' {
            continue;
        }
        out.push(c);
        if c == '\r' {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::TouchSample;
    use glint_proto::{Key, Modifiers};

    fn snapshot() -> InputSnapshot {
        InputSnapshot::for_screen(800.0, 600.0)
    }

    fn translator() -> InputTranslator {
        InputTranslator::new(TranslatorConfig::default())
    }

    #[test]
    fn event_ordering_keys_before_pointer_before_scroll() {
        let mut tr = translator();
        let mut snap = snapshot();
        snap.any_key_held = true;
        snap.keys_pressed = vec![Key::A];
        snap.buttons_pressed = vec![PointerButton::Primary];
        snap.mouse_position = Pos2::new(100.0, 100.0);
        snap.scroll_axis = 1.0;
        snap.text = "a".to_string();

        let frame = tr.translate(&snap);
        let kinds: Vec<&'static str> = frame
            .events
            .iter()
            .map(|e| match e {
                InputEvent::Key { .. } => "key",
                InputEvent::PointerButton { .. } => "button",
                InputEvent::Touch { .. } => "touch",
                InputEvent::Text(_) => "text",
                InputEvent::PointerMoved(_) => "moved",
                InputEvent::PointerGone => "gone",
                InputEvent::Scroll(_) => "scroll",
            })
            .collect();
        assert_eq!(kinds, vec!["key", "button", "text", "moved", "scroll"]);
    }

    #[test]
    fn down_edges_only_emitted_while_held() {
        let mut tr = translator();
        let mut snap = snapshot();
        // Host reports a press edge but the held flag is already clear:
        // the fast path skips the down scan entirely.
        snap.any_key_held = false;
        snap.keys_pressed = vec![Key::A];
        snap.keys_released = vec![Key::B];

        let frame = tr.translate(&snap);
        assert_eq!(
            frame.events,
            vec![InputEvent::Key { key: Key::B, pressed: false }]
        );
    }

    #[test]
    fn touch_lifecycle_synthesizes_pointer_events() {
        let mut tr = translator();
        let mut snap = snapshot();

        // Began.
        snap.touches = vec![TouchSample {
            id: 7,
            device_id: 0,
            phase: TouchPhase::Start,
            position: Pos2::new(10.0, 590.0),
            force: 1.0,
        }];
        let mut all = tr.translate(&snap).events;

        // Moved.
        snap.touches[0].phase = TouchPhase::Move;
        snap.touches[0].position = Pos2::new(20.0, 580.0);
        all.extend(tr.translate(&snap).events);

        // Ended.
        snap.touches[0].phase = TouchPhase::End;
        all.extend(tr.translate(&snap).events);

        let expect = vec![
            InputEvent::Touch {
                id: 7,
                device_id: 0,
                phase: TouchPhase::Start,
                pos: Pos2::new(10.0, 10.0),
                force: 1.0,
            },
            InputEvent::PointerMoved(Pos2::new(10.0, 10.0)),
            InputEvent::PointerButton {
                pos: Pos2::new(10.0, 10.0),
                button: PointerButton::Primary,
                pressed: true,
            },
            InputEvent::Touch {
                id: 7,
                device_id: 0,
                phase: TouchPhase::Move,
                pos: Pos2::new(20.0, 20.0),
                force: 1.0,
            },
            InputEvent::PointerMoved(Pos2::new(20.0, 20.0)),
            InputEvent::Touch {
                id: 7,
                device_id: 0,
                phase: TouchPhase::End,
                pos: Pos2::new(20.0, 20.0),
                force: 1.0,
            },
            InputEvent::PointerButton {
                pos: Pos2::new(20.0, 20.0),
                button: PointerButton::Primary,
                pressed: false,
            },
            InputEvent::PointerGone,
        ];
        assert_eq!(all, expect);
    }

    #[test]
    fn secondary_finger_gets_no_synthetic_pointer() {
        let mut tr = translator();
        let mut snap = snapshot();
        snap.touches = vec![
            TouchSample {
                id: 1,
                device_id: 0,
                phase: TouchPhase::Start,
                position: Pos2::new(10.0, 10.0),
                force: 1.0,
            },
            TouchSample {
                id: 2,
                device_id: 0,
                phase: TouchPhase::Start,
                position: Pos2::new(50.0, 50.0),
                force: 1.0,
            },
        ];

        let frame = tr.translate(&snap);
        let synthetic = frame
            .events
            .iter()
            .filter(|e| matches!(e, InputEvent::PointerButton { .. }))
            .count();
        assert_eq!(synthetic, 1, "only the primary finger drives the pointer");
    }

    #[test]
    fn stationary_touch_emits_touch_event_only() {
        let mut tr = translator();
        let mut snap = snapshot();
        snap.touches = vec![TouchSample {
            id: 1,
            device_id: 0,
            phase: TouchPhase::Stationary,
            position: Pos2::new(10.0, 10.0),
            force: 0.5,
        }];

        let frame = tr.translate(&snap);
        assert_eq!(frame.events.len(), 1);
        assert!(matches!(frame.events[0], InputEvent::Touch { .. }));
    }

    #[test]
    fn pointer_move_is_emitted_only_on_change() {
        let mut tr = translator();
        let mut snap = snapshot();
        snap.mouse_position = Pos2::new(100.0, 200.0);

        let first = tr.translate(&snap);
        assert_eq!(
            first.events,
            vec![InputEvent::PointerMoved(Pos2::new(100.0, 400.0))]
        );

        let second = tr.translate(&snap);
        assert!(second.events.is_empty(), "unchanged position stays silent");
    }

    #[test]
    fn out_of_bounds_pointer_becomes_gone_but_is_recorded() {
        let mut tr = translator();
        let mut snap = snapshot();
        snap.mouse_position = Pos2::new(-5.0, 100.0);

        let frame = tr.translate(&snap);
        assert_eq!(frame.events, vec![InputEvent::PointerGone]);

        // Same out-of-bounds position again: recorded, so no repeat.
        let frame = tr.translate(&snap);
        assert!(frame.events.is_empty());
    }

    #[test]
    fn scroll_is_scaled_and_vertical_only() {
        let mut tr = translator();
        let mut snap = snapshot();
        snap.scroll_axis = 0.5;

        let frame = tr.translate(&snap);
        assert_eq!(
            frame.events,
            vec![InputEvent::Scroll(Pos2::new(0.0, 15.0))]
        );
    }

    #[test]
    fn direct_text_is_sanitized() {
        let mut tr = translator();
        let mut snap = snapshot();
        snap.text = "ab\u{8}\rc".to_string();

        let frame = tr.translate(&snap);
        assert_eq!(
            frame.events,
            vec![InputEvent::Text("ab\r\nc".to_string())]
        );
    }

    #[test]
    fn frame_scalars_come_from_snapshot_and_config() {
        let mut tr = InputTranslator::new(TranslatorConfig {
            pixels_per_point: 2.0,
            target_fps: 120,
            keyboard_preload: KeyboardPreload::Empty,
        });
        let mut snap = snapshot();
        snap.max_texture_side = 4096;
        snap.time = 3.5;
        snap.has_focus = true;
        snap.modifiers = Modifiers { ctrl: true, ..Modifiers::default() };

        let frame = tr.translate(&snap);
        assert_eq!(frame.screen_rect, Rect::from_size(800.0, 600.0));
        assert_eq!(frame.max_texture_side, 4096);
        assert!((frame.predicted_dt - 1.0 / 120.0).abs() < f32::EPSILON);
        assert!((frame.pixels_per_point - 2.0).abs() < f32::EPSILON);
        assert!(frame.has_focus);
        assert!(frame.modifiers.ctrl);
    }

    #[test]
    fn keyboard_diff_flows_through_translation() {
        let mut tr = translator();
        tr.show_keyboard(true);

        let mut snap = snapshot();
        snap.keyboard_buffer = Some("hi".to_string());
        let frame = tr.translate(&snap);
        assert_eq!(frame.events, vec![InputEvent::Text("hi".to_string())]);

        snap.keyboard_buffer = Some("hi there".to_string());
        let frame = tr.translate(&snap);
        assert_eq!(frame.events, vec![InputEvent::Text(" there".to_string())]);

        tr.show_keyboard(false);
        snap.keyboard_buffer = Some("hi there!".to_string());
        let frame = tr.translate(&snap);
        assert!(frame.events.is_empty());
    }
}
