//! Per-frame input events.
//!
//! Events are delta-encoded: the translator only emits what changed this
//! tick (key edges, pointer movement, appended text). Order within a frame
//! is significant and is consumed as-is by the engine's state machine.

#![allow(missing_docs)]

use crate::math::Pos2;

/// Keyboard keys understood by the engine.
///
/// Discriminants are contiguous from zero; the wire codec relies on that
/// to decode through [`Key::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12, F13, F14, F15,
    ArrowDown, ArrowLeft, ArrowRight, ArrowUp,
    Backspace, Delete, End, Enter, Escape, Home, Insert,
    PageDown, PageUp, Space, Tab,
}

impl Key {
    /// Every key, indexed by discriminant.
    pub const ALL: [Self; 62] = [
        Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G,
        Self::H, Self::I, Self::J, Self::K, Self::L, Self::M,
        Self::N, Self::O, Self::P, Self::Q, Self::R, Self::S, Self::T,
        Self::U, Self::V, Self::W, Self::X, Self::Y, Self::Z,
        Self::Num0, Self::Num1, Self::Num2, Self::Num3, Self::Num4,
        Self::Num5, Self::Num6, Self::Num7, Self::Num8, Self::Num9,
        Self::F1, Self::F2, Self::F3, Self::F4, Self::F5, Self::F6,
        Self::F7, Self::F8, Self::F9, Self::F10, Self::F11, Self::F12,
        Self::F13, Self::F14, Self::F15,
        Self::ArrowDown, Self::ArrowLeft, Self::ArrowRight, Self::ArrowUp,
        Self::Backspace, Self::Delete, Self::End, Self::Enter, Self::Escape,
        Self::Home, Self::Insert,
    ];

    /// Decodes a key from its wire discriminant.
    #[inline]
    #[must_use]
    pub fn from_wire(value: u16) -> Option<Self> {
        // ALL stops where the tail variants begin; handle those explicitly
        // so the table and the enum cannot drift apart silently.
        match value {
            v if (v as usize) < Self::ALL.len() => Some(Self::ALL[v as usize]),
            v if v == Self::PageDown as u16 => Some(Self::PageDown),
            v if v == Self::PageUp as u16 => Some(Self::PageUp),
            v if v == Self::Space as u16 => Some(Self::Space),
            v if v == Self::Tab as u16 => Some(Self::Tab),
            _ => None,
        }
    }
}

/// Pointer (mouse) buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
}

impl PointerButton {
    /// Decodes a button from its wire discriminant.
    #[inline]
    #[must_use]
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Primary),
            1 => Some(Self::Secondary),
            2 => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Phase of a touch contact this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TouchPhase {
    /// Contact began this tick.
    Start = 0,
    /// Contact moved since the last tick.
    Move = 1,
    /// Contact lifted this tick.
    End = 2,
    /// Contact was cancelled by the system.
    Cancel = 3,
    /// Contact is down but did not move (no synthetic pointer events).
    Stationary = 4,
}

impl TouchPhase {
    /// Decodes a phase from its wire discriminant.
    #[inline]
    #[must_use]
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Start),
            1 => Some(Self::Move),
            2 => Some(Self::End),
            3 => Some(Self::Cancel),
            4 => Some(Self::Stationary),
            _ => None,
        }
    }
}

/// Modifier-key state sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    /// Platform command key (maps to ctrl on desktop, cmd on mac).
    pub command: bool,
    /// The mac command key specifically.
    pub mac_cmd: bool,
}

impl Modifiers {
    /// Packs the five flags into one wire byte.
    #[inline]
    #[must_use]
    pub fn to_bits(self) -> u8 {
        u8::from(self.alt)
            | u8::from(self.ctrl) << 1
            | u8::from(self.shift) << 2
            | u8::from(self.command) << 3
            | u8::from(self.mac_cmd) << 4
    }

    /// Unpacks the wire byte.
    #[inline]
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self {
            alt: bits & 0b0000_0001 != 0,
            ctrl: bits & 0b0000_0010 != 0,
            shift: bits & 0b0000_0100 != 0,
            command: bits & 0b0000_1000 != 0,
            mac_cmd: bits & 0b0001_0000 != 0,
        }
    }
}

/// One input event, in the order the host observed it this tick.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A key changed state (down or up edge, never a repeat).
    Key {
        key: Key,
        pressed: bool,
    },
    /// A pointer button changed state at the given position.
    PointerButton {
        pos: Pos2,
        button: PointerButton,
        pressed: bool,
    },
    /// The pointer moved to a new in-bounds position.
    PointerMoved(Pos2),
    /// The pointer left the screen (or a touch sequence ended).
    PointerGone,
    /// Scroll delta for this tick, already scaled to engine units.
    Scroll(Pos2),
    /// Raw touch contact data; synthetic pointer events follow separately.
    Touch {
        id: u64,
        device_id: u64,
        phase: TouchPhase,
        pos: Pos2,
        force: f32,
    },
    /// Text inserted this tick (appended characters only, never a full
    /// buffer retransmission unless the baseline diverged).
    Text(String),
}
