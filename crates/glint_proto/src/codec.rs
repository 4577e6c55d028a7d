//! Frame wire codec.
//!
//! Flattens a [`FrameInput`] into one contiguous little-endian buffer for
//! the boundary call. The encoder owns a reusable scratch buffer so the
//! steady state allocates nothing; the decoder is a zero-copy cursor in the
//! same style on the other side (used by the engine half of tests and for
//! diagnostics).
//!
//! Layout: fixed header (screen rect, texture limit, clocks, focus,
//! modifier bits), then an event count, then one tag byte plus payload per
//! event.

use bytemuck::bytes_of;

use crate::event::{InputEvent, Key, Modifiers, PointerButton, TouchPhase};
use crate::frame::FrameInput;
use crate::math::{Pos2, Rect};

/// Wire tag for each event variant.
mod tag {
    pub const KEY: u8 = 0;
    pub const POINTER_BUTTON: u8 = 1;
    pub const POINTER_MOVED: u8 = 2;
    pub const POINTER_GONE: u8 = 3;
    pub const SCROLL: u8 = 4;
    pub const TOUCH: u8 = 5;
    pub const TEXT: u8 = 6;
}

/// Frame encoder - writes a frame into a reusable buffer.
///
/// Designed to live for the whole session and be reused every frame.
#[derive(Default)]
pub struct FrameEncoder {
    buffer: Vec<u8>,
}

impl FrameEncoder {
    /// Creates an encoder with an empty scratch buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Encodes `frame` and returns the wire bytes.
    ///
    /// The returned slice borrows the encoder's scratch buffer; it stays
    /// valid (and unmoved) until the next `encode` call.
    pub fn encode(&mut self, frame: &FrameInput) -> &[u8] {
        self.buffer.clear();
        self.write_pod(&frame.screen_rect);
        self.write_u32(frame.max_texture_side);
        self.write_f32(frame.time);
        self.write_f32(frame.predicted_dt);
        self.write_f32(frame.pixels_per_point);
        self.write_u8(u8::from(frame.has_focus));
        self.write_u8(frame.modifiers.to_bits());
        self.write_u32(frame.events.len() as u32);
        for event in &frame.events {
            self.write_event(event);
        }
        &self.buffer
    }

    fn write_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Key { key, pressed } => {
                self.write_u8(tag::KEY);
                self.write_u16(*key as u16);
                self.write_u8(u8::from(*pressed));
            }
            InputEvent::PointerButton { pos, button, pressed } => {
                self.write_u8(tag::POINTER_BUTTON);
                self.write_pod(pos);
                self.write_u8(*button as u8);
                self.write_u8(u8::from(*pressed));
            }
            InputEvent::PointerMoved(pos) => {
                self.write_u8(tag::POINTER_MOVED);
                self.write_pod(pos);
            }
            InputEvent::PointerGone => {
                self.write_u8(tag::POINTER_GONE);
            }
            InputEvent::Scroll(delta) => {
                self.write_u8(tag::SCROLL);
                self.write_pod(delta);
            }
            InputEvent::Touch { id, device_id, phase, pos, force } => {
                self.write_u8(tag::TOUCH);
                self.write_u64(*id);
                self.write_u64(*device_id);
                self.write_u8(*phase as u8);
                self.write_pod(pos);
                self.write_f32(*force);
            }
            InputEvent::Text(text) => {
                self.write_u8(tag::TEXT);
                self.write_u32(text.len() as u32);
                self.buffer.extend_from_slice(text.as_bytes());
            }
        }
    }

    #[inline]
    fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    #[inline]
    fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    fn write_pod<T: bytemuck::Pod>(&mut self, value: &T) {
        self.buffer.extend_from_slice(bytes_of(value));
    }
}

/// Frame decoder - reads a frame back out of a wire buffer.
pub struct FrameDecoder<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> FrameDecoder<'a> {
    /// Creates a decoder over `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    /// Decodes a complete frame, or `None` if the buffer is truncated or
    /// carries an unknown tag.
    pub fn decode(&mut self) -> Option<FrameInput> {
        let screen_rect = self.read_pod::<Rect>()?;
        let max_texture_side = self.read_u32()?;
        let time = self.read_f32()?;
        let predicted_dt = self.read_f32()?;
        let pixels_per_point = self.read_f32()?;
        let has_focus = self.read_u8()? != 0;
        let modifiers = Modifiers::from_bits(self.read_u8()?);
        let event_count = self.read_u32()?;

        let mut events = Vec::with_capacity(event_count as usize);
        for _ in 0..event_count {
            events.push(self.read_event()?);
        }

        Some(FrameInput {
            screen_rect,
            max_texture_side,
            time,
            predicted_dt,
            pixels_per_point,
            has_focus,
            modifiers,
            events,
        })
    }

    fn read_event(&mut self) -> Option<InputEvent> {
        match self.read_u8()? {
            tag::KEY => Some(InputEvent::Key {
                key: Key::from_wire(self.read_u16()?)?,
                pressed: self.read_u8()? != 0,
            }),
            tag::POINTER_BUTTON => Some(InputEvent::PointerButton {
                pos: self.read_pod::<Pos2>()?,
                button: PointerButton::from_wire(self.read_u8()?)?,
                pressed: self.read_u8()? != 0,
            }),
            tag::POINTER_MOVED => Some(InputEvent::PointerMoved(self.read_pod::<Pos2>()?)),
            tag::POINTER_GONE => Some(InputEvent::PointerGone),
            tag::SCROLL => Some(InputEvent::Scroll(self.read_pod::<Pos2>()?)),
            tag::TOUCH => Some(InputEvent::Touch {
                id: self.read_u64()?,
                device_id: self.read_u64()?,
                phase: TouchPhase::from_wire(self.read_u8()?)?,
                pos: self.read_pod::<Pos2>()?,
                force: self.read_f32()?,
            }),
            tag::TEXT => {
                let len = self.read_u32()? as usize;
                let bytes = self.read_bytes(len)?;
                Some(InputEvent::Text(String::from_utf8(bytes.to_vec()).ok()?))
            }
            _ => None,
        }
    }

    /// Number of bytes not yet consumed.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.position + len > self.buffer.len() {
            return None;
        }
        let slice = &self.buffer[self.position..self.position + len];
        self.position += len;
        Some(slice)
    }

    #[inline]
    fn read_u8(&mut self) -> Option<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    #[inline]
    fn read_u16(&mut self) -> Option<u16> {
        self.read_bytes(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
    }

    #[inline]
    fn read_u32(&mut self) -> Option<u32> {
        self.read_bytes(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    fn read_u64(&mut self) -> Option<u64> {
        self.read_bytes(8).map(|b| {
            u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
        })
    }

    #[inline]
    fn read_f32(&mut self) -> Option<f32> {
        self.read_u32().map(f32::from_bits)
    }

    #[inline]
    fn read_pod<T: bytemuck::Pod>(&mut self) -> Option<T> {
        let bytes = self.read_bytes(std::mem::size_of::<T>())?;
        bytemuck::try_pod_read_unaligned(bytes).ok()
    }
}
