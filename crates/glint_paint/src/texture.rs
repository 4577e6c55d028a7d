//! Texture cache: engine texture ids to GPU textures and materials.
//!
//! Identifiers are assigned by the engine, never invented here. Lifetime
//! is governed entirely by the engine's set/remove commands.

use std::collections::HashMap;

use crate::backend::{MaterialId, RenderBackend, TextureFilter, TextureId};

/// One cached texture with its derived material.
#[derive(Clone, Copy, Debug)]
pub struct TextureEntry {
    /// Backend texture currently holding the pixels.
    pub texture: TextureId,
    /// Material bound to that texture. Survives full replacements via
    /// rebinding, so queued draws keep a stable material handle.
    pub material: MaterialId,
    /// Current width in pixels.
    pub width: u32,
    /// Current height in pixels.
    pub height: u32,
}

/// What a texture-update command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureUpdateOutcome {
    /// First sighting of the id: texture and material created.
    Created,
    /// Sub-rectangle copied into the existing texture.
    PartialWrite,
    /// Offset (0,0) but new size: texture swapped, material rebound.
    /// The old texture must be retired at the next collection point.
    Replaced {
        /// The texture that was displaced and must be retired.
        retired: TextureId,
    },
    /// Invalid update: logged and dropped, state untouched.
    Rejected,
}

/// Mapping from engine texture ids to backend resources.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: HashMap<u64, TextureEntry>,
}

impl TextureCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a texture-set command per the update policy.
    ///
    /// `pixels` must hold `width * height * 4` RGBA8 bytes.
    pub fn update<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        id: u64,
        offset_x: i32,
        offset_y: i32,
        width: i32,
        height: i32,
        filter: TextureFilter,
        pixels: &[u8],
    ) -> TextureUpdateOutcome {
        if width <= 0 || height <= 0 {
            tracing::error!(id, width, height, "texture update with non-positive size");
            return TextureUpdateOutcome::Rejected;
        }
        let (w, h) = (width as u32, height as u32);
        let expected = w as usize * h as usize * 4;
        if pixels.len() < expected {
            tracing::error!(
                id,
                got = pixels.len(),
                expected,
                "texture update with short pixel buffer"
            );
            return TextureUpdateOutcome::Rejected;
        }
        let pixels = &pixels[..expected];

        let Some(entry) = self.entries.get_mut(&id) else {
            // Unseen id: offsets are ignored, texture is exactly (w, h).
            let texture = backend.create_texture(w, h, filter, pixels);
            let material = backend.create_material(texture);
            self.entries.insert(
                id,
                TextureEntry { texture, material, width: w, height: h },
            );
            return TextureUpdateOutcome::Created;
        };

        let fits = offset_x >= 0
            && offset_y >= 0
            && offset_x as u32 + w <= entry.width
            && offset_y as u32 + h <= entry.height;
        if fits {
            backend.write_texture(entry.texture, offset_x as u32, offset_y as u32, w, h, pixels);
            return TextureUpdateOutcome::PartialWrite;
        }

        if offset_x == 0 && offset_y == 0 {
            // Full replacement: swap the bound texture behind the material.
            let fresh = backend.create_texture(w, h, filter, pixels);
            backend.rebind_material(entry.material, fresh);
            let retired = entry.texture;
            entry.texture = fresh;
            entry.width = w;
            entry.height = h;
            return TextureUpdateOutcome::Replaced { retired };
        }

        tracing::error!(
            id,
            offset_x,
            offset_y,
            width,
            height,
            texture_width = entry.width,
            texture_height = entry.height,
            "invalid texture update dropped"
        );
        TextureUpdateOutcome::Rejected
    }

    /// Removes an entry, returning its backend handles for deferred
    /// destruction. Unknown ids are a silent no-op.
    pub fn remove(&mut self, id: u64) -> Option<(TextureId, MaterialId)> {
        self.entries
            .remove(&id)
            .map(|entry| (entry.texture, entry.material))
    }

    /// Material to draw with for an engine texture id.
    #[must_use]
    pub fn material_for(&self, id: u64) -> Option<MaterialId> {
        self.entries.get(&id).map(|entry| entry.material)
    }

    /// Full entry lookup.
    #[must_use]
    pub fn entry(&self, id: u64) -> Option<&TextureEntry> {
        self.entries.get(&id)
    }

    /// Whether an id is currently registered.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of registered textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the cache, returning every live handle pair. For shutdown.
    pub fn drain_all(&mut self) -> Vec<(TextureId, MaterialId)> {
        self.entries
            .drain()
            .map(|(_, entry)| (entry.texture, entry.material))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;

    fn solid(width: u32, height: u32, value: u8) -> Vec<u8> {
        vec![value; width as usize * height as usize * 4]
    }

    #[test]
    fn first_update_creates_texture_and_material() {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new();

        let outcome = cache.update(
            &mut backend,
            7,
            // Offsets on a fresh id are ignored.
            3,
            9,
            4,
            4,
            TextureFilter::Point,
            &solid(4, 4, 0xaa),
        );
        assert_eq!(outcome, TextureUpdateOutcome::Created);

        let entry = cache.entry(7).expect("registered");
        let tex = backend.texture(entry.texture).expect("created");
        assert_eq!((tex.width, tex.height), (4, 4));
        assert_eq!(tex.filter, TextureFilter::Point);
        assert_eq!(backend.material_texture(entry.material), Some(entry.texture));
    }

    #[test]
    fn sub_rectangle_update_preserves_surrounding_pixels() {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new();

        cache.update(
            &mut backend,
            7,
            0,
            0,
            64,
            64,
            TextureFilter::Bilinear,
            &solid(64, 64, 0x11),
        );
        let outcome = cache.update(
            &mut backend,
            7,
            5,
            5,
            10,
            10,
            TextureFilter::Bilinear,
            &solid(10, 10, 0xee),
        );
        assert_eq!(outcome, TextureUpdateOutcome::PartialWrite);

        let entry = cache.entry(7).unwrap();
        let tex = backend.texture(entry.texture).unwrap();
        let pixel = |x: usize, y: usize| tex.pixels[(y * 64 + x) * 4];
        assert_eq!(pixel(4, 4), 0x11, "outside the patch");
        assert_eq!(pixel(5, 5), 0xee, "patch corner");
        assert_eq!(pixel(14, 14), 0xee, "patch far corner");
        assert_eq!(pixel(15, 15), 0x11, "just past the patch");
        assert_eq!(pixel(40, 40), 0x11, "far outside");
    }

    #[test]
    fn zero_offset_misfit_replaces_and_rebinds() {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new();

        cache.update(
            &mut backend,
            1,
            0,
            0,
            8,
            8,
            TextureFilter::Bilinear,
            &solid(8, 8, 0x01),
        );
        let old = cache.entry(1).unwrap().texture;
        let material = cache.entry(1).unwrap().material;

        let outcome = cache.update(
            &mut backend,
            1,
            0,
            0,
            16,
            16,
            TextureFilter::Bilinear,
            &solid(16, 16, 0x02),
        );
        assert_eq!(outcome, TextureUpdateOutcome::Replaced { retired: old });

        let entry = cache.entry(1).unwrap();
        assert_ne!(entry.texture, old);
        assert_eq!(entry.material, material, "material handle is stable");
        assert_eq!(backend.material_texture(material), Some(entry.texture));
        assert_eq!((entry.width, entry.height), (16, 16));
    }

    #[test]
    fn out_of_bounds_nonzero_offset_is_dropped() {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new();

        cache.update(
            &mut backend,
            7,
            0,
            0,
            64,
            64,
            TextureFilter::Bilinear,
            &solid(64, 64, 0x11),
        );
        let before = backend
            .texture(cache.entry(7).unwrap().texture)
            .unwrap()
            .pixels
            .clone();

        let outcome = cache.update(
            &mut backend,
            7,
            60,
            60,
            20,
            20,
            TextureFilter::Bilinear,
            &solid(20, 20, 0xff),
        );
        assert_eq!(outcome, TextureUpdateOutcome::Rejected);

        let after = &backend
            .texture(cache.entry(7).unwrap().texture)
            .unwrap()
            .pixels;
        assert_eq!(&before, after, "state byte-for-byte unchanged");
    }

    #[test]
    fn short_pixel_buffer_is_dropped() {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new();

        let outcome = cache.update(
            &mut backend,
            2,
            0,
            0,
            4,
            4,
            TextureFilter::Bilinear,
            &[0u8; 8],
        );
        assert_eq!(outcome, TextureUpdateOutcome::Rejected);
        assert!(!cache.contains(2));
    }

    #[test]
    fn remove_returns_handles_once() {
        let mut backend = RecordingBackend::new();
        let mut cache = TextureCache::new();

        cache.update(
            &mut backend,
            3,
            0,
            0,
            2,
            2,
            TextureFilter::Bilinear,
            &solid(2, 2, 0x33),
        );
        assert!(cache.remove(3).is_some());
        assert!(cache.remove(3).is_none(), "second remove is a no-op");
        assert!(!cache.contains(3));
    }
}
