use serde::{Deserialize, Serialize};

/// Declared constraint set for a sticker pack.
///
/// The messaging client publishes a list of limits for importable packs;
/// this struct carries all of them so callers can see (and tune) the policy
/// in one place. Enforcement is deliberately partial and documented per
/// field: only the blank-metadata check and the sticker-count ceiling are
/// checked by [`crate::StickerPack`]. Dimension fields drive normalization
/// rather than rejection. The remaining fields are published limits the
/// builder records but never checks; enforcing them is the importer's call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackLimits {
    /// Dimensions every sticker is normalized to, in pixels.
    pub sticker_pixels: (u32, u32),
    /// Dimensions the tray icon is normalized to, in pixels.
    pub tray_pixels: (u32, u32),
    /// Encoded sticker size ceiling in bytes. Recorded, never checked.
    pub sticker_max_bytes: u64,
    /// Encoded tray icon size ceiling in bytes. Recorded, never checked.
    pub tray_max_bytes: u64,
    /// Minimum and maximum sticker count. Only the maximum is enforced,
    /// and the check runs against the count before insertion, so a pack
    /// can end up holding `max + 1` stickers (see
    /// [`crate::StickerPack::add_sticker`]). The minimum is never checked.
    pub stickers_per_pack: (usize, usize),
    /// Length ceiling for the pack name and author strings, in characters.
    /// Recorded, never checked.
    pub string_max_len: usize,
    /// How many emoji tags may identify a single sticker. Recorded, never
    /// checked; emoji associations are not modeled here at all.
    pub emoji_max: usize,
}

impl Default for PackLimits {
    fn default() -> Self {
        Self {
            sticker_pixels: (512, 512),
            tray_pixels: (96, 96),
            sticker_max_bytes: 100 * 1024,
            tray_max_bytes: 50 * 1024,
            stickers_per_pack: (3, 30),
            string_max_len: 128,
            emoji_max: 3,
        }
    }
}

impl PackLimits {
    /// Create a fluent builder for `PackLimits`.
    pub fn builder() -> PackLimitsBuilder {
        PackLimitsBuilder::new()
    }

    /// The enforced sticker-count ceiling.
    pub fn max_stickers(&self) -> usize {
        self.stickers_per_pack.1
    }
}

/// Builder for `PackLimits` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackLimitsBuilder {
    limits: PackLimits,
}

impl PackLimitsBuilder {
    pub fn new() -> Self {
        Self {
            limits: PackLimits::default(),
        }
    }
    pub fn sticker_pixels(mut self, w: u32, h: u32) -> Self {
        self.limits.sticker_pixels = (w, h);
        self
    }
    pub fn tray_pixels(mut self, w: u32, h: u32) -> Self {
        self.limits.tray_pixels = (w, h);
        self
    }
    pub fn sticker_max_bytes(mut self, v: u64) -> Self {
        self.limits.sticker_max_bytes = v;
        self
    }
    pub fn tray_max_bytes(mut self, v: u64) -> Self {
        self.limits.tray_max_bytes = v;
        self
    }
    pub fn stickers_per_pack(mut self, min: usize, max: usize) -> Self {
        self.limits.stickers_per_pack = (min, max);
        self
    }
    pub fn string_max_len(mut self, v: usize) -> Self {
        self.limits.string_max_len = v;
        self
    }
    pub fn emoji_max(mut self, v: usize) -> Self {
        self.limits.emoji_max = v;
        self
    }
    pub fn build(self) -> PackLimits {
        self.limits
    }
}
