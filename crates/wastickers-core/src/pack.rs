use std::io::{Seek, Write};

use image::ImageFormat;
use tracing::{debug, instrument};

use crate::archive;
use crate::config::PackLimits;
use crate::error::{Result, StickerPackError};
use crate::model::{Sticker, decode_image, encode_image, normalize};

/// A sticker pack under construction: metadata, a normalized tray icon,
/// and an ordered sequence of normalized stickers.
///
/// The pack is a write-once builder. It is created with its tray icon,
/// grows by [`add_sticker`](Self::add_sticker) calls, and is consumed by
/// [`export`](Self::export), which only reads pack state; exporting twice
/// to independent sinks yields byte-identical archives.
///
/// Sticker order is significant: entries are numbered `1..=N` in insertion
/// order inside the archive, with the tray icon always at position `0`.
#[derive(Debug, Clone)]
pub struct StickerPack {
    name: String,
    author: String,
    tray_png: Vec<u8>,
    stickers: Vec<Sticker>,
    limits: PackLimits,
}

impl StickerPack {
    /// Create a pack with the default [`PackLimits`].
    ///
    /// `tray_bytes` is any decodable image; it is normalized to the tray
    /// dimensions and re-encoded as PNG, so the stored tray icon is PNG
    /// regardless of the input format.
    ///
    /// Fails with [`StickerPackError::BlankMetadata`] when `name` or
    /// `author` is empty. The check is literal emptiness; whitespace-only
    /// strings pass.
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        tray_bytes: &[u8],
    ) -> Result<Self> {
        Self::with_limits(name, author, tray_bytes, PackLimits::default())
    }

    /// Create a pack with caller-supplied limits.
    pub fn with_limits(
        name: impl Into<String>,
        author: impl Into<String>,
        tray_bytes: &[u8],
        limits: PackLimits,
    ) -> Result<Self> {
        let name = name.into();
        let author = author.into();
        // Metadata is validated before any decoding work happens.
        if name.is_empty() || author.is_empty() {
            return Err(StickerPackError::BlankMetadata);
        }

        let (tray, _) = decode_image(tray_bytes)?;
        let tray = normalize(tray, limits.tray_pixels);
        let tray_png = encode_image(&tray, ImageFormat::Png)?;
        debug!(
            name = %name,
            author = %author,
            tray_bytes = tray_png.len(),
            "created sticker pack"
        );

        Ok(Self {
            name,
            author,
            tray_png,
            stickers: Vec::new(),
            limits,
        })
    }

    /// Decode, normalize, and append one sticker.
    ///
    /// The capacity check runs against the count *before* insertion and
    /// passes while `count <= ceiling`, so a pack admits `ceiling + 1`
    /// stickers before [`StickerPackError::TooManyStickers`] fires. The
    /// check also precedes decoding, so a full pack rejects even
    /// undecodable bytes with the capacity error.
    pub fn add_sticker(&mut self, bytes: &[u8]) -> Result<()> {
        let ceiling = self.limits.max_stickers();
        if self.stickers.len() > ceiling {
            return Err(StickerPackError::TooManyStickers {
                count: self.stickers.len(),
                ceiling,
            });
        }

        let sticker = Sticker::from_bytes(bytes, self.limits.sticker_pixels)?;
        debug!(
            index = self.stickers.len() + 1,
            format = ?sticker.format,
            "added sticker"
        );
        self.stickers.push(sticker);
        Ok(())
    }

    /// Write the pack as a `.wastickers` archive to `sink`.
    ///
    /// Entry order and content are fixed by pack state alone; see
    /// [`archive::write_archive`] for the layout.
    #[instrument(skip_all, fields(name = %self.name, stickers = self.stickers.len()))]
    pub fn export<W: Write + Seek>(&self, sink: W) -> Result<()> {
        archive::write_archive(sink, self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// The tray icon as PNG bytes, already normalized.
    pub fn tray_png(&self) -> &[u8] {
        &self.tray_png
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn sticker_count(&self) -> usize {
        self.stickers.len()
    }

    pub fn limits(&self) -> &PackLimits {
        &self.limits
    }
}
