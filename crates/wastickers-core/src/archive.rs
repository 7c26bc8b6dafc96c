//! The `.wastickers` container: a deflate-compressed zip with a fixed
//! entry layout.
//!
//! | Entry | Content |
//! |---|---|
//! | `author.txt` | raw author text |
//! | `title.txt` | raw pack name text |
//! | `0.png` | PNG tray icon |
//! | `1.<ext>` .. `N.<ext>` | stickers in insertion order, `ext` is `png` or `webp` |

use std::io::{Seek, Write};
use std::path::PathBuf;

use tracing::debug;
use zip::{CompressionMethod, write::FileOptions};

use crate::error::Result;
use crate::pack::StickerPack;

/// Entry holding the author text.
pub const AUTHOR_ENTRY: &str = "author.txt";
/// Entry holding the pack name text.
pub const TITLE_ENTRY: &str = "title.txt";
/// Entry holding the tray icon. The tray is always logical position 0.
pub const TRAY_ENTRY: &str = "0.png";
/// Conventional file extension for exported archives. The writer does not
/// check the sink's name; callers pick the path.
pub const ARCHIVE_EXTENSION: &str = "wastickers";

/// Write `pack` to `sink` as a `.wastickers` archive.
///
/// Every entry is deflate-compressed and stamped with a fixed modification
/// time, so identical pack state produces byte-identical archives. The
/// sink is only written to; pack state is never touched, and a failed
/// write leaves the pack reusable with a fresh sink.
pub fn write_archive<W: Write + Seek>(sink: W, pack: &StickerPack) -> Result<()> {
    let mut zip = zip::ZipWriter::new(sink);
    let options: FileOptions<'_, ()> = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    // Metadata first, then the tray at position 0.
    zip.start_file(AUTHOR_ENTRY, options)?;
    zip.write_all(pack.author().as_bytes())?;
    zip.start_file(TITLE_ENTRY, options)?;
    zip.write_all(pack.name().as_bytes())?;
    zip.start_file(TRAY_ENTRY, options)?;
    zip.write_all(pack.tray_png())?;

    for (count, sticker) in pack.stickers().iter().enumerate() {
        let entry = format!("{}.{}", count + 1, sticker.format.extension());
        let bytes = sticker.encode()?;
        zip.start_file(&entry, options)?;
        zip.write_all(&bytes)?;
        debug!(entry, bytes = bytes.len(), "wrote sticker entry");
    }

    zip.finish()?;
    Ok(())
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps an existing matching extension (case-insensitive); otherwise
/// replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

/// Suggest an archive filename from a user-facing pack title.
///
/// Non-alphanumeric characters become `_`, runs are collapsed, and a
/// default of `sticker_pack.wastickers` is returned for empty titles.
pub fn suggested_archive_name(title: &str) -> String {
    let mut base = String::with_capacity(title.len());
    let mut last_underscore = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            base.push(ch.to_ascii_lowercase());
            last_underscore = false;
        } else if !last_underscore && !base.is_empty() {
            base.push('_');
            last_underscore = true;
        }
    }
    while base.ends_with('_') {
        base.pop();
    }
    let final_base = if base.is_empty() {
        "sticker_pack"
    } else {
        &base
    };
    format!("{}.{}", final_base, ARCHIVE_EXTENSION)
}
