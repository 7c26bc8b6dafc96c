//! Core library for building WhatsApp sticker packs.
//!
//! - Validates pack metadata, normalizes the tray icon to 96x96 PNG and
//!   stickers to 512x512 (PNG/WEBP kept, anything else re-encoded as PNG)
//! - Exports a deflate-compressed `.wastickers` zip with a fixed entry
//!   layout (`author.txt`, `title.txt`, `0.png`, `1..N`)
//! - Declared-but-unenforced importer limits live in [`PackLimits`]
//!
//! Quick example:
//! ```ignore
//! use std::fs::File;
//! use wastickers_core::StickerPack;
//! # fn main() -> wastickers_core::Result<()> {
//! let tray = std::fs::read("tray.png")?;
//! let mut pack = StickerPack::new("Cats", "Alice", &tray)?;
//! pack.add_sticker(&std::fs::read("cat1.webp")?)?;
//! pack.add_sticker(&std::fs::read("cat2.png")?)?;
//! pack.export(File::create("cats.wastickers")?)?;
//! # Ok(()) }
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod model;
pub mod pack;

pub use config::*;
pub use error::*;
pub use model::*;
pub use pack::*;

/// Convenience prelude for common types and functions.
/// Importing `wastickers_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::archive::{ensure_extension, suggested_archive_name, write_archive};
    pub use crate::config::{PackLimits, PackLimitsBuilder};
    pub use crate::error::{Result, StickerPackError};
    pub use crate::model::{Sticker, StickerFormat};
    pub use crate::pack::StickerPack;
}
