use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use wastickers_core::{StickerPack, StickerPackError};

fn encoded(w: u32, h: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([40, 180, 90])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode fixture");
    buf.into_inner()
}

#[test]
fn tray_is_normalized_to_96_png() {
    let tray = encoded(200, 200, ImageFormat::Png);
    let pack = StickerPack::new("Cats", "Alice", &tray).expect("construct");

    assert_eq!(
        image::guess_format(pack.tray_png()).expect("tray format"),
        ImageFormat::Png
    );
    let decoded = image::load_from_memory(pack.tray_png()).expect("decode tray");
    assert_eq!(decoded.dimensions(), (96, 96));
}

#[test]
fn tray_already_96_keeps_dimensions() {
    let tray = encoded(96, 96, ImageFormat::Png);
    let pack = StickerPack::new("Cats", "Alice", &tray).expect("construct");

    let decoded = image::load_from_memory(pack.tray_png()).expect("decode tray");
    assert_eq!(decoded.dimensions(), (96, 96));
}

#[test]
fn non_png_tray_is_reencoded_as_png() {
    let tray = encoded(96, 96, ImageFormat::WebP);
    let pack = StickerPack::new("Cats", "Alice", &tray).expect("construct");

    assert_eq!(
        image::guess_format(pack.tray_png()).expect("tray format"),
        ImageFormat::Png
    );
}

#[test]
fn blank_name_fails() {
    let tray = encoded(96, 96, ImageFormat::Png);
    let result = StickerPack::new("", "Bob", &tray);
    assert!(matches!(result, Err(StickerPackError::BlankMetadata)));
}

#[test]
fn blank_author_fails() {
    let tray = encoded(96, 96, ImageFormat::Png);
    let result = StickerPack::new("Cats", "", &tray);
    assert!(matches!(result, Err(StickerPackError::BlankMetadata)));
}

#[test]
fn blank_name_and_author_fails() {
    let tray = encoded(96, 96, ImageFormat::Png);
    let result = StickerPack::new("", "", &tray);
    assert!(matches!(result, Err(StickerPackError::BlankMetadata)));
}

// Metadata validation must fire before any image work: garbage tray bytes
// still surface the blank-metadata error when the name is empty.
#[test]
fn blank_check_precedes_tray_decoding() {
    let result = StickerPack::new("", "Bob", b"definitely not an image");
    assert!(matches!(result, Err(StickerPackError::BlankMetadata)));
}

// The check is literal emptiness; whitespace-only strings are accepted.
#[test]
fn whitespace_only_metadata_is_accepted() {
    let tray = encoded(96, 96, ImageFormat::Png);
    let pack = StickerPack::new("   ", "\t", &tray).expect("construct");
    assert_eq!(pack.name(), "   ");
    assert_eq!(pack.author(), "\t");
}

#[test]
fn undecodable_tray_fails_with_image_error() {
    let result = StickerPack::new("Cats", "Alice", b"definitely not an image");
    assert!(matches!(result, Err(StickerPackError::Image(_))));
}

#[test]
fn new_pack_has_no_stickers() {
    let tray = encoded(96, 96, ImageFormat::Png);
    let pack = StickerPack::new("Cats", "Alice", &tray).expect("construct");
    assert_eq!(pack.sticker_count(), 0);
    assert!(pack.stickers().is_empty());
}
