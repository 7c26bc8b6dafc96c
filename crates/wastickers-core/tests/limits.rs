use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use wastickers_core::{PackLimits, StickerPack};

fn encoded(w: u32, h: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([10, 10, 10])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode fixture");
    buf.into_inner()
}

#[test]
fn defaults_match_the_published_limits() {
    let limits = PackLimits::default();
    assert_eq!(limits.sticker_pixels, (512, 512));
    assert_eq!(limits.tray_pixels, (96, 96));
    assert_eq!(limits.sticker_max_bytes, 100 * 1024);
    assert_eq!(limits.tray_max_bytes, 50 * 1024);
    assert_eq!(limits.stickers_per_pack, (3, 30));
    assert_eq!(limits.string_max_len, 128);
    assert_eq!(limits.emoji_max, 3);
    assert_eq!(limits.max_stickers(), 30);
}

#[test]
fn builder_overrides_individual_fields() {
    let limits = PackLimits::builder()
        .sticker_pixels(256, 256)
        .tray_pixels(48, 48)
        .stickers_per_pack(1, 10)
        .build();

    assert_eq!(limits.sticker_pixels, (256, 256));
    assert_eq!(limits.tray_pixels, (48, 48));
    assert_eq!(limits.max_stickers(), 10);
    // Untouched fields keep their defaults.
    assert_eq!(limits.string_max_len, 128);
}

#[test]
fn limits_round_trip_through_json() {
    let limits = PackLimits::builder().stickers_per_pack(3, 12).build();
    let json = serde_json::to_string(&limits).expect("serialize");
    let back: PackLimits = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, limits);
}

// The byte-size and string-length ceilings are published but not wired
// into the builder; inputs past them must still be accepted.
#[test]
fn byte_size_ceiling_is_not_enforced() {
    let limits = PackLimits::builder()
        .sticker_max_bytes(1)
        .tray_max_bytes(1)
        .build();
    let tray = encoded(96, 96, ImageFormat::Png);
    let mut pack = StickerPack::with_limits("Cats", "Alice", &tray, limits).expect("construct");
    pack.add_sticker(&encoded(512, 512, ImageFormat::Png))
        .expect("oversized sticker is accepted");
}

#[test]
fn string_length_ceiling_is_not_enforced() {
    let long_name = "x".repeat(400);
    let tray = encoded(96, 96, ImageFormat::Png);
    let pack = StickerPack::new(long_name.clone(), "Alice", &tray).expect("construct");
    assert_eq!(pack.name(), long_name);
}

#[test]
fn minimum_sticker_count_is_not_enforced() {
    let tray = encoded(96, 96, ImageFormat::Png);
    let pack = StickerPack::new("Cats", "Alice", &tray).expect("construct");
    // Default minimum is 3; an empty pack still exports.
    assert_eq!(pack.limits().stickers_per_pack.0, 3);
    let mut sink = Cursor::new(Vec::new());
    pack.export(&mut sink).expect("export");
    assert!(!sink.into_inner().is_empty());
}

#[test]
fn custom_dimensions_drive_normalization() {
    let limits = PackLimits::builder()
        .sticker_pixels(128, 128)
        .tray_pixels(32, 32)
        .build();
    let tray = encoded(96, 96, ImageFormat::Png);
    let mut pack = StickerPack::with_limits("Cats", "Alice", &tray, limits).expect("construct");
    pack.add_sticker(&encoded(64, 64, ImageFormat::Png))
        .expect("add");

    let decoded = image::load_from_memory(pack.tray_png()).expect("decode tray");
    assert_eq!(decoded.dimensions(), (32, 32));
    assert_eq!(pack.stickers()[0].dimensions(), (128, 128));
}
