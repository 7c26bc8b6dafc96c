use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Encoding family detected from a sticker's raw bytes.
///
/// The archive keeps stickers in their source encoding when it is one of
/// the two formats the importer accepts; everything else is re-encoded as
/// PNG at export time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StickerFormat {
    Png,
    WebP,
    Other,
}

impl StickerFormat {
    /// Classify a detected container format.
    pub fn from_image_format(format: Option<ImageFormat>) -> Self {
        match format {
            Some(ImageFormat::Png) => Self::Png,
            Some(ImageFormat::WebP) => Self::WebP,
            _ => Self::Other,
        }
    }

    /// File extension used for the archive entry.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png | Self::Other => "png",
            Self::WebP => "webp",
        }
    }

    /// Format the sticker is encoded with at export time.
    pub fn encode_format(&self) -> ImageFormat {
        match self {
            Self::Png | Self::Other => ImageFormat::Png,
            Self::WebP => ImageFormat::WebP,
        }
    }
}

/// One pack member: the decoded bitmap plus its detected source encoding.
#[derive(Debug, Clone)]
pub struct Sticker {
    pub image: DynamicImage,
    pub format: StickerFormat,
}

impl Sticker {
    /// Decode raw image bytes and normalize them to `target` dimensions.
    ///
    /// The source encoding is detected from the byte signature before
    /// decoding and retained so export can keep PNG/WEBP stickers in their
    /// original format.
    pub fn from_bytes(bytes: &[u8], target: (u32, u32)) -> Result<Self> {
        let (image, format) = decode_image(bytes)?;
        Ok(Self {
            image: normalize(image, target),
            format: StickerFormat::from_image_format(format),
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Encode the sticker in its export format.
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode_image(&self.image, self.format.encode_format())
    }
}

/// Decode image bytes, reporting the detected container format alongside.
pub(crate) fn decode_image(bytes: &[u8]) -> Result<(DynamicImage, Option<ImageFormat>)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format();
    Ok((reader.decode()?, format))
}

/// Resize to exactly `target` unless the image already matches.
pub(crate) fn normalize(image: DynamicImage, target: (u32, u32)) -> DynamicImage {
    if image.dimensions() == target {
        image
    } else {
        image.resize_exact(target.0, target.1, FilterType::CatmullRom)
    }
}

/// Encode an image into an in-memory buffer.
///
/// The WebP encoder only accepts 8-bit RGB/RGBA, so other sample layouts
/// are converted first; PNG handles every layout `image` can decode into.
pub(crate) fn encode_image(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    match (format, image) {
        (ImageFormat::WebP, DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => {
            image.write_to(&mut buf, format)?;
        }
        (ImageFormat::WebP, _) => {
            DynamicImage::ImageRgba8(image.to_rgba8()).write_to(&mut buf, format)?;
        }
        _ => {
            image.write_to(&mut buf, format)?;
        }
    }
    Ok(buf.into_inner())
}
