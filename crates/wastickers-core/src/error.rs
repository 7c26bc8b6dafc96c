use thiserror::Error;

#[derive(Debug, Error)]
pub enum StickerPackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("blank names are not allowed")]
    BlankMetadata,
    #[error("too many stickers: pack already holds {count} (ceiling {ceiling})")]
    TooManyStickers { count: usize, ceiling: usize },
}

pub type Result<T> = std::result::Result<T, StickerPackError>;
