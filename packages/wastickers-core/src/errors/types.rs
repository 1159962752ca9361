use std::path::PathBuf;

use thiserror::Error;

/// ステッカーパック処理の統合エラー型
#[derive(Debug, Error)]
pub enum PackError {
    #[error("invalid sticker pack: {0}")]
    Model(#[from] ModelError),

    #[error("partition error: {0}")]
    Partition(#[from] PartitionError),

    #[error("invalid .wastickers file: {0}")]
    Container(#[from] ContainerError),

    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("metadata is not valid UTF-8: {0}")]
    MetadataNotUtf8(#[from] std::string::FromUtf8Error),

    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// パックモデルの保存前検証エラー
///
/// `StickerPack::check` は以下の順で検査し、最初の違反のみ返す
/// （フェイルファスト、集約レポートではない）。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("missing title")]
    MissingTitle,

    #[error("missing author")]
    MissingAuthor,

    #[error("must have 3 to 30 sticker images, current count: {count}")]
    InvalidStickerCount { count: usize },

    #[error("duplicate sticker name: {name}")]
    DuplicateStickerName { name: String },
}

/// 画像コレクション分割時の設定エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("no images to partition")]
    NoImages,

    #[error("tray image not found for selector: {selector}")]
    TrayImageNotFound { selector: String },

    #[error("tray selector count must equal chunk count (expected {expected}, got {got})")]
    InvalidTraySelectorCount { expected: usize, got: usize },
}

/// .wastickers コンテナの形式違反
///
/// 検証は §検証順序 の通り最初の違反で打ち切る。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("extension must be .wastickers")]
    BadExtension,

    #[error("not a zip archive")]
    NotAnArchive,

    #[error("must have exactly one .png file, found {count}")]
    MissingOrDuplicateTray { count: usize },

    #[error("tray.png not found")]
    TrayNameMismatch,

    #[error("tray.png must be a PNG file")]
    TrayWrongFormat,

    #[error("tray.png must be 96x96 pixels, current size: {width}x{height}")]
    TrayWrongDimensions { width: u32, height: u32 },

    #[error("tray.png must be smaller than 50KB, current size: {size} bytes")]
    TrayTooLarge { size: u64 },

    #[error("must have 1 to 30 .webp files, found {count}")]
    InvalidStickerCount { count: usize },

    #[error("{name} must be a WEBP file")]
    StickerWrongFormat { name: String },

    #[error("{name} must be 512x512 pixels, current size: {width}x{height}")]
    StickerWrongDimensions {
        name: String,
        width: u32,
        height: u32,
    },

    #[error("{name} must be smaller than 100KB, current size: {size} bytes")]
    StickerTooLarge { name: String, size: u64 },

    #[error("must have {name} file")]
    MissingMetadata { name: &'static str },
}

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
