pub mod archive;
pub mod constants;
pub mod errors;
pub mod ingest;
pub mod pack;
pub mod transform;

// 公開API
pub use archive::{check_valid_wastickers, from_wastickers};
pub use constants::{
    MAX_STICKERS, MIN_STICKERS, PACK_EXTENSION, STICKER_MAX_BYTES, STICKER_SIZE, TRAY_MAX_BYTES,
    TRAY_SIZE, WEBP_QUALITY,
};
pub use errors::{ContainerError, ModelError, PackError, PartitionError, TransformError};
pub use ingest::{Contents, ContentsPack, ContentsSticker, IngestOptions, from_contents};
pub use pack::{Sticker, StickerPack, partition, to_snake_case};
pub use transform::{decode_image, encode_png, encode_webp, squarify};
