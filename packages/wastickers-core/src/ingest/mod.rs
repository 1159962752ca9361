pub mod contents;
pub mod manifest;

pub use contents::{IngestOptions, from_contents};
pub use manifest::{Contents, ContentsPack, ContentsSticker};
