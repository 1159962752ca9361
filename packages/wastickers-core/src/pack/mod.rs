pub mod model;
pub mod partition;
pub mod slug;

pub use model::{Sticker, StickerPack};
pub use partition::partition;
pub use slug::to_snake_case;
