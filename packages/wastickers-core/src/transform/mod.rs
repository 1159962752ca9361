pub mod decode;
pub mod encode;
pub mod squarify;

pub use decode::decode_image;
pub use encode::{encode_png, encode_webp};
pub use squarify::squarify;
