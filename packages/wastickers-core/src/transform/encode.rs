use crate::errors::TransformError;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// RGBA 画像を PNG にエンコードする（tray.png 用）
pub fn encode_png(im: &RgbaImage) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());
    im.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| TransformError::ProcessingFailed(format!("PNG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// RGBA 画像を lossy WebP にエンコードする（ステッカー用）
///
/// image クレートの WebP エンコーダはロスレスのみ対応のため、
/// libwebp バインディングの webp クレートで品質指定エンコードを行う
pub fn encode_webp(im: &RgbaImage, quality: f32) -> Result<Vec<u8>, TransformError> {
    let encoder = webp::Encoder::from_rgba(im.as_raw(), im.width(), im.height());
    let mem = encoder.encode(quality);
    Ok(mem.to_vec())
}
