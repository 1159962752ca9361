use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// 画像バイト列をデコードし、DynamicImage と判定されたフォーマットを返す
///
/// フォーマットはマジックナンバーから推測する（拡張子は見ない）
pub fn decode_image(data: &[u8]) -> Result<(DynamicImage, Option<ImageFormat>), TransformError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to guess format: {e}")))?;

    let format = reader.format();

    let img = reader
        .decode()
        .map_err(|e| TransformError::ProcessingFailed(format!("decode failed: {e}")))?;

    // メモリ枯渇防止
    let total_pixels = u64::from(img.width()) * u64::from(img.height());
    if total_pixels > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge {
            width: img.width(),
            height: img.height(),
        });
    }

    Ok((img, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let img = DynamicImage::new_rgba8(10, 10);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();

        let (decoded, format) = decode_image(buf.get_ref()).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 10);
        assert_eq!(format, Some(ImageFormat::Png));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(b"not an image");
        assert!(result.is_err());
    }
}
