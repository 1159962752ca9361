use crate::errors::TransformError;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::{DynamicImage, Rgba, RgbaImage, imageops};

/// 画像を一辺 `pixels` の正方形に変換する
///
/// 長辺が `pixels` になるよう両辺を同じ比率で縮小（丸めは辺ごとに独立）し、
/// ほぼ透明な正方形キャンバスの中央に貼り付ける。結果は常に正方形で、
/// 一辺はスケール後の長辺（通常は `pixels` と一致、丸めで1px ずれることがある）。
///
/// すでに一辺 `pixels` の正方形である入力には何もしない（RGBA 変換のみ）ため、
/// 再適用してもビット単位で同一の結果になる。
pub fn squarify(im: &DynamicImage, pixels: u32) -> Result<RgbaImage, TransformError> {
    let (w, h) = (im.width(), im.height());

    // 既に目標サイズの正方形なら再サンプリングしない
    if w == pixels && h == pixels {
        return Ok(im.to_rgba8());
    }

    let ratio = f64::from(pixels) / f64::from(w.max(h));
    let new_w = (f64::from(w) * ratio).round() as u32;
    let new_h = (f64::from(h) * ratio).round() as u32;

    let resized = resize_rgba(im, new_w.max(1), new_h.max(1))?;
    let (new_w, new_h) = (resized.width(), resized.height());

    // キャンバスは完全な透明ではなく alpha=1 で塗る（Sticker Maker Studio の
    // 期待に合わせた意図的な値）
    let size = new_w.max(new_h);
    let mut canvas = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 1]));

    // 中央貼り付け。パディングが奇数のときは切り捨てにより後端側が1px広くなる。
    // アルファ合成ではなくピクセル置換で貼る。
    let x = i64::from((size - new_w) / 2);
    let y = i64::from((size - new_h) / 2);
    imageops::replace(&mut canvas, &resized, x, y);

    Ok(canvas)
}

/// fast_image_resize で RGBA 画像を畳み込みリサイズする
///
/// CatmullRom（バイキュービック系）フィルタを使用
fn resize_rgba(im: &DynamicImage, target_w: u32, target_h: u32) -> Result<RgbaImage, TransformError> {
    let rgba = im.to_rgba8();
    let (w, h) = (rgba.width(), rgba.height());

    let src_image = Image::from_vec_u8(w, h, rgba.into_raw(), PixelType::U8x4)
        .map_err(|e| TransformError::ProcessingFailed(format!("failed to create source image: {e}")))?;

    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x4);

    let mut resizer = Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom)),
        )
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec()).ok_or_else(|| {
        TransformError::ProcessingFailed("failed to convert resized image".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squarify_landscape() {
        // 横長画像 → 長辺512の正方形
        let img = DynamicImage::new_rgba8(1000, 500);
        let result = squarify(&img, 512).unwrap();

        assert_eq!(result.width(), 512);
        assert_eq!(result.height(), 512);
    }

    #[test]
    fn test_squarify_portrait() {
        let img = DynamicImage::new_rgba8(300, 900);
        let result = squarify(&img, 96).unwrap();

        assert_eq!(result.width(), 96);
        assert_eq!(result.height(), 96);
    }

    #[test]
    fn test_squarify_side_is_max_of_rounded_dimensions() {
        // 丸めにより短辺が独立に決まることの確認
        // 1000x333 → ratio 0.512 → (512, 170)、一辺は max = 512
        let img = DynamicImage::new_rgba8(1000, 333);
        let result = squarify(&img, 512).unwrap();

        assert_eq!(result.width(), 512);
        assert_eq!(result.height(), 512);
    }

    #[test]
    fn test_squarify_idempotent_on_square_input() {
        let img = DynamicImage::new_rgba8(96, 96);
        let once = squarify(&img, 96).unwrap();
        let twice = squarify(&DynamicImage::ImageRgba8(once.clone()), 96).unwrap();

        // 再適用はビット単位で同一
        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn test_squarify_padding_is_near_transparent() {
        // 横長画像の上下パディングは (0,0,0,1)
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            1000,
            500,
            Rgba([255, 255, 255, 255]),
        ));
        let result = squarify(&img, 512).unwrap();

        assert_eq!(result.get_pixel(0, 0), &Rgba([0, 0, 0, 1]));
        assert_eq!(result.get_pixel(511, 511), &Rgba([0, 0, 0, 1]));
        // 中央は元画像の内容
        assert_eq!(result.get_pixel(256, 256).0[3], 255);
    }

    #[test]
    fn test_squarify_centering_floors_leading_padding() {
        // 96x95 相当: パディング1pxは先頭側が0、後端側が1
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            96,
            95,
            Rgba([255, 0, 0, 255]),
        ));
        let result = squarify(&img, 96).unwrap();

        assert_eq!(result.width(), 96);
        assert_eq!(result.height(), 96);
        // y=0 は画像側（オフセット floor((96-95)/2) = 0）
        assert_eq!(result.get_pixel(0, 0).0[3], 255);
        // y=95 はパディング側
        assert_eq!(result.get_pixel(0, 95), &Rgba([0, 0, 0, 1]));
    }
}
