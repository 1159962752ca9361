use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use image::ImageFormat;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::constants::{
    MAX_STICKERS, MIN_STICKERS_LOAD, PACK_EXTENSION, STICKER_MAX_BYTES, STICKER_SIZE,
    TRAY_MAX_BYTES, TRAY_SIZE,
};
use crate::errors::{ContainerError, PackError};
use crate::transform::decode_image;

/// .wastickers ファイルが形式契約を満たすか検証する
///
/// 以下の順で検査し、最初の違反で打ち切る（順序はエラーメッセージの
/// 決定性のための契約）:
///
/// 1. 拡張子が .wastickers であること
/// 2. zip アーカイブとして開けること
/// 3. .png エントリがちょうど1つで、名前が tray.png であること
/// 4. tray.png が PNG 形式・96x96・非圧縮 50KiB 未満であること
/// 5. .webp エントリが1〜30個で、各々 WebP 形式・512x512・非圧縮 100KiB
///    未満であること
/// 6. title.txt と author.txt が存在すること
pub fn check_valid_wastickers(path: impl AsRef<Path>) -> Result<(), PackError> {
    let path = path.as_ref();

    // 1. 拡張子
    if path.extension().and_then(|e| e.to_str()) != Some(PACK_EXTENSION) {
        return Err(ContainerError::BadExtension.into());
    }

    // 2. zip として開けること
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| match e {
        ZipError::Io(io) => PackError::Io(io),
        _ => ContainerError::NotAnArchive.into(),
    })?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();

    // 3. PNG エントリ
    let png_count = names
        .iter()
        .filter(|n| n.to_lowercase().ends_with(".png"))
        .count();
    if png_count != 1 {
        return Err(ContainerError::MissingOrDuplicateTray { count: png_count }.into());
    }
    if !names.iter().any(|n| n == "tray.png") {
        return Err(ContainerError::TrayNameMismatch.into());
    }

    // 4. tray.png の中身
    let (tray_bytes, tray_size) = read_entry(&mut archive, "tray.png")?;
    let (tray_img, tray_format) = decode_image(&tray_bytes)?;
    if tray_format != Some(ImageFormat::Png) {
        return Err(ContainerError::TrayWrongFormat.into());
    }
    if (tray_img.width(), tray_img.height()) != (TRAY_SIZE, TRAY_SIZE) {
        return Err(ContainerError::TrayWrongDimensions {
            width: tray_img.width(),
            height: tray_img.height(),
        }
        .into());
    }
    if tray_size >= TRAY_MAX_BYTES {
        return Err(ContainerError::TrayTooLarge { size: tray_size }.into());
    }

    // 5. WebP エントリ
    let webp_names: Vec<&String> = names.iter().filter(|n| n.ends_with(".webp")).collect();
    let count = webp_names.len();
    if !(MIN_STICKERS_LOAD..=MAX_STICKERS).contains(&count) {
        return Err(ContainerError::InvalidStickerCount { count }.into());
    }
    for name in webp_names {
        let (bytes, size) = read_entry(&mut archive, name)?;
        let (img, format) = decode_image(&bytes)?;
        if format != Some(ImageFormat::WebP) {
            return Err(ContainerError::StickerWrongFormat { name: name.clone() }.into());
        }
        if (img.width(), img.height()) != (STICKER_SIZE, STICKER_SIZE) {
            return Err(ContainerError::StickerWrongDimensions {
                name: name.clone(),
                width: img.width(),
                height: img.height(),
            }
            .into());
        }
        if size >= STICKER_MAX_BYTES {
            return Err(ContainerError::StickerTooLarge {
                name: name.clone(),
                size,
            }
            .into());
        }
    }

    // 6. メタデータ
    if !names.iter().any(|n| n == "title.txt") {
        return Err(ContainerError::MissingMetadata { name: "title.txt" }.into());
    }
    if !names.iter().any(|n| n == "author.txt") {
        return Err(ContainerError::MissingMetadata { name: "author.txt" }.into());
    }

    tracing::debug!(path = %path.display(), stickers = count, "valid .wastickers file");

    Ok(())
}

/// エントリの中身と非圧縮サイズを読み出す
pub(crate) fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<(Vec<u8>, u64), PackError> {
    let mut entry = archive.by_name(name)?;
    let size = entry.size();
    let mut buf = Vec::with_capacity(size as usize);
    entry.read_to_end(&mut buf)?;
    Ok((buf, size))
}
