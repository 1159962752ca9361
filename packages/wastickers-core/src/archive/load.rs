use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use crate::archive::validate::read_entry;
use crate::errors::PackError;
use crate::pack::StickerPack;
use crate::transform::decode_image;

/// .wastickers ファイルを StickerPack として読み込む
///
/// title.txt / author.txt を UTF-8 として読み、tray.png と全 .webp
/// エントリを完全にデコードしてメモリ上に持つ（アーカイブハンドルは
/// この関数を抜ける前に閉じられるため、遅延参照はしない）。
/// ステッカーはエントリ名をキーとして元の順序で保持する。
pub fn from_wastickers(path: impl AsRef<Path>) -> Result<StickerPack, PackError> {
    let path = path.as_ref();

    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();

    let title = String::from_utf8(read_entry(&mut archive, "title.txt")?.0)?;
    let author = String::from_utf8(read_entry(&mut archive, "author.txt")?.0)?;

    let (tray_bytes, _) = read_entry(&mut archive, "tray.png")?;
    let (tray_img, _) = decode_image(&tray_bytes)?;

    let mut pack = StickerPack {
        file_name: path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string(),
        title,
        author,
        tray_img: Some(tray_img),
        stickers: Vec::new(),
    };

    for name in names.iter().filter(|n| n.ends_with(".webp")) {
        let (bytes, _) = read_entry(&mut archive, name)?;
        let (img, _) = decode_image(&bytes)?;
        pack.add_sticker(name.clone(), img)?;
    }

    tracing::debug!(
        path = %path.display(),
        stickers = pack.stickers.len(),
        "loaded sticker pack"
    );

    Ok(pack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::check_valid_wastickers;
    use crate::constants::{STICKER_SIZE, TRAY_SIZE};
    use image::DynamicImage;

    fn sample_pack() -> StickerPack {
        let mut pack = StickerPack::new("Round Trip", "Author");
        for i in 0..4 {
            pack.add_sticker(format!("{i:03}.webp"), DynamicImage::new_rgba8(300, 200))
                .unwrap();
        }
        pack
    }

    #[test]
    fn test_built_pack_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_pack().save(None, dir.path(), false).unwrap();

        assert!(check_valid_wastickers(&path).is_ok());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let original = sample_pack();
        let path = original.save(None, dir.path(), false).unwrap();

        let loaded = from_wastickers(&path).unwrap();

        assert_eq!(loaded.title, "Round Trip");
        assert_eq!(loaded.author, "Author");
        assert_eq!(loaded.file_name, "round_trip");

        // エントリ名は保存時と一致、寸法は正規化後の値
        let names: Vec<&str> = loaded.stickers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["000.webp", "001.webp", "002.webp", "003.webp"]);
        for sticker in &loaded.stickers {
            assert_eq!(sticker.image.width(), STICKER_SIZE);
            assert_eq!(sticker.image.height(), STICKER_SIZE);
        }

        let tray = loaded.tray_img.unwrap();
        assert_eq!(tray.width(), TRAY_SIZE);
        assert_eq!(tray.height(), TRAY_SIZE);
    }

    #[test]
    fn test_round_trip_explicit_tray() {
        let dir = tempfile::tempdir().unwrap();
        let mut pack = sample_pack();
        pack.tray_img = Some(DynamicImage::new_rgba8(640, 480));

        let path = pack.save(None, dir.path(), false).unwrap();
        let loaded = from_wastickers(&path).unwrap();

        assert_eq!(loaded.tray_img.unwrap().width(), TRAY_SIZE);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(from_wastickers("no_such_file.wastickers").is_err());
    }
}
