use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::constants::{PACK_EXTENSION, STICKER_SIZE, TRAY_SIZE, WEBP_QUALITY};
use crate::errors::{ModelError, PackError};
use crate::pack::{StickerPack, to_snake_case};
use crate::transform::{encode_png, encode_webp, squarify};

impl StickerPack {
    /// パックを .wastickers ファイルとして `folder` に保存する
    ///
    /// 出力ファイル名は `file_name`（指定時）、なければ `self.file_name`、
    /// それも空なら `self.title` を snake_case 化したものに拡張子を付ける。
    ///
    /// トレイ画像は 96x96 の PNG、各ステッカーは 512x512 の lossy WebP に
    /// 変換して書き込む。モデル自体は変更しない。
    ///
    /// 出力先が既に存在する場合、`overwrite` が false なら
    /// `DestinationExists` を返し、既存ファイルには触れない。
    /// 書き込み途中で失敗した場合は書きかけのファイルを削除してから
    /// エラーを返す。
    pub fn save(
        &self,
        file_name: Option<&str>,
        folder: &Path,
        overwrite: bool,
    ) -> Result<PathBuf, PackError> {
        self.check()?;

        let name = match file_name {
            Some(name) => name,
            None if !self.file_name.is_empty() => self.file_name.as_str(),
            None => self.title.as_str(),
        };
        let path = folder.join(format!("{}.{PACK_EXTENSION}", to_snake_case(name)));

        let file = if overwrite {
            File::create(&path)?
        } else {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map_err(|e| {
                    if e.kind() == ErrorKind::AlreadyExists {
                        PackError::DestinationExists { path: path.clone() }
                    } else {
                        PackError::Io(e)
                    }
                })?
        };

        // 書きかけのファイルを成功と誤認させない
        if let Err(e) = self.write_entries(file) {
            let _ = fs::remove_file(&path);
            return Err(e);
        }

        tracing::info!(
            path = %path.display(),
            stickers = self.stickers.len(),
            "wrote sticker pack"
        );

        Ok(path)
    }

    fn write_entries(&self, file: File) -> Result<(), PackError> {
        let mut zf = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zf.start_file("title.txt", options)?;
        zf.write_all(self.title.as_bytes())?;

        zf.start_file("author.txt", options)?;
        zf.write_all(self.author.as_bytes())?;

        // check 済みなのでトレイ（明示指定または先頭ステッカー）は必ずある
        let tray = self
            .effective_tray()
            .ok_or(ModelError::InvalidStickerCount { count: 0 })?;
        let tray_png = encode_png(&squarify(tray, TRAY_SIZE)?)?;
        zf.start_file("tray.png", options)?;
        zf.write_all(&tray_png)?;

        for sticker in &self.stickers {
            let data = encode_webp(&squarify(&sticker.image, STICKER_SIZE)?, WEBP_QUALITY)?;
            zf.start_file(webp_entry_name(&sticker.name), options)?;
            zf.write_all(&data)?;
        }

        zf.finish()?;
        Ok(())
    }
}

/// 論理名から .webp エントリ名を作る
///
/// 既に .webp ならそのまま、他の拡張子は .webp に付け替える
fn webp_entry_name(name: &str) -> String {
    if name.ends_with(".webp") {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.webp"),
        _ => format!("{name}.webp"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn sample_pack() -> StickerPack {
        let mut pack = StickerPack::new("Test Pack", "Author");
        for i in 0..3 {
            pack.add_sticker(format!("{i:03}.png"), DynamicImage::new_rgba8(200, 100))
                .unwrap();
        }
        pack
    }

    #[test]
    fn test_webp_entry_name() {
        assert_eq!(webp_entry_name("000.webp"), "000.webp");
        assert_eq!(webp_entry_name("000.png"), "000.webp");
        assert_eq!(webp_entry_name("smile"), "smile.webp");
    }

    #[test]
    fn test_save_creates_file_named_after_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_pack().save(None, dir.path(), false).unwrap();

        assert_eq!(path, dir.path().join("test_pack.wastickers"));
        assert!(path.exists());
    }

    #[test]
    fn test_save_prefers_explicit_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample_pack()
            .save(Some("My Pack"), dir.path(), false)
            .unwrap();

        assert_eq!(path, dir.path().join("my_pack.wastickers"));
    }

    #[test]
    fn test_save_invalid_pack_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut pack = sample_pack();
        pack.title = String::new();

        let result = pack.save(None, dir.path(), false);
        assert!(matches!(
            result,
            Err(PackError::Model(ModelError::MissingTitle))
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_without_overwrite_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_pack.wastickers");
        fs::write(&path, b"pre-existing bytes").unwrap();

        let result = sample_pack().save(None, dir.path(), false);
        assert!(matches!(result, Err(PackError::DestinationExists { .. })));

        // 既存ファイルはバイト単位でそのまま
        assert_eq!(fs::read(&path).unwrap(), b"pre-existing bytes");
    }

    #[test]
    fn test_save_with_overwrite_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_pack.wastickers");
        fs::write(&path, b"old").unwrap();

        let saved = sample_pack().save(None, dir.path(), true).unwrap();
        assert_eq!(saved, path);
        assert_ne!(fs::read(&path).unwrap(), b"old");
    }

    #[test]
    fn test_save_does_not_mutate_model() {
        // 二度保存しても同じ結果になる（トレイ代入が純粋関数化されている）
        let dir = tempfile::tempdir().unwrap();
        let pack = sample_pack();

        pack.save(Some("first"), dir.path(), false).unwrap();
        assert!(pack.tray_img.is_none());
        assert_eq!(pack.stickers[0].image.width(), 200);

        let second = pack.save(Some("second"), dir.path(), false).unwrap();
        assert!(second.exists());
    }
}
