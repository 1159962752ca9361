use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::PackError;
use crate::ingest::manifest::Contents;
use crate::pack::StickerPack;
use crate::transform::decode_image;

/// contents.json 取り込み時の上書きオプション
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// タイトルの置き換え（キー: 元タイトル、値: 新タイトル）。
    /// 載っていないタイトルはそのまま
    pub change_titles: HashMap<String, String>,
    /// 全パックの作者をこの値に置き換える
    pub change_publisher: Option<String>,
}

/// contents.json を含むフォルダから StickerPack の列を作る
///
/// `folder` は contents.json と、各パックの資産を収めたサブフォルダ
/// （マニフェストの identifier が名前）を含むこと。トレイと各ステッカーは
/// この時点で完全にデコードする。
pub fn from_contents(
    folder: impl AsRef<Path>,
    options: &IngestOptions,
) -> Result<Vec<StickerPack>, PackError> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(PackError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }

    let manifest_bytes = fs::read(folder.join("contents.json"))?;
    let contents: Contents = serde_json::from_slice(&manifest_bytes)?;

    tracing::debug!(
        folder = %folder.display(),
        packs = contents.sticker_packs.len(),
        "ingesting contents.json"
    );

    let mut packs = Vec::with_capacity(contents.sticker_packs.len());
    for sp in &contents.sticker_packs {
        let sp_folder = folder.join(&sp.identifier);

        let title = options
            .change_titles
            .get(&sp.name)
            .cloned()
            .unwrap_or_else(|| sp.name.clone());
        let author = options
            .change_publisher
            .clone()
            .unwrap_or_else(|| sp.publisher.clone());

        let mut pack = StickerPack::new(title, author);

        let tray_bytes = fs::read(sp_folder.join(&sp.tray_image_file))?;
        pack.tray_img = Some(decode_image(&tray_bytes)?.0);

        for sticker in &sp.stickers {
            let bytes = fs::read(sp_folder.join(&sticker.image_file))?;
            let (img, _) = decode_image(&bytes)?;
            pack.add_sticker(sticker.image_file.clone(), img)?;
        }

        packs.push(pack);
    }

    Ok(packs)
}
