use crate::constants::{MAX_STICKERS, MIN_STICKERS};
use crate::errors::ModelError;
use image::DynamicImage;

/// 名前付きステッカー画像
///
/// `name` はコンテナ内エントリ名の元になる論理名（挿入順を保持する）
#[derive(Debug, Clone)]
pub struct Sticker {
    pub name: String,
    pub image: DynamicImage,
}

/// ステッカーパックのメモリ上表現
///
/// ビルド・読み込みごとに新規作成され、呼び出し間の状態は持たない。
/// `tray_img` が None の場合、保存時に先頭のステッカーがトレイとして使われる
/// （モデル自体は変更しない。同じモデルを二度保存しても安全）。
#[derive(Debug, Clone, Default)]
pub struct StickerPack {
    /// 出力ファイル名（拡張子なし）。空ならタイトルから導出される
    pub file_name: String,
    pub title: String,
    pub author: String,
    pub tray_img: Option<DynamicImage>,
    pub stickers: Vec<Sticker>,
}

impl StickerPack {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    /// ステッカーを末尾に追加する。論理名の重複は拒否する
    pub fn add_sticker(
        &mut self,
        name: impl Into<String>,
        image: DynamicImage,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if self.stickers.iter().any(|s| s.name == name) {
            return Err(ModelError::DuplicateStickerName { name });
        }
        self.stickers.push(Sticker { name, image });
        Ok(())
    }

    /// .wastickers として保存可能か検証する
    ///
    /// タイトル → 作者 → 枚数の順で検査し、最初の違反のみ返す
    pub fn check(&self) -> Result<(), ModelError> {
        if self.title.is_empty() {
            return Err(ModelError::MissingTitle);
        }

        if self.author.is_empty() {
            return Err(ModelError::MissingAuthor);
        }

        let count = self.stickers.len();
        if !(MIN_STICKERS..=MAX_STICKERS).contains(&count) {
            return Err(ModelError::InvalidStickerCount { count });
        }

        Ok(())
    }

    /// 保存時に使われるトレイ画像（明示指定、なければ先頭ステッカー）
    ///
    /// `check` 済みのモデルでは必ず Some になる
    pub fn effective_tray(&self) -> Option<&DynamicImage> {
        self.tray_img
            .as_ref()
            .or_else(|| self.stickers.first().map(|s| &s.image))
    }
}
