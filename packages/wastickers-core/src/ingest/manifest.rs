use serde::Deserialize;

/// contents.json マニフェスト
///
/// WhatsApp の Android ステッカーリポジトリが定めるフォルダ構成の
/// マニフェスト。関係するフィールドのみ読み、残りは無視する。
/// <https://github.com/WhatsApp/stickers/tree/master/Android#modifying-the-contentsjson-file>
#[derive(Debug, Clone, Deserialize)]
pub struct Contents {
    pub sticker_packs: Vec<ContentsPack>,
}

/// マニフェスト内の1パック定義
///
/// `identifier` はパック資産が置かれたサブフォルダ名
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsPack {
    pub identifier: String,
    pub name: String,
    pub publisher: String,
    pub tray_image_file: String,
    pub stickers: Vec<ContentsSticker>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentsSticker {
    pub image_file: String,
}
