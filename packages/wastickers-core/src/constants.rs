/// トレイ画像の一辺（px）
pub const TRAY_SIZE: u32 = 96;

/// ステッカー画像の一辺（px）
pub const STICKER_SIZE: u32 = 512;

/// 保存時に必要なステッカーの最小枚数
pub const MIN_STICKERS: usize = 3;

/// 1パックあたりのステッカー最大枚数
pub const MAX_STICKERS: usize = 30;

/// 読み込み時検証でのステッカー最小枚数
///
/// Sticker Maker Studio 側の仕様文面は「3〜30枚」だが、実際の検証は
/// 1枚から受理する。読み込み時はこの緩い側の境界に合わせる。
pub const MIN_STICKERS_LOAD: usize = 1;

/// tray.png の最大サイズ（非圧縮、バイト）
pub const TRAY_MAX_BYTES: u64 = 50 * 1024;

/// ステッカー1枚の最大サイズ（非圧縮、バイト）
pub const STICKER_MAX_BYTES: u64 = 100 * 1024;

/// コンテナファイルの拡張子（ドットなし）
pub const PACK_EXTENSION: &str = "wastickers";

/// WebP エンコード品質（0.0-100.0）
pub const WEBP_QUALITY: f32 = 80.0;

/// 画像の最大ピクセル数（極端な入力のみ防止）
pub const MAX_PIXELS: u64 = 1_000_000_000;
