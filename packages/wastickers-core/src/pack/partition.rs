use crate::constants::MAX_STICKERS;
use crate::errors::PartitionError;
use crate::pack::model::{Sticker, StickerPack};
use image::DynamicImage;

/// 画像コレクションを1パック30枚以下のステッカーパック列に分割する
///
/// 論理名がちょうど "tray" の画像を除外し、名前順にソートして決定的に
/// 分割する。チャンク数は `ceil(n / 30)`、各チャンクは `ceil(n / チャンク数)`
/// 枚以下の連続区間（最後のチャンクだけ少なくなりうる）。
///
/// チャンクが複数になる場合、各パックのタイトルは `"{title} {番号}"`（1始まり）。
///
/// `tray_names` を与える場合はチャンク数と同数であること。各セレクタは
/// ソート済みの画像名に対する部分文字列検索で、最初に一致した画像が
/// そのチャンクのトレイになる。一致しないセレクタはエラー。
/// `tray_names` が None のときはトレイを設定しない（保存時に各チャンクの
/// 先頭ステッカーが使われる）。
pub fn partition(
    images: Vec<(String, DynamicImage)>,
    title: &str,
    author: &str,
    tray_names: Option<&[String]>,
) -> Result<Vec<StickerPack>, PartitionError> {
    let mut images: Vec<(String, DynamicImage)> =
        images.into_iter().filter(|(name, _)| name != "tray").collect();
    images.sort_by(|a, b| a.0.cmp(&b.0));

    if images.is_empty() {
        return Err(PartitionError::NoImages);
    }

    let total = images.len();
    let num_chunks = total.div_ceil(MAX_STICKERS);
    let chunk_size = total.div_ceil(num_chunks);

    // トレイ解決はチャンク構築前に行い、設定ミスを先に報告する
    let trays = match tray_names {
        None => None,
        Some(names) => {
            if names.len() != num_chunks {
                return Err(PartitionError::InvalidTraySelectorCount {
                    expected: num_chunks,
                    got: names.len(),
                });
            }
            let resolved: Vec<DynamicImage> = names
                .iter()
                .map(|selector| {
                    images
                        .iter()
                        .find(|(name, _)| name.contains(selector.as_str()))
                        .map(|(_, img)| img.clone())
                        .ok_or_else(|| PartitionError::TrayImageNotFound {
                            selector: selector.clone(),
                        })
                })
                .collect::<Result<_, _>>()?;
            Some(resolved)
        }
    };

    tracing::debug!(total, num_chunks, chunk_size, "partitioning images");

    let mut packs = Vec::with_capacity(num_chunks);
    let mut iter = images.into_iter();
    for index in 0..num_chunks {
        let chunk_title = if num_chunks == 1 {
            title.to_string()
        } else {
            format!("{title} {}", index + 1)
        };

        let mut pack = StickerPack::new(chunk_title, author);
        pack.tray_img = trays.as_ref().map(|t| t[index].clone());
        pack.stickers = iter
            .by_ref()
            .take(chunk_size)
            .map(|(name, image)| Sticker { name, image })
            .collect();

        packs.push(pack);
    }

    Ok(packs)
}
