/// 文字列をファイル名向けの snake_case に変換する
///
/// 英数字と `_ .-` 以外を除去して小文字化し、区切り文字をアンダースコアに
/// 置き換える。連続するアンダースコアは1つに潰し、末尾のものは取り除く。
pub fn to_snake_case(text: &str) -> String {
    let filtered: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '.' | '-' | '\n'))
        .collect();

    let mut out = String::with_capacity(filtered.len());
    for c in filtered.to_lowercase().chars() {
        let c = match c {
            ' ' | '.' | '-' | '\n' => '_',
            other => other,
        };
        // 連続アンダースコアは1つに
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    out.trim_end_matches('_').to_string()
}
