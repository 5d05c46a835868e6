/// 入力ファイルの文字コード判定
///
/// スプレッドシートのエクスポートは UTF-8（BOM付きを含む）、
/// Excel 経由のCSVは Shift_JIS (CP932) のことが多い。
/// UTF-8 → Shift_JIS の順に試し、どちらでもなければ置換文字で読み込む。
use encoding_rs::SHIFT_JIS;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    if let Some(text) = SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes) {
        tracing::debug!("input decoded as Shift_JIS");
        return text;
    }

    tracing::warn!("input is neither UTF-8 nor Shift_JIS; invalid bytes replaced");
    String::from_utf8_lossy(bytes)
}
