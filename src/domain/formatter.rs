/// ドメインサービス: 出力ファイル名のフォーマット
///
/// 実行時刻をユーザー設定のタイムゾーンに変換し、
/// `mapping_yyyyMMdd_HHmmss.csv` 形式のファイル名を組み立てる。
use crate::config::APP_CONFIG;
use chrono::{DateTime, FixedOffset, Local, Utc};

/// マッピングCSVのファイル名を生成
///
/// # 引数
/// * `now` - 実行時刻
/// * `timezone` - タイムゾーン。None の場合はホストのローカルタイムゾーン
pub fn mapping_file_name(now: DateTime<Utc>, timezone: Option<FixedOffset>) -> String {
    format!(
        "{}{}.{}",
        APP_CONFIG.mapping.file_prefix,
        format_timestamp(now, timezone),
        APP_CONFIG.mapping.file_extension
    )
}

/// タイムスタンプ部分（yyyyMMdd_HHmmss）
fn format_timestamp(now: DateTime<Utc>, timezone: Option<FixedOffset>) -> String {
    let format = APP_CONFIG.mapping.timestamp_format;
    match timezone {
        Some(offset) => now.with_timezone(&offset).format(format).to_string(),
        None => now.with_timezone(&Local).format(format).to_string(),
    }
}
