/// アプリケーション設定モジュール
///
/// コンパイル時定数として埋め込まれる静的設定を管理します。
/// 出力CSVの書式やファイル名規則はここで固定され、実行時には変更できません。

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub mapping: MappingConfig,
    pub sheet: SheetLayoutDefaults,
    pub logging: LoggingConfig,
}

/// マッピングCSVの書式設定
#[derive(Debug, Clone, Copy)]
pub struct MappingConfig {
    /// 商品ID列のヘッダー
    pub product_header: &'static str,

    /// 納品プランNo列のヘッダー
    pub plan_header: &'static str,

    /// 複数プランを1セルにまとめるときの区切り
    pub plan_separator: &'static str,

    /// 出力ファイル名の接頭辞
    pub file_prefix: &'static str,

    /// 出力ファイルの拡張子（ドットなし）
    pub file_extension: &'static str,

    /// ファイル名に埋め込むタイムスタンプの書式（chrono 形式）
    pub timestamp_format: &'static str,

    /// Blob の MIME タイプ
    pub mime_type: &'static str,

    /// マッピングCSVを読み込むときに商品ID列とみなすヘッダー
    pub product_header_aliases: &'static [&'static str],

    /// マッピングCSVを読み込むときに納品プランNo列とみなすヘッダー
    pub plan_header_aliases: &'static [&'static str],
}

/// シートCSVの列配置のデフォルト値
///
/// ユーザー設定で上書きできます。
#[derive(Debug, Clone, Copy)]
pub struct SheetLayoutDefaults {
    /// 商品IDの列（0始まり。2 = C列）
    pub product_column: usize,

    /// 納品プランNoの列（0始まり。4 = E列）
    pub plan_column: usize,

    /// 読み飛ばす先頭行数
    pub header_rows: usize,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// RUST_LOG 未設定時のフィルタ (trace, debug, info, warn, error)
    pub level: &'static str,
}

pub const APP_CONFIG: AppConfig = AppConfig {
    mapping: MappingConfig {
        product_header: "商品ID",
        plan_header: "納品プランNo",
        plan_separator: " / ",
        file_prefix: "mapping_",
        file_extension: "csv",
        timestamp_format: "%Y%m%d_%H%M%S",
        mime_type: "text/csv",
        product_header_aliases: &["商品ID", "商品コード"],
        plan_header_aliases: &["納品プランNo", "プランNo", "ラベル"],
    },
    sheet: SheetLayoutDefaults {
        product_column: 2,
        plan_column: 4,
        header_rows: 1,
    },
    logging: LoggingConfig { level: "warn" },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_labels_are_aliases() {
        // 書き出したヘッダーは読み込み側でも必ず認識されること
        assert!(
            APP_CONFIG
                .mapping
                .product_header_aliases
                .contains(&APP_CONFIG.mapping.product_header)
        );
        assert!(
            APP_CONFIG
                .mapping
                .plan_header_aliases
                .contains(&APP_CONFIG.mapping.plan_header)
        );
    }

    #[test]
    fn test_default_columns_differ() {
        assert_ne!(
            APP_CONFIG.sheet.product_column,
            APP_CONFIG.sheet.plan_column
        );
    }
}
