/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層（main.rs/output.rs）で
/// 人間向けと機械向けの出力フォーマットを決定する。
use serde::Serialize;
use std::path::PathBuf;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Export(ExportResult),
    Read(ReadResult),
    Config(ConfigResult),
    Help,
}

/// exportコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// 読み込んだシートファイル
    pub sheet_path: PathBuf,
    /// シートから読んだデータ行数（ヘッダー行を除く）
    pub rows_read: usize,
    /// 出力した行数（ヘッダー行を除く）
    pub entries: usize,
    /// 出力しなかった行数
    pub skipped_rows: usize,
    /// 作成したファイル名
    pub file_name: String,
    /// 作成したファイルのパス
    pub file_path: PathBuf,
    /// 作成したファイルのサイズ（bytes）
    pub file_size: u64,
}

/// readコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ReadResult {
    pub file_path: PathBuf,
    pub mappings: Vec<MappingInfo>,
    /// 照合を指定したが見つからなかった商品ID
    pub unmatched: Vec<String>,
    pub total_count: usize,
}

/// 商品1件分の対応
#[derive(Debug, Clone, Serialize)]
pub struct MappingInfo {
    pub product_id: String,
    pub plans: String,
}

/// configコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResult {
    pub config_path: PathBuf,
    pub output_folder: Option<PathBuf>,
    pub timezone_offset_seconds: Option<i32>,
    pub product_column: usize,
    pub plan_column: usize,
    pub header_rows: usize,
    /// 設定を書き換えたか
    pub updated: bool,
}

impl CommandResult {
    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Export(r) => {
                format!("Mapping file created: {} ({} entries)", r.file_name, r.entries)
            }
            CommandResult::Read(r) => format!("Loaded {} mapping(s)", r.total_count),
            CommandResult::Config(r) => {
                if r.updated {
                    "Configuration updated.".to_string()
                } else {
                    "Current configuration".to_string()
                }
            }
            CommandResult::Help => "".to_string(),
        }
    }
}
