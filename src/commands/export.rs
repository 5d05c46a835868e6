/// エクスポートコマンド
///
/// シートのエクスポートファイルから商品ID列（既定C列）と納品プランNo列（既定E列）を読み、
/// マッピングCSVを出力フォルダに新規作成します。
use crate::commands::result::{CommandResult, ExportResult};
use crate::config::{APP_CONFIG, UserConfig};
use crate::domain::formatter::mapping_file_name;
use crate::domain::mapping::{CsvDocument, Row, build_mapping, pair_columns};
use crate::domain::validator;
use crate::storage::error::InfraError;
use crate::storage::sheet::{self, SheetLayout};
use crate::storage::sink::{Blob, CreatedFile, LocalFolderSink, StorageSink};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use std::path::Path;

/// エクスポートコマンドを実行する
///
/// # 引数
/// * `sheet_path` - シートのエクスポートファイル（csv / tsv）
/// * `folder_override` - 出力フォルダ（指定時は設定値より優先）
pub fn execute(sheet_path: &str, folder_override: Option<&Path>) -> Result<CommandResult> {
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    let folder = user_config.resolve_output_folder(folder_override)?;
    let sink = LocalFolderSink::new(folder);

    run(sheet_path, &user_config, &sink, Utc::now())
}

/// 設定と保存先が決まった状態でエクスポートを行う
pub fn run(
    sheet_path: &str,
    user_config: &UserConfig,
    sink: &impl StorageSink,
    now: DateTime<Utc>,
) -> Result<CommandResult> {
    let input = validator::validate_input_file(sheet_path).context("Sheet file validation failed")?;

    tracing::debug!(path = %input.path.display(), bytes = input.size, "reading sheet");

    let columns = sheet::read_sheet_columns(&input, &SheetLayout::from(user_config))
        .with_context(|| format!("Failed to read sheet columns from {}", sheet_path))?;
    let rows = pair_columns(columns.products, columns.plans)?;

    let (document, created) = export_mapping(&rows, sink, now, user_config.timezone())
        .context("Failed to store mapping file")?;

    tracing::info!(
        rows = rows.len(),
        entries = document.entries.len(),
        skipped = document.skipped_rows,
        file = %created.path.display(),
        "mapping exported"
    );

    Ok(CommandResult::Export(ExportResult {
        sheet_path: input.path,
        rows_read: rows.len(),
        entries: document.entries.len(),
        skipped_rows: document.skipped_rows,
        file_name: created.name,
        file_path: created.path,
        file_size: created.size,
    }))
}

/// マッピングCSVを構築して保存先に渡す
///
/// 保存先のエラーはそのまま呼び出し元に返す。再試行はしない。
pub fn export_mapping(
    rows: &[Row],
    sink: &impl StorageSink,
    now: DateTime<Utc>,
    timezone: Option<FixedOffset>,
) -> Result<(CsvDocument, CreatedFile), InfraError> {
    let document = build_mapping(rows);
    let blob = Blob::new(
        document.render(),
        APP_CONFIG.mapping.mime_type,
        mapping_file_name(now, timezone),
    );

    let created = sink.create_file(&blob)?;
    Ok((document, created))
}
