/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読）または
/// 機械向け（JSON）形式で出力する責務を担います。
/// CLI使用方法の表示もこのモジュールが担当します。
use crate::commands::result::CommandResult;
use anyhow::Result;

/// ヘルプテキスト（単一の情報源）
const HELP_TEXT: &str = "planmap
Build the product ID → delivery plan No mapping CSV from a picking-list sheet export

Usage:
  planmap [--machine] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases

Available commands:
  export <sheet.csv> [--folder <dir>]
                   - Create mapping_YYYYMMDD_HHMMSS.csv in the output folder
                     Reads product IDs from column C and plan numbers from column E
                     (configurable in config.toml)
                     --folder: Use this folder instead of the configured one
  read <mapping.csv> [product_id...]
                   - Load a mapping CSV and list product ID → plan numbers
                     With product IDs: look up only those IDs
  config           - Show the current configuration
  config folder <dir>
                   - Set the output folder
  config timezone <seconds|local>
                   - Set the time zone used in file names (e.g. 32400 for JST)
  help             - Display this help message

Environment:
  RUST_LOG         - Log filter (default: warn), logs go to stderr";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", serde_json::to_string(&machine_readable(result))?);
    } else {
        output_human_readable(result);
    }

    Ok(())
}

/// 人間向けの詳細メッセージを出力（stderr）
///
/// stdoutはパイプライン用に予約されます。
fn output_human_readable(result: &CommandResult) {
    match result {
        CommandResult::Export(r) => {
            eprintln!("{}", result.success_message());
            eprintln!("---");
            eprintln!("Sheet:    {}", r.sheet_path.display());
            eprintln!("Rows:     {}", r.rows_read);
            eprintln!("Entries:  {}", r.entries);
            if r.skipped_rows > 0 {
                eprintln!(
                    "Skipped:  {} (empty product ID or plan No)",
                    r.skipped_rows
                );
            }
            eprintln!("File:     {}", r.file_path.display());
            eprintln!("Size:     {} bytes", r.file_size);
            eprintln!("---");
        }
        CommandResult::Read(r) => {
            eprintln!();
            if r.total_count == 0 && r.unmatched.is_empty() {
                eprintln!("No mappings found in {}.", r.file_path.display());
            } else {
                eprintln!("{} ({})", result.success_message(), r.file_path.display());
                eprintln!();
                for mapping in &r.mappings {
                    eprintln!("{}  →  {}", mapping.product_id, mapping.plans);
                }
                for product_id in &r.unmatched {
                    eprintln!("{}  →  (該当なし)", product_id);
                }
            }
        }
        CommandResult::Config(r) => {
            eprintln!("{}", result.success_message());
            eprintln!("Config file:    {}", r.config_path.display());
            match &r.output_folder {
                Some(folder) => eprintln!("Output folder:  {}", folder.display()),
                None => eprintln!("Output folder:  (not set)"),
            }
            match r.timezone_offset_seconds {
                Some(offset) => eprintln!("Time zone:      UTC{}", format_offset(offset)),
                None => eprintln!("Time zone:      host local time"),
            }
            eprintln!("Product column: {}", r.product_column);
            eprintln!("Plan column:    {}", r.plan_column);
            eprintln!("Header rows:    {}", r.header_rows);
        }
        CommandResult::Help => print_usage(),
    }
}

/// 秒単位のオフセットを ±HH:MM 形式にする
fn format_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let minutes = offset_seconds.unsigned_abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// 機械可読JSONを組み立てる
fn machine_readable(result: &CommandResult) -> serde_json::Value {
    match result {
        CommandResult::Export(r) => serde_json::json!({
            "success": true,
            "command": "export",
            "sheet_path": r.sheet_path,
            "rows_read": r.rows_read,
            "entries": r.entries,
            "skipped_rows": r.skipped_rows,
            "file_name": r.file_name,
            "file_path": r.file_path,
            "file_size": r.file_size
        }),
        CommandResult::Read(r) => serde_json::json!({
            "success": true,
            "command": "read",
            "file_path": r.file_path,
            "mappings": r.mappings,
            "unmatched": r.unmatched,
            "total_count": r.total_count
        }),
        CommandResult::Config(r) => serde_json::json!({
            "success": true,
            "command": "config",
            "config_path": r.config_path,
            "output_folder": r.output_folder,
            "timezone_offset_seconds": r.timezone_offset_seconds,
            "product_column": r.product_column,
            "plan_column": r.plan_column,
            "header_rows": r.header_rows,
            "updated": r.updated
        }),
        CommandResult::Help => serde_json::json!({
            "success": true,
            "command": "help"
        }),
    }
}

/// エラーを出力する
///
/// * 通常モード: エラーチェーンとヒントを stderr に出力
/// * `--machine`: `exit_code` と `hint` を含む JSON を stdout に出力
pub fn output_error(error: &anyhow::Error, exit_code: i32, hint: Option<&str>, machine_output: bool) {
    if machine_output {
        println!("{}", error_json(error, exit_code, hint));
        return;
    }

    eprintln!("Error: {}", error);

    let chain: Vec<_> = error.chain().skip(1).collect();
    if !chain.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }

    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }
}

fn error_json(error: &anyhow::Error, exit_code: i32, hint: Option<&str>) -> serde_json::Value {
    let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();
    serde_json::json!({
        "success": false,
        "error": error.to_string(),
        "causes": causes,
        "exit_code": exit_code,
        "hint": hint
    })
}
