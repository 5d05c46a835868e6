/// 設定コマンド
///
/// ユーザー設定（出力フォルダ、タイムゾーン）の表示と更新を行います。
use crate::commands::result::{CommandResult, ConfigResult};
use crate::config::UserConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// 設定コマンドの操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    SetFolder(PathBuf),
    /// None はホストのローカルタイムゾーン
    SetTimezone(Option<i32>),
}

/// 設定コマンドを実行
pub fn execute(action: ConfigAction) -> Result<CommandResult> {
    let config_path = UserConfig::config_path().context("Failed to locate configuration file")?;
    run(action, &config_path)
}

/// 指定した設定ファイルに対して操作を行う
pub fn run(action: ConfigAction, config_path: &Path) -> Result<CommandResult> {
    let mut config =
        UserConfig::load_from(config_path).context("Failed to load configuration file")?;

    let updated = apply(&mut config, action);
    if updated {
        config
            .save_to(config_path)
            .context("Failed to save configuration file")?;
    }

    Ok(CommandResult::Config(ConfigResult {
        config_path: config_path.to_path_buf(),
        output_folder: config.output_folder,
        timezone_offset_seconds: config.timezone_offset_seconds,
        product_column: config.product_column,
        plan_column: config.plan_column,
        header_rows: config.header_rows,
        updated,
    }))
}

/// 設定を書き換える。書き換えた場合 true
fn apply(config: &mut UserConfig, action: ConfigAction) -> bool {
    match action {
        ConfigAction::Show => false,
        ConfigAction::SetFolder(folder) => {
            if !folder.is_dir() {
                tracing::warn!(
                    folder = %folder.display(),
                    "output folder does not exist yet; export will fail until it is created"
                );
            }
            config.output_folder = Some(folder);
            true
        }
        ConfigAction::SetTimezone(offset) => {
            config.timezone_offset_seconds = offset;
            true
        }
    }
}
