/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\planmap\config.toml
/// macOS:   /Users/<User>/Library/Application Support/planmap/config.toml
/// Linux:   /home/<user>/.config/planmap/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
use crate::config::app::APP_CONFIG;
use crate::config::error::ConfigError;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// タイムゾーンオフセットの最大値（+18時間 = 64800秒）
const MAX_TIMEZONE_OFFSET: i32 = 64800;

/// タイムゾーンオフセットの最小値（-18時間 = -64800秒）
const MIN_TIMEZONE_OFFSET: i32 = -64800;

/// ユーザー設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// マッピングCSVの出力先フォルダ
    #[serde(default)]
    pub output_folder: Option<PathBuf>,

    /// ファイル名のタイムスタンプに使うタイムゾーンオフセット(秒単位)
    /// 未設定の場合はホストのローカルタイムゾーン
    /// 例: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
    #[serde(default)]
    pub timezone_offset_seconds: Option<i32>,

    /// 商品IDの列（0始まり）
    #[serde(default = "default_product_column")]
    pub product_column: usize,

    /// 納品プランNoの列（0始まり）
    #[serde(default = "default_plan_column")]
    pub plan_column: usize,

    /// シートCSVの先頭で読み飛ばす行数
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
}

// serde用
fn default_product_column() -> usize {
    APP_CONFIG.sheet.product_column
}

fn default_plan_column() -> usize {
    APP_CONFIG.sheet.plan_column
}

fn default_header_rows() -> usize {
    APP_CONFIG.sheet.header_rows
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            output_folder: None,
            timezone_offset_seconds: None,
            product_column: default_product_column(),
            plan_column: default_plan_column(),
            header_rows: default_header_rows(),
        }
    }
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("planmap").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、デフォルトテンプレートから自動的に作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定したパスからユーザー設定を読み込む
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        tracing::debug!(path = %config_path.display(), "loaded user config");
        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to create default config file: {}",
                    config_path.display()
                ),
                e,
            )
        })?;

        tracing::info!(path = %config_path.display(), "created default user config");
        Ok(())
    }

    /// デフォルトTOML設定を生成
    ///
    /// 列配置の既定値は APP_CONFIG から埋め込むため、Rust側の値と同期が保たれます。
    fn default_toml_content() -> String {
        format!(
            r#"# planmap - User Configuration
# Set the output folder with 'planmap config folder <dir>'
# output_folder = "/path/to/output"

# Timezone offset in seconds for mapping file names (host local time when unset)
# Examples: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
# timezone_offset_seconds = 32400

# Sheet layout (0-based column indices)
product_column = {}
plan_column = {}
header_rows = {}
"#,
            APP_CONFIG.sheet.product_column,
            APP_CONFIG.sheet.plan_column,
            APP_CONFIG.sheet.header_rows,
        )
    }

    /// 指定したパスにユーザー設定を保存する
    ///
    /// 必要に応じて設定ディレクトリを作成します。
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        Self::ensure_parent_dir(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        fs::write(config_path, content).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to write config file: {}", config_path.display()),
                e,
            )
        })?;

        Ok(())
    }

    fn ensure_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - output_folder: 設定されている場合は空でないこと
    /// - timezone_offset_seconds: ±18時間以内
    /// - product_column と plan_column が異なること
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(folder) = &self.output_folder
            && folder.as_os_str().is_empty()
        {
            return Err(ConfigError::validation_error(
                "output_folder cannot be empty. Remove the entry or set a directory path.",
            ));
        }

        if let Some(offset) = self.timezone_offset_seconds {
            Self::validate_timezone_offset(offset)?;
        }

        if self.product_column == self.plan_column {
            return Err(ConfigError::validation_error(format!(
                "product_column and plan_column must differ (both are {})",
                self.product_column
            )));
        }

        Ok(())
    }

    fn validate_timezone_offset(offset: i32) -> Result<(), ConfigError> {
        if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&offset) {
            return Err(ConfigError::validation_error(format!(
                "Invalid timezone offset '{}' seconds. Must be between {} and {} (±18 hours)",
                offset, MIN_TIMEZONE_OFFSET, MAX_TIMEZONE_OFFSET
            )));
        }
        Ok(())
    }

    /// 出力フォルダを取得
    ///
    /// `override_folder` が指定されていればそちらを優先します。
    ///
    /// # Errors
    /// どちらも無い場合に ConfigError::OutputFolderNotSet を返します。
    pub fn resolve_output_folder(
        &self,
        override_folder: Option<&Path>,
    ) -> Result<PathBuf, ConfigError> {
        override_folder
            .map(Path::to_path_buf)
            .or_else(|| self.output_folder.clone())
            .ok_or(ConfigError::OutputFolderNotSet)
    }

    /// タイムスタンプ用のオフセットを取得（None はローカルタイム）
    pub fn timezone(&self) -> Option<FixedOffset> {
        self.timezone_offset_seconds
            .and_then(FixedOffset::east_opt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_default_if_not_exists() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("planmap").join("config.toml");

        let config = UserConfig::load_from(&config_path).expect("Default config should load");

        assert!(config_path.exists(), "Config file should be created");
        assert_eq!(config, UserConfig::default());

        let content = fs::read_to_string(&config_path).expect("Failed to read config");
        assert!(content.contains("product_column = 2"));
        assert!(content.contains("planmap config folder"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");

        let config = UserConfig {
            output_folder: Some(PathBuf::from("/srv/mapping")),
            timezone_offset_seconds: Some(32400),
            product_column: 1,
            plan_column: 3,
            header_rows: 2,
        };
        config.save_to(&config_path).expect("Failed to save config");

        let loaded = UserConfig::load_from(&config_path).expect("Failed to load config");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_error_on_broken_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "product_column = \"C\"").unwrap();

        let result = UserConfig::load_from(&config_path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_validate_rejects_out_of_range_offset() {
        let config = UserConfig {
            timezone_offset_seconds: Some(MAX_TIMEZONE_OFFSET + 1),
            ..UserConfig::default()
        };

        match config.validate() {
            Err(ConfigError::ValidationError { message }) => {
                assert!(message.contains("timezone offset"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_same_columns() {
        let config = UserConfig {
            product_column: 4,
            plan_column: 4,
            ..UserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_folder() {
        let config = UserConfig {
            output_folder: Some(PathBuf::new()),
            ..UserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_output_folder_prefers_override() {
        let config = UserConfig {
            output_folder: Some(PathBuf::from("/configured")),
            ..UserConfig::default()
        };

        let folder = config
            .resolve_output_folder(Some(Path::new("/override")))
            .unwrap();
        assert_eq!(folder, PathBuf::from("/override"));

        let folder = config.resolve_output_folder(None).unwrap();
        assert_eq!(folder, PathBuf::from("/configured"));
    }

    #[test]
    fn test_resolve_output_folder_missing() {
        let config = UserConfig::default();
        assert!(matches!(
            config.resolve_output_folder(None),
            Err(ConfigError::OutputFolderNotSet)
        ));
    }

    #[test]
    fn test_timezone() {
        let mut config = UserConfig::default();
        assert!(config.timezone().is_none());

        config.timezone_offset_seconds = Some(32400);
        assert_eq!(config.timezone().unwrap().local_minus_utc(), 32400);
    }
}
