/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - コンパイル時定数として定義される静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定（出力フォルダ、タイムゾーン、列配置）
///
/// # 使用例
///
/// ```rust,ignore
/// use crate::config::{APP_CONFIG, UserConfig};
///
/// let header = APP_CONFIG.mapping.product_header;
///
/// // load時に自動検証
/// let user_config = UserConfig::load()?;
/// let folder = user_config.resolve_output_folder(None)?;
/// ```
pub mod app;
pub mod error;
pub mod user;

pub use app::APP_CONFIG;
pub use user::UserConfig;
