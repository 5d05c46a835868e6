//! 終了コードを決めるためのエラー深刻度
//!
//! domain / storage / config の各層のエラーはここに分類され、
//! main.rs がエラーチェーンから終了コードを決定する。
//! このモジュール自身は他のモジュールに依存しない。

use std::fmt;

/// エラーの深刻度と対応する終了コード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// 入力ファイルや引数の誤り（exit code: 1）
    ///
    /// シートCSVが見つからない、列の長さが揃っていないなど、
    /// ユーザーが直せるもの。
    UserError,

    /// 設定の誤り（exit code: 2）
    ///
    /// 出力フォルダ未設定、config.toml の破損など。
    ConfigError,

    /// 外部要因（exit code: 3）
    ///
    /// 出力フォルダへの書き込み失敗など。
    SystemError,
}

impl ErrorSeverity {
    /// 対応する Unix 終了コードを返す
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserError => write!(f, "user error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SystemError => write!(f, "system error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorSeverity::UserError.exit_code(), 1);
        assert_eq!(ErrorSeverity::ConfigError.exit_code(), 2);
        assert_eq!(ErrorSeverity::SystemError.exit_code(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorSeverity::UserError.to_string(), "user error");
        assert_eq!(
            ErrorSeverity::ConfigError.to_string(),
            "configuration error"
        );
        assert_eq!(ErrorSeverity::SystemError.to_string(), "system error");
    }
}
