/// インフラ層のエラー定義
///
/// 外部システム（ファイルシステム、出力フォルダ、CSVパーサ）との
/// やり取りで発生するエラーを構造化して定義。
/// #[source] を使って原因連鎖を保持する。
use crate::error_severity::ErrorSeverity;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    /// 出力フォルダが存在しない
    #[error("output folder not found: {}", folder.display())]
    FolderNotFound { folder: PathBuf },

    /// 出力フォルダとして指定されたパスがディレクトリではない
    #[error("output folder is not a directory: {}", folder.display())]
    NotAFolder { folder: PathBuf },

    /// 同名のファイルが既に存在する
    #[error("file already exists: {}", path.display())]
    FileExists { path: PathBuf },

    /// ファイル名にパス区切りなどが含まれる
    #[error("invalid file name: '{name}'")]
    InvalidFileName { name: String },

    /// CSVの読み込みエラー
    #[error("failed to read CSV: {context}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },

    /// その他のI/Oエラー
    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn csv(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            context: context.into(),
            source,
        }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FolderNotFound { .. } | Self::NotAFolder { .. } => ErrorSeverity::ConfigError,
            Self::Csv { .. } => ErrorSeverity::UserError,
            Self::FileExists { .. } | Self::InvalidFileName { .. } | Self::Io { .. } => {
                ErrorSeverity::SystemError
            }
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::FolderNotFound { .. } | Self::NotAFolder { .. } => Some(
                "Check the output folder with 'planmap config' and make sure the directory exists.",
            ),
            Self::FileExists { .. } => {
                Some("A mapping file with the same timestamp exists. Wait a second and retry.")
            }
            Self::Csv { .. } => Some("The input file is not valid CSV. Re-export the sheet."),
            Self::InvalidFileName { .. } | Self::Io { .. } => None,
        }
    }
}
