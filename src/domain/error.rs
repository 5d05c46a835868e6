/// ドメイン層のエラー定義
///
/// 入力ファイルとシート行の制約違反を構造化して定義。
/// 外部クレートのエラーは含まず、純粋にドメインの制約違反を表現する。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ファイル形式が無効
    #[error("invalid file format: {path} (expected: {expected}, found: {found})")]
    InvalidFormat {
        path: String,
        expected: String,
        found: String,
    },

    /// ディレクトリが指定された（ファイルが期待される場所）
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// 商品ID列と納品プランNo列の行数が一致しない
    #[error("column length mismatch: {products} product id(s) but {plans} plan cell(s)")]
    ColumnLengthMismatch { products: usize, plans: usize },
}

impl DomainError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn invalid_format(
        path: impl Into<String>,
        supported_formats: &[&str],
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            expected: format!("one of: {}", supported_formats.join(", ")),
            found: found.into(),
        }
    }

    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    /// エラーの深刻度を返す
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.")
            }
            Self::InvalidFormat { .. } => {
                Some("Export the sheet as CSV (.csv) or tab-separated values (.tsv).")
            }
            Self::NotAFile { .. } => Some("Please specify a file, not a directory."),
            Self::ColumnLengthMismatch { .. } => {
                Some("Both columns must come from the same sheet range.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_lists_supported() {
        let err = DomainError::invalid_format("sheet.xlsx", &["csv", "tsv"], "xlsx");
        assert_eq!(
            err.to_string(),
            "invalid file format: sheet.xlsx (expected: one of: csv, tsv, found: xlsx)"
        );
    }

    #[test]
    fn test_all_variants_are_user_errors() {
        let errors = [
            DomainError::file_not_found("a.csv"),
            DomainError::not_a_file("dir"),
            DomainError::ColumnLengthMismatch {
                products: 2,
                plans: 1,
            },
        ];
        for err in errors {
            assert_eq!(err.severity(), ErrorSeverity::UserError);
            assert!(err.hint().is_some());
        }
    }
}
