/// ドメインサービス: 入力ファイルバリデーション
///
/// シートのエクスポートファイルとマッピングCSVを読み込む前に検証する。
/// 拡張子から区切り文字を決める。
use crate::domain::error::DomainError;
use std::path::{Path, PathBuf};

/// 読み込み可能な形式
const SUPPORTED_FORMATS: &[&str] = &["csv", "tsv"];

/// 入力ファイルのバリデーション結果
#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: PathBuf,
    pub size: u64,
    pub delimiter: u8,
}

/// 入力ファイルをバリデーションする
///
/// 空ファイルは有効（ヘッダーのみのCSVになる）。
///
/// # エラー
/// - ファイルが存在しない
/// - ディレクトリが指定された
/// - サポートされていない形式
pub fn validate_input_file(file_path: &str) -> Result<InputFile, DomainError> {
    let path = Path::new(file_path);

    if !path.exists() {
        return Err(DomainError::file_not_found(file_path));
    }

    let metadata =
        std::fs::metadata(path).map_err(|_| DomainError::file_not_found(file_path))?;

    if metadata.is_dir() {
        return Err(DomainError::not_a_file(file_path));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .ok_or_else(|| DomainError::invalid_format(file_path, SUPPORTED_FORMATS, "no extension"))?;

    let delimiter = match extension.as_str() {
        "csv" => b',',
        "tsv" => b'\t',
        other => {
            return Err(DomainError::invalid_format(
                file_path,
                SUPPORTED_FORMATS,
                other,
            ));
        }
    };

    Ok(InputFile {
        path: path.to_path_buf(),
        size: metadata.len(),
        delimiter,
    })
}
