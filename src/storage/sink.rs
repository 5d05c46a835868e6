/// 出力フォルダへのファイル作成
///
/// `StorageSink` はフォルダ識別子で指定された保存先に、
/// 名前付きのバイト列を新しいファイルとして作成する。
/// `LocalFolderSink` はローカルディレクトリを保存先とする実装。
use crate::storage::error::InfraError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 保存するデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Blob {
    pub fn new(
        content: impl Into<Vec<u8>>,
        mime_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: content.into(),
        }
    }
}

/// 作成されたファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

pub trait StorageSink {
    /// Blob を新しいファイルとして作成する
    ///
    /// 同名ファイルがある場合は上書きせずにエラーを返す。
    fn create_file(&self, blob: &Blob) -> Result<CreatedFile, InfraError>;
}

/// ローカルディレクトリへの書き込み
///
/// 同じディレクトリに一時ファイルを書き、最後に最終名へ移動する。
/// 途中で失敗した場合、一時ファイルは Drop 時に削除される。
#[derive(Debug, Clone)]
pub struct LocalFolderSink {
    folder: PathBuf,
}

impl LocalFolderSink {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    fn check_folder(&self) -> Result<(), InfraError> {
        match std::fs::metadata(&self.folder) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(InfraError::NotAFolder {
                folder: self.folder.clone(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(InfraError::FolderNotFound {
                folder: self.folder.clone(),
            }),
            Err(e) => Err(InfraError::io(
                format!("Failed to inspect {}", self.folder.display()),
                e,
            )),
        }
    }
}

/// ファイル名が単一のパス要素であること
fn check_file_name(name: &str) -> Result<(), InfraError> {
    let is_plain = !name.is_empty()
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name);
    if is_plain {
        Ok(())
    } else {
        Err(InfraError::InvalidFileName {
            name: name.to_string(),
        })
    }
}

impl StorageSink for LocalFolderSink {
    fn create_file(&self, blob: &Blob) -> Result<CreatedFile, InfraError> {
        self.check_folder()?;
        check_file_name(&blob.name)?;

        let final_path = self.folder.join(&blob.name);
        if final_path.exists() {
            return Err(InfraError::FileExists { path: final_path });
        }

        let mut temp_file = NamedTempFile::new_in(&self.folder).map_err(|e| {
            InfraError::io(
                format!("Failed to create temporary file in {}", self.folder.display()),
                e,
            )
        })?;

        temp_file
            .write_all(&blob.bytes)
            .and_then(|_| temp_file.as_file().sync_all())
            .map_err(|e| InfraError::io(format!("Failed to write {}", blob.name), e))?;

        temp_file.persist_noclobber(&final_path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                InfraError::FileExists {
                    path: final_path.clone(),
                }
            } else {
                InfraError::io(
                    format!("Failed to persist {}", final_path.display()),
                    e.error,
                )
            }
        })?;

        tracing::info!(
            path = %final_path.display(),
            mime_type = %blob.mime_type,
            bytes = blob.bytes.len(),
            "created file"
        );

        Ok(CreatedFile {
            name: blob.name.clone(),
            path: final_path,
            size: blob.bytes.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn csv_blob(name: &str, content: &str) -> Blob {
        Blob::new(content, "text/csv", name)
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = LocalFolderSink::new(temp_dir.path());

        let created = sink
            .create_file(&csv_blob("mapping_20251129_164910.csv", "商品ID,納品プランNo"))
            .unwrap();

        assert_eq!(created.name, "mapping_20251129_164910.csv");
        assert_eq!(created.path, temp_dir.path().join("mapping_20251129_164910.csv"));
        assert_eq!(created.size, "商品ID,納品プランNo".len() as u64);
        assert_eq!(
            fs::read_to_string(&created.path).unwrap(),
            "商品ID,納品プランNo"
        );
        assert_eq!(file_names(temp_dir.path()), vec!["mapping_20251129_164910.csv"]);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mapping.csv");
        fs::write(&path, "original").unwrap();
        let sink = LocalFolderSink::new(temp_dir.path());

        let result = sink.create_file(&csv_blob("mapping.csv", "new"));

        assert!(matches!(result, Err(InfraError::FileExists { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert_eq!(file_names(temp_dir.path()), vec!["mapping.csv"]);
    }

    #[test]
    fn test_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let sink = LocalFolderSink::new(temp_dir.path().join("missing"));

        let result = sink.create_file(&csv_blob("mapping.csv", "x"));
        assert!(matches!(result, Err(InfraError::FolderNotFound { .. })));
    }

    #[test]
    fn test_folder_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("plain.txt");
        fs::write(&file_path, "x").unwrap();
        let sink = LocalFolderSink::new(&file_path);

        let result = sink.create_file(&csv_blob("mapping.csv", "x"));
        assert!(matches!(result, Err(InfraError::NotAFolder { .. })));
    }

    #[test]
    fn test_rejects_path_in_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let sink = LocalFolderSink::new(temp_dir.path());

        for name in ["../escape.csv", "sub/mapping.csv", ""] {
            let result = sink.create_file(&csv_blob(name, "x"));
            assert!(
                matches!(result, Err(InfraError::InvalidFileName { .. })),
                "name {:?} should be rejected",
                name
            );
        }
        assert!(file_names(temp_dir.path()).is_empty());
    }
}
