//! File I/O utilities with atomic writes
//!
//! Every collection file is rewritten whole: the data goes to a sibling temp
//! file which is then renamed over the original.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{LedgerError, LedgerResult};

/// Read a JSON array from a file
///
/// A missing file, or one holding only whitespace, is an empty collection.
pub async fn read_json_vec<T, P>(path: P) -> LedgerResult<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(LedgerError::storage_with(
                format!("Failed to read {}", path.display()),
                e,
            ))
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| LedgerError::storage_with(format!("Failed to parse {}", path.display()), e))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub async fn write_json_atomic<T, P>(path: P, data: &T) -> LedgerResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|e| {
            LedgerError::storage_with(format!("Failed to create directory {}", parent.display()), e)
        })?;
    }

    let contents = serde_json::to_vec_pretty(data)
        .map_err(|e| LedgerError::storage_with("Failed to serialize data", e))?;

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = replace_via_temp(&temp_path, path, &contents).await;
    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    result
}

/// Write `contents` to `temp_path`, flush it to disk, then rename it over `path`
async fn replace_via_temp(temp_path: &Path, path: &Path, contents: &[u8]) -> LedgerResult<()> {
    let mut file = fs::File::create(temp_path)
        .await
        .map_err(|e| LedgerError::storage_with("Failed to create temp file", e))?;
    file.write_all(contents)
        .await
        .map_err(|e| LedgerError::storage_with("Failed to write data", e))?;
    file.sync_all()
        .await
        .map_err(|e| LedgerError::storage_with("Failed to sync data", e))?;
    drop(file);

    fs::rename(temp_path, path).await.map_err(|e| {
        LedgerError::storage_with(format!("Failed to replace {}", path.display()), e)
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn sample() -> Vec<TestData> {
        vec![
            TestData {
                name: "first".to_string(),
                value: 1,
            },
            TestData {
                name: "second".to_string(),
                value: 2,
            },
        ]
    }

    #[tokio::test]
    async fn test_read_nonexistent_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: Vec<TestData> = read_json_vec(&path).await.unwrap();
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_read_blank_file_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        std::fs::write(&path, "  \n").unwrap();

        let data: Vec<TestData> = read_json_vec(&path).await.unwrap();
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &sample()).await.unwrap();
        let loaded: Vec<TestData> = read_json_vec(&path).await.unwrap();
        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &sample()).await.unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("test.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &sample()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = read_json_vec::<TestData, _>(&path).await.unwrap_err();
        assert!(err.is_storage());
    }

    #[tokio::test]
    async fn test_failed_write_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("occupied.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let err = write_json_atomic(&path, &sample()).await.unwrap_err();
        assert!(err.is_storage());
        assert!(!temp_dir.path().join("occupied.json.tmp").exists());
        assert!(path.join("keep").exists());
    }
}
