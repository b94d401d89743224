use std::path::{Path, PathBuf};

use crate::error::{AggregatorError, Result};

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the file at `path` with `content`
///
/// The content is written to a sibling temporary file first and renamed into
/// place, so concurrent readers see either the old or the new file.
pub async fn write_file_atomic(path: &str, content: &[u8]) -> Result<()> {
    let target = Path::new(path);
    let tmp = temp_path_for(target);
    let write_err = |source: std::io::Error| AggregatorError::Write {
        path: path.to_string(),
        source,
    };

    tokio::fs::write(&tmp, content).await.map_err(write_err)?;
    if let Err(e) = tokio::fs::rename(&tmp, target).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_for() {
        assert_eq!(
            temp_path_for(Path::new("out/config.yaml")),
            PathBuf::from("out/config.yaml.tmp")
        );
    }

    #[tokio::test]
    async fn test_write_file_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let path_str = path.to_str().unwrap();

        write_file_atomic(path_str, b"first").await.unwrap();
        write_file_atomic(path_str, b"second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("config.yaml.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_file_atomic_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("config.yaml");
        let err = write_file_atomic(path.to_str().unwrap(), b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, AggregatorError::Write { .. }));
    }
}
