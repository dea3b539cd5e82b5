//! Filesystem helpers shared by the build and deploy flows.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Filesystem precondition failures.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("`{0}` is not a directory")]
    NotADirectory(PathBuf),
}

/// Make sure `path` exists as a directory.
///
/// Idempotent. Fails with [`FsError::NotADirectory`] when something other
/// than a directory already lives at `path`, leaving it untouched. Any
/// other `metadata` failure counts as "missing" and the directory is created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(FsError::NotADirectory(path.to_path_buf()).into()),
        Err(_) => fs::create_dir(path)
            .with_context(|| format!("Failed to create directory `{}`", path.display())),
    }
}

/// Run `f` inside a fresh, uniquely named temporary directory.
///
/// The directory is created under the system temp dir with `prefix` and is
/// removed recursively once `f` returns, whether it succeeded or not. A
/// failure of `f` takes precedence over a failure to remove the directory.
pub fn with_temp_dir<T>(prefix: &str, f: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    let dir = tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .context("Failed to create temporary directory")?;
    let path = dir.path().to_path_buf();

    let outcome = f(&path);
    let cleanup = dir
        .close()
        .with_context(|| format!("Failed to remove temporary directory `{}`", path.display()));

    let value = outcome?;
    cleanup?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_missing() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("dist");

        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn test_ensure_dir_idempotent() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("dist");

        ensure_dir(&target).unwrap();
        ensure_dir(&target).unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(target.is_dir());
    }

    #[test]
    fn test_ensure_dir_rejects_regular_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("dist");
        fs::write(&target, "not a dir").unwrap();

        let err = ensure_dir(&target).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FsError>(),
            Some(FsError::NotADirectory(p)) if p == &target
        ));
        assert!(target.is_file());
        assert_eq!(fs::read_to_string(&target).unwrap(), "not a dir");
    }

    #[test]
    fn test_ensure_dir_missing_parent_fails() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a").join("b");
        assert!(ensure_dir(&target).is_err());
        assert!(!temp.path().join("a").exists());
    }

    #[test]
    fn test_with_temp_dir_removes_after_success() {
        let seen = with_temp_dir("folio-test-", |dir| {
            fs::write(dir.join("file.txt"), "x")?;
            fs::create_dir(dir.join("nested"))?;
            fs::write(dir.join("nested").join("deep.txt"), "y")?;
            Ok(dir.to_path_buf())
        })
        .unwrap();

        assert!(!seen.exists());
        assert!(
            seen.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("folio-test-")
        );
    }

    #[test]
    fn test_with_temp_dir_removes_after_failure() {
        let mut seen = None;
        let result: Result<()> = with_temp_dir("folio-test-", |dir| {
            seen = Some(dir.to_path_buf());
            fs::write(dir.join("file.txt"), "x")?;
            bail!("callback failed")
        });

        assert_eq!(result.unwrap_err().to_string(), "callback failed");
        assert!(!seen.unwrap().exists());
    }

    #[test]
    fn test_with_temp_dir_unique() {
        let first = with_temp_dir("folio-test-", |a| {
            with_temp_dir("folio-test-", |b| {
                assert_ne!(a, b);
                Ok(())
            })?;
            Ok(a.to_path_buf())
        })
        .unwrap();
        assert!(!first.exists());
    }
}
