//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Reads asset sources and writes bundled output with tempfile + rename.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::from_io(e, path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn modified(&self, path: &Path) -> FsResult<SystemTime> {
        std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| FsError::from_io(e, path))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(e, parent))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(e, parent))?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(path)
            .map_err(|e| FsError::Other(format!("failed to persist {}: {}", path.display(), e)))?;
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(e, parent))?;
        }
        std::fs::copy(from, to).map_err(|e| FsError::from_io(e, from))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.js");
        let fs = LocalFs::new();

        fs.write(&file, "@normal.js\n").unwrap();
        let content = fs.read(&file).unwrap();

        assert_eq!(content, "@normal.js\n");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("assets").join("js").join("app.js");
        let fs = LocalFs::new();

        fs.write(&file, "content").unwrap();

        assert!(file.exists());
    }

    #[test]
    fn local_fs_write_overwrites() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("app.css");
        let fs = LocalFs::new();

        fs.write(&file, "original").unwrap();
        fs.write(&file, "replaced").unwrap();

        assert_eq!(fs.read(&file).unwrap(), "replaced");
    }

    #[test]
    fn local_fs_exists_only_for_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("exists.css");
        let fs = LocalFs::new();

        assert!(!fs.exists(&file));
        assert!(!fs.exists(dir.path()));

        fs.write(&file, "content").unwrap();

        assert!(fs.exists(&file));
    }

    #[test]
    fn local_fs_read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("missing.js");
        let fs = LocalFs::new();

        assert!(matches!(fs.read(&file), Err(FsError::NotFound(p)) if p == file));
    }

    #[test]
    fn local_fs_copy_keeps_bytes() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("logo.png");
        let to = dir.path().join("out").join("img").join("logo.png");
        std::fs::write(&from, [0x89, b'P', b'N', b'G', 0xff]).unwrap();
        let fs = LocalFs::new();

        fs.copy(&from, &to).unwrap();

        assert_eq!(std::fs::read(&to).unwrap(), vec![0x89, b'P', b'N', b'G', 0xff]);
        assert!(matches!(
            fs.copy(&dir.path().join("none.png"), &to),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn local_fs_modified() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("stamp.js");
        let fs = LocalFs::new();

        fs.write(&file, "x").unwrap();
        let stamp = fs.modified(&file).unwrap();

        assert!(stamp <= SystemTime::now());
        assert!(fs.modified(&dir.path().join("nope.js")).is_err());
    }
}
