//! Plain-file driver (`plainfs://`)
//!
//! Objects live at `<root>/<bucket>/<key>` as ordinary files. Buckets are plain
//! directories and must exist before objects are written into them; keys may
//! contain `/`. This layout is not libh3's, so the driver has its own scheme
//! and never serves `file://` stores.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use h3cp_core::{Error, Result};

/// Maximum bucket name length in bytes
pub const BUCKET_NAME_SIZE: usize = 64;

/// Maximum object key length in bytes
pub const OBJECT_NAME_SIZE: usize = 512;

/// Open plain-file store
#[derive(Debug)]
pub struct FsHandle {
    root: PathBuf,
}

impl FsHandle {
    /// Open the store at `root`, creating the directory if needed
    pub fn open(root: &Path) -> Result<Self> {
        match std::fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(Error::StoreInit(format!(
                    "store root '{}' is not a directory",
                    root.display()
                )));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                std::fs::create_dir_all(root).map_err(|e| {
                    Error::StoreInit(format!(
                        "cannot create store root '{}': {e}",
                        root.display()
                    ))
                })?;
                tracing::debug!(root = %root.display(), "created store root");
            }
            Err(e) => {
                return Err(Error::StoreInit(format!(
                    "cannot access store root '{}': {e}",
                    root.display()
                )));
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy an object into a local file
    pub fn read_object_to_file(&self, bucket: &str, key: &str, destination: &Path) -> Result<u64> {
        let object = self.object_path(bucket, key)?;
        if !object.is_file() {
            return Err(Error::Transfer(format!(
                "object '{key}' does not exist in bucket '{bucket}'"
            )));
        }

        let mut input = File::open(&object).map_err(|e| transfer_error(&object, e))?;
        let mut output = create_destination(destination)?;
        io::copy(&mut input, &mut output).map_err(|e| transfer_error(destination, e))
    }

    /// Store a local file as an object, replacing any existing one
    pub fn write_object_from_file(&self, bucket: &str, key: &str, source: &Path) -> Result<u64> {
        let object = self.object_path(bucket, key)?;
        if !self.bucket_path(bucket).is_dir() {
            return Err(Error::Transfer(format!("bucket '{bucket}' does not exist")));
        }
        if object.is_dir() {
            return Err(Error::Transfer(format!(
                "object '{key}' conflicts with an existing prefix in bucket '{bucket}'"
            )));
        }

        let meta = std::fs::metadata(source).map_err(|e| transfer_error(source, e))?;
        if !meta.is_file() {
            return Err(Error::Transfer(format!(
                "'{}' is not a regular file",
                source.display()
            )));
        }

        if let Some(parent) = object.parent() {
            std::fs::create_dir_all(parent).map_err(|e| transfer_error(parent, e))?;
        }

        let mut input = File::open(source).map_err(|e| transfer_error(source, e))?;
        let mut output = File::create(&object).map_err(|e| transfer_error(&object, e))?;
        io::copy(&mut input, &mut output).map_err(|e| transfer_error(&object, e))
    }

    fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        validate_bucket(bucket)?;
        validate_key(key)?;
        Ok(self.bucket_path(bucket).join(key))
    }
}

fn validate_bucket(bucket: &str) -> Result<()> {
    if bucket.is_empty() || bucket.len() > BUCKET_NAME_SIZE {
        return Err(Error::Transfer(format!(
            "bucket name must be 1 to {BUCKET_NAME_SIZE} bytes"
        )));
    }
    if bucket.contains('/') || bucket == "." || bucket == ".." {
        return Err(Error::Transfer(format!("invalid bucket name '{bucket}'")));
    }
    Ok(())
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > OBJECT_NAME_SIZE {
        return Err(Error::Transfer(format!(
            "object name must be 1 to {OBJECT_NAME_SIZE} bytes"
        )));
    }
    if key
        .split('/')
        .any(|part| part.is_empty() || part == "." || part == "..")
    {
        return Err(Error::Transfer(format!("invalid object name '{key}'")));
    }
    Ok(())
}

fn create_destination(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options.open(path).map_err(|e| transfer_error(path, e))
}

fn transfer_error(path: &Path, e: io::Error) -> Error {
    Error::Transfer(format!("{}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_bucket(bucket: &str) -> (TempDir, FsHandle) {
        let dir = TempDir::new().unwrap();
        let handle = FsHandle::open(&dir.path().join("h3")).unwrap();
        std::fs::create_dir(handle.root().join(bucket)).unwrap();
        (dir, handle)
    }

    #[test]
    fn test_open_creates_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("h3");
        FsHandle::open(&root).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_open_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("h3");
        std::fs::write(&root, b"x").unwrap();
        assert!(matches!(FsHandle::open(&root), Err(Error::StoreInit(_))));
    }

    #[test]
    fn test_write_then_read() {
        let (dir, handle) = store_with_bucket("photos");
        let src = dir.path().join("img.png");
        std::fs::write(&src, b"not really a png").unwrap();

        let written = handle
            .write_object_from_file("photos", "2020/img.png", &src)
            .unwrap();
        assert_eq!(written, 16);
        assert!(handle.root().join("photos/2020/img.png").is_file());

        let dst = dir.path().join("copy.png");
        let read = handle
            .read_object_to_file("photos", "2020/img.png", &dst)
            .unwrap();
        assert_eq!(read, 16);
        assert_eq!(std::fs::read(&dst).unwrap(), b"not really a png");
    }

    #[test]
    fn test_read_truncates_destination() {
        let (dir, handle) = store_with_bucket("b");
        std::fs::write(handle.root().join("b/key"), b"short").unwrap();
        let dst = dir.path().join("out");
        std::fs::write(&dst, b"a much longer previous content").unwrap();

        handle.read_object_to_file("b", "key", &dst).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"short");
    }

    #[test]
    fn test_read_missing_object() {
        let (dir, handle) = store_with_bucket("b");
        let err = handle
            .read_object_to_file("b", "missing", &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, Error::Transfer(_)));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_write_requires_bucket() {
        let (dir, handle) = store_with_bucket("b");
        let src = dir.path().join("f");
        std::fs::write(&src, b"x").unwrap();
        let err = handle
            .write_object_from_file("nobucket", "f", &src)
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_write_missing_source() {
        let (dir, handle) = store_with_bucket("b");
        let err = handle
            .write_object_from_file("b", "f", &dir.path().join("absent"))
            .unwrap_err();
        assert!(matches!(err, Error::Transfer(_)));
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a//b").is_err());
        assert!(validate_key(&"k".repeat(OBJECT_NAME_SIZE + 1)).is_err());
        assert!(validate_key("a/b/c.txt").is_ok());
        assert!(validate_bucket("..").is_err());
        assert!(validate_bucket(&"b".repeat(BUCKET_NAME_SIZE + 1)).is_err());
        assert!(validate_bucket("photos").is_ok());
    }
}
