//! File-backed store

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Key-value store keeping one file per key under a root directory.
///
/// File names percent-escape every key byte outside `[A-Za-z0-9_-]`, so
/// distinct keys always map to distinct files. Writes land in a temporary
/// sibling file which is synced and then renamed over the target, so a crash
/// mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the file path backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(file_name(key))
    }

    // Escaped names never contain '.', so no key maps to a temp file.
    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{}.tmp", file_name(key)))
    }
}

fn file_name(key: &str) -> String {
    key.bytes().fold(String::with_capacity(key.len()), |mut name, byte| {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-') {
            name.push(char::from(byte));
        } else {
            name.push_str(&format!("%{byte:02X}"));
        }

        name
    })
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StorageError {
    let key = key.to_string();

    move |source| StorageError::Io { key, source }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(io_error(key)(source)),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await.map_err(io_error(key))?;

        let path = self.path_for(key);
        let temp_path = self.temp_path_for(key);

        let mut file = fs::File::create(&temp_path).await.map_err(io_error(key))?;
        file.write_all(&value).await.map_err(io_error(key))?;
        file.sync_all().await.map_err(io_error(key))?;

        fs::rename(&temp_path, &path).await.map_err(io_error(key))?;

        debug!(path = %path.display(), bytes = value.len(), "wrote key");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn file_name_escapes_reserved_bytes() {
        assert_eq!(file_name("cart:products"), "cart%3Aproducts");
        assert_eq!(file_name("../etc/passwd"), "%2E%2E%2Fetc%2Fpasswd");
        assert_eq!(file_name("v1.cart-items"), "v1%2Ecart-items");
        assert_eq!(file_name("cart_products"), "cart_products");
        assert_eq!(file_name("100%"), "100%25");
        assert_eq!(file_name("café"), "caf%C3%A9");
    }

    #[tokio::test]
    async fn keys_differing_in_escaped_bytes_stay_independent() -> TestResult {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path());

        store.set("cart:products", b"[1]".to_vec()).await?;
        store.set("cart/products", b"[2]".to_vec()).await?;
        store.set("cart_products", b"[3]".to_vec()).await?;
        store.set("cart%3Aproducts", b"[4]".to_vec()).await?;

        assert_eq!(store.get("cart:products").await?, Some(b"[1]".to_vec()));
        assert_eq!(store.get("cart/products").await?, Some(b"[2]".to_vec()));
        assert_eq!(store.get("cart_products").await?, Some(b"[3]".to_vec()));
        assert_eq!(store.get("cart%3Aproducts").await?, Some(b"[4]".to_vec()));

        Ok(())
    }

    #[tokio::test]
    async fn temp_file_name_is_not_reachable_from_a_key() -> TestResult {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path());

        store.set(".cart_products.tmp", b"kept".to_vec()).await?;
        store.set("cart_products", b"[]".to_vec()).await?;

        assert_ne!(store.temp_path_for("cart_products"), store.path_for(".cart_products.tmp"));
        assert_eq!(store.get(".cart_products.tmp").await?, Some(b"kept".to_vec()));
        assert_eq!(store.get("cart_products").await?, Some(b"[]".to_vec()));

        Ok(())
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() -> TestResult {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("cart:products").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn set_creates_root_and_persists() -> TestResult {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path().join("nested"));

        store.set("cart:products", b"[]".to_vec()).await?;

        assert_eq!(store.get("cart:products").await?, Some(b"[]".to_vec()));
        assert!(store.path_for("cart:products").exists());
        assert!(!store.temp_path_for("cart:products").exists());

        Ok(())
    }

    #[tokio::test]
    async fn set_overwrites_existing_file() -> TestResult {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path());

        store.set("k", b"first".to_vec()).await?;
        store.set("k", b"second".to_vec()).await?;

        assert_eq!(store.get("k").await?, Some(b"second".to_vec()));

        Ok(())
    }

    #[tokio::test]
    async fn reading_a_directory_is_an_io_error() -> TestResult {
        let dir = tempdir()?;
        std::fs::create_dir(dir.path().join("k"))?;
        let store = FileStore::new(dir.path());

        let result = store.get("k").await;

        assert!(
            matches!(result, Err(StorageError::Io { ref key, .. }) if key == "k"),
            "expected Io error, got {result:?}"
        );

        Ok(())
    }
}
