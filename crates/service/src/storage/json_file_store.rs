use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::ServiceError;

/// A single JSON document persisted to one file.
///
/// Writers (`write_pretty`, `update`) are serialized by an async mutex so a
/// read-modify-write never interleaves with another writer. Each save goes to
/// a sibling temp file which is then renamed over the target, so readers see
/// either the old or the new document, never a torn one.
pub struct JsonFileStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// The file itself is not created here; it is expected to exist already
    /// or to be written by the first overwrite.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// File contents exactly as stored.
    pub async fn read_raw(&self) -> Result<String, ServiceError> {
        Ok(fs::read_to_string(&self.file_path).await?)
    }

    pub async fn read<T: DeserializeOwned>(&self) -> Result<T, ServiceError> {
        let raw = self.read_raw().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace the document with `value`, pretty-printed.
    pub async fn write_pretty<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.save(value).await
    }

    /// Load, mutate and persist the document while holding the write lock.
    /// When `f` fails nothing is written.
    pub async fn update<T, F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> Result<R, ServiceError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc: T = self.read().await?;
        let out = f(&mut doc)?;
        self.save(&doc).await?;
        Ok(out)
    }

    async fn save<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_string_pretty(value)?;
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let file_name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.json".to_string());
        let tmp = self.file_path.with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&tmp, data).await?;
        if let Err(e) = fs::rename(&tmp, &self.file_path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!(path = %self.file_path.display(), "json document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_file_store_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn write_then_read_back() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonFileStore::new(&path);
        store.write_pretty(&serde_json::json!({"days": []})).await?;

        let raw = store.read_raw().await?;
        assert_eq!(raw, "{\n  \"days\": []\n}");
        let v: serde_json::Value = store.read().await?;
        assert_eq!(v["days"], serde_json::json!([]));

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_writes_nothing() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonFileStore::new(&path);
        store.write_pretty(&serde_json::json!({"n": 1})).await?;
        let before = store.read_raw().await?;

        let res = store
            .update(|v: &mut serde_json::Value| {
                v["n"] = serde_json::json!(2);
                Err::<(), _>(ServiceError::Parse("rejected".into()))
            })
            .await;
        assert!(matches!(res, Err(ServiceError::Parse(_))));
        assert_eq!(store.read_raw().await?, before);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn keeps_key_order_of_written_documents() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = JsonFileStore::new(&path);
        let doc: serde_json::Value = serde_json::from_str(r#"{"updatedBy":"x","days":[]}"#)?;
        store.write_pretty(&doc).await?;
        assert_eq!(store.read_raw().await?, "{\n  \"updatedBy\": \"x\",\n  \"days\": []\n}");

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_a_storage_error() {
        let store = JsonFileStore::new(tmp_path());
        assert!(matches!(store.read_raw().await, Err(ServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn concurrent_updates_are_not_lost() -> Result<(), anyhow::Error> {
        let path = tmp_path();
        let store = Arc::new(JsonFileStore::new(&path));
        store.write_pretty(&serde_json::json!({"n": 0})).await?;

        let mut handles = Vec::new();
        for _ in 0..25 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .update(|v: &mut serde_json::Value| {
                        let n = v["n"].as_i64().unwrap_or(0);
                        v["n"] = serde_json::json!(n + 1);
                        Ok(())
                    })
                    .await
            }));
        }
        for h in handles {
            h.await??;
        }

        let v: serde_json::Value = store.read().await?;
        assert_eq!(v["n"], 25);
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
