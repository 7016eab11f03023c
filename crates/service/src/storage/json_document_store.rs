use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// JSON file-backed collection store.
///
/// The backing file is a single JSON object; one top-level key holds the
/// ordered array of records managed here, any other keys are carried through
/// untouched. The whole collection lives in memory and every mutation
/// rewrites the full document before it becomes visible to readers.
pub struct JsonDocumentStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
    collection: String,
    others: Map<String, Value>,
}

impl<T> JsonDocumentStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the document at `path`, creating it with an empty collection when
    /// the file is missing, empty, or lacks the collection key.
    ///
    /// A file that exists but does not hold a JSON object with an array of
    /// records under `collection` yields [`ServiceError::Corrupt`].
    pub async fn open<P: Into<PathBuf>>(path: P, collection: &str) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("cannot create {}: {e}", parent.display())))?;
        }

        let raw = match fs::read(&file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(ServiceError::Storage(format!("cannot read {}: {e}", file_path.display()))),
        };

        let mut others = if raw.iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else {
            match serde_json::from_slice::<Value>(&raw).map_err(|e| corrupt(&file_path, e))? {
                Value::Object(map) => map,
                _ => return Err(corrupt(&file_path, "top-level value is not an object")),
            }
        };

        let (items, initialized) = match others.remove(collection) {
            Some(value) => {
                let items = serde_json::from_value::<Vec<T>>(value).map_err(|e| corrupt(&file_path, e))?;
                (items, true)
            }
            None => (Vec::new(), false),
        };

        let store = Self {
            inner: RwLock::new(items),
            file_path,
            collection: collection.to_string(),
            others,
        };

        if !initialized {
            store.persist(&[]).await?;
            info!(path = %store.file_path.display(), collection, "initialized empty document");
        }

        Ok(Arc::new(store))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Snapshot of the whole collection, in insertion order.
    pub async fn all(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// First record matching `pred`.
    pub async fn find<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.inner.read().await.iter().find(|item| pred(item)).cloned()
    }

    /// Append a record and persist.
    pub async fn push(&self, item: T) -> Result<(), ServiceError> {
        self.mutate(move |items| {
            items.push(item);
            Ok(())
        })
        .await
    }

    /// Overwrite the whole collection and persist; returns the previous records.
    pub async fn replace_all(&self, next: Vec<T>) -> Result<Vec<T>, ServiceError> {
        self.mutate(move |items| Ok(std::mem::replace(items, next))).await
    }

    /// Apply `f` to the first record matching `pred` and persist.
    /// Returns the updated record, or `None` without touching the file.
    pub async fn update_first<P, F>(&self, pred: P, f: F) -> Result<Option<T>, ServiceError>
    where
        P: Fn(&T) -> bool + Send,
        F: FnOnce(&mut T) + Send,
    {
        self.apply(move |items| match items.iter_mut().find(|item| pred(item)) {
            Some(item) => {
                f(item);
                Ok((Some(item.clone()), true))
            }
            None => Ok((None, false)),
        })
        .await
    }

    /// Remove every record matching `pred`; persists only when something was removed.
    pub async fn remove_where<P>(&self, pred: P) -> Result<usize, ServiceError>
    where
        P: Fn(&T) -> bool + Send,
    {
        self.apply(move |items| {
            let before = items.len();
            items.retain(|item| !pred(item));
            let removed = before - items.len();
            Ok((removed, removed > 0))
        })
        .await
    }

    /// Apply an arbitrary mutation to the collection and persist it.
    /// An `Err` from `f` leaves both memory and file unchanged.
    pub async fn mutate<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        R: Send,
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError> + Send,
    {
        self.apply(move |items| f(items).map(|out| (out, true))).await
    }

    // The write lock is held until the new document is on disk, so writers
    // are serialized and readers never observe uncommitted state.
    async fn apply<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        R: Send,
        F: FnOnce(&mut Vec<T>) -> Result<(R, bool), ServiceError> + Send,
    {
        let mut guard = self.inner.write().await;
        let mut working = guard.clone();
        let (out, changed) = f(&mut working)?;
        if changed {
            self.persist(&working).await?;
            *guard = working;
        }
        Ok(out)
    }

    async fn persist(&self, items: &[T]) -> Result<(), ServiceError> {
        let mut document = self.others.clone();
        let records = serde_json::to_value(items).map_err(|e| ServiceError::Storage(e.to_string()))?;
        document.insert(self.collection.clone(), records);
        let data = serde_json::to_vec_pretty(&Value::Object(document))
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let tmp = tmp_path(&self.file_path);
        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot replace {}: {e}", self.file_path.display())))?;
        debug!(path = %self.file_path.display(), records = items.len(), "document persisted");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn corrupt(path: &Path, reason: impl ToString) -> ServiceError {
    ServiceError::Corrupt { path: path.display().to_string(), reason: reason.to_string() }
}
