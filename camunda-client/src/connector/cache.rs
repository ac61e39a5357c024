use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use camunda_core::RequestId;
use tokio::sync::Mutex;

type CachedValue = Arc<dyn Any + Send + Sync>;

/// Decoded responses keyed by endpoint instance. Entries live as long as the connector.
#[derive(Default)]
pub(crate) struct ResponseCache {
    entries: Mutex<HashMap<RequestId, CachedValue>>,
}

impl ResponseCache {
    pub(crate) async fn get<T: Any + Send + Sync>(&self, id: RequestId) -> Option<Arc<T>> {
        let entry = self.entries.lock().await.get(&id).cloned()?;
        entry.downcast::<T>().ok()
    }

    pub(crate) async fn insert<T: Any + Send + Sync>(&self, id: RequestId, value: Arc<T>) {
        self.entries.lock().await.insert(id, value);
    }

    pub(crate) async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub(crate) async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
