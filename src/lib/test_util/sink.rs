use crate::change::ChangeSink;
use crate::error::Error;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

pub struct TestChangeSink<T> {
    values: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for TestChangeSink<T> {
    fn default() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T> Clone for TestChangeSink<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}

impl<T> TestChangeSink<T> {
    pub async fn values(&self) -> MutexGuard<'_, Vec<T>> {
        self.values.lock().await
    }
}

impl<T> ChangeSink for TestChangeSink<T> {
    type Item = T;

    async fn send(&self, change: Self::Item) -> Result<(), Error> {
        let mut values = self.values.lock().await;
        values.push(change);

        Ok(())
    }
}
