use crate::error::Error;
use tokio::sync::mpsc::{Sender, UnboundedSender};

/// Delivery seam between change construction and whoever consumes changes.
pub trait ChangeSink {
    type Item;

    async fn send(&self, change: Self::Item) -> Result<(), Error>;
}

impl<T: Send> ChangeSink for Sender<T> {
    type Item = T;

    async fn send(&self, change: Self::Item) -> Result<(), Error> {
        Sender::send(self, change).await.map_err(|_| Error::Delivery)
    }
}

impl<T> ChangeSink for UnboundedSender<T> {
    type Item = T;

    async fn send(&self, change: Self::Item) -> Result<(), Error> {
        UnboundedSender::send(self, change).map_err(|_| Error::Delivery)
    }
}
