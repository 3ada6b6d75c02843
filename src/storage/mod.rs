//! Key-value storage the cart is persisted to.

use std::io;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure while accessing a key.
    #[error("i/o error on key {key}")]
    Io {
        /// Key being accessed
        key: String,

        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The store could not serve the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous byte store addressed by string keys.
#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored at `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `value` at `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}
