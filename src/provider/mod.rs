//! Cart Provider
//!
//! [`CartProvider`] owns the cart for the lifetime of a session. Mounting it
//! loads the persisted cart and starts the single writer; consumers then get
//! a [`CartHandle`] from [`CartProvider::cart`]. Asking for a handle from an
//! unmounted provider is a usage error reported as
//! [`CartError::OutsideProvider`].

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{info, trace, warn};

use crate::{
    cart::Cart,
    codec,
    config::CartConfig,
    errors::CartError,
    items::CartItem,
    storage::KeyValueStore,
};

mod actor;
mod command;
mod handle;

use actor::CartActor;
use command::CartCommand;

pub use command::{CartAction, PendingMutation};
pub use handle::CartHandle;

struct Mounted {
    handle: CartHandle,
    sender: mpsc::Sender<CartCommand>,
    task: JoinHandle<()>,
}

/// Scoped owner of a cart backed by a key-value store.
pub struct CartProvider {
    storage: Arc<dyn KeyValueStore>,
    config: CartConfig,
    mounted: Option<Mounted>,
}

impl Debug for CartProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartProvider")
            .field("config", &self.config)
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

impl CartProvider {
    /// Create an unmounted provider.
    pub fn new(storage: Arc<dyn KeyValueStore>, config: CartConfig) -> Self {
        Self {
            storage,
            config,
            mounted: None,
        }
    }

    /// Check if the provider has been mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Load the persisted cart and start accepting mutations.
    ///
    /// Mounting an already mounted provider does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::StorageRead`] if the store cannot be read, or
    /// [`CartError::MalformedPersistedData`] if the stored cart does not
    /// decode. The provider stays unmounted in both cases.
    #[tracing::instrument(
        name = "cart.provider.mount",
        skip(self),
        fields(key = %self.config.storage_key),
        err(level = "debug")
    )]
    pub async fn mount(&mut self) -> Result<(), CartError> {
        if self.is_mounted() {
            return Ok(());
        }

        let items = load(self.storage.as_ref(), &self.config.storage_key).await?;
        let cart = Cart::with_items(items, self.config.zero_quantity);

        let (sender, receiver) = mpsc::channel(self.config.queue_capacity());
        let (snapshot, snapshot_receiver) = watch::channel(cart.items().to_vec());

        info!(lines = cart.len(), "mounted cart provider");

        let actor = CartActor::new(
            cart,
            Arc::clone(&self.storage),
            self.config.storage_key.clone(),
            receiver,
            snapshot,
        );

        self.mounted = Some(Mounted {
            handle: CartHandle::new(sender.clone(), snapshot_receiver),
            sender,
            task: tokio::spawn(actor.run()),
        });

        Ok(())
    }

    /// Consumer handle for the mounted cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutsideProvider`] if the provider is not mounted.
    pub fn cart(&self) -> Result<CartHandle, CartError> {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.handle.clone())
            .ok_or(CartError::OutsideProvider)
    }

    /// Stop the provider once already queued mutations have been applied.
    ///
    /// Handles obtained earlier fail with [`CartError::ProviderClosed`]
    /// afterwards. Unmounting an unmounted provider does nothing.
    pub async fn unmount(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };

        if mounted.sender.send(CartCommand::Shutdown).await.is_err() {
            trace!("cart actor already stopped");
        }

        if let Err(error) = mounted.task.await {
            warn!(%error, "cart actor task failed");
        }

        info!(key = %self.config.storage_key, "unmounted cart provider");
    }
}

impl Drop for CartProvider {
    fn drop(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };

        if mounted.sender.try_send(CartCommand::Shutdown).is_err() {
            trace!("cart actor not signalled on drop");
        }
    }
}

/// Read and decode the cart stored at `key`. A missing key is an empty cart.
///
/// # Errors
///
/// Returns [`CartError::StorageRead`] if the store cannot be read, or
/// [`CartError::MalformedPersistedData`] if the payload does not decode.
pub async fn load(storage: &dyn KeyValueStore, key: &str) -> Result<Vec<CartItem>, CartError> {
    let Some(bytes) = storage.get(key).await.map_err(CartError::StorageRead)? else {
        return Ok(Vec::new());
    };

    codec::decode(&bytes).map_err(CartError::MalformedPersistedData)
}
