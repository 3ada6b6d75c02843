//! Cart Handle

use tokio::sync::{
    mpsc::{self, error::TrySendError},
    oneshot, watch,
};

use crate::{
    cart::CartTotals,
    errors::{CartError, TotalsError},
    items::{CartItem, ProductId, ProductInfo},
};

use super::command::{CartAction, CartCommand, PendingMutation};

/// Consumer surface of a mounted cart.
///
/// Reads come from the latest published snapshot and never wait on storage.
/// Mutations are queued to the provider's single writer.
#[derive(Debug, Clone)]
pub struct CartHandle {
    sender: mpsc::Sender<CartCommand>,
    snapshot: watch::Receiver<Vec<CartItem>>,
}

impl CartHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<CartCommand>,
        snapshot: watch::Receiver<Vec<CartItem>>,
    ) -> Self {
        Self { sender, snapshot }
    }

    /// Current line items in display order.
    pub fn products(&self) -> Vec<CartItem> {
        self.snapshot.borrow().clone()
    }

    /// Totals over the current line items.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError`] if a line total or the subtotal overflows.
    pub fn totals(&self) -> Result<CartTotals, TotalsError> {
        CartTotals::from_items(&self.snapshot.borrow())
    }

    /// Receiver notified whenever the line items change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.snapshot.clone()
    }

    /// Check if the provider behind this handle has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Add a product, or increment it if already in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails or the provider has stopped.
    pub async fn add_to_cart(&self, product: ProductInfo) -> Result<Vec<CartItem>, CartError> {
        self.submit(CartAction::AddToCart(product)).await
    }

    /// Increase a product's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] for an unknown product, or an error
    /// if persisting fails or the provider has stopped.
    pub async fn increment(&self, id: impl Into<ProductId>) -> Result<Vec<CartItem>, CartError> {
        self.submit(CartAction::Increment(id.into())).await
    }

    /// Decrease a product's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] for an unknown product, or an error
    /// if persisting fails or the provider has stopped.
    pub async fn decrement(&self, id: impl Into<ProductId>) -> Result<Vec<CartItem>, CartError> {
        self.submit(CartAction::Decrement(id.into())).await
    }

    /// Remove every line item.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails or the provider has stopped.
    pub async fn clear(&self) -> Result<Vec<CartItem>, CartError> {
        self.submit(CartAction::Clear).await
    }

    /// Queue a mutation without waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QueueFull`] if the queue is at capacity, or
    /// [`CartError::ProviderClosed`] if the provider has stopped.
    pub fn dispatch(&self, action: CartAction) -> Result<PendingMutation, CartError> {
        let (respond_to, receiver) = oneshot::channel();

        self.sender
            .try_send(CartCommand::Mutate { action, respond_to })
            .map_err(|error| match error {
                TrySendError::Full(_) => CartError::QueueFull,
                TrySendError::Closed(_) => CartError::ProviderClosed,
            })?;

        Ok(PendingMutation::new(receiver))
    }

    async fn submit(&self, action: CartAction) -> Result<Vec<CartItem>, CartError> {
        let (respond_to, receiver) = oneshot::channel();

        self.sender
            .send(CartCommand::Mutate { action, respond_to })
            .await
            .map_err(|_closed| CartError::ProviderClosed)?;

        PendingMutation::new(receiver).wait().await
    }
}
