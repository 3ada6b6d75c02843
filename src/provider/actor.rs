//! Single-writer cart actor.
//!
//! Owns the cart and drains the command queue one mutation at a time. Each
//! mutation is applied to the latest state, published to consumers, and then
//! persisted before the next command is taken.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{Span, debug, field, trace, warn};

use crate::{
    cart::{Cart, Mutation},
    codec,
    errors::CartError,
    items::CartItem,
    storage::KeyValueStore,
};

use super::command::{CartAction, CartCommand};

pub(crate) struct CartActor {
    cart: Cart,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    receiver: mpsc::Receiver<CartCommand>,
    snapshot: watch::Sender<Vec<CartItem>>,
}

impl CartActor {
    pub(crate) fn new(
        cart: Cart,
        storage: Arc<dyn KeyValueStore>,
        key: String,
        receiver: mpsc::Receiver<CartCommand>,
        snapshot: watch::Sender<Vec<CartItem>>,
    ) -> Self {
        Self {
            cart,
            storage,
            key,
            receiver,
            snapshot,
        }
    }

    pub(crate) async fn run(mut self) {
        while let Some(command) = self.receiver.recv().await {
            match command {
                CartCommand::Mutate { action, respond_to } => {
                    let result = self.apply(action).await;

                    if respond_to.send(result).is_err() {
                        trace!("cart mutation response dropped (receiver gone)");
                    }
                }
                CartCommand::Shutdown => break,
            }
        }

        debug!(key = %self.key, "cart actor stopped");
    }

    #[tracing::instrument(
        name = "cart.actor.apply",
        skip(self, action),
        fields(
            action = action.name(),
            product_id = field::Empty,
            quantity = field::Empty
        ),
        err(level = "debug")
    )]
    async fn apply(&mut self, action: CartAction) -> Result<Vec<CartItem>, CartError> {
        let span = Span::current();

        if let Some(id) = action.product_id() {
            span.record("product_id", field::display(id));
        }

        let mutation = match action {
            CartAction::AddToCart(product) => self.cart.add(product)?,
            CartAction::Increment(id) => self.cart.increment(&id)?,
            CartAction::Decrement(id) => self.cart.decrement(&id)?,
            CartAction::Clear => self.cart.clear(),
        };

        if let Mutation::QuantityChanged { quantity } = mutation {
            span.record("quantity", quantity);
        }

        let items = self.cart.items().to_vec();

        self.snapshot.send_replace(items.clone());

        debug!(?mutation, lines = items.len(), "applied cart mutation");

        self.persist(&items).await?;

        Ok(items)
    }

    async fn persist(&self, items: &[CartItem]) -> Result<(), CartError> {
        let bytes = codec::encode(items).map_err(CartError::Encode)?;

        self.storage
            .set(&self.key, bytes)
            .await
            .map_err(|source| {
                warn!(key = %self.key, error = %source, "failed to persist cart; in-memory state is ahead of storage");

                CartError::StorageWrite(source)
            })
    }
}
