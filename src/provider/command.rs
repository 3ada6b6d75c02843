//! Cart commands

use tokio::sync::oneshot;

use crate::{
    errors::CartError,
    items::{CartItem, ProductId, ProductInfo},
};

/// A mutation requested by a cart consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add a product, incrementing it if already present.
    AddToCart(ProductInfo),

    /// Increase a product's quantity by one.
    Increment(ProductId),

    /// Decrease a product's quantity by one.
    Decrement(ProductId),

    /// Remove every line item.
    Clear,
}

impl CartAction {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "add_to_cart",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
            Self::Clear => "clear",
        }
    }

    /// The product the action targets, if any.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            Self::AddToCart(product) => Some(&product.id),
            Self::Increment(id) | Self::Decrement(id) => Some(id),
            Self::Clear => None,
        }
    }
}

pub(crate) type MutationReply = oneshot::Sender<Result<Vec<CartItem>, CartError>>;

#[derive(Debug)]
pub(crate) enum CartCommand {
    Mutate {
        action: CartAction,
        respond_to: MutationReply,
    },
    Shutdown,
}

/// A queued mutation.
///
/// Awaiting [`PendingMutation::wait`] resolves once the mutation has been
/// applied and persisted. Dropping it does not cancel the mutation.
#[derive(Debug)]
pub struct PendingMutation {
    receiver: oneshot::Receiver<Result<Vec<CartItem>, CartError>>,
}

impl PendingMutation {
    pub(crate) fn new(receiver: oneshot::Receiver<Result<Vec<CartItem>, CartError>>) -> Self {
        Self { receiver }
    }

    /// Wait for the mutation to be applied and persisted.
    ///
    /// # Errors
    ///
    /// Returns the mutation's error, or [`CartError::ProviderClosed`] if the
    /// provider stopped before the mutation ran.
    pub async fn wait(self) -> Result<Vec<CartItem>, CartError> {
        self.receiver
            .await
            .map_err(|_closed| CartError::ProviderClosed)?
    }
}
