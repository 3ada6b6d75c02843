//! Cart errors.

use thiserror::Error;

use crate::{items::ProductId, storage::StorageError};

/// Errors returned by the cart store.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart was requested from a provider that is not mounted.
    #[error("cart accessed outside of a mounted cart provider")]
    OutsideProvider,

    /// The provider was unmounted while a handle was still in use.
    #[error("cart provider has been unmounted")]
    ProviderClosed,

    /// No line item exists for the product.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// The mutation queue is full.
    #[error("cart mutation queue is full")]
    QueueFull,

    /// Reading the persisted cart failed.
    #[error("failed to read persisted cart")]
    StorageRead(#[source] StorageError),

    /// Writing the cart failed; in-memory state has already advanced.
    #[error("failed to persist cart")]
    StorageWrite(#[source] StorageError),

    /// The persisted cart could not be decoded.
    #[error("persisted cart is malformed")]
    MalformedPersistedData(#[source] serde_json::Error),

    /// The cart could not be encoded for storage.
    #[error("failed to encode cart")]
    Encode(#[source] serde_json::Error),
}

/// Errors that can occur when totalling line items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalsError {
    /// `price * quantity` does not fit in a decimal.
    #[error("line total for product {0} overflowed")]
    LineOverflow(ProductId),

    /// The sum of line totals does not fit in a decimal.
    #[error("cart subtotal overflowed")]
    SubtotalOverflow,
}
