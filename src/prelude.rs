//! Cart Store prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartTotals, Mutation},
    config::{CartConfig, DEFAULT_STORAGE_KEY, ZeroQuantity},
    errors::{CartError, TotalsError},
    items::{CartItem, ProductId, ProductInfo},
    provider::{CartAction, CartHandle, CartProvider, PendingMutation},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};
