//! Persisted cart encoding.
//!
//! The cart is stored as a JSON array of line items with the fields `id`,
//! `title`, `image_url`, `price` and `quantity`.

use crate::items::CartItem;

/// Encodes line items for storage.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(items: &[CartItem]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(items)
}

/// Decodes stored line items.
///
/// # Errors
///
/// Returns an error if the payload is not a JSON array of line items.
pub fn decode(bytes: &[u8]) -> Result<Vec<CartItem>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
