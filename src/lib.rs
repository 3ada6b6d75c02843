//! Cart Store
//!
//! Client-side shopping cart state container. The cart is an ordered list of
//! line items held in memory, handed to consumers through a scoped
//! [`CartProvider`](provider::CartProvider), and written through to a
//! key-value store after every mutation so it survives restarts.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cart_store::prelude::*;
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> Result<(), CartError> {
//! let mut provider = CartProvider::new(Arc::new(FileStore::new(".cart")), CartConfig::default());
//! provider.mount().await?;
//!
//! let cart = provider.cart()?;
//! cart.add_to_cart(ProductInfo::new("sku-1", "Tee", "https://img/tee.png", Decimal::new(1_999, 2)))
//!     .await?;
//! cart.increment("sku-1").await?;
//!
//! assert_eq!(cart.products()[0].quantity, 2);
//!
//! provider.unmount().await;
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod codec;
pub mod config;
pub mod errors;
pub mod items;
pub mod observability;
pub mod prelude;
pub mod provider;
pub mod storage;
pub mod summary;
