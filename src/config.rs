//! Cart Config

use clap::{Args, ValueEnum};

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart:products";

/// Default capacity of the mutation queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// What happens to a line item whose quantity drops to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ZeroQuantity {
    /// Keep the item in the cart; decrement has no floor.
    #[default]
    Keep,

    /// Remove the item once its quantity is zero or below.
    Remove,
}

/// Cart store settings.
#[derive(Clone, Debug, Args)]
pub struct CartConfig {
    /// Key the cart is persisted under
    #[arg(long, env = "CART_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    /// Zero quantity policy (keep, remove)
    #[arg(long, env = "CART_ZERO_QUANTITY", value_enum, default_value_t = ZeroQuantity::Keep)]
    pub zero_quantity: ZeroQuantity,

    /// Capacity of the mutation queue
    #[arg(long, env = "CART_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            zero_quantity: ZeroQuantity::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl CartConfig {
    /// Returns the configured queue capacity, never less than one.
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.max(1)
    }
}
