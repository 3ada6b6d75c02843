//! Cart

use rust_decimal::Decimal;

use crate::{
    config::ZeroQuantity,
    errors::{CartError, TotalsError},
    items::{CartItem, ProductId, ProductInfo},
};

/// The change a mutation made to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// A new line item was appended.
    Added,

    /// An existing line item's quantity changed.
    QuantityChanged {
        /// Quantity after the change
        quantity: i64,
    },

    /// A line item was removed after its quantity reached zero.
    Removed,

    /// All line items were removed.
    Cleared,
}

/// Ordered cart line items, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
    zero_quantity: ZeroQuantity,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(zero_quantity: ZeroQuantity) -> Self {
        Self {
            items: Vec::new(),
            zero_quantity,
        }
    }

    /// Create a cart from previously persisted items, installed verbatim.
    pub fn with_items(items: Vec<CartItem>, zero_quantity: ZeroQuantity) -> Self {
        Self {
            items,
            zero_quantity,
        }
    }

    /// Line items in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up the line item for a product.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Add a product. An existing line item for the same product is
    /// incremented instead of duplicated.
    ///
    /// # Errors
    ///
    /// Never fails for a new product; see [`Cart::increment`] for the
    /// existing-product path.
    pub fn add(&mut self, product: ProductInfo) -> Result<Mutation, CartError> {
        if self.get(&product.id).is_some() {
            return self.increment(&product.id);
        }

        self.items.push(CartItem::from_product(product));

        Ok(Mutation::Added)
    }

    /// Increase a line item's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the product is not in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Result<Mutation, CartError> {
        self.adjust(id, 1)
    }

    /// Decrease a line item's quantity by one. There is no floor at zero; what
    /// happens to an item at zero is decided by the [`ZeroQuantity`] policy.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the product is not in the cart.
    pub fn decrement(&mut self, id: &ProductId) -> Result<Mutation, CartError> {
        self.adjust(id, -1)
    }

    /// Remove every line item.
    pub fn clear(&mut self) -> Mutation {
        self.items.clear();

        Mutation::Cleared
    }

    /// Totals over the current line items.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError`] if a line total or the subtotal overflows.
    pub fn totals(&self) -> Result<CartTotals, TotalsError> {
        CartTotals::from_items(&self.items)
    }

    fn adjust(&mut self, id: &ProductId, delta: i64) -> Result<Mutation, CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;

        item.quantity = item.quantity.saturating_add(delta);
        let quantity = item.quantity;

        if quantity <= 0 && self.zero_quantity == ZeroQuantity::Remove {
            self.items.retain(|item| item.id != *id);

            return Ok(Mutation::Removed);
        }

        Ok(Mutation::QuantityChanged { quantity })
    }
}

/// Totals derived from the cart's line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of `price * quantity` over all line items
    pub subtotal: Decimal,

    /// Sum of quantities
    pub item_count: i64,

    /// Number of line items
    pub line_count: usize,
}

impl CartTotals {
    /// Calculate totals for a slice of line items.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError`] if a line total or the subtotal overflows.
    pub fn from_items(items: &[CartItem]) -> Result<Self, TotalsError> {
        items.iter().try_fold(
            Self {
                line_count: items.len(),
                ..Self::default()
            },
            |totals, item| -> Result<Self, TotalsError> {
                let subtotal = totals
                    .subtotal
                    .checked_add(item.line_total()?)
                    .ok_or(TotalsError::SubtotalOverflow)?;

                Ok(Self {
                    subtotal,
                    item_count: totals.item_count.saturating_add(item.quantity),
                    ..totals
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(id: &str, price: i64) -> ProductInfo {
        ProductInfo::new(id, format!("Product {id}"), "u", Decimal::new(price, 0))
    }

    fn item(id: &str, quantity: i64) -> CartItem {
        CartItem {
            quantity,
            ..CartItem::from_product(product(id, 10))
        }
    }

    fn quantities(cart: &Cart) -> Vec<(&str, i64)> {
        cart.items()
            .iter()
            .map(|item| (item.id.as_str(), item.quantity))
            .collect()
    }

    #[test]
    fn add_new_product_appends_with_quantity_one() -> TestResult {
        let mut cart = Cart::default();

        let mutation = cart.add(product("A", 10))?;

        assert_eq!(mutation, Mutation::Added);
        assert_eq!(cart.items(), [CartItem::from_product(product("A", 10))]);

        Ok(())
    }

    #[test]
    fn add_existing_product_increments() -> TestResult {
        let mut cart = Cart::with_items(vec![item("A", 1)], ZeroQuantity::Keep);

        let mutation = cart.add(product("A", 10))?;

        assert_eq!(mutation, Mutation::QuantityChanged { quantity: 2 });
        assert_eq!(quantities(&cart), [("A", 2)]);

        Ok(())
    }

    #[test]
    fn add_preserves_insertion_order() -> TestResult {
        let mut cart = Cart::default();

        cart.add(product("B", 1))?;
        cart.add(product("A", 1))?;
        cart.add(product("B", 1))?;

        assert_eq!(quantities(&cart), [("B", 2), ("A", 1)]);

        Ok(())
    }

    #[test]
    fn increment_changes_only_target() -> TestResult {
        let mut cart = Cart::with_items(vec![item("A", 1), item("B", 3)], ZeroQuantity::Keep);

        cart.increment(&ProductId::from("B"))?;

        assert_eq!(quantities(&cart), [("A", 1), ("B", 4)]);

        Ok(())
    }

    #[test]
    fn decrement_keeps_zero_quantity_item() -> TestResult {
        let mut cart = Cart::with_items(vec![item("A", 1)], ZeroQuantity::Keep);

        let mutation = cart.decrement(&ProductId::from("A"))?;

        assert_eq!(mutation, Mutation::QuantityChanged { quantity: 0 });
        assert_eq!(quantities(&cart), [("A", 0)]);

        Ok(())
    }

    #[test]
    fn decrement_has_no_floor() -> TestResult {
        let mut cart = Cart::with_items(vec![item("A", 0)], ZeroQuantity::Keep);

        cart.decrement(&ProductId::from("A"))?;

        assert_eq!(quantities(&cart), [("A", -1)]);

        Ok(())
    }

    #[test]
    fn decrement_to_zero_removes_under_remove_policy() -> TestResult {
        let mut cart = Cart::with_items(vec![item("A", 1), item("B", 2)], ZeroQuantity::Remove);

        let mutation = cart.decrement(&ProductId::from("A"))?;

        assert_eq!(mutation, Mutation::Removed);
        assert_eq!(quantities(&cart), [("B", 2)]);

        Ok(())
    }

    #[test]
    fn missing_id_returns_not_found() {
        let mut cart = Cart::with_items(vec![item("A", 1)], ZeroQuantity::Keep);

        let result = cart.increment(&ProductId::from("Z"));

        assert!(
            matches!(result, Err(CartError::ItemNotFound(ref id)) if id.as_str() == "Z"),
            "expected ItemNotFound, got {result:?}"
        );
        assert_eq!(quantities(&cart), [("A", 1)]);

        let result = cart.decrement(&ProductId::from("Z"));

        assert!(
            matches!(result, Err(CartError::ItemNotFound(_))),
            "expected ItemNotFound, got {result:?}"
        );
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::with_items(vec![item("A", 1), item("B", 2)], ZeroQuantity::Keep);

        assert_eq!(cart.clear(), Mutation::Cleared);
        assert!(cart.is_empty());
    }

    #[test]
    fn totals_sum_lines() -> TestResult {
        let cart = Cart::with_items(
            vec![
                CartItem {
                    quantity: 2,
                    ..CartItem::from_product(ProductInfo::new("A", "A", "", Decimal::new(250, 2)))
                },
                CartItem {
                    quantity: 1,
                    ..CartItem::from_product(ProductInfo::new("B", "B", "", Decimal::new(1_000, 2)))
                },
            ],
            ZeroQuantity::Keep,
        );

        let totals = cart.totals()?;

        assert_eq!(totals.subtotal, Decimal::new(1_500, 2));
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.line_count, 2);

        Ok(())
    }

    #[test]
    fn totals_of_empty_cart_are_zero() {
        assert_eq!(Cart::default().totals(), Ok(CartTotals::default()));
    }

    #[test]
    fn totals_report_subtotal_overflow() {
        let cart = Cart::with_items(
            vec![
                CartItem::from_product(ProductInfo::new("A", "A", "", Decimal::MAX)),
                CartItem::from_product(ProductInfo::new("B", "B", "", Decimal::MAX)),
            ],
            ZeroQuantity::Keep,
        );

        assert_eq!(cart.totals(), Err(TotalsError::SubtotalOverflow));
    }
}
