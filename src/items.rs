//! Items

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::TotalsError;

/// Product identifier, stable across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Product details supplied when adding to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub title: String,

    /// Display image reference
    pub image_url: String,

    /// Unit price
    pub price: Decimal,
}

impl ProductInfo {
    /// Creates product details.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// A cart line item.
///
/// `quantity` is signed: decrementing has no floor, so zero and negative
/// quantities can be observed under [`ZeroQuantity::Keep`](crate::config::ZeroQuantity::Keep).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub title: String,

    /// Display image reference
    pub image_url: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity in the cart
    pub quantity: i64,
}

impl CartItem {
    /// Creates a line item with a quantity of one.
    pub fn from_product(product: ProductInfo) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }

    /// Returns the line total (`price * quantity`).
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::LineOverflow`] if the product does not fit in a decimal.
    pub fn line_total(&self) -> Result<Decimal, TotalsError> {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| TotalsError::LineOverflow(self.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_product_starts_at_one() {
        let item = CartItem::from_product(ProductInfo::new(
            "A",
            "Tee",
            "https://img/a.png",
            Decimal::new(1_050, 2),
        ));

        assert_eq!(item.id, ProductId::from("A"));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, Decimal::new(1_050, 2));
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() -> TestResult {
        let mut item = CartItem::from_product(ProductInfo::new("A", "Tee", "", Decimal::new(250, 2)));
        item.quantity = 3;

        assert_eq!(item.line_total()?, Decimal::new(750, 2));

        Ok(())
    }

    #[test]
    fn line_total_is_negative_for_negative_quantity() -> TestResult {
        let mut item = CartItem::from_product(ProductInfo::new("A", "Tee", "", Decimal::new(2, 0)));
        item.quantity = -1;

        assert_eq!(item.line_total()?, Decimal::new(-2, 0));

        Ok(())
    }

    #[test]
    fn line_total_overflow_is_an_error() {
        let mut item = CartItem::from_product(ProductInfo::new("A", "Tee", "", Decimal::MAX));
        item.quantity = 2;

        assert_eq!(
            item.line_total(),
            Err(TotalsError::LineOverflow(ProductId::from("A")))
        );
    }

    #[test]
    fn product_id_displays_raw_value() {
        assert_eq!(ProductId::new("sku-1").to_string(), "sku-1");
    }
}
