//! Cart summary rendering.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Findable, Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::CartTotals, errors::TotalsError, items::CartItem};

/// Errors that can occur when rendering a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The currency code is not a known ISO currency.
    #[error("unknown currency {0}")]
    UnknownCurrency(String),

    /// An amount does not fit in the currency's minor units.
    #[error("amount {0} cannot be represented in {1}")]
    Amount(Decimal, &'static str),

    /// A line total or the subtotal overflowed.
    #[error(transparent)]
    Totals(#[from] TotalsError),

    /// IO error
    #[error("IO error")]
    IO(#[source] io::Error),
}

/// Look up an ISO currency by code.
///
/// # Errors
///
/// Returns [`SummaryError::UnknownCurrency`] for an unknown code.
pub fn find_currency(code: &str) -> Result<&'static Currency, SummaryError> {
    Currency::find(&code.to_ascii_uppercase())
        .ok_or_else(|| SummaryError::UnknownCurrency(code.to_string()))
}

/// Convert a decimal amount into money, rounding to the currency's minor unit.
///
/// # Errors
///
/// Returns [`SummaryError::Amount`] if the amount overflows the minor units.
pub fn to_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, SummaryError> {
    let mut minor =
        amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);
    minor.rescale(currency.exponent);

    let minor = i64::try_from(minor.mantissa())
        .map_err(|_overflow| SummaryError::Amount(amount, currency.iso_alpha_code))?;

    Ok(Money::from_minor(minor, currency))
}

/// Write the cart as a table followed by its totals.
///
/// # Errors
///
/// Returns an error if a total overflows, an amount cannot be converted, or
/// writing fails.
pub fn write_to(
    mut out: impl io::Write,
    items: &[CartItem],
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    if items.is_empty() {
        return writeln!(out, "Cart is empty").map_err(SummaryError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Id", "Price", "Qty", "Line Total"]);

    for (idx, item) in items.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            item.title.clone(),
            item.id.to_string(),
            to_money(item.price, currency)?.to_string(),
            item.quantity.to_string(),
            to_money(item.line_total()?, currency)?.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    let totals = CartTotals::from_items(items)?;

    writeln!(out, "{table}").map_err(SummaryError::IO)?;
    writeln!(out, " Items:    {}", totals.item_count).map_err(SummaryError::IO)?;
    writeln!(out, " Subtotal: {}", to_money(totals.subtotal, currency)?)
        .map_err(SummaryError::IO)
}
