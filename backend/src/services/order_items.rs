//! Structured order lines produced by the wholesale item picker.
//!
//! Each line reads `<qty>x <name> @$<price>` and lines are comma-separated,
//! e.g. `3x Kiln-dried oak pallet @$289.00, 1x Kindling bundle @$15`.
//! Unlike the free-text stop pricing, quantities and explicit prices are
//! honored here and malformed input is rejected.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, DispatchResult};

/// One picked product with quantity and unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity: u32,
    pub name: String,
    pub unit_price: Decimal,
}

impl OrderLine {
    /// `quantity * unit_price`, rejected when it exceeds the decimal range.
    pub fn line_total(&self) -> DispatchResult<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .ok_or_else(|| DispatchError::invalid_order_line(self.to_string(), "line total is too large"))
    }
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x {} @${:.2}",
            self.quantity, self.name, self.unit_price
        )
    }
}

impl FromStr for OrderLine {
    type Err = DispatchError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();

        let (qty_part, rest) = trimmed
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| DispatchError::invalid_order_line(line, "missing '<qty>x' prefix"))?;
        let quantity: u32 = qty_part
            .trim()
            .parse()
            .map_err(|_| DispatchError::invalid_order_line(line, "quantity is not a whole number"))?;
        if quantity == 0 {
            return Err(DispatchError::invalid_order_line(line, "quantity must be positive"));
        }

        let (name, price_part) = rest
            .rsplit_once("@$")
            .ok_or_else(|| DispatchError::invalid_order_line(line, "missing '@$<price>' suffix"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DispatchError::invalid_order_line(line, "missing product name"));
        }

        let unit_price = Decimal::from_str(price_part.trim())
            .map_err(|e| DispatchError::invalid_order_line(line, e.to_string()))?;
        if unit_price.is_sign_negative() {
            return Err(DispatchError::invalid_order_line(line, "price must not be negative"));
        }

        Ok(OrderLine {
            quantity,
            name: name.to_string(),
            unit_price,
        })
    }
}

/// Parse comma-separated order lines. Blank input yields no lines.
pub fn parse_order_lines(text: &str) -> DispatchResult<Vec<OrderLine>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(OrderLine::from_str)
        .collect()
}

/// Serialize order lines back to the picker format.
pub fn format_order_lines(lines: &[OrderLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sum of `quantity * unit_price` over all lines.
pub fn order_total(lines: &[OrderLine]) -> DispatchResult<Decimal> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        total
            .checked_add(line.line_total()?)
            .ok_or_else(|| DispatchError::invalid_order_line(line.to_string(), "order total is too large"))
    })
}
