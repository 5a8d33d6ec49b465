//! Pricing engine for delivery stops.
//!
//! Item text is a comma-separated list of free-text segments. Each segment is
//! classified against an ordered keyword table (case-insensitive substring,
//! first match wins) and contributes exactly one unit price. Quantity prefixes
//! like `2x` are not interpreted; the structured `<qty>x <name> @$<price>`
//! format lives in [`super::order_items`].
//!
//! Rule order matters: the bare `cord` rule must come after the sized cord
//! rules or it would shadow them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DispatchError, DispatchResult};

/// One keyword and the unit price it assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRule {
    pub keyword: String,
    pub unit_price: Decimal,
}

impl PriceRule {
    pub fn new(keyword: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            unit_price,
        }
    }

    fn matches(&self, lowered_segment: &str) -> bool {
        lowered_segment.contains(&self.keyword)
    }
}

/// Ordered keyword table plus the price for unmatched segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub rules: Vec<PriceRule>,
    pub default_price: Decimal,
}

/// Price contribution of a single item segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentQuote {
    pub segment: String,
    /// Keyword that matched, `None` when the default price applied.
    pub matched: Option<String>,
    pub unit_price: Decimal,
}

/// Itemized price for a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub segments: Vec<SegmentQuote>,
    pub total: Decimal,
}

impl PricingTable {
    /// The wholesaler's standard retail table.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                PriceRule::new("1/4 cord", dec!(75)),
                PriceRule::new("1/2 cord", dec!(125)),
                PriceRule::new("full cord", dec!(200)),
                PriceRule::new("cord", dec!(200)),
                PriceRule::new("kindling", dec!(15)),
                PriceRule::new("cedar", dec!(12)),
                PriceRule::new("firestarter", dec!(8)),
            ],
            default_price: dec!(10),
        }
    }

    /// Load a table from TOML.
    ///
    /// ```toml
    /// default_price = 10
    ///
    /// [[rules]]
    /// keyword = "1/4 cord"
    /// unit_price = 75
    /// ```
    ///
    /// Rules keep file order. Keywords are lowercased; empty keywords and
    /// negative prices are rejected.
    pub fn from_toml_str(source: &str) -> DispatchResult<Self> {
        let raw: PricingTable = toml::from_str(source)
            .map_err(|e| DispatchError::InvalidPricingTable(e.to_string()))?;
        let table = Self {
            rules: raw
                .rules
                .into_iter()
                .map(|r| PriceRule::new(r.keyword.trim(), r.unit_price))
                .collect(),
            default_price: raw.default_price,
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> DispatchResult<()> {
        if self.default_price.is_sign_negative() {
            return Err(DispatchError::InvalidPricingTable(
                "default_price must not be negative".to_string(),
            ));
        }
        for rule in &self.rules {
            if rule.keyword.is_empty() {
                return Err(DispatchError::InvalidPricingTable(
                    "rule keyword must not be empty".to_string(),
                ));
            }
            if rule.unit_price.is_sign_negative() {
                return Err(DispatchError::InvalidPricingTable(format!(
                    "unit_price for '{}' must not be negative",
                    rule.keyword
                )));
            }
        }
        Ok(())
    }

    /// First rule whose keyword occurs in the segment.
    pub fn classify(&self, segment: &str) -> Option<&PriceRule> {
        let lowered = segment.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }

    /// Unit price of a single segment.
    pub fn unit_price(&self, segment: &str) -> Decimal {
        self.classify(segment)
            .map(|rule| rule.unit_price)
            .unwrap_or(self.default_price)
    }

    /// Itemized breakdown of an item description.
    pub fn quote(&self, items: Option<&str>) -> PriceQuote {
        let segments: Vec<SegmentQuote> = split_segments(items)
            .map(|segment| {
                let rule = self.classify(segment);
                SegmentQuote {
                    segment: segment.to_string(),
                    matched: rule.map(|r| r.keyword.clone()),
                    unit_price: rule.map_or(self.default_price, |r| r.unit_price),
                }
            })
            .collect();
        let total: Decimal = segments.iter().map(|s| s.unit_price).sum();
        PriceQuote { segments, total }
    }

    /// Price of an item description. Absent or empty input costs nothing.
    pub fn price(&self, items: Option<&str>) -> Decimal {
        let total: Decimal = split_segments(items).map(|s| self.unit_price(s)).sum();
        debug!(items = items.unwrap_or(""), %total, "priced stop items");
        total
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn split_segments(items: Option<&str>) -> impl Iterator<Item = &str> {
    items
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Price an item description with the standard table.
pub fn calculate_price(items: Option<&str>) -> Decimal {
    PricingTable::standard().price(items)
}
