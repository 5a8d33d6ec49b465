use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{define_id_type, define_string_id};

define_id_type!(i64, CustomerId);
define_string_id!(StopId);

/// One delivery destination within a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStop {
    pub id: StopId,
    pub customer_id: CustomerId,
    /// `None` means unassigned.
    #[serde(default)]
    pub driver_id: Option<String>,
    /// Free-text item description, e.g. `1/4 cord, kindling`.
    #[serde(default)]
    pub items: Option<String>,
    /// 1-based position within the schedule.
    #[serde(default)]
    pub sequence_number: u32,
    /// Cached output of the pricing engine for `items`.
    #[serde(default)]
    pub price: Decimal,
}

impl DeliveryStop {
    /// A stop with no driver and no items. Sequence and price are filled in
    /// once the stop joins a schedule.
    pub fn new(id: impl Into<StopId>, customer_id: i64) -> Self {
        Self {
            id: id.into(),
            customer_id: CustomerId::new(customer_id),
            driver_id: None,
            items: None,
            sequence_number: 0,
            price: Decimal::ZERO,
        }
    }

    pub fn with_driver(mut self, driver_id: impl Into<String>) -> Self {
        self.driver_id = Some(driver_id.into());
        self
    }

    pub fn with_items(mut self, items: impl Into<String>) -> Self {
        self.items = Some(items.into());
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.driver_id.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}
