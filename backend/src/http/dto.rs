//! Data Transfer Objects for the HTTP API.
//!
//! Engine types that already derive Serialize/Deserialize (`Schedule`,
//! `ScheduleEdit`, `PriceQuote`, `DispatchSheet`, `OrderLine`) are reused
//! directly; the types here only wrap them for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use crate::models::Schedule;
pub use crate::services::{DispatchSheet, OrderLine, PriceQuote, ScheduleEdit, SheetRow};

use crate::models::{DeliveryStop, StopId};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Prefix stripped from driver ids when building schedule numbers
    pub driver_prefix: String,
    /// Whether a pricing table file replaced the built-in prices
    pub custom_pricing: bool,
}

/// Request body for pricing a stop's items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub items: Option<String>,
}

/// Request body for generating a schedule number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleNumberRequest {
    /// ISO delivery date, e.g. `2024-06-15`
    pub delivery_date: String,
    #[serde(default)]
    pub driver_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleNumberResponse {
    pub schedule_number: String,
}

/// A stop as sent by the UI. Sequence number and price are derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopInput {
    /// Assigned when omitted
    #[serde(default)]
    pub id: Option<String>,
    pub customer_id: i64,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub items: Option<String>,
}

impl From<StopInput> for DeliveryStop {
    fn from(input: StopInput) -> Self {
        let id = input.id.map(StopId::new).unwrap_or_else(StopId::generate);
        let mut stop = DeliveryStop::new(id, input.customer_id);
        stop.driver_id = input.driver_id;
        stop.items = input.items;
        stop
    }
}

/// Request body for schedule previews and dispatch sheets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePreviewRequest {
    /// Delivery date; today when omitted
    #[serde(default)]
    pub schedule_date: Option<String>,
    /// Number the UI currently displays, used to report `number_changed`
    #[serde(default)]
    pub schedule_number: Option<String>,
    #[serde(default)]
    pub stops: Vec<StopInput>,
    /// Edits applied in order after the stops are loaded
    #[serde(default)]
    pub edits: Vec<ScheduleEdit>,
}

/// Derived schedule returned to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePreviewResponse {
    pub schedule: Schedule,
    pub total: Decimal,
    pub number_changed: bool,
}

/// Query parameters for the dispatch sheet endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SheetQuery {
    /// Rows per printed page (default: 25)
    #[serde(default)]
    pub rows_per_page: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetResponse {
    pub sheet: DispatchSheet,
    pub pages: Vec<Vec<SheetRow>>,
}

/// Request body for parsing picker-format order lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLinesRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLinesResponse {
    pub lines: Vec<OrderLine>,
    /// Lines re-serialized in canonical form
    pub normalized: String,
    pub total: Decimal,
}
