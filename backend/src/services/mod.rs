//! Service layer for dispatch business logic.
//!
//! Everything here is synchronous and free of I/O. The HTTP layer and any
//! other caller share these services through immutable references.

pub mod dispatch;
pub mod dispatch_sheet;
pub mod order_items;
pub mod pricing;
pub mod schedule_number;

pub use dispatch::{DispatchEngine, EditOutcome, ScheduleEdit};
pub use dispatch_sheet::{DispatchSheet, DriverSummary, SheetRow};
pub use order_items::{format_order_lines, order_total, parse_order_lines, OrderLine};
pub use pricing::{calculate_price, PriceQuote, PriceRule, PricingTable, SegmentQuote};
pub use schedule_number::{generate_schedule_number, ScheduleNumberer};
