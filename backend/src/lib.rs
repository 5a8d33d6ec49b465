//! # Firewood Dispatch Core
//!
//! Pricing and schedule numbering for a firewood wholesaler's delivery
//! dispatch.
//!
//! The UI keeps a schedule (a delivery date plus an ordered list of stops) and
//! calls into this crate after every edit to refresh stop prices, sequence
//! numbers and the schedule number. Persistence belongs to the external data
//! store; nothing here performs I/O apart from the optional HTTP server.
//!
//! ## Architecture
//!
//! - [`models`]: stops, schedules, clock and calendar helpers
//! - [`services`]: pricing engine, schedule numbering, schedule editing,
//!   order-line format and the printable dispatch sheet
//! - [`config`]: environment-driven configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use firewood_dispatch::services::{calculate_price, generate_schedule_number};
//! use chrono::{TimeZone, Utc};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(calculate_price(Some("1/4 cord, kindling, cedar")), dec!(102));
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
//! let number = generate_schedule_number(now, "2024-06-15", &["driver-2", "driver-1"]);
//! assert_eq!(number, "DS-240615-SAT-D12");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{DispatchError, DispatchResult};

#[doc(hidden)]
pub use uuid;
