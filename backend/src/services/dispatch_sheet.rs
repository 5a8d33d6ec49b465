//! Printable dispatch sheet.
//!
//! Flattens a schedule into the rows and totals the PDF renderer lays out.
//! Rendering itself happens outside this crate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{display_date, Schedule};

pub const UNASSIGNED_LABEL: &str = "Unassigned";
const EMPTY_ITEMS_LABEL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub sequence_number: u32,
    pub customer_id: i64,
    pub driver: String,
    pub items: String,
    pub price: Decimal,
}

/// Stop count and subtotal for one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSummary {
    pub driver: String,
    pub stops: usize,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSheet {
    pub title: String,
    pub schedule_number: String,
    pub delivery_date: String,
    pub rows: Vec<SheetRow>,
    pub drivers: Vec<DriverSummary>,
    pub total: Decimal,
}

impl DispatchSheet {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let rows: Vec<SheetRow> = schedule
            .stops
            .iter()
            .map(|stop| SheetRow {
                sequence_number: stop.sequence_number,
                customer_id: stop.customer_id.value(),
                driver: if stop.is_assigned() {
                    stop.driver_id.clone().unwrap_or_default()
                } else {
                    UNASSIGNED_LABEL.to_string()
                },
                items: stop
                    .items
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(EMPTY_ITEMS_LABEL)
                    .to_string(),
                price: stop.price,
            })
            .collect();

        let mut by_driver: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
        for row in &rows {
            let entry = by_driver.entry(row.driver.as_str()).or_default();
            entry.0 += 1;
            entry.1 += row.price;
        }
        let drivers = by_driver
            .into_iter()
            .map(|(driver, (stops, subtotal))| DriverSummary {
                driver: driver.to_string(),
                stops,
                subtotal,
            })
            .collect();

        Self {
            title: format!("Dispatch Schedule {}", schedule.schedule_number),
            schedule_number: schedule.schedule_number.clone(),
            delivery_date: display_date(schedule.schedule_date),
            total: schedule.total(),
            rows,
            drivers,
        }
    }

    /// Split rows into pages of at most `rows_per_page` (minimum 1).
    ///
    /// An empty sheet still has one empty page so the header prints.
    pub fn pages(&self, rows_per_page: usize) -> Vec<&[SheetRow]> {
        if self.rows.is_empty() {
            return vec![self.rows.as_slice()];
        }
        self.rows.chunks(rows_per_page.max(1)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeliveryStop;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn schedule() -> Schedule {
        let mut schedule = Schedule::new(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        schedule.schedule_number = "DS-240610-WED-D27".to_string();
        let stops = [
            DeliveryStop::new("a", 10).with_driver("driver-7").with_items("kindling"),
            DeliveryStop::new("b", 11).with_driver("driver-2").with_items("1/2 cord"),
            DeliveryStop::new("c", 12),
            DeliveryStop::new("d", 13).with_driver("driver-7").with_items("cedar"),
        ];
        let prices = [dec!(15), dec!(125), dec!(0), dec!(12)];
        for (mut stop, price) in stops.into_iter().zip(prices) {
            stop.price = price;
            schedule.insert_stop(stop, None).unwrap();
        }
        schedule
    }

    #[test]
    fn test_rows_and_total() {
        let sheet = DispatchSheet::from_schedule(&schedule());
        assert_eq!(sheet.title, "Dispatch Schedule DS-240610-WED-D27");
        assert_eq!(sheet.delivery_date, "Wednesday, June 12, 2024");
        assert_eq!(sheet.rows.len(), 4);
        assert_eq!(sheet.rows[2].driver, UNASSIGNED_LABEL);
        assert_eq!(sheet.rows[2].items, "-");
        assert_eq!(sheet.rows[3].sequence_number, 4);
        assert_eq!(sheet.total, dec!(152));
    }

    #[test]
    fn test_driver_summaries_sorted() {
        let sheet = DispatchSheet::from_schedule(&schedule());
        let summary: Vec<(&str, usize, Decimal)> = sheet
            .drivers
            .iter()
            .map(|d| (d.driver.as_str(), d.stops, d.subtotal))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Unassigned", 1, dec!(0)),
                ("driver-2", 1, dec!(125)),
                ("driver-7", 2, dec!(27)),
            ]
        );
    }

    #[test]
    fn test_pagination() {
        let sheet = DispatchSheet::from_schedule(&schedule());
        let pages = sheet.pages(3);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(sheet.pages(0).len(), 4);
    }

    #[test]
    fn test_empty_sheet_has_one_page() {
        let empty = Schedule::new(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        let sheet = DispatchSheet::from_schedule(&empty);
        assert_eq!(sheet.pages(20).len(), 1);
        assert!(sheet.drivers.is_empty());
        assert_eq!(sheet.total, Decimal::ZERO);
    }
}
