//! Schedule editing.
//!
//! [`DispatchEngine`] applies [`ScheduleEdit`]s to a [`Schedule`], then
//! refreshes the derived values: prices of stops whose items changed and the
//! schedule number. Failed edits leave the schedule untouched.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pricing::PricingTable;
use super::schedule_number::ScheduleNumberer;
use crate::error::DispatchResult;
use crate::models::{Clock, DeliveryStop, Schedule, StopId};

/// A single mutation requested by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScheduleEdit {
    /// Insert a stop at a 0-based position, or append.
    AddStop {
        stop: DeliveryStop,
        #[serde(default)]
        position: Option<usize>,
    },
    RemoveStop {
        id: StopId,
    },
    /// Move a stop to a 0-based position.
    MoveStop {
        id: StopId,
        to: usize,
    },
    SetItems {
        id: StopId,
        items: Option<String>,
    },
    SetDriver {
        id: StopId,
        driver_id: Option<String>,
    },
    SetDate {
        date: NaiveDate,
    },
}

/// What an applied edit changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutcome {
    pub schedule_number: String,
    /// False when the regenerated number equals the previous one, so the
    /// caller can skip a redundant update.
    pub number_changed: bool,
}

/// Applies edits and keeps derived schedule fields fresh.
#[derive(Clone)]
pub struct DispatchEngine {
    pricing: Arc<PricingTable>,
    numberer: ScheduleNumberer,
    clock: Arc<dyn Clock>,
}

impl DispatchEngine {
    pub fn new(pricing: Arc<PricingTable>, numberer: ScheduleNumberer, clock: Arc<dyn Clock>) -> Self {
        Self {
            pricing,
            numberer,
            clock,
        }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    pub fn numberer(&self) -> &ScheduleNumberer {
        &self.numberer
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Empty schedule dated today, with its number already generated.
    pub fn new_schedule(&self) -> Schedule {
        let mut schedule = Schedule::new(self.clock.today());
        self.refresh_number(&mut schedule);
        schedule
    }

    /// Recompute every derived field of a schedule built elsewhere.
    ///
    /// Renumbers stops, reprices all of them, and regenerates the schedule
    /// number.
    pub fn refresh(&self, schedule: &mut Schedule) -> EditOutcome {
        schedule.renumber();
        for stop in &mut schedule.stops {
            stop.price = self.pricing.price(stop.items.as_deref());
        }
        self.refresh_number(schedule)
    }

    /// Apply a single edit.
    pub fn apply(&self, schedule: &mut Schedule, edit: ScheduleEdit) -> DispatchResult<EditOutcome> {
        debug!(?edit, schedule = %schedule.schedule_number, "applying schedule edit");
        match edit {
            ScheduleEdit::AddStop { mut stop, position } => {
                stop.price = self.pricing.price(stop.items.as_deref());
                schedule.insert_stop(stop, position)?;
            }
            ScheduleEdit::RemoveStop { id } => {
                schedule.remove_stop(&id)?;
            }
            ScheduleEdit::MoveStop { id, to } => {
                schedule.move_stop(&id, to)?;
            }
            ScheduleEdit::SetItems { id, items } => {
                let price = self.pricing.price(items.as_deref());
                let stop = schedule.stop_mut(&id)?;
                stop.items = items;
                stop.price = price;
            }
            ScheduleEdit::SetDriver { id, driver_id } => {
                schedule.stop_mut(&id)?.driver_id = driver_id;
            }
            ScheduleEdit::SetDate { date } => {
                schedule.schedule_date = date;
            }
        }
        Ok(self.refresh_number(schedule))
    }

    /// Apply edits in order, stopping at the first failure.
    ///
    /// Edits before the failing one stay applied.
    pub fn apply_all(
        &self,
        schedule: &mut Schedule,
        edits: impl IntoIterator<Item = ScheduleEdit>,
    ) -> DispatchResult<EditOutcome> {
        let before = schedule.schedule_number.clone();
        let mut outcome = self.refresh_number(schedule);
        for edit in edits {
            outcome = self.apply(schedule, edit)?;
        }
        outcome.number_changed = outcome.schedule_number != before;
        Ok(outcome)
    }

    fn refresh_number(&self, schedule: &mut Schedule) -> EditOutcome {
        let number = self.numberer.for_date(
            self.clock.now(),
            schedule.schedule_date,
            &schedule.driver_ids(),
        );
        let number_changed = number != schedule.schedule_number;
        if number_changed {
            debug!(old = %schedule.schedule_number, new = %number, "schedule number changed");
            schedule.schedule_number = number.clone();
        }
        EditOutcome {
            schedule_number: number,
            number_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixedClock;
    use rust_decimal_macros::dec;

    fn engine() -> DispatchEngine {
        DispatchEngine::new(
            Arc::new(PricingTable::standard()),
            ScheduleNumberer::default(),
            Arc::new(FixedClock::at_date(2024, 6, 10).unwrap()),
        )
    }

    fn add(stop: DeliveryStop) -> ScheduleEdit {
        ScheduleEdit::AddStop {
            stop,
            position: None,
        }
    }

    #[test]
    fn test_new_schedule_is_dated_today() {
        let schedule = engine().new_schedule();
        // 2024-06-10 was a Monday
        assert_eq!(schedule.schedule_date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(schedule.schedule_number, "DS-240610-MON-D00");
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_add_stop_prices_and_numbers() {
        let engine = engine();
        let mut schedule = engine.new_schedule();
        let outcome = engine
            .apply(
                &mut schedule,
                add(DeliveryStop::new("a", 1).with_driver("driver-4").with_items("1/4 cord, kindling")),
            )
            .unwrap();
        assert!(outcome.number_changed);
        assert_eq!(outcome.schedule_number, "DS-240610-MON-D4");
        assert_eq!(schedule.stops[0].price, dec!(90));
        assert_eq!(schedule.stops[0].sequence_number, 1);
    }

    #[test]
    fn test_set_items_reprices_only_that_stop() {
        let engine = engine();
        let mut schedule = engine.new_schedule();
        engine.apply(&mut schedule, add(DeliveryStop::new("a", 1).with_items("cord"))).unwrap();
        engine.apply(&mut schedule, add(DeliveryStop::new("b", 2).with_items("cedar"))).unwrap();

        let outcome = engine
            .apply(
                &mut schedule,
                ScheduleEdit::SetItems {
                    id: StopId::new("b"),
                    items: Some("firestarter, firestarter".into()),
                },
            )
            .unwrap();
        assert!(!outcome.number_changed);
        assert_eq!(schedule.stops[0].price, dec!(200));
        assert_eq!(schedule.stops[1].price, dec!(16));
        assert_eq!(schedule.total(), dec!(216));
    }

    #[test]
    fn test_driver_change_updates_number() {
        let engine = engine();
        let mut schedule = engine.new_schedule();
        engine.apply(&mut schedule, add(DeliveryStop::new("a", 1))).unwrap();
        let outcome = engine
            .apply(
                &mut schedule,
                ScheduleEdit::SetDriver {
                    id: StopId::new("a"),
                    driver_id: Some("driver-5".into()),
                },
            )
            .unwrap();
        assert!(outcome.number_changed);
        assert!(schedule.schedule_number.ends_with("-D5"));
    }

    #[test]
    fn test_date_change_updates_weekday_only() {
        let engine = engine();
        let mut schedule = engine.new_schedule();
        let outcome = engine
            .apply(
                &mut schedule,
                ScheduleEdit::SetDate {
                    date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
                },
            )
            .unwrap();
        assert_eq!(outcome.schedule_number, "DS-240610-SAT-D00");
    }

    #[test]
    fn test_failed_edit_leaves_schedule_untouched() {
        let engine = engine();
        let mut schedule = engine.new_schedule();
        engine.apply(&mut schedule, add(DeliveryStop::new("a", 1))).unwrap();
        let before = schedule.clone();

        let err = engine
            .apply(
                &mut schedule,
                ScheduleEdit::SetItems {
                    id: StopId::new("missing"),
                    items: Some("cord".into()),
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(schedule, before);
    }

    #[test]
    fn test_refresh_repairs_stale_fields() {
        let engine = engine();
        let mut schedule = Schedule::new(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        let mut stop = DeliveryStop::new("a", 1).with_items("1/2 cord");
        stop.sequence_number = 9;
        stop.price = dec!(1);
        schedule.stops.push(stop);

        let outcome = engine.refresh(&mut schedule);
        assert!(outcome.number_changed);
        assert_eq!(schedule.stops[0].sequence_number, 1);
        assert_eq!(schedule.stops[0].price, dec!(125));
    }

    #[test]
    fn test_apply_all_reports_net_change() {
        let engine = engine();
        let mut schedule = engine.new_schedule();
        let original = schedule.schedule_number.clone();
        let outcome = engine
            .apply_all(
                &mut schedule,
                vec![
                    add(DeliveryStop::new("a", 1).with_driver("driver-1")),
                    ScheduleEdit::RemoveStop { id: StopId::new("a") },
                ],
            )
            .unwrap();
        assert_eq!(outcome.schedule_number, original);
        assert!(!outcome.number_changed);
    }

    #[test]
    fn test_edit_serde_shape() {
        let edit: ScheduleEdit =
            serde_json::from_str(r#"{"op": "move_stop", "id": "a", "to": 2}"#).unwrap();
        assert_eq!(
            edit,
            ScheduleEdit::MoveStop {
                id: StopId::new("a"),
                to: 2
            }
        );
    }
}
