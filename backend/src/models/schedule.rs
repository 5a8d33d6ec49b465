//! Schedule model and stop sequencing.
//!
//! Sequence numbers are owned by the schedule: every structural mutation
//! (insert, remove, reorder) renumbers the whole list so positions stay
//! contiguous `1..=N`. Prices and the schedule number are derived values and
//! are refreshed by [`crate::services::dispatch::DispatchEngine`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::stop::{DeliveryStop, StopId};
use crate::error::{DispatchError, DispatchResult};

/// A batch of stops sharing a delivery date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub schedule_number: String,
    pub schedule_date: NaiveDate,
    #[serde(default)]
    pub stops: Vec<DeliveryStop>,
}

impl Schedule {
    /// Empty schedule for the given delivery date.
    pub fn new(schedule_date: NaiveDate) -> Self {
        Self {
            schedule_number: String::new(),
            schedule_date,
            stops: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn position_of(&self, id: &StopId) -> Option<usize> {
        self.stops.iter().position(|s| &s.id == id)
    }

    pub fn stop(&self, id: &StopId) -> Option<&DeliveryStop> {
        self.stops.iter().find(|s| &s.id == id)
    }

    pub fn stop_mut(&mut self, id: &StopId) -> DispatchResult<&mut DeliveryStop> {
        self.stops
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| DispatchError::StopNotFound(id.to_string()))
    }

    /// Insert a stop at `position` (appends when `None`).
    pub fn insert_stop(
        &mut self,
        stop: DeliveryStop,
        position: Option<usize>,
    ) -> DispatchResult<()> {
        if self.position_of(&stop.id).is_some() {
            return Err(DispatchError::DuplicateStop(stop.id.to_string()));
        }
        let len = self.stops.len();
        let index = position.unwrap_or(len);
        if index > len {
            return Err(DispatchError::InvalidPosition {
                position: index,
                len,
            });
        }
        self.stops.insert(index, stop);
        self.renumber();
        Ok(())
    }

    /// Remove a stop and close the gap it leaves.
    pub fn remove_stop(&mut self, id: &StopId) -> DispatchResult<DeliveryStop> {
        let index = self
            .position_of(id)
            .ok_or_else(|| DispatchError::StopNotFound(id.to_string()))?;
        let removed = self.stops.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Move a stop to a new 0-based index.
    pub fn move_stop(&mut self, id: &StopId, to: usize) -> DispatchResult<()> {
        let from = self
            .position_of(id)
            .ok_or_else(|| DispatchError::StopNotFound(id.to_string()))?;
        let len = self.stops.len();
        if to >= len {
            return Err(DispatchError::InvalidPosition { position: to, len });
        }
        let stop = self.stops.remove(from);
        self.stops.insert(to, stop);
        self.renumber();
        Ok(())
    }

    /// Reassign sequence numbers `1..=N` in list order.
    pub fn renumber(&mut self) {
        for (index, stop) in self.stops.iter_mut().enumerate() {
            stop.sequence_number = index as u32 + 1;
        }
    }

    /// Whether sequence numbers are exactly `1..=N` in list order.
    pub fn is_sequence_contiguous(&self) -> bool {
        self.stops
            .iter()
            .enumerate()
            .all(|(index, stop)| stop.sequence_number as usize == index + 1)
    }

    /// Driver ids assigned across all stops, in stop order, duplicates kept.
    pub fn driver_ids(&self) -> Vec<&str> {
        self.stops
            .iter()
            .filter(|s| s.is_assigned())
            .filter_map(|s| s.driver_id.as_deref())
            .collect()
    }

    /// Sum of cached stop prices.
    pub fn total(&self) -> Decimal {
        self.stops.iter().map(|s| s.price).sum()
    }
}
