use std::collections::BTreeSet;

use cosmwasm_std::{Order, StdResult, Storage, Timestamp};
use cw_storage_plus::{Bound, Map};
use family_picker_common::month::MonthKey;
use family_picker_common::types::{normalize_name, DrawRecord};

use crate::error::ContractError;

/// Winners by calendar month. Keys are `(year, month)` so iteration is
/// chronological.
pub struct Ledger {
    records: Map<(i32, u32), DrawRecord>,
}

impl Ledger {
    pub const fn new(namespace: &'static str) -> Self {
        Ledger {
            records: Map::new(namespace),
        }
    }

    /// The month `now` falls in. Never stored.
    pub fn current_month_key(now: Timestamp, utc_offset_seconds: i32) -> StdResult<MonthKey> {
        MonthKey::from_timestamp(now, utc_offset_seconds)
    }

    pub fn record_for(&self, storage: &dyn Storage, month: MonthKey) -> StdResult<Option<DrawRecord>> {
        self.records.may_load(storage, month.storage_key())
    }

    /// Every record, oldest month first.
    pub fn all_records(&self, storage: &dyn Storage) -> StdResult<Vec<DrawRecord>> {
        self.records
            .range(storage, None, None, Order::Ascending)
            .map(|item| item.map(|(_, record)| record))
            .collect()
    }

    /// A page of records. `start_after` is exclusive in the direction of `order`.
    pub fn records(
        &self,
        storage: &dyn Storage,
        start_after: Option<MonthKey>,
        limit: usize,
        order: Order,
    ) -> StdResult<Vec<DrawRecord>> {
        let bound = start_after.map(|m| Bound::exclusive(m.storage_key()));
        let (min, max) = match order {
            Order::Ascending => (bound, None),
            Order::Descending => (None, bound),
        };

        self.records
            .range(storage, min, max, order)
            .take(limit)
            .map(|item| item.map(|(_, record)| record))
            .collect()
    }

    /// Normalised names of everyone with a record in the current cycle.
    pub fn picked_names(&self, storage: &dyn Storage) -> StdResult<BTreeSet<String>> {
        self.records
            .range(storage, None, None, Order::Ascending)
            .map(|item| item.map(|(_, record)| normalize_name(&record.participant_name)))
            .collect()
    }

    /// Record the winner for `month`.
    ///
    /// Check and write happen in one `Map::update`, so a month can only ever
    /// be committed once; later attempts get `AlreadyRecorded`.
    pub fn commit(
        &self,
        storage: &mut dyn Storage,
        month: MonthKey,
        participant_name: &str,
        picked_at: Timestamp,
    ) -> Result<DrawRecord, ContractError> {
        self.records
            .update(storage, month.storage_key(), |existing| match existing {
                Some(_) => Err(ContractError::AlreadyRecorded {
                    month: month.to_string(),
                }),
                None => Ok(DrawRecord {
                    month,
                    participant_name: participant_name.to_string(),
                    picked_at,
                }),
            })
    }

    pub fn len(&self, storage: &dyn Storage) -> u32 {
        self.records
            .keys_raw(storage, None, None, Order::Ascending)
            .count() as u32
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        self.records.is_empty(storage)
    }

    /// Clear every record and leave the roster alone. Returns how many were removed.
    pub fn reset_picks_only(&self, storage: &mut dyn Storage) -> u32 {
        let removed = self.len(storage);
        self.records.clear(storage);
        removed
    }

    /// Clear every record as part of a full reset alongside `Roster::reset_all`.
    pub fn reset_all(&self, storage: &mut dyn Storage) -> u32 {
        self.reset_picks_only(storage)
    }
}
