use cosmwasm_std::{Order, StdResult, Storage};
use cw_storage_plus::{Bound, Item, Map};
use family_picker_common::types::{normalize_name, Participant};

use crate::error::ContractError;

/// Bounds applied when adding a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterLimits {
    pub max_participants: u32,
    pub max_name_length: u32,
}

/// The set of eligible participants.
///
/// Participants are keyed by an insertion sequence number so listing keeps
/// insertion order. A second map from the normalised name to the sequence
/// number enforces name uniqueness. There is no single-participant removal;
/// [`Roster::reset_all`] is the only way out, and it must run in the same
/// transaction as `Ledger::reset_all`.
pub struct Roster {
    participants: Map<u64, Participant>,
    names: Map<String, u64>,
    next_seq: Item<u64>,
}

impl Roster {
    pub const fn new(
        participants_namespace: &'static str,
        names_namespace: &'static str,
        seq_namespace: &'static str,
    ) -> Self {
        Roster {
            participants: Map::new(participants_namespace),
            names: Map::new(names_namespace),
            next_seq: Item::new(seq_namespace),
        }
    }

    pub fn add_participant(
        &self,
        storage: &mut dyn Storage,
        name: &str,
        image: Option<String>,
        limits: RosterLimits,
    ) -> Result<Participant, ContractError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContractError::InvalidName {
                reason: "name must not be empty".to_string(),
            });
        }
        let len = name.chars().count();
        if len > limits.max_name_length as usize {
            return Err(ContractError::InvalidName {
                reason: format!(
                    "name is {len} characters, limit is {}",
                    limits.max_name_length
                ),
            });
        }

        let key = normalize_name(name);
        if self.names.has(storage, key.clone()) {
            return Err(ContractError::DuplicateName {
                name: name.to_string(),
            });
        }
        if self.len(storage)? >= limits.max_participants {
            return Err(ContractError::RosterFull {
                max: limits.max_participants,
            });
        }

        let participant = Participant {
            name: name.to_string(),
            image: image
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty()),
        };

        let seq = self.next_seq.may_load(storage)?.unwrap_or(0);
        self.participants.save(storage, seq, &participant)?;
        self.names.save(storage, key, &seq)?;
        self.next_seq.save(storage, &(seq + 1))?;

        Ok(participant)
    }

    /// All participants in insertion order.
    pub fn list_participants(&self, storage: &dyn Storage) -> StdResult<Vec<Participant>> {
        self.participants
            .range(storage, None, None, Order::Ascending)
            .map(|item| item.map(|(_, participant)| participant))
            .collect()
    }

    /// A page of `(sequence, participant)` pairs in insertion order.
    pub fn page(
        &self,
        storage: &dyn Storage,
        start_after: Option<u64>,
        limit: usize,
    ) -> StdResult<Vec<(u64, Participant)>> {
        let start = start_after.map(Bound::exclusive);
        self.participants
            .range(storage, start, None, Order::Ascending)
            .take(limit)
            .collect()
    }

    /// Lookup by name, trimmed and case-insensitive.
    pub fn participant(&self, storage: &dyn Storage, name: &str) -> StdResult<Option<Participant>> {
        match self.names.may_load(storage, normalize_name(name))? {
            Some(seq) => self.participants.may_load(storage, seq),
            None => Ok(None),
        }
    }

    pub fn len(&self, storage: &dyn Storage) -> StdResult<u32> {
        Ok(self
            .names
            .keys_raw(storage, None, None, Order::Ascending)
            .count() as u32)
    }

    pub fn is_empty(&self, storage: &dyn Storage) -> bool {
        self.names.is_empty(storage)
    }

    /// Remove every participant. Callers must clear the ledger in the same
    /// transaction.
    pub fn reset_all(&self, storage: &mut dyn Storage) {
        self.participants.clear(storage);
        self.names.clear(storage);
        self.next_seq.remove(storage);
    }
}
