use cosmwasm_schema::cw_serde;
use cosmwasm_std::Timestamp;

use crate::month::MonthKey;

/// A roster member. Names are stored trimmed; uniqueness is on [`normalize_name`].
#[cw_serde]
pub struct Participant {
    pub name: String,
    /// Optional image URI or blob reference
    pub image: Option<String>,
}

impl Participant {
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }
}

/// The winner of one calendar month.
#[cw_serde]
pub struct DrawRecord {
    pub month: MonthKey,
    pub participant_name: String,
    pub picked_at: Timestamp,
}

/// Result of asking for this month's winner. None of these are errors.
#[cw_serde]
pub enum PickOutcome {
    /// A winner was already recorded for the month; nothing was written.
    AlreadyPicked {
        record: DrawRecord,
        /// `None` if the winner is no longer on the roster
        participant: Option<Participant>,
    },
    /// Everyone on the roster has been picked. The ledger was cleared and no
    /// winner was drawn; the next pick starts a fresh cycle.
    CycleExhausted { cleared: u32 },
    Winner {
        record: DrawRecord,
        participant: Participant,
    },
}

/// Comparison form of a participant name: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
