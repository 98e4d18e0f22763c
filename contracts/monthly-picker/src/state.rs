use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::Item;

use crate::ledger::Ledger;
use crate::roster::{Roster, RosterLimits};

pub const CONFIG: Item<PickerConfig> = Item::new("config");
pub const PICKER_STATS: Item<PickerStats> = Item::new("picker_stats");

/// Participants in insertion order plus a normalised-name index.
pub const ROSTER: Roster = Roster::new("participants", "participant_names", "participant_seq");
/// One draw record per calendar month.
pub const LEDGER: Ledger = Ledger::new("draws");

#[cw_serde]
pub struct PickerConfig {
    pub admin: Addr,
    /// Offset east of UTC used to decide which month "now" falls in
    pub utc_offset_seconds: i32,
    pub max_participants: u32,
    /// Maximum trimmed name length, in characters
    pub max_name_length: u32,
}

impl PickerConfig {
    pub fn roster_limits(&self) -> RosterLimits {
        RosterLimits {
            max_participants: self.max_participants,
            max_name_length: self.max_name_length,
        }
    }
}

#[cw_serde]
#[derive(Default)]
pub struct PickerStats {
    /// Winners drawn since instantiation; resets do not rewind it
    pub total_picks: u64,
    /// Number of times the pick cycle ran out and the ledger was cleared
    pub cycles_completed: u64,
    pub last_pick_at: Option<Timestamp>,
}
