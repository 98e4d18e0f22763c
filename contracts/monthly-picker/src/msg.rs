use cosmwasm_schema::{cw_serde, QueryResponses};
use family_picker_common::month::MonthKey;
use family_picker_common::types::{DrawRecord, Participant};

use crate::state::{PickerConfig, PickerStats};

#[cw_serde]
pub struct NewParticipant {
    pub name: String,
    pub image: Option<String>,
}

#[cw_serde]
pub struct InstantiateMsg {
    /// Defaults to the instantiating address
    pub admin: Option<String>,
    /// Seconds east of UTC; decides where month boundaries fall
    pub utc_offset_seconds: i32,
    pub max_participants: u32,
    pub max_name_length: u32,
    /// Initial roster, validated like `AddParticipant`
    pub participants: Vec<NewParticipant>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Add a participant to the roster. Admin only.
    AddParticipant { name: String, image: Option<String> },
    /// Draw this month's winner. Admin only.
    Pick {},
    /// Clear the roster and every draw record. Admin only.
    ResetAll {},
    /// Clear the draw records, keep the roster. Admin only.
    ResetPicks {},
    /// Update configuration. Admin only.
    UpdateConfig {
        utc_offset_seconds: Option<i32>,
        max_participants: Option<u32>,
        max_name_length: Option<u32>,
    },
    /// Hand the admin role to another address. Admin only.
    TransferAdmin { new_admin: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PickerConfig)]
    Config {},
    #[returns(PickerStats)]
    Stats {},
    #[returns(ParticipantsResponse)]
    Participants {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Participant)]
    Participant { name: String },
    #[returns(MonthResponse)]
    CurrentMonth {},
    #[returns(CurrentWinnerResponse)]
    CurrentWinner {},
    #[returns(Option<DrawRecord>)]
    Draw { month: String },
    #[returns(HistoryResponse)]
    History {
        start_after: Option<String>,
        limit: Option<u32>,
        /// Defaults to true
        newest_first: Option<bool>,
    },
    #[returns(CycleStatusResponse)]
    CycleStatus {},
    #[returns(ShareTextResponse)]
    ShareText {},
}

#[cw_serde]
pub struct ParticipantEntry {
    /// Insertion sequence number, usable as `start_after`
    pub seq: u64,
    pub participant: Participant,
}

#[cw_serde]
pub struct ParticipantsResponse {
    pub participants: Vec<ParticipantEntry>,
    pub total: u32,
}

#[cw_serde]
pub struct MonthResponse {
    pub month: MonthKey,
    pub month_name: String,
}

#[cw_serde]
pub struct CurrentWinnerResponse {
    pub month: MonthKey,
    pub month_name: String,
    pub record: Option<DrawRecord>,
    /// `None` when nobody is picked yet or the winner left the roster
    pub participant: Option<Participant>,
}

#[cw_serde]
pub struct HistoryEntry {
    pub record: DrawRecord,
    pub month_name: String,
    pub participant: Option<Participant>,
}

#[cw_serde]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

#[cw_serde]
pub struct CycleStatusResponse {
    /// Roster names already picked in the current cycle, roster order
    pub picked: Vec<String>,
    /// Roster names still eligible, roster order
    pub remaining: Vec<String>,
    /// True when the next pick would clear the ledger instead of drawing
    pub exhausted: bool,
}

#[cw_serde]
pub struct ShareTextResponse {
    pub text: String,
    pub share_url: String,
}
