use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order};
use family_picker_common::month::MonthKey;
use family_picker_common::types::DrawRecord;

use crate::error::ContractError;
use crate::ledger::Ledger;
use crate::msg::{
    CurrentWinnerResponse, CycleStatusResponse, HistoryEntry, HistoryResponse, MonthResponse,
    ParticipantEntry, ParticipantsResponse, ShareTextResponse,
};
use crate::state::{CONFIG, LEDGER, PICKER_STATS, ROSTER};

const DEFAULT_PARTICIPANTS_LIMIT: u32 = 50;
const MAX_PARTICIPANTS_LIMIT: u32 = 500;
const DEFAULT_HISTORY_LIMIT: u32 = 24;
const MAX_HISTORY_LIMIT: u32 = 120;

const SHARE_BASE_URL: &str = "https://wa.me/?text=";

fn parse_month(value: &str) -> Result<MonthKey, ContractError> {
    value.parse().map_err(|_| ContractError::InvalidMonthKey {
        value: value.to_string(),
    })
}

fn current_month(deps: Deps, env: &Env) -> Result<MonthKey, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(Ledger::current_month_key(
        env.block.time,
        config.utc_offset_seconds,
    )?)
}

pub fn query_config(deps: Deps) -> Result<Binary, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    Ok(to_json_binary(&config)?)
}

pub fn query_stats(deps: Deps) -> Result<Binary, ContractError> {
    let stats = PICKER_STATS.load(deps.storage)?;
    Ok(to_json_binary(&stats)?)
}

pub fn query_participants(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> Result<Binary, ContractError> {
    let limit = limit
        .unwrap_or(DEFAULT_PARTICIPANTS_LIMIT)
        .min(MAX_PARTICIPANTS_LIMIT) as usize;

    let participants = ROSTER
        .page(deps.storage, start_after, limit)?
        .into_iter()
        .map(|(seq, participant)| ParticipantEntry { seq, participant })
        .collect();
    let total = ROSTER.len(deps.storage)?;

    Ok(to_json_binary(&ParticipantsResponse {
        participants,
        total,
    })?)
}

pub fn query_participant(deps: Deps, name: String) -> Result<Binary, ContractError> {
    let participant = ROSTER
        .participant(deps.storage, &name)?
        .ok_or_else(|| ContractError::NotFound {
            what: format!("participant {}", name.trim()),
        })?;
    Ok(to_json_binary(&participant)?)
}

pub fn query_current_month(deps: Deps, env: Env) -> Result<Binary, ContractError> {
    let month = current_month(deps, &env)?;
    Ok(to_json_binary(&MonthResponse {
        month,
        month_name: month.display_name(),
    })?)
}

pub fn query_current_winner(deps: Deps, env: Env) -> Result<Binary, ContractError> {
    let month = current_month(deps, &env)?;
    let record = LEDGER.record_for(deps.storage, month)?;
    let participant = match &record {
        Some(record) => ROSTER.participant(deps.storage, &record.participant_name)?,
        None => None,
    };

    Ok(to_json_binary(&CurrentWinnerResponse {
        month,
        month_name: month.display_name(),
        record,
        participant,
    })?)
}

pub fn query_draw(deps: Deps, month: String) -> Result<Binary, ContractError> {
    let month = parse_month(&month)?;
    let record = LEDGER.record_for(deps.storage, month)?;
    Ok(to_json_binary(&record)?)
}

pub fn query_history(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
    newest_first: Option<bool>,
) -> Result<Binary, ContractError> {
    let start_after = start_after.as_deref().map(parse_month).transpose()?;
    let limit = limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT) as usize;
    let order = if newest_first.unwrap_or(true) {
        Order::Descending
    } else {
        Order::Ascending
    };

    let entries = LEDGER
        .records(deps.storage, start_after, limit, order)?
        .into_iter()
        .map(|record: DrawRecord| -> Result<HistoryEntry, ContractError> {
            let participant = ROSTER.participant(deps.storage, &record.participant_name)?;
            Ok(HistoryEntry {
                month_name: record.month.display_name(),
                record,
                participant,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(to_json_binary(&HistoryResponse { entries })?)
}

pub fn query_cycle_status(deps: Deps) -> Result<Binary, ContractError> {
    let participants = ROSTER.list_participants(deps.storage)?;
    let picked_names = LEDGER.picked_names(deps.storage)?;

    let (picked, remaining): (Vec<_>, Vec<_>) = participants
        .into_iter()
        .partition(|p| picked_names.contains(&p.key()));
    let exhausted = !picked.is_empty() && remaining.is_empty();

    Ok(to_json_binary(&CycleStatusResponse {
        picked: picked.into_iter().map(|p| p.name).collect(),
        remaining: remaining.into_iter().map(|p| p.name).collect(),
        exhausted,
    })?)
}

pub fn query_share_text(deps: Deps, env: Env) -> Result<Binary, ContractError> {
    let month = current_month(deps, &env)?;
    let record = LEDGER
        .record_for(deps.storage, month)?
        .ok_or_else(|| ContractError::NotFound {
            what: format!("pick for {month}"),
        })?;

    let text = format!("This month's participant: {}", record.participant_name);
    let share_url = format!("{SHARE_BASE_URL}{}", encode_uri_component(&text));

    Ok(to_json_binary(&ShareTextResponse { text, share_url })?)
}

/// Percent-encode everything except the URI component unreserved set.
fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push_str(&hex::encode_upper([byte]));
            }
        }
    }
    out
}
