use cosmwasm_std::{to_json_binary, DepsMut, Env, Event, MessageInfo, Response};
use family_picker_common::month::{MonthKey, MAX_UTC_OFFSET_SECONDS};
use family_picker_common::selection::derive_seed;
use family_picker_common::types::{Participant, PickOutcome};

use crate::engine::DrawEngine;
use crate::error::ContractError;
use crate::ledger::Ledger;
use crate::state::{PickerConfig, CONFIG, LEDGER, PICKER_STATS, ROSTER};

/// Upper bound accepted for `max_participants`.
pub const MAX_PARTICIPANTS_LIMIT: u32 = 500;
/// Upper bound accepted for `max_name_length`.
pub const MAX_NAME_LENGTH_LIMIT: u32 = 128;

const PICK_SEED_DOMAIN: &str = "family-picker/pick";

pub fn validate_utc_offset(utc_offset_seconds: i32) -> Result<(), ContractError> {
    if utc_offset_seconds.unsigned_abs() > MAX_UTC_OFFSET_SECONDS.unsigned_abs() {
        return Err(ContractError::InvalidConfig {
            field: "utc_offset_seconds".to_string(),
            reason: format!(
                "must be within ±{MAX_UTC_OFFSET_SECONDS}, got {utc_offset_seconds}"
            ),
        });
    }
    Ok(())
}

pub fn validate_max_participants(max_participants: u32) -> Result<(), ContractError> {
    if max_participants == 0 || max_participants > MAX_PARTICIPANTS_LIMIT {
        return Err(ContractError::InvalidConfig {
            field: "max_participants".to_string(),
            reason: format!("must be in 1..={MAX_PARTICIPANTS_LIMIT}, got {max_participants}"),
        });
    }
    Ok(())
}

pub fn validate_max_name_length(max_name_length: u32) -> Result<(), ContractError> {
    if max_name_length == 0 || max_name_length > MAX_NAME_LENGTH_LIMIT {
        return Err(ContractError::InvalidConfig {
            field: "max_name_length".to_string(),
            reason: format!("must be in 1..={MAX_NAME_LENGTH_LIMIT}, got {max_name_length}"),
        });
    }
    Ok(())
}

fn ensure_admin(
    config: &PickerConfig,
    info: &MessageInfo,
    reason: &str,
) -> Result<(), ContractError> {
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: reason.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn participant_added_event(participant: &Participant, env: &Env) -> Event {
    Event::new("picker_participant_added")
        .add_attribute("participant", participant.name.clone())
        .add_attribute("has_image", participant.image.is_some().to_string())
        .add_attribute("timestamp", env.block.time.seconds().to_string())
}

/// Add a participant to the roster. Admin only.
pub fn add_participant(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    image: Option<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "only admin can add participants")?;

    let participant =
        ROSTER.add_participant(deps.storage, &name, image, config.roster_limits())?;
    let total = ROSTER.len(deps.storage)?;

    Ok(Response::new()
        .add_attribute("action", "add_participant")
        .add_attribute("participant", participant.name.clone())
        .add_attribute("total_participants", total.to_string())
        .add_event(participant_added_event(&participant, &env)))
}

/// Entropy for a pick. Block data, the month and the running pick count keep
/// two picks from ever sharing a seed.
fn pick_seed(env: &Env, info: &MessageInfo, month: MonthKey, total_picks: u64) -> [u8; 32] {
    let tx_index = env
        .transaction
        .as_ref()
        .map(|tx| tx.index)
        .unwrap_or_default();
    let month = month.to_string();

    derive_seed(
        PICK_SEED_DOMAIN,
        &[
            env.contract.address.as_bytes(),
            &env.block.height.to_be_bytes(),
            &env.block.time.nanos().to_be_bytes(),
            &tx_index.to_be_bytes(),
            month.as_bytes(),
            info.sender.as_bytes(),
            &total_picks.to_be_bytes(),
        ],
    )
}

/// Draw this month's winner. Admin only.
///
/// The outcome is returned JSON-encoded in the response data. Repeating the
/// call within a month, or exhausting the cycle, is not an error.
pub fn pick(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "only admin can pick")?;

    let month = Ledger::current_month_key(env.block.time, config.utc_offset_seconds)?;
    let mut stats = PICKER_STATS.load(deps.storage)?;
    let seed = pick_seed(&env, &info, month, stats.total_picks);

    let outcome =
        DrawEngine::new(&ROSTER, &LEDGER).pick(deps.storage, month, env.block.time, &seed)?;

    let response = Response::new()
        .add_attribute("action", "pick")
        .add_attribute("month", month.to_string())
        .set_data(to_json_binary(&outcome)?);

    let response = match &outcome {
        PickOutcome::Winner { record, .. } => {
            stats.total_picks += 1;
            stats.last_pick_at = Some(env.block.time);
            PICKER_STATS.save(deps.storage, &stats)?;

            response
                .add_attribute("result", "winner")
                .add_attribute("winner", record.participant_name.clone())
                .add_event(
                    Event::new("picker_winner_picked")
                        .add_attribute("month", month.to_string())
                        .add_attribute("participant", record.participant_name.clone())
                        .add_attribute("seed", hex::encode(seed))
                        .add_attribute("timestamp", env.block.time.seconds().to_string()),
                )
        }
        PickOutcome::AlreadyPicked { record, .. } => response
            .add_attribute("result", "already_picked")
            .add_attribute("winner", record.participant_name.clone())
            .add_event(
                Event::new("picker_already_picked")
                    .add_attribute("month", month.to_string())
                    .add_attribute("participant", record.participant_name.clone())
                    .add_attribute("picked_at", record.picked_at.seconds().to_string()),
            ),
        PickOutcome::CycleExhausted { cleared } => {
            stats.cycles_completed += 1;
            PICKER_STATS.save(deps.storage, &stats)?;

            response
                .add_attribute("result", "cycle_exhausted")
                .add_attribute("cleared", cleared.to_string())
                .add_event(
                    Event::new("picker_cycle_exhausted")
                        .add_attribute("month", month.to_string())
                        .add_attribute("cleared", cleared.to_string())
                        .add_attribute("cycle", stats.cycles_completed.to_string())
                        .add_attribute("timestamp", env.block.time.seconds().to_string()),
                )
        }
    };

    Ok(response)
}

/// Clear the roster and every draw record. Admin only.
pub fn reset_all(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "only admin can reset")?;

    let removed_participants = ROSTER.len(deps.storage)?;
    ROSTER.reset_all(deps.storage);
    let removed_records = LEDGER.reset_all(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "reset_all")
        .add_event(
            Event::new("picker_reset")
                .add_attribute("scope", "all")
                .add_attribute("participants_removed", removed_participants.to_string())
                .add_attribute("records_removed", removed_records.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Clear the draw records and keep the roster. Admin only.
pub fn reset_picks(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "only admin can reset")?;

    let removed_records = LEDGER.reset_picks_only(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "reset_picks")
        .add_event(
            Event::new("picker_reset")
                .add_attribute("scope", "picks")
                .add_attribute("records_removed", removed_records.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    utc_offset_seconds: Option<i32>,
    max_participants: Option<u32>,
    max_name_length: Option<u32>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "only admin can update config")?;

    let mut event = Event::new("picker_config_updated");

    if let Some(offset) = utc_offset_seconds {
        validate_utc_offset(offset)?;
        config.utc_offset_seconds = offset;
        event = event.add_attribute("utc_offset_seconds", offset.to_string());
    }
    if let Some(max) = max_participants {
        validate_max_participants(max)?;
        let current = ROSTER.len(deps.storage)?;
        if max < current {
            return Err(ContractError::InvalidConfig {
                field: "max_participants".to_string(),
                reason: format!("roster already holds {current} participants"),
            });
        }
        config.max_participants = max;
        event = event.add_attribute("max_participants", max.to_string());
    }
    if let Some(max) = max_name_length {
        validate_max_name_length(max)?;
        config.max_name_length = max;
        event = event.add_attribute("max_name_length", max.to_string());
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_event(event))
}

/// Hand the admin role to another address. Admin only.
pub fn transfer_admin(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    new_admin: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_admin(&config, &info, "only admin can transfer admin")?;

    let previous = config.admin.clone();
    config.admin = deps.api.addr_validate(&new_admin)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_admin")
        .add_attribute("new_admin", config.admin.to_string())
        .add_event(
            Event::new("picker_admin_transferred")
                .add_attribute("previous", previous.to_string())
                .add_attribute("new_admin", config.admin.to_string()),
        ))
}
