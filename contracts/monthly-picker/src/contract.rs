use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{PickerConfig, PickerStats, CONFIG, PICKER_STATS, ROSTER};

const CONTRACT_NAME: &str = "crates.io:family-monthly-picker";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    execute::validate_utc_offset(msg.utc_offset_seconds)?;
    execute::validate_max_participants(msg.max_participants)?;
    execute::validate_max_name_length(msg.max_name_length)?;

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender.clone(),
    };

    let config = PickerConfig {
        admin: admin.clone(),
        utc_offset_seconds: msg.utc_offset_seconds,
        max_participants: msg.max_participants,
        max_name_length: msg.max_name_length,
    };
    CONFIG.save(deps.storage, &config)?;
    PICKER_STATS.save(deps.storage, &PickerStats::default())?;

    let mut events = Vec::with_capacity(msg.participants.len());
    for new in msg.participants {
        let participant =
            ROSTER.add_participant(deps.storage, &new.name, new.image, config.roster_limits())?;
        events.push(execute::participant_added_event(&participant, &env));
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "monthly-picker")
        .add_attribute("admin", admin.to_string())
        .add_attribute("participants", events.len().to_string())
        .add_events(events))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddParticipant { name, image } => {
            execute::add_participant(deps, env, info, name, image)
        }
        ExecuteMsg::Pick {} => execute::pick(deps, env, info),
        ExecuteMsg::ResetAll {} => execute::reset_all(deps, env, info),
        ExecuteMsg::ResetPicks {} => execute::reset_picks(deps, env, info),
        ExecuteMsg::UpdateConfig {
            utc_offset_seconds,
            max_participants,
            max_name_length,
        } => execute::update_config(
            deps,
            env,
            info,
            utc_offset_seconds,
            max_participants,
            max_name_length,
        ),
        ExecuteMsg::TransferAdmin { new_admin } => {
            execute::transfer_admin(deps, env, info, new_admin)
        }
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Stats {} => query::query_stats(deps),
        QueryMsg::Participants { start_after, limit } => {
            query::query_participants(deps, start_after, limit)
        }
        QueryMsg::Participant { name } => query::query_participant(deps, name),
        QueryMsg::CurrentMonth {} => query::query_current_month(deps, env),
        QueryMsg::CurrentWinner {} => query::query_current_winner(deps, env),
        QueryMsg::Draw { month } => query::query_draw(deps, month),
        QueryMsg::History {
            start_after,
            limit,
            newest_first,
        } => query::query_history(deps, start_after, limit, newest_first),
        QueryMsg::CycleStatus {} => query::query_cycle_status(deps),
        QueryMsg::ShareText {} => query::query_share_text(deps, env),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
