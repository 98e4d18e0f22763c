//! Integration tests for the family monthly picker.
//!
//! These tests drive the contract through its `instantiate` / `execute` /
//! `query` entry points using `cosmwasm_std::testing` mocks, moving the block
//! clock across months the way a family would over a year of picks.
//!
//! Run:
//! ```bash
//! cargo test -p family-picker-integration-tests
//! ```

use std::collections::BTreeSet;

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{from_json, Env, MemoryStorage, OwnedDeps, Response, Timestamp};
use family_monthly_picker::msg::{
    CycleStatusResponse, ExecuteMsg, HistoryResponse, InstantiateMsg, MonthResponse,
    NewParticipant, ParticipantsResponse, QueryMsg, ShareTextResponse,
};
use family_monthly_picker::state::PickerStats;
use family_monthly_picker::ContractError;
use family_picker_common::{MonthKey, PickOutcome};

type Deps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

/// 2026-01-15T12:00:00Z
const JAN_2026: u64 = 1_768_478_400;
/// Seconds in a 30-day step; from mid-month this always lands in the next month
const THIRTY_DAYS: u64 = 30 * 86_400;

// ─── Helpers ───

fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

/// Mid-month timestamp `n` months after January 2026
fn month_time(n: u64) -> u64 {
    JAN_2026 + n * THIRTY_DAYS
}

fn setup(names: &[&str]) -> Deps {
    let mut deps = mock_dependencies();
    let admin = deps.api.addr_make("admin");
    let msg = InstantiateMsg {
        admin: None,
        utc_offset_seconds: 0,
        max_participants: 50,
        max_name_length: 40,
        participants: names
            .iter()
            .map(|name| NewParticipant {
                name: name.to_string(),
                image: None,
            })
            .collect(),
    };
    family_monthly_picker::contract::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        msg,
    )
    .unwrap();
    deps
}

fn exec_as_admin(deps: &mut Deps, env: Env, msg: ExecuteMsg) -> Result<Response, ContractError> {
    let admin = deps.api.addr_make("admin");
    family_monthly_picker::contract::execute(deps.as_mut(), env, message_info(&admin, &[]), msg)
}

fn pick(deps: &mut Deps, seconds: u64) -> PickOutcome {
    let res = exec_as_admin(deps, env_at(seconds), ExecuteMsg::Pick {}).unwrap();
    from_json(res.data.unwrap()).unwrap()
}

fn winner(outcome: &PickOutcome) -> String {
    match outcome {
        PickOutcome::Winner { participant, .. } => participant.name.clone(),
        other => panic!("Expected a winner, got: {:?}", other),
    }
}

fn query<T: serde::de::DeserializeOwned>(deps: &Deps, env: Env, msg: QueryMsg) -> T {
    let res = family_monthly_picker::contract::query(deps.as_ref(), env, msg).unwrap();
    from_json(res).unwrap()
}

fn roster_names(deps: &Deps) -> Vec<String> {
    let res: ParticipantsResponse = query(
        deps,
        mock_env(),
        QueryMsg::Participants {
            start_after: None,
            limit: None,
        },
    );
    res.participants
        .into_iter()
        .map(|entry| entry.participant.name)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_month_time_helper_steps_one_month() {
    let mut previous: Option<MonthKey> = None;
    for n in 0..24 {
        let month = MonthKey::from_timestamp(Timestamp::from_seconds(month_time(n)), 0).unwrap();
        if let Some(previous) = previous {
            assert_eq!(previous.succ(), month);
        }
        previous = Some(month);
    }
}

#[test]
fn test_same_month_returns_same_winner() {
    let mut deps = setup(&["Alice", "Bob"]);

    // 1. First pick of the month draws someone from the roster
    let first = winner(&pick(&mut deps, month_time(0)));
    assert!(first == "Alice" || first == "Bob");

    // 2. A later pick in the same month reports the existing record
    match pick(&mut deps, month_time(0) + 86_400) {
        PickOutcome::AlreadyPicked {
            record,
            participant,
        } => {
            assert_eq!(record.participant_name, first);
            assert_eq!(record.month.to_string(), "2026-1");
            assert_eq!(participant.unwrap().name, first);
        }
        other => panic!("Expected AlreadyPicked, got: {:?}", other),
    }

    let stats: PickerStats = query(&deps, mock_env(), QueryMsg::Stats {});
    assert_eq!(stats.total_picks, 1);
}

#[test]
fn test_two_person_cycle() {
    let mut deps = setup(&["Alice", "Bob"]);

    // 1. Month one picks someone, month two is forced to the other person
    let m1 = winner(&pick(&mut deps, month_time(0)));
    let m2 = winner(&pick(&mut deps, month_time(1)));
    assert_ne!(m1, m2);

    // 2. Month three finds nobody left: ledger is cleared, no winner yet
    let outcome = pick(&mut deps, month_time(2));
    assert_eq!(outcome, PickOutcome::CycleExhausted { cleared: 2 });

    let history: HistoryResponse = query(
        &deps,
        mock_env(),
        QueryMsg::History {
            start_after: None,
            limit: None,
            newest_first: None,
        },
    );
    assert!(history.entries.is_empty());

    // 3. Picking again in month three now draws from the full roster
    let m3 = winner(&pick(&mut deps, month_time(2)));
    assert!(m3 == "Alice" || m3 == "Bob");

    let stats: PickerStats = query(&deps, mock_env(), QueryMsg::Stats {});
    assert_eq!(stats.total_picks, 3);
    assert_eq!(stats.cycles_completed, 1);
}

#[test]
fn test_everyone_picked_once_per_cycle() {
    let names = ["Ana", "Ben", "Cai", "Dev", "Eli", "Fay", "Gus"];
    let mut deps = setup(&names);
    let mut n = 0;

    for cycle in 0..3 {
        let mut seen = BTreeSet::new();
        for _ in 0..names.len() {
            let name = winner(&pick(&mut deps, month_time(n)));
            assert!(seen.insert(name.clone()), "{name} picked twice in cycle {cycle}");
            n += 1;
        }
        assert_eq!(seen.len(), names.len());

        let status: CycleStatusResponse = query(&deps, mock_env(), QueryMsg::CycleStatus {});
        assert!(status.exhausted);
        assert_eq!(status.picked.len(), names.len());

        let outcome = pick(&mut deps, month_time(n));
        assert_eq!(
            outcome,
            PickOutcome::CycleExhausted {
                cleared: names.len() as u32
            }
        );
        // The exhausted month keeps the slot for the next cycle's first pick
    }
}

#[test]
fn test_duplicate_names_rejected() {
    let mut deps = setup(&[]);

    exec_as_admin(
        &mut deps,
        mock_env(),
        ExecuteMsg::AddParticipant {
            name: "Alice".to_string(),
            image: None,
        },
    )
    .unwrap();

    for dup in [" Alice ", "ALICE", "alice\t"] {
        let err = exec_as_admin(
            &mut deps,
            mock_env(),
            ExecuteMsg::AddParticipant {
                name: dup.to_string(),
                image: None,
            },
        )
        .unwrap_err();
        assert!(
            matches!(err, ContractError::DuplicateName { .. }),
            "Expected DuplicateName for {:?}, got: {:?}",
            dup,
            err
        );
    }

    assert_eq!(roster_names(&deps), vec!["Alice"]);
}

#[test]
fn test_reset_picks_keeps_roster() {
    let mut deps = setup(&["Alice", "Bob", "Carol"]);
    pick(&mut deps, month_time(0));
    pick(&mut deps, month_time(1));

    let before = roster_names(&deps);
    exec_as_admin(&mut deps, mock_env(), ExecuteMsg::ResetPicks {}).unwrap();
    assert_eq!(roster_names(&deps), before);

    let status: CycleStatusResponse = query(&deps, mock_env(), QueryMsg::CycleStatus {});
    assert!(status.picked.is_empty());
    assert_eq!(status.remaining, before);
    assert!(!status.exhausted);
}

#[test]
fn test_reset_all_then_rebuild() {
    let mut deps = setup(&["Alice", "Bob"]);
    pick(&mut deps, month_time(0));

    exec_as_admin(&mut deps, mock_env(), ExecuteMsg::ResetAll {}).unwrap();
    assert!(roster_names(&deps).is_empty());

    let err = exec_as_admin(&mut deps, env_at(month_time(0)), ExecuteMsg::Pick {}).unwrap_err();
    assert!(matches!(err, ContractError::EmptyRoster));

    exec_as_admin(
        &mut deps,
        mock_env(),
        ExecuteMsg::AddParticipant {
            name: "Carol".to_string(),
            image: Some("https://example.org/carol.jpg".to_string()),
        },
    )
    .unwrap();
    assert_eq!(winner(&pick(&mut deps, month_time(0))), "Carol");
}

#[test]
fn test_viewer_queries() {
    let mut deps = setup(&["Alice"]);
    let env = env_at(month_time(9));

    let month: MonthResponse = query(&deps, env.clone(), QueryMsg::CurrentMonth {});
    assert_eq!(month.month.to_string(), "2026-10");
    assert_eq!(month.month_name, "October 2026");

    pick(&mut deps, month_time(9));

    let share: ShareTextResponse = query(&deps, env, QueryMsg::ShareText {});
    assert_eq!(share.text, "This month's participant: Alice");
    assert!(share.share_url.starts_with("https://wa.me/?text="));

    // Viewers never need admin rights to read
    let viewer = deps.api.addr_make("viewer");
    let err = family_monthly_picker::contract::execute(
        deps.as_mut(),
        env_at(month_time(10)),
        message_info(&viewer, &[]),
        ExecuteMsg::Pick {},
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));
}

#[test]
fn test_history_pagination() {
    let mut deps = setup(&["Ana", "Ben", "Cai", "Dev"]);
    for n in 0..4 {
        pick(&mut deps, month_time(n));
    }

    let page: HistoryResponse = query(
        &deps,
        mock_env(),
        QueryMsg::History {
            start_after: None,
            limit: Some(2),
            newest_first: Some(false),
        },
    );
    let months: Vec<_> = page
        .entries
        .iter()
        .map(|e| e.record.month.to_string())
        .collect();
    assert_eq!(months, vec!["2026-1", "2026-2"]);

    let page: HistoryResponse = query(
        &deps,
        mock_env(),
        QueryMsg::History {
            start_after: Some("2026-2".to_string()),
            limit: Some(10),
            newest_first: Some(false),
        },
    );
    let months: Vec<_> = page
        .entries
        .iter()
        .map(|e| e.record.month.to_string())
        .collect();
    assert_eq!(months, vec!["2026-3", "2026-4"]);

    let page: HistoryResponse = query(
        &deps,
        mock_env(),
        QueryMsg::History {
            start_after: Some("2026-3".to_string()),
            limit: None,
            newest_first: None,
        },
    );
    let months: Vec<_> = page
        .entries
        .iter()
        .map(|e| e.record.month.to_string())
        .collect();
    assert_eq!(months, vec!["2026-2", "2026-1"]);
}
