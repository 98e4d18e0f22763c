use cosmwasm_std::{Storage, Timestamp};
use family_picker_common::month::MonthKey;
use family_picker_common::selection::select_index;
use family_picker_common::types::PickOutcome;

use crate::error::ContractError;
use crate::ledger::Ledger;
use crate::roster::Roster;

/// Decides a month's winner from a roster and a ledger.
///
/// Holds no state of its own. The stores are borrowed for the duration of a
/// call and every decision is re-derived from them.
pub struct DrawEngine<'a> {
    roster: &'a Roster,
    ledger: &'a Ledger,
}

impl<'a> DrawEngine<'a> {
    pub fn new(roster: &'a Roster, ledger: &'a Ledger) -> Self {
        DrawEngine { roster, ledger }
    }

    /// Draw the winner for `month`.
    ///
    /// 1. A record for `month` already exists: return it, write nothing.
    /// 2. Everyone on the roster appears in the ledger: clear the ledger and
    ///    report `CycleExhausted` without drawing. The next call draws.
    /// 3. Otherwise pick uniformly from the participants not yet in the
    ///    ledger, using `seed`, and commit the result for `month`.
    pub fn pick(
        &self,
        storage: &mut dyn Storage,
        month: MonthKey,
        now: Timestamp,
        seed: &[u8; 32],
    ) -> Result<PickOutcome, ContractError> {
        if let Some(record) = self.ledger.record_for(storage, month)? {
            let participant = self.roster.participant(storage, &record.participant_name)?;
            return Ok(PickOutcome::AlreadyPicked {
                record,
                participant,
            });
        }

        let participants = self.roster.list_participants(storage)?;
        if participants.is_empty() {
            return Err(ContractError::EmptyRoster);
        }

        let picked = self.ledger.picked_names(storage)?;
        let mut available: Vec<_> = participants
            .into_iter()
            .filter(|p| !picked.contains(&p.key()))
            .collect();

        let Some(index) = select_index(seed, available.len()) else {
            let cleared = self.ledger.reset_picks_only(storage);
            return Ok(PickOutcome::CycleExhausted { cleared });
        };

        let winner = available.swap_remove(index);
        let record = self.ledger.commit(storage, month, &winner.name, now)?;

        Ok(PickOutcome::Winner {
            record,
            participant: winner,
        })
    }
}
