//! Lifecycle state of an action set.
//!
//! Only the two terminal flags are stored. Everything else is derived from
//! the execution time, the current grace period and the ledger clock at the
//! moment of the query:
//!
//! ```text
//! Queued ──► Executed   (execute, execution_time ≤ now ≤ execution_time + grace)
//!   │
//!   ├──────► Canceled   (guardian cancel)
//!   │
//!   └──────► Expired    (now > execution_time + grace, no flag written)
//! ```

use soroban_sdk::contracttype;

use crate::actions_set::ActionsSet;
use crate::ContractError;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionsSetState {
    Queued,
    Executed,
    Canceled,
    Expired,
}

/// Classify `set` at ledger time `now`.
pub fn derive_state(set: &ActionsSet, now: u64, grace_period: u64) -> ActionsSetState {
    if set.canceled {
        ActionsSetState::Canceled
    } else if set.executed {
        ActionsSetState::Executed
    } else if now > set.execution_time.saturating_add(grace_period) {
        ActionsSetState::Expired
    } else {
        ActionsSetState::Queued
    }
}

/// Guard for `execute`.
pub fn ensure_executable(set: &ActionsSet, now: u64, grace_period: u64) -> Result<(), ContractError> {
    match derive_state(set, now, grace_period) {
        ActionsSetState::Queued => {}
        ActionsSetState::Expired => return Err(ContractError::GracePeriodExpired),
        ActionsSetState::Executed | ActionsSetState::Canceled => {
            return Err(ContractError::OnlyQueuedActions)
        }
    }
    if now < set.execution_time {
        return Err(ContractError::TimelockNotFinished);
    }
    Ok(())
}

/// Guard for `cancel`. Expired sets can no longer be canceled.
pub fn ensure_cancelable(set: &ActionsSet, now: u64, grace_period: u64) -> Result<(), ContractError> {
    if derive_state(set, now, grace_period) != ActionsSetState::Queued {
        return Err(ContractError::OnlyQueuedActions);
    }
    Ok(())
}
