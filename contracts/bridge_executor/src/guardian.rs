//! Bridge-independent cancellation authority.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

pub(crate) const GUARDIAN: Symbol = symbol_short!("GUARDIAN");

pub(crate) fn load(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&GUARDIAN)
        .ok_or(ContractError::NotInitialized)
}

pub(crate) fn store(env: &Env, guardian: &Address) {
    env.storage().instance().set(&GUARDIAN, guardian);
}

/// `caller` must have signed the invocation and be the current guardian.
pub(crate) fn require_guardian(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    if *caller != load(env)? {
        return Err(ContractError::NotGuardian);
    }
    Ok(())
}
