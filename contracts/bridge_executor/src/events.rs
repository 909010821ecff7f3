#![allow(deprecated)] // events().publish migration to #[contractevent] tracked separately

//! Structured event publishing for the bridge executor.
//! All symbol_short! values must be ≤9 characters.

use soroban_sdk::{symbol_short, Address, BytesN, Env, Val, Vec};

use crate::actions_set::ActionsSet;
use crate::origin::OriginStrategy;

pub fn publish_initialized(
    env: &Env,
    origin: &OriginStrategy,
    controller: &BytesN<20>,
    guardian: &Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (origin.clone(), controller.clone(), guardian.clone()),
    );
}

/// `l1_sender` is the controller as known on L1, never the aliased form.
pub fn publish_actions_set_queued(env: &Env, id: u64, l1_sender: &BytesN<20>, set: &ActionsSet) {
    env.events().publish(
        (symbol_short!("AS_QUEUED"), id),
        (
            l1_sender.clone(),
            set.targets.clone(),
            set.values.clone(),
            set.signatures.clone(),
            set.calldatas.clone(),
            set.with_delegatecalls.clone(),
            set.execution_time,
        ),
    );
}

pub fn publish_actions_set_executed(env: &Env, id: u64, caller: &Address, results: &Vec<Val>) {
    env.events().publish(
        (symbol_short!("AS_EXEC"), id),
        (caller.clone(), results.clone()),
    );
}

pub fn publish_actions_set_canceled(env: &Env, id: u64) {
    env.events()
        .publish((symbol_short!("AS_CANCEL"), id), ());
}

pub fn publish_guardian_updated(env: &Env, old: &Address, new: &Address) {
    env.events()
        .publish((symbol_short!("GUARD_UPD"),), (old.clone(), new.clone()));
}

pub fn publish_delay_updated(env: &Env, old: u64, new: u64) {
    env.events().publish((symbol_short!("DELAY_UPD"),), (old, new));
}

pub fn publish_grace_period_updated(env: &Env, old: u64, new: u64) {
    env.events().publish((symbol_short!("GRACE_UPD"),), (old, new));
}

pub fn publish_minimum_delay_updated(env: &Env, old: u64, new: u64) {
    env.events().publish((symbol_short!("MIN_DELAY"),), (old, new));
}

pub fn publish_maximum_delay_updated(env: &Env, old: u64, new: u64) {
    env.events().publish((symbol_short!("MAX_DELAY"),), (old, new));
}

pub fn publish_controller_updated(env: &Env, old: &BytesN<20>, new: &BytesN<20>) {
    env.events()
        .publish((symbol_short!("CTRL_UPD"),), (old.clone(), new.clone()));
}

pub fn publish_relay_updated(env: &Env, old: &Address, new: &Address) {
    env.events()
        .publish((symbol_short!("RELAY_UPD"),), (old.clone(), new.clone()));
}
