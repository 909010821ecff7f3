//! Configuration changes reachable only from executed action sets.
//!
//! None of these are contract entry points. They run when an action targets
//! the executor itself, or when a delegate payload returns them, so every
//! privilege change passes through the same queue, timelock and guardian
//! veto as any other action.

use soroban_sdk::{Address, BytesN, Env, IntoVal, Symbol, TryFromVal, Val, Vec};

use crate::{delay, events, guardian, origin, ContractError};

pub const UPDATE_DELAY: &str = "update_delay";
pub const UPDATE_MINIMUM_DELAY: &str = "update_minimum_delay";
pub const UPDATE_MAXIMUM_DELAY: &str = "update_maximum_delay";
pub const UPDATE_GRACE_PERIOD: &str = "update_grace_period";
pub const UPDATE_GUARDIAN: &str = "update_guardian";
pub const UPDATE_TRUSTED_CONTROLLER: &str = "update_trusted_controller";
pub const UPDATE_RELAY: &str = "update_relay";

/// Apply one governance call to the executor's own configuration.
pub(crate) fn apply(env: &Env, function: &Symbol, args: &Vec<Val>) -> Result<Val, ContractError> {
    let is = |name: &str| *function == Symbol::new(env, name);

    if is(UPDATE_DELAY) {
        let config = delay::load(env)?;
        let updated = config.with_delay(single_arg(env, args)?)?;
        delay::store(env, &updated);
        events::publish_delay_updated(env, config.delay, updated.delay);
    } else if is(UPDATE_MINIMUM_DELAY) {
        let config = delay::load(env)?;
        let updated = config.with_minimum_delay(single_arg(env, args)?)?;
        delay::store(env, &updated);
        events::publish_minimum_delay_updated(env, config.minimum_delay, updated.minimum_delay);
    } else if is(UPDATE_MAXIMUM_DELAY) {
        let config = delay::load(env)?;
        let updated = config.with_maximum_delay(single_arg(env, args)?)?;
        delay::store(env, &updated);
        events::publish_maximum_delay_updated(env, config.maximum_delay, updated.maximum_delay);
    } else if is(UPDATE_GRACE_PERIOD) {
        let config = delay::load(env)?;
        let updated = config.with_grace_period(single_arg(env, args)?)?;
        delay::store(env, &updated);
        events::publish_grace_period_updated(env, config.grace_period, updated.grace_period);
    } else if is(UPDATE_GUARDIAN) {
        let new: Address = single_arg(env, args)?;
        let old = guardian::load(env)?;
        guardian::store(env, &new);
        events::publish_guardian_updated(env, &old, &new);
    } else if is(UPDATE_TRUSTED_CONTROLLER) {
        let new: BytesN<20> = single_arg(env, args)?;
        let old = origin::load_controller(env).ok_or(ContractError::NotInitialized)?;
        origin::store_controller(env, &new);
        events::publish_controller_updated(env, &old, &new);
    } else if is(UPDATE_RELAY) {
        let new: Address = single_arg(env, args)?;
        let strategy = origin::load_strategy(env).ok_or(ContractError::NotInitialized)?;
        origin::store_strategy(env, &strategy.with_relay(new.clone()));
        events::publish_relay_updated(env, strategy.relay(), &new);
    } else {
        return Err(ContractError::FailedActionExecution);
    }

    Ok(().into_val(env))
}

fn single_arg<T>(env: &Env, args: &Vec<Val>) -> Result<T, ContractError>
where
    T: TryFromVal<Env, Val>,
{
    if args.len() != 1 {
        return Err(ContractError::FailedActionExecution);
    }
    let val = args.get(0).ok_or(ContractError::FailedActionExecution)?;
    T::try_from_val(env, &val).map_err(|_| ContractError::FailedActionExecution)
}
