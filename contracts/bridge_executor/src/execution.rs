//! Action dispatch.
//!
//! Every action resolves to a `(function, args)` pair and then takes one of
//! three paths:
//!
//! | Target                 | Path                                                  |
//! |------------------------|-------------------------------------------------------|
//! | the executor itself    | internal governance dispatch (no re-entry)            |
//! | `with_delegatecall`    | payload call; returned calls applied to the executor  |
//! | anything else          | plain cross-contract call                             |
//!
//! Soroban rejects re-entry into a contract that is already on the call
//! stack, so self-targeted actions never leave this contract.

use soroban_sdk::{
    contracttype, log, token, xdr::FromXdr, Address, Bytes, Env, IntoVal, InvokeError, String,
    Symbol, Val, Vec,
};

use crate::actions_set::ActionsSet;
use crate::governance;
use crate::ContractError;

/// Longest function name a Soroban symbol can hold.
pub const MAX_SIGNATURE_LEN: usize = 32;

/// A fully encoded contract call.
///
/// Used as the calldata of actions with an empty signature, and as the
/// element type returned by delegate payloads.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodedCall {
    pub function: Symbol,
    pub args: Vec<Val>,
}

/// Turn a signature string into a function symbol.
///
/// Symbols are limited to `[a-zA-Z0-9_]` and 32 characters; anything else
/// cannot name a contract function.
pub fn signature_symbol(env: &Env, signature: &String) -> Result<Symbol, ContractError> {
    let len = signature.len() as usize;
    if len == 0 || len > MAX_SIGNATURE_LEN {
        return Err(ContractError::FailedActionExecution);
    }
    let mut buf = [0u8; MAX_SIGNATURE_LEN];
    signature.copy_into_slice(&mut buf[..len]);
    let name = &buf[..len];
    if !name.iter().all(|c| c.is_ascii_alphanumeric() || *c == b'_') {
        return Err(ContractError::FailedActionExecution);
    }
    let name = core::str::from_utf8(name).map_err(|_| ContractError::FailedActionExecution)?;
    Ok(Symbol::new(env, name))
}

/// Resolve the function and argument list of one action.
pub fn resolve_call(
    env: &Env,
    signature: &String,
    calldata: &Bytes,
) -> Result<(Symbol, Vec<Val>), ContractError> {
    if signature.is_empty() {
        let call = EncodedCall::from_xdr(env, calldata)
            .map_err(|_| ContractError::FailedActionExecution)?;
        return Ok((call.function, call.args));
    }
    let function = signature_symbol(env, signature)?;
    let args = Vec::<Val>::from_xdr(env, calldata)
        .map_err(|_| ContractError::FailedActionExecution)?;
    Ok((function, args))
}

/// Run action `index` of `set`.
pub(crate) fn execute_action(
    env: &Env,
    set: &ActionsSet,
    index: u32,
    native_token: &Address,
) -> Result<Val, ContractError> {
    let (target, value, signature, calldata, delegate) = match (
        set.targets.get(index),
        set.values.get(index),
        set.signatures.get(index),
        set.calldatas.get(index),
        set.with_delegatecalls.get(index),
    ) {
        (Some(t), Some(v), Some(s), Some(c), Some(d)) => (t, v, s, c, d),
        _ => return Err(ContractError::FailedActionExecution),
    };

    let (function, args) = resolve_call(env, &signature, &calldata).inspect_err(|_| {
        log!(env, "action calldata rejected", index);
    })?;

    // queue admits no value on self-targeted actions
    if value > 0 {
        transfer_value(env, native_token, &target, value)?;
    }

    if target == env.current_contract_address() {
        return governance::apply(env, &function, &args);
    }
    if delegate {
        return run_payload(env, index, &target, &function, args);
    }

    match env.try_invoke_contract::<Val, InvokeError>(&target, &function, args) {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(_)) => {
            log!(env, "action returned an unreadable value", index);
            Err(ContractError::FailedActionExecution)
        }
        Err(err) => {
            log!(env, "action failed", index, invoke_error_code(err));
            Err(ContractError::FailedActionExecution)
        }
    }
}

/// Call a payload contract and apply the calls it returns to the executor.
fn run_payload(
    env: &Env,
    index: u32,
    payload: &Address,
    function: &Symbol,
    args: Vec<Val>,
) -> Result<Val, ContractError> {
    let calls = match env.try_invoke_contract::<Vec<EncodedCall>, InvokeError>(payload, function, args)
    {
        Ok(Ok(calls)) => calls,
        Ok(Err(_)) => {
            log!(env, "payload returned malformed calls", index);
            return Err(ContractError::FailedActionExecution);
        }
        Err(err) => {
            log!(env, "payload failed", index, invoke_error_code(err));
            return Err(ContractError::FailedActionExecution);
        }
    };

    let mut results = Vec::<Val>::new(env);
    for call in calls.try_iter() {
        let call = call.map_err(|_| ContractError::FailedActionExecution)?;
        results.push_back(governance::apply(env, &call.function, &call.args)?);
    }
    Ok(results.into_val(env))
}

fn transfer_value(
    env: &Env,
    native_token: &Address,
    target: &Address,
    value: i128,
) -> Result<(), ContractError> {
    let this = env.current_contract_address();
    let token = token::TokenClient::new(env, native_token);
    if token.balance(&this) < value {
        return Err(ContractError::InsufficientBalance);
    }
    token.transfer(&this, target, &value);
    Ok(())
}

/// Contract error code of a failed call, 0 for host aborts.
fn invoke_error_code(err: Result<InvokeError, InvokeError>) -> u32 {
    match err {
        Ok(InvokeError::Contract(code)) | Err(InvokeError::Contract(code)) => code,
        Ok(InvokeError::Abort) | Err(InvokeError::Abort) => 0,
    }
}
