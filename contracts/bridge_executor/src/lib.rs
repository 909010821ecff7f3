#![no_std]

//! # Bridge Executor
//!
//! Receives governance instructions from a trusted controller on L1,
//! delivered by a bridge relay, and runs them on this ledger behind a
//! timelock:
//!
//! - **Cross-domain authentication**: explicit-sender and address-aliasing
//!   bridge families behind one [`CrossDomainAuthenticator`] interface
//! - **Action sets**: batches of calls queued together, stored forever under
//!   dense ids starting at 0
//! - **Timelock**: `execution_time = queued_at + delay`, executable until
//!   `execution_time + grace_period`, expired afterwards
//! - **Guardian**: a local account that can cancel queued sets without the
//!   bridge
//! - **Self-governance**: delay bounds, grace period, guardian, controller
//!   and relay change only through executed action sets targeting the
//!   executor itself

pub mod actions_set;
pub mod delay;
pub mod events;
pub mod execution;
pub mod governance;
pub mod guardian;
pub mod origin;
pub mod timelock;


use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Bytes, BytesN, Env, String, Symbol, Val, Vec,
};

use common::{L1Address, RelayedCall};

pub use actions_set::{action_hash, ActionsSet};
pub use delay::{DelayConfig, MINIMUM_GRACE_PERIOD};
pub use execution::EncodedCall;
pub use origin::{CrossDomainAuthenticator, OriginStrategy};
pub use timelock::ActionsSetState;

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE_TOKEN: Symbol = symbol_short!("NATIVE");

// TTL for instance storage: ~30 days at 5s/ledger
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800;

// ── Error codes ───────────────────────────────────────────────────────────────

/// Codes are grouped by range:
///
/// | Range | Category         |
/// |-------|------------------|
/// | 1–9   | Lifecycle        |
/// | 10–19 | Authorization    |
/// | 20–29 | Lookup           |
/// | 30–39 | Validation       |
/// | 40–49 | Action-set state |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInitParams = 3,

    UnauthorizedOrigin = 10,
    NotGuardian = 11,

    InvalidActionsSetId = 20,

    InvalidActionsSetLength = 30,
    DuplicateAction = 31,
    InvalidDelayBounds = 32,
    GracePeriodTooShort = 33,
    InvalidActionValue = 34,

    OnlyQueuedActions = 40,
    TimelockNotFinished = 41,
    GracePeriodExpired = 42,
    FailedActionExecution = 43,
    InsufficientBalance = 44,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct BridgeExecutor;

#[contractimpl]
impl BridgeExecutor {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the executor.
    ///
    /// * `origin`             - bridge family and the relay contract it trusts.
    /// * `trusted_controller` - L1 address whose messages may queue actions.
    /// * `delay`, `minimum_delay`, `maximum_delay` - timelock in seconds,
    ///                          `minimum_delay ≤ delay ≤ maximum_delay`.
    /// * `grace_period`       - seconds a ready set stays executable, at least
    ///                          [`MINIMUM_GRACE_PERIOD`].
    /// * `guardian`           - local account allowed to cancel queued sets.
    /// * `native_token`       - token contract used to forward action values.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        origin: OriginStrategy,
        trusted_controller: L1Address,
        delay: u64,
        grace_period: u64,
        minimum_delay: u64,
        maximum_delay: u64,
        guardian: Address,
        native_token: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        let config = DelayConfig::new(delay, grace_period, minimum_delay, maximum_delay)?;

        delay::store(&env, &config);
        origin::store_strategy(&env, &origin);
        origin::store_controller(&env, &trusted_controller);
        guardian::store(&env, &guardian);
        env.storage().instance().set(&NATIVE_TOKEN, &native_token);
        env.storage().instance().set(&INITIALIZED, &true);
        Self::bump_instance(&env);

        events::publish_initialized(&env, &origin, &trusted_controller, &guardian);
        Ok(())
    }

    // ── Queue ─────────────────────────────────────────────────────────────────

    /// Queue an action set on behalf of the trusted L1 controller.
    ///
    /// `origin` is prepended by the relay. The relay must be the direct
    /// invoker (or otherwise authorize the call) and report the controller
    /// as the sender, in the form the configured strategy expects.
    ///
    /// Values must be non-negative, and zero for actions targeting the
    /// executor itself.
    ///
    /// Every action is hashed together with the computed execution time;
    /// an action identical to one still pending fails `DuplicateAction`.
    pub fn queue(
        env: Env,
        origin: RelayedCall,
        targets: Vec<Address>,
        values: Vec<i128>,
        signatures: Vec<String>,
        calldatas: Vec<Bytes>,
        with_delegatecalls: Vec<bool>,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;

        let strategy = origin::load_strategy(&env).ok_or(ContractError::NotInitialized)?;
        let controller = origin::load_controller(&env).ok_or(ContractError::NotInitialized)?;
        if !strategy.is_authorized_origin(&env, &origin, &controller) {
            return Err(ContractError::UnauthorizedOrigin);
        }

        if !actions_set::has_consistent_length(
            &targets,
            &values,
            &signatures,
            &calldatas,
            &with_delegatecalls,
        ) {
            return Err(ContractError::InvalidActionsSetLength);
        }
        if !actions_set::has_valid_values(&env.current_contract_address(), &targets, &values) {
            return Err(ContractError::InvalidActionValue);
        }

        let config = delay::load(&env)?;
        let execution_time = env.ledger().timestamp().saturating_add(config.delay);
        let set = ActionsSet {
            targets,
            values,
            signatures,
            calldatas,
            with_delegatecalls,
            execution_time,
            executed: false,
            canceled: false,
        };

        for hash in actions_set::action_hashes(&env, &set).iter() {
            if actions_set::is_queued(&env, &hash) {
                return Err(ContractError::DuplicateAction);
            }
            actions_set::mark_queued(&env, &hash);
        }

        let id = actions_set::next_id(&env);
        actions_set::store(&env, id, &set);
        Self::bump_instance(&env);

        let l1_sender = strategy.original_sender(&env, &origin);
        events::publish_actions_set_queued(&env, id, &l1_sender, &set);

        Ok(id)
    }

    // ── Execute ───────────────────────────────────────────────────────────────

    /// Execute a ready action set. Anyone may call this.
    ///
    /// The set is marked executed before any action runs. If any action
    /// fails the whole invocation fails and nothing it did persists.
    pub fn execute(env: Env, caller: Address, id: u64) -> Result<Vec<Val>, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut set = actions_set::load(&env, id).ok_or(ContractError::InvalidActionsSetId)?;
        let config = delay::load(&env)?;
        timelock::ensure_executable(&set, env.ledger().timestamp(), config.grace_period)?;

        set.executed = true;
        actions_set::store(&env, id, &set);
        actions_set::clear_queued(&env, &set);

        let native_token = Self::get_native_token(env.clone())?;
        let mut results = Vec::new(&env);
        for index in 0..set.targets.len() {
            results.push_back(execution::execute_action(&env, &set, index, &native_token)?);
        }

        events::publish_actions_set_executed(&env, id, &caller, &results);
        Ok(results)
    }

    // ── Cancel ────────────────────────────────────────────────────────────────

    /// Cancel a queued action set. Guardian only.
    pub fn cancel(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        guardian::require_guardian(&env, &caller)?;

        let mut set = actions_set::load(&env, id).ok_or(ContractError::InvalidActionsSetId)?;
        let config = delay::load(&env)?;
        timelock::ensure_cancelable(&set, env.ledger().timestamp(), config.grace_period)?;

        set.canceled = true;
        actions_set::store(&env, id, &set);
        actions_set::clear_queued(&env, &set);

        events::publish_actions_set_canceled(&env, id);
        Ok(())
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn get_current_state(env: Env, id: u64) -> Result<ActionsSetState, ContractError> {
        let set = actions_set::load(&env, id).ok_or(ContractError::InvalidActionsSetId)?;
        let config = delay::load(&env)?;
        Ok(timelock::derive_state(
            &set,
            env.ledger().timestamp(),
            config.grace_period,
        ))
    }

    pub fn get_actions_set_by_id(env: Env, id: u64) -> Result<ActionsSet, ContractError> {
        actions_set::load(&env, id).ok_or(ContractError::InvalidActionsSetId)
    }

    pub fn get_actions_set_count(env: Env) -> u64 {
        actions_set::count(&env)
    }

    pub fn get_delay(env: Env) -> Result<u64, ContractError> {
        Ok(delay::load(&env)?.delay)
    }

    pub fn get_grace_period(env: Env) -> Result<u64, ContractError> {
        Ok(delay::load(&env)?.grace_period)
    }

    pub fn get_minimum_delay(env: Env) -> Result<u64, ContractError> {
        Ok(delay::load(&env)?.minimum_delay)
    }

    pub fn get_maximum_delay(env: Env) -> Result<u64, ContractError> {
        Ok(delay::load(&env)?.maximum_delay)
    }

    pub fn get_guardian(env: Env) -> Result<Address, ContractError> {
        guardian::load(&env)
    }

    pub fn get_trusted_controller(env: Env) -> Result<BytesN<20>, ContractError> {
        origin::load_controller(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_origin_strategy(env: Env) -> Result<OriginStrategy, ContractError> {
        origin::load_strategy(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_native_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&NATIVE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Whether an action with this hash is pending in a queued set.
    /// See [`action_hash`].
    pub fn is_action_queued(env: Env, hash: BytesN<32>) -> bool {
        actions_set::is_queued(&env, &hash)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }
}
