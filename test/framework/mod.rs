//! # Bridge Executor Testing Framework
//!
//! A reusable testing harness for the bridge executor supporting
//! property-based testing, invariant checking, state exploration, and a
//! declarative scenario DSL.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             - Core TestEnv, ExecutorTestHarness, snapshots
//! ├── generators.rs      - Property-based test value generators
//! ├── invariants.rs      - State invariant definitions & verification
//! ├── state_explorer.rs  - Systematic state-space exploration
//! └── scenario_dsl.rs    - Declarative test scenario builder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{ExecutorTestHarness, TestEnv};
//!
//! let mut env = TestEnv::new();
//! let harness = ExecutorTestHarness::new(&mut env, ExecutorConfig::default());
//! let id = harness.queue_greeting("hello").unwrap();
//! harness.env.advance_time(harness.config.delay);
//! harness.execute(id).unwrap();
//! ```

extern crate std;


use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec,
    xdr::ToXdr,
    Address, Bytes, BytesN, Env, Error, IntoVal, String, Symbol, TryFromVal, Val, Vec,
};

use bridge_executor::{
    ActionsSetState, BridgeExecutor, BridgeExecutorClient, OriginStrategy,
};
use generators::Mutation;
use greeter::{Greeter, GreeterClient};
use message_service::{MessageService, MessageServiceClient};

/// Ledger time every harness starts at.
pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000;

// ── Core Test Environment ────────────────────────────────────────────────────

/// A high-level test environment that wraps the Soroban `Env` and provides
/// contract deployment, time control, and address management.
pub struct TestEnv {
    pub env: Env,
    generated_addresses: std::vec::Vec<Address>,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(GENESIS_TIMESTAMP);
        Self {
            env,
            generated_addresses: std::vec::Vec::new(),
        }
    }

    /// Generate a fresh Soroban address (cached for re-use).
    pub fn generate_address(&mut self) -> Address {
        let addr = Address::generate(&self.env);
        self.generated_addresses.push(addr.clone());
        addr
    }

    /// Generate `n` distinct addresses.
    pub fn generate_addresses(&mut self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    /// Set the ledger timestamp.
    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    /// Current ledger timestamp.
    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deploy a SAC token contract and return its address.
    pub fn deploy_token(&self) -> Address {
        self.env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address()
    }

    /// Mint tokens from a SAC token to a recipient.
    pub fn mint_tokens(&self, token: &Address, recipient: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(recipient, &amount);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Executor Harness ─────────────────────────────────────────────────────────

/// Timelock parameters used to initialize a harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub delay: u64,
    pub grace_period: u64,
    pub minimum_delay: u64,
    pub maximum_delay: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            delay: 50,
            grace_period: 1_000,
            minimum_delay: 1,
            maximum_delay: 100,
        }
    }
}

/// Pre-wired executor fixture: executor, mock relay, greeter target and
/// native token, initialized with the explicit-sender strategy.
pub struct ExecutorTestHarness<'a> {
    pub env: &'a mut TestEnv,
    pub client: BridgeExecutorClient<'static>,
    pub contract_id: Address,
    pub relay: MessageServiceClient<'static>,
    pub relay_id: Address,
    pub greeter: GreeterClient<'static>,
    pub greeter_id: Address,
    pub controller: BytesN<20>,
    pub guardian: Address,
    pub native_token: Address,
    pub config: ExecutorConfig,
}

impl<'a> ExecutorTestHarness<'a> {
    /// Deploy and initialize an executor with the given timelock parameters.
    pub fn new(env: &'a mut TestEnv, config: ExecutorConfig) -> Self {
        let contract_id = env.env.register(BridgeExecutor, ());
        let relay_id = env.env.register(MessageService, ());
        let greeter_id = env.env.register(Greeter, ());
        let native_token = env.deploy_token();
        let guardian = env.generate_address();
        let controller = BytesN::from_array(&env.env, &[0x5a; 20]);

        let client = BridgeExecutorClient::new(&env.env, &contract_id);
        client.initialize(
            &OriginStrategy::ExplicitSender(relay_id.clone()),
            &controller,
            &config.delay,
            &config.grace_period,
            &config.minimum_delay,
            &config.maximum_delay,
            &guardian,
            &native_token,
        );

        Self {
            relay: MessageServiceClient::new(&env.env, &relay_id),
            greeter: GreeterClient::new(&env.env, &greeter_id),
            env,
            client,
            contract_id,
            relay_id,
            greeter_id,
            controller,
            guardian,
            native_token,
            config,
        }
    }

    /// Queue arguments for a single `set_message(message)` action.
    pub fn greeting_args(&self, message: &str) -> Vec<Val> {
        let env = &self.env.env;
        let calldata: Vec<Val> = vec![env, String::from_str(env, message).into_val(env)];
        let call_args: Bytes = calldata.to_xdr(env);
        vec![
            env,
            vec![env, self.greeter_id.clone()].into_val(env),
            vec![env, 0i128].into_val(env),
            vec![env, String::from_str(env, "set_message")].into_val(env),
            vec![env, call_args].into_val(env),
            vec![env, false].into_val(env),
        ]
    }

    /// Queue a greeting through the relay as the trusted controller.
    ///
    /// Returns the new id, or the executor's error code.
    pub fn queue_greeting(&self, message: &str) -> Result<u64, u32> {
        self.queue_greeting_from(&self.controller.clone(), message)
    }

    /// Queue a greeting through the relay with an arbitrary reported sender.
    pub fn queue_greeting_from(&self, sender: &BytesN<20>, message: &str) -> Result<u64, u32> {
        self.deliver_queue(sender, &self.greeting_args(message))
    }

    /// Deliver raw `queue` arguments (the five action arrays) through the
    /// relay with the given reported sender.
    pub fn deliver_queue(&self, sender: &BytesN<20>, args: &Vec<Val>) -> Result<u64, u32> {
        let env = &self.env.env;
        let result =
            self.relay
                .try_deliver(&self.contract_id, sender, &Symbol::new(env, "queue"), args);
        match result {
            Ok(Ok(val)) => u64::try_from_val(env, &val).map_err(|_| u32::MAX),
            Err(Ok(err)) => Err(contract_code(&err)),
            _ => Err(u32::MAX),
        }
    }

    /// Deliver a `hello` greeting with `mutation` applied.
    pub fn deliver_mutated(&self, mutation: &Mutation) -> Result<u64, u32> {
        let env = &self.env.env;
        match mutation {
            Mutation::ForeignSender => {
                self.queue_greeting_from(&BytesN::from_array(env, &[0x11; 20]), "hello")
            }
            Mutation::TruncateCalldata => {
                let mut args = self.greeting_args("hello");
                args.set(3, Vec::<Bytes>::new(env).into_val(env));
                self.deliver_queue(&self.controller, &args)
            }
            Mutation::EmptyBatch => {
                let empty: Val = Vec::<Val>::new(env).into_val(env);
                let mut args = Vec::new(env);
                for _ in 0..5 {
                    args.push_back(empty);
                }
                self.deliver_queue(&self.controller, &args)
            }
            Mutation::Replay => {
                self.queue_greeting("hello")?;
                self.queue_greeting("hello")
            }
        }
    }

    /// Execute an action set as a fresh caller.
    pub fn execute(&self, id: u64) -> Result<(), u32> {
        let caller = Address::generate(&self.env.env);
        match self.client.try_execute(&caller, &id) {
            Ok(_) => Ok(()),
            Err(Ok(e)) => Err(e as u32),
            Err(Err(_)) => Err(u32::MAX),
        }
    }

    /// Cancel an action set, as the guardian or as a stranger.
    pub fn cancel(&self, id: u64, as_guardian: bool) -> Result<(), u32> {
        let caller = if as_guardian {
            self.guardian.clone()
        } else {
            Address::generate(&self.env.env)
        };
        match self.client.try_cancel(&caller, &id) {
            Ok(_) => Ok(()),
            Err(Ok(e)) => Err(e as u32),
            Err(Err(_)) => Err(u32::MAX),
        }
    }

    /// Number of action sets ever queued.
    pub fn count(&self) -> u64 {
        self.client.get_actions_set_count()
    }

    /// Current greeter message.
    pub fn message(&self) -> std::string::String {
        let message = self.greeter.message();
        let mut buf = std::vec![0u8; message.len() as usize];
        message.copy_into_slice(&mut buf);
        std::string::String::from_utf8(buf).unwrap_or_default()
    }

    /// Snapshot of all observable executor state for invariant checking.
    pub fn snapshot(&self) -> ExecutorSnapshot {
        let count = self.count();
        let sets = (0..count)
            .map(|id| {
                let set = self.client.get_actions_set_by_id(&id);
                SetView {
                    id,
                    state: self.client.get_current_state(&id),
                    execution_time: set.execution_time,
                    executed: set.executed,
                    canceled: set.canceled,
                }
            })
            .collect();

        ExecutorSnapshot {
            timestamp: self.env.timestamp(),
            delay: self.client.get_delay(),
            grace_period: self.client.get_grace_period(),
            minimum_delay: self.client.get_minimum_delay(),
            maximum_delay: self.client.get_maximum_delay(),
            count,
            sets,
        }
    }
}

/// Code carried by a contract error relayed back through the mock relay.
pub fn contract_code(err: &Error) -> u32 {
    err.get_code()
}

/// Observable view of one action set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetView {
    pub id: u64,
    pub state: ActionsSetState,
    pub execution_time: u64,
    pub executed: bool,
    pub canceled: bool,
}

/// Immutable snapshot of executor state at a point in time.
#[derive(Debug, Clone)]
pub struct ExecutorSnapshot {
    pub timestamp: u64,
    pub delay: u64,
    pub grace_period: u64,
    pub minimum_delay: u64,
    pub maximum_delay: u64,
    pub count: u64,
    pub sets: std::vec::Vec<SetView>,
}

impl ExecutorSnapshot {
    pub fn set(&self, id: u64) -> Option<&SetView> {
        self.sets.iter().find(|s| s.id == id)
    }

    /// Number of sets currently in `state`.
    pub fn count_in(&self, state: ActionsSetState) -> usize {
        self.sets.iter().filter(|s| s.state == state).count()
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action, used by the state explorer and scenario DSL.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The action succeeded.
    Ok,
    /// The action failed with a contract error code.
    ExpectedError(u32),
    /// The action failed unexpectedly.
    UnexpectedError(std::string::String),
}

impl ActionOutcome {
    pub fn from_code(result: Result<(), u32>) -> Self {
        match result {
            Ok(()) => ActionOutcome::Ok,
            Err(u32::MAX) => ActionOutcome::UnexpectedError("host error".into()),
            Err(code) => ActionOutcome::ExpectedError(code),
        }
    }
}

/// Summary of a test run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
    pub transitions_observed: usize,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
            transitions_observed: 0,
        }
    }

    /// True when no invariant violations were detected.
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    /// Coverage ratio: entry points hit / total known entry points.
    pub fn entry_point_coverage(&self, total_entry_points: usize) -> f64 {
        if total_entry_points == 0 {
            return 0.0;
        }
        self.entry_points_hit.len() as f64 / total_entry_points as f64
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
