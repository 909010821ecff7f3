//! Action-set records and their append-only registry.

use soroban_sdk::{
    contracttype, symbol_short, xdr::ToXdr, Address, Bytes, BytesN, Env, String, Symbol, Vec,
};

// ── Storage key prefixes ─────────────────────────────────────────────────────

pub(crate) const ACTIONS_CTR: Symbol = symbol_short!("ACT_CTR");
pub(crate) const ACTIONS: Symbol = symbol_short!("ACTIONS");
pub(crate) const QUEUED: Symbol = symbol_short!("QUEUED");

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// A batch of calls queued together under one execution time.
///
/// The five action sequences are index-aligned: action `i` calls
/// `targets[i]`, forwarding `values[i]` of the native token, with the call
/// described by `signatures[i]` and `calldatas[i]`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionsSet {
    pub targets: Vec<Address>,
    /// Native-token amounts moved from the executor to each target first.
    pub values: Vec<i128>,
    /// Function name per action. Empty means the calldata is a complete
    /// XDR-encoded [`EncodedCall`](crate::execution::EncodedCall).
    pub signatures: Vec<String>,
    /// XDR-encoded argument list (`Vec<Val>`) or full call, see `signatures`.
    pub calldatas: Vec<Bytes>,
    /// Whether the target is a payload whose returned calls the executor
    /// applies to itself.
    pub with_delegatecalls: Vec<bool>,
    /// Earliest ledger timestamp at which the set may execute.
    pub execution_time: u64,
    pub executed: bool,
    pub canceled: bool,
}

/// `true` when all five sequences are non-empty and equally long.
pub fn has_consistent_length(
    targets: &Vec<Address>,
    values: &Vec<i128>,
    signatures: &Vec<String>,
    calldatas: &Vec<Bytes>,
    with_delegatecalls: &Vec<bool>,
) -> bool {
    let len = targets.len();
    len > 0
        && values.len() == len
        && signatures.len() == len
        && calldatas.len() == len
        && with_delegatecalls.len() == len
}

/// `true` when every value is non-negative and no value is attached to an
/// action targeting the executor itself, which cannot pay itself.
pub fn has_valid_values(executor: &Address, targets: &Vec<Address>, values: &Vec<i128>) -> bool {
    targets
        .iter()
        .zip(values.iter())
        .all(|(target, value)| value >= 0 && (value == 0 || target != *executor))
}

// ── Registry storage ─────────────────────────────────────────────────────────

/// Number of action sets ever queued. Also the id the next set receives.
pub(crate) fn count(env: &Env) -> u64 {
    env.storage().instance().get(&ACTIONS_CTR).unwrap_or(0u64)
}

/// Reserve the next id. Ids start at 0 and are never reused.
pub(crate) fn next_id(env: &Env) -> u64 {
    let id = count(env);
    env.storage()
        .instance()
        .set(&ACTIONS_CTR, &id.saturating_add(1));
    id
}

fn actions_set_key(id: u64) -> (Symbol, u64) {
    (ACTIONS, id)
}

pub(crate) fn store(env: &Env, id: u64, set: &ActionsSet) {
    let key = actions_set_key(id);
    env.storage().persistent().set(&key, set);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<ActionsSet> {
    env.storage().persistent().get(&actions_set_key(id))
}

// ── Queued-action markers ────────────────────────────────────────────────────

/// Identity of a single action inside its timelock window.
///
/// Two actions with the same hash would be indistinguishable to anyone
/// reviewing the queue, so only one may be pending at a time.
#[allow(clippy::too_many_arguments)]
pub fn action_hash(
    env: &Env,
    target: &Address,
    value: i128,
    signature: &String,
    calldata: &Bytes,
    execution_time: u64,
    with_delegatecall: bool,
) -> BytesN<32> {
    let encoded = (
        target.clone(),
        value,
        signature.clone(),
        calldata.clone(),
        execution_time,
        with_delegatecall,
    )
        .to_xdr(env);
    env.crypto().sha256(&encoded).to_bytes()
}

/// Hashes of every action in `set`, in order.
pub(crate) fn action_hashes(env: &Env, set: &ActionsSet) -> Vec<BytesN<32>> {
    let mut hashes = Vec::new(env);
    for i in 0..set.targets.len() {
        // Lengths were checked at queue time.
        if let (Some(target), Some(value), Some(signature), Some(calldata), Some(delegate)) = (
            set.targets.get(i),
            set.values.get(i),
            set.signatures.get(i),
            set.calldatas.get(i),
            set.with_delegatecalls.get(i),
        ) {
            hashes.push_back(action_hash(
                env,
                &target,
                value,
                &signature,
                &calldata,
                set.execution_time,
                delegate,
            ));
        }
    }
    hashes
}

fn queued_key(hash: &BytesN<32>) -> (Symbol, BytesN<32>) {
    (QUEUED, hash.clone())
}

pub(crate) fn is_queued(env: &Env, hash: &BytesN<32>) -> bool {
    env.storage().persistent().has(&queued_key(hash))
}

pub(crate) fn mark_queued(env: &Env, hash: &BytesN<32>) {
    let key = queued_key(hash);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Release every action hash of `set` so identical actions may be queued again.
pub(crate) fn clear_queued(env: &Env, set: &ActionsSet) {
    for hash in action_hashes(env, set).iter() {
        env.storage().persistent().remove(&queued_key(&hash));
    }
}
