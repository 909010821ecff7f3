//! Cross-domain origin authentication.
//!
//! A relayed call is only privileged if it provably comes from the trusted
//! controller on L1. How that is proven depends on the bridge family, so the
//! registry talks to a [`CrossDomainAuthenticator`] and never inspects the
//! strategy itself.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use common::{apply_l1_to_l2_alias, undo_l1_to_l2_alias, L1Address, RelayedCall};

pub(crate) const ORIGIN: Symbol = symbol_short!("ORIGIN");
pub(crate) const CONTROLLER: Symbol = symbol_short!("CTRL");

/// Decides whether a relayed call originates from the trusted controller.
pub trait CrossDomainAuthenticator {
    fn is_authorized_origin(&self, env: &Env, call: &RelayedCall, controller: &L1Address) -> bool;

    /// The L1 address behind the sender reported in `call`.
    fn original_sender(&self, env: &Env, call: &RelayedCall) -> L1Address;
}

/// Supported bridge families, fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OriginStrategy {
    /// The relay reports the L1 sender verbatim.
    ExplicitSender(Address),
    /// The inbox reports the sender in its aliased L2 form.
    AddressAliasing(Address),
}

impl OriginStrategy {
    pub fn relay(&self) -> &Address {
        match self {
            OriginStrategy::ExplicitSender(relay) | OriginStrategy::AddressAliasing(relay) => relay,
        }
    }

    /// Same strategy, different relay contract.
    pub fn with_relay(&self, relay: Address) -> OriginStrategy {
        match self {
            OriginStrategy::ExplicitSender(_) => OriginStrategy::ExplicitSender(relay),
            OriginStrategy::AddressAliasing(_) => OriginStrategy::AddressAliasing(relay),
        }
    }
}

impl CrossDomainAuthenticator for OriginStrategy {
    fn is_authorized_origin(&self, env: &Env, call: &RelayedCall, controller: &L1Address) -> bool {
        if call.relay != *self.relay() {
            return false;
        }
        // Satisfied implicitly when the relay contract is the direct invoker.
        call.relay.require_auth();

        match self {
            OriginStrategy::ExplicitSender(_) => call.sender == *controller,
            OriginStrategy::AddressAliasing(_) => {
                call.sender == apply_l1_to_l2_alias(env, controller)
            }
        }
    }

    fn original_sender(&self, env: &Env, call: &RelayedCall) -> L1Address {
        match self {
            OriginStrategy::ExplicitSender(_) => call.sender.clone(),
            OriginStrategy::AddressAliasing(_) => undo_l1_to_l2_alias(env, &call.sender),
        }
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub(crate) fn load_strategy(env: &Env) -> Option<OriginStrategy> {
    env.storage().instance().get(&ORIGIN)
}

pub(crate) fn store_strategy(env: &Env, strategy: &OriginStrategy) {
    env.storage().instance().set(&ORIGIN, strategy);
}

pub(crate) fn load_controller(env: &Env) -> Option<L1Address> {
    env.storage().instance().get(&CONTROLLER)
}

pub(crate) fn store_controller(env: &Env, controller: &L1Address) {
    env.storage().instance().set(&CONTROLLER, controller);
}
