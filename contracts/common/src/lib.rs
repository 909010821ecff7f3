//! Shared cross-domain primitives for the bridge executor workspace.
//!
//! This crate provides:
//! - [`L1Address`] - the 20-byte account identifier used on the originating
//!   (EVM) domain.
//! - [`RelayedCall`] - the context a bridge relay attaches to every message
//!   it delivers on this ledger.
//! - [`aliasing`] - the L1 → L2 address-aliasing transform used by bridges
//!   that do not report the original sender explicitly.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::{contracttype, Address, BytesN};

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod aliasing;

pub use aliasing::*;

// ── Cross-domain types ───────────────────────────────────────────────────────

/// Account identifier on the originating domain (a 160-bit EVM address).
pub type L1Address = BytesN<20>;

/// Context attached by a bridge relay to a delivered message.
///
/// Soroban does not allow a contract to be re-entered, so the receiver cannot
/// call back into the relay to ask who sent the message while the relay is
/// still on the call stack. The relay instead passes this record as the first
/// argument of the delivered call and authorizes the invocation with its own
/// address, which lets the receiver verify that `relay` really is the invoker.
///
/// * `relay`  - address of the relay contract delivering the message.
/// * `sender` - the message sender as reported by the relay. Explicit-sender
///              bridges report the L1 address itself; aliasing bridges report
///              the aliased L2 form.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelayedCall {
    pub relay: Address,
    pub sender: L1Address,
}
