//! Timelock delay policy.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::ContractError;

pub(crate) const DELAY_CFG: Symbol = symbol_short!("DELAY_CFG");

/// Lower bound on the grace period: 10 minutes.
pub const MINIMUM_GRACE_PERIOD: u64 = 600;

/// Timelock configuration, all values in seconds.
///
/// `minimum_delay ≤ delay ≤ maximum_delay` and
/// `grace_period ≥ MINIMUM_GRACE_PERIOD` hold after every successful write.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DelayConfig {
    pub delay: u64,
    pub grace_period: u64,
    pub minimum_delay: u64,
    pub maximum_delay: u64,
}

impl DelayConfig {
    /// Build the initial configuration, rejecting any inconsistent bound.
    pub fn new(
        delay: u64,
        grace_period: u64,
        minimum_delay: u64,
        maximum_delay: u64,
    ) -> Result<Self, ContractError> {
        let config = DelayConfig {
            delay,
            grace_period,
            minimum_delay,
            maximum_delay,
        };
        if grace_period < MINIMUM_GRACE_PERIOD || !config.is_within_bounds(delay) {
            return Err(ContractError::InvalidInitParams);
        }
        Ok(config)
    }

    pub fn is_within_bounds(&self, delay: u64) -> bool {
        self.minimum_delay <= delay && delay <= self.maximum_delay
    }

    pub fn with_delay(self, delay: u64) -> Result<Self, ContractError> {
        if !self.is_within_bounds(delay) {
            return Err(ContractError::InvalidDelayBounds);
        }
        Ok(DelayConfig { delay, ..self })
    }

    /// A new minimum must not exceed the current delay.
    pub fn with_minimum_delay(self, minimum_delay: u64) -> Result<Self, ContractError> {
        if minimum_delay > self.delay {
            return Err(ContractError::InvalidDelayBounds);
        }
        Ok(DelayConfig {
            minimum_delay,
            ..self
        })
    }

    /// A new maximum must not fall below the current delay.
    pub fn with_maximum_delay(self, maximum_delay: u64) -> Result<Self, ContractError> {
        if maximum_delay < self.delay {
            return Err(ContractError::InvalidDelayBounds);
        }
        Ok(DelayConfig {
            maximum_delay,
            ..self
        })
    }

    pub fn with_grace_period(self, grace_period: u64) -> Result<Self, ContractError> {
        if grace_period < MINIMUM_GRACE_PERIOD {
            return Err(ContractError::GracePeriodTooShort);
        }
        Ok(DelayConfig {
            grace_period,
            ..self
        })
    }
}

pub(crate) fn load(env: &Env) -> Result<DelayConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DELAY_CFG)
        .ok_or(ContractError::NotInitialized)
}

pub(crate) fn store(env: &Env, config: &DelayConfig) {
    env.storage().instance().set(&DELAY_CFG, config);
}
