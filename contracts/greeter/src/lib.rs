#![no_std]

//! Minimal target contract for exercising the bridge executor.

use soroban_sdk::{contract, contracterror, contractimpl, symbol_short, Env, String, Symbol};

const MESSAGE: Symbol = symbol_short!("MESSAGE");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum GreeterError {
    AlwaysFails = 1,
}

#[contract]
pub struct Greeter;

#[contractimpl]
impl Greeter {
    /// Store `message` and return it.
    pub fn set_message(env: Env, message: String) -> String {
        env.storage().instance().set(&MESSAGE, &message);
        message
    }

    pub fn message(env: Env) -> String {
        env.storage()
            .instance()
            .get(&MESSAGE)
            .unwrap_or_else(|| String::from_str(&env, ""))
    }

    pub fn fail(_env: Env) -> Result<(), GreeterError> {
        Err(GreeterError::AlwaysFails)
    }
}
