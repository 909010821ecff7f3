#![no_std]

//! Mock bridge relay.
//!
//! Delivers a message to a receiver contract and reports its L1 sender by
//! prepending a [`RelayedCall`] to the argument list. A real relay only does
//! this after proving the message on L1; this one delivers whatever it is
//! given, which is what tests need to play both honest and forged senders.

use soroban_sdk::{
    contract, contractimpl, xdr::ScErrorCode, xdr::ScErrorType, Address, BytesN, Env, Error,
    IntoVal, Symbol, Val, Vec,
};

use common::{apply_l1_to_l2_alias, L1Address, RelayedCall};

#[contract]
pub struct MessageService;

#[contractimpl]
impl MessageService {
    /// Deliver `function(args)` to `to`, reporting `sender` verbatim.
    pub fn deliver(
        env: Env,
        to: Address,
        sender: L1Address,
        function: Symbol,
        args: Vec<Val>,
    ) -> Result<Val, Error> {
        Self::relay(&env, &to, sender, &function, args)
    }

    /// Deliver `function(args)` to `to` the way aliasing bridges do: the
    /// reported sender is the L2 alias of `l1_sender`.
    pub fn deliver_aliased(
        env: Env,
        to: Address,
        l1_sender: BytesN<20>,
        function: Symbol,
        args: Vec<Val>,
    ) -> Result<Val, Error> {
        let aliased = apply_l1_to_l2_alias(&env, &l1_sender);
        Self::relay(&env, &to, aliased, &function, args)
    }

    fn relay(
        env: &Env,
        to: &Address,
        sender: L1Address,
        function: &Symbol,
        args: Vec<Val>,
    ) -> Result<Val, Error> {
        let call = RelayedCall {
            relay: env.current_contract_address(),
            sender,
        };
        let mut full_args = args;
        full_args.push_front(call.into_val(env));

        match env.try_invoke_contract::<Val, Error>(to, function, full_args) {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err)) => Err(err.into()),
            Err(Ok(err)) => Err(err),
            Err(Err(_)) => Err(Error::from_type_and_code(
                ScErrorType::Context,
                ScErrorCode::InvalidAction,
            )),
        }
    }
}
