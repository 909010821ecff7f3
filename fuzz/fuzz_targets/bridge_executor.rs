#![no_main]

use arbitrary::Arbitrary;
use bridge_executor::{ActionsSetState, BridgeExecutor, BridgeExecutorClient, OriginStrategy};
use greeter::Greeter;
use libfuzzer_sys::fuzz_target;
use message_service::{MessageService, MessageServiceClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    vec,
    xdr::ToXdr,
    Address, Bytes, BytesN, Env, IntoVal, String, Symbol, Val, Vec,
};

const DELAY: u64 = 60;
const GRACE: u64 = 600;

/// Actions covering every state-changing executor entry point.
///
/// Queue payloads are partly raw so malformed signatures and calldata reach
/// execution; they must fail cleanly, never corrupt the registry.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Queue {
        trusted: bool,
        message: u8,
        raw_signature: Option<std::string::String>,
        raw_calldata: Option<std::vec::Vec<u8>>,
        value: u8,
        delegate: bool,
    },
    Execute { id: u8 },
    Cancel { id: u8, as_guardian: bool },
    AdvanceTime { delta: u16 },
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000_000);

    let relay_id = env.register(MessageService, ());
    let relay = MessageServiceClient::new(&env, &relay_id);
    let greeter_id = env.register(Greeter, ());
    let guardian = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let controller = BytesN::from_array(&env, &[0x5a; 20]);
    let stranger = BytesN::from_array(&env, &[0x11; 20]);

    let contract_id = env.register(BridgeExecutor, ());
    let client = BridgeExecutorClient::new(&env, &contract_id);
    if client
        .try_initialize(
            &OriginStrategy::ExplicitSender(relay_id.clone()),
            &controller,
            &DELAY,
            &GRACE,
            &1u64,
            &(DELAY * 2),
            &guardian,
            &token,
        )
        .is_err()
    {
        return;
    }
    soroban_sdk::token::StellarAssetClient::new(&env, &token).mint(&contract_id, &1_000i128);

    let queue = Symbol::new(&env, "queue");
    let mut previous_count = 0u64;

    for action in actions {
        match action {
            FuzzAction::Queue {
                trusted,
                message,
                raw_signature,
                raw_calldata,
                value,
                delegate,
            } => {
                let signature = match &raw_signature {
                    Some(raw) => String::from_str(&env, raw),
                    None => String::from_str(&env, "set_message"),
                };
                let calldata = match &raw_calldata {
                    Some(raw) => Bytes::from_slice(&env, raw),
                    None => {
                        let text = std::format!("msg-{}", message);
                        let args: Vec<Val> =
                            vec![&env, String::from_str(&env, &text).into_val(&env)];
                        args.to_xdr(&env)
                    }
                };
                let args: Vec<Val> = vec![
                    &env,
                    vec![&env, greeter_id.clone()].into_val(&env),
                    vec![&env, value as i128].into_val(&env),
                    vec![&env, signature].into_val(&env),
                    vec![&env, calldata].into_val(&env),
                    vec![&env, delegate].into_val(&env),
                ];
                let sender = if trusted { &controller } else { &stranger };
                let _ = relay.try_deliver(&contract_id, sender, &queue, &args);
            }
            FuzzAction::Execute { id } => {
                let _ = client.try_execute(&Address::generate(&env), &(id as u64));
            }
            FuzzAction::Cancel { id, as_guardian } => {
                let caller = if as_guardian {
                    guardian.clone()
                } else {
                    Address::generate(&env)
                };
                let _ = client.try_cancel(&caller, &(id as u64));
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        let count = client.get_actions_set_count();
        assert!(
            count == previous_count || count == previous_count + 1,
            "INVARIANT VIOLATION: count moved {} -> {}",
            previous_count,
            count
        );
        previous_count = count;

        let now = env.ledger().timestamp();
        for id in 0..count {
            let set = client.get_actions_set_by_id(&id);
            assert!(
                !(set.executed && set.canceled),
                "INVARIANT VIOLATION: set {} executed and canceled",
                id
            );
            let expected = if set.canceled {
                ActionsSetState::Canceled
            } else if set.executed {
                ActionsSetState::Executed
            } else if now > set.execution_time + GRACE {
                ActionsSetState::Expired
            } else {
                ActionsSetState::Queued
            };
            assert_eq!(client.get_current_state(&id), expected, "set {}", id);
        }
        assert_eq!(client.get_delay(), DELAY, "INVARIANT VIOLATION: delay changed");
    }
});
