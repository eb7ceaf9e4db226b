#![no_main]

use arbitrary::Arbitrary;
use data_oracle::{DataOracle, DataOracleClient, Record};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::{Address, Env};

/// Reporters granted at initialization; one extra address starts without the role.
const REPORTERS: usize = 4;
const MAX_OPS: usize = 64;

#[derive(Arbitrary, Debug)]
enum Op {
    Submit { reporter: u8, value: u8 },
    SetThreshold(u8),
    SetMaxUp(u8),
    SetMaxDown(u8),
    SetCutoff(u16),
    Grant(u8),
    Revoke(u8),
    Tick(u16),
}

#[derive(Arbitrary, Debug)]
struct Input {
    threshold: u8,
    ops: Vec<Op>,
}

#[derive(Debug, PartialEq)]
struct Snapshot {
    last: Record,
    votes: u32,
    threshold: u32,
    max_up: u32,
    max_down: u32,
    cutoff: u128,
    count: u32,
    reporters: Vec<bool>,
}

fn snapshot(client: &DataOracleClient, addresses: &[Address]) -> Snapshot {
    Snapshot {
        last: client.last_update(),
        votes: client.vote_count(),
        threshold: client.threshold(),
        max_up: client.max_up_percent(),
        max_down: client.max_down_percent(),
        cutoff: client.bounds_cutoff(),
        count: client.historical_count(),
        reporters: addresses.iter().map(|a| client.is_reporter(a)).collect(),
    }
}

fn check_invariants(client: &DataOracleClient, state: &Snapshot) {
    assert!(state.threshold >= 1);
    assert!(state.votes < state.threshold);
    assert!(state.max_up <= 100);
    assert!(state.max_down <= 100);
    assert!(state.count <= client.history_capacity());

    if state.count > 0 {
        assert_eq!(client.historical_data(&(state.count - 1)), state.last);
    }
    assert!(client.try_historical_data(&state.count).is_err());
}

fuzz_target!(|input: Input| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(DataOracle, ());
    let client = DataOracleClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let addresses: Vec<Address> = (0..=REPORTERS).map(|_| Address::generate(&env)).collect();

    let mut reporters = soroban_sdk::Vec::new(&env);
    for address in &addresses[..REPORTERS] {
        reporters.push_back(address.clone());
    }

    let threshold = (input.threshold % REPORTERS as u8) as u32 + 1;
    client.initialize(&admin, &threshold, &reporters);

    for op in input.ops.iter().take(MAX_OPS) {
        let before = snapshot(&client, &addresses);

        let failed = match op {
            Op::Submit { reporter, value } => {
                let who = &addresses[*reporter as usize % addresses.len()];
                // A narrow value range keeps agreement likely.
                let value = 1_000 + (*value % 8) as u128 * 100;
                client.try_submit(who, &value).is_err()
            }
            Op::SetThreshold(n) => client.try_set_threshold(&admin, &(*n as u32 % 6)).is_err(),
            Op::SetMaxUp(p) => client.try_set_max_up_percent(&admin, &(*p as u32)).is_err(),
            Op::SetMaxDown(p) => client.try_set_max_down_percent(&admin, &(*p as u32)).is_err(),
            Op::SetCutoff(c) => client.try_set_bounds_cutoff(&admin, &(*c as u128)).is_err(),
            Op::Grant(i) => {
                let who = &addresses[*i as usize % addresses.len()];
                client.try_grant_role(&admin, who).is_err()
            }
            Op::Revoke(i) => {
                let who = &addresses[*i as usize % addresses.len()];
                client.try_revoke_role(&admin, who).is_err()
            }
            Op::Tick(dt) => {
                env.ledger().with_mut(|li| li.timestamp += *dt as u64);
                false
            }
        };

        let after = snapshot(&client, &addresses);
        if failed {
            assert_eq!(before, after, "failed {:?} changed state", op);
        }
        if after.count > before.count || after.last != before.last {
            assert_eq!(after.votes, 0, "commit left a pending round");
        }
        check_invariants(&client, &after);
    }
});
