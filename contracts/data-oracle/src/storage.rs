//! Storage layout and the oracle state snapshot.
//!
//! Every operation loads [`OracleState`] once, works on the local copy and
//! saves it once at the end. An operation that fails returns before `save`,
//! so no partial update is ever written.

use soroban_sdk::{contracttype, Address, Env};

use crate::bounds::Bounds;
use crate::config::{DEFAULT_THRESHOLD, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::consensus::Candidate;
use crate::error::OracleError;
use crate::history::{Record, Ring};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Instance: the [`OracleState`] singleton.
    State,
    /// Instance: administrator address.
    Admin,
    /// Persistent: reporter capability flag.
    Reporter(Address),
    /// Persistent: history ring slot.
    History(u32),
}

/// In-flight voting round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Round {
    Idle,
    Pending(Candidate),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleState {
    /// Last committed value and its commit timestamp.
    pub latest: Record,
    pub threshold: u32,
    pub bounds: Bounds,
    pub round: Round,
    pub history: Ring,
}

impl OracleState {
    pub fn new(threshold: u32, bounds: Bounds) -> Self {
        OracleState {
            latest: Record::default(),
            threshold,
            bounds,
            round: Round::Idle,
            history: Ring::default(),
        }
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match &self.round {
            Round::Idle => None,
            Round::Pending(candidate) => Some(candidate),
        }
    }

    /// Move the pending candidate out, leaving the round idle.
    pub fn take_candidate(&mut self) -> Option<Candidate> {
        match core::mem::replace(&mut self.round, Round::Idle) {
            Round::Idle => None,
            Round::Pending(candidate) => Some(candidate),
        }
    }

    pub fn set_candidate(&mut self, candidate: Candidate) {
        self.round = Round::Pending(candidate);
    }

    /// Drop any in-flight round. Called on every admin reconfiguration.
    pub fn clear_candidate(&mut self) {
        self.round = Round::Idle;
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::State)
}

pub fn load(env: &Env) -> Result<OracleState, OracleError> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(OracleError::NotInitialized)
}

/// State for read-only queries, defaults before initialization.
pub fn load_or_default(env: &Env) -> OracleState {
    load(env).unwrap_or_else(|_| OracleState::new(DEFAULT_THRESHOLD, Bounds::default()))
}

pub fn save(env: &Env, state: &OracleState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

/// Keep the contract instance, and with it the state and admin, live.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Keep a persistent entry live alongside the instance.
pub fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DataOracle;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::vec;

    #[test]
    fn test_pending_round_survives_save_and_load() {
        let env = Env::default();
        let contract_id = env.register(DataOracle, ());
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        let mut state = OracleState::new(3, Bounds::default());
        state.set_candidate(Candidate {
            value: 42,
            voters: vec![&env, a, b],
        });

        env.as_contract(&contract_id, || {
            save(&env, &state);
            let loaded = load(&env).unwrap();
            assert_eq!(loaded, state);
            assert_eq!(loaded.candidate().map(|c| c.voters.len()), Some(2));
        });
    }

    #[test]
    fn test_take_candidate_leaves_round_idle() {
        let env = Env::default();
        let a = Address::generate(&env);

        let mut state = OracleState::new(2, Bounds::default());
        assert_eq!(state.take_candidate(), None);

        let candidate = Candidate {
            value: 7,
            voters: vec![&env, a],
        };
        state.set_candidate(candidate.clone());
        assert_eq!(state.candidate(), Some(&candidate));

        assert_eq!(state.take_candidate(), Some(candidate));
        assert_eq!(state.round, Round::Idle);
        assert_eq!(state.candidate(), None);
    }

    #[test]
    fn test_clear_candidate() {
        let env = Env::default();
        let a = Address::generate(&env);

        let mut state = OracleState::new(2, Bounds::default());
        state.set_candidate(Candidate {
            value: 7,
            voters: vec![&env, a],
        });
        state.clear_candidate();
        assert_eq!(state.round, Round::Idle);
    }
}
