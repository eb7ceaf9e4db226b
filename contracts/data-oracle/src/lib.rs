//! Data Oracle Contract
//!
//! A permissioned oracle for a single tracked quantity. Authorized reporters
//! vote on candidate values; a value is committed once `threshold` distinct
//! reporters agree on it in a row, and only if it stays within the configured
//! percentage deviation from the previously committed value. Committed values
//! are retained in a bounded history.

#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};

pub mod access;
pub mod bounds;
pub mod config;
pub mod consensus;
pub mod error;
pub mod events;
pub mod history;
pub mod storage;

pub use bounds::Bounds;
pub use consensus::{Candidate, ResetReason, VoteOutcome};
pub use error::OracleError;
pub use history::Record;

use config::HISTORY_CAPACITY;
use storage::OracleState;

/// Main contract for the data oracle
#[contract]
pub struct DataOracle;

#[contractimpl]
impl DataOracle {
    /// Initialize the oracle.
    ///
    /// # Arguments
    /// * `admin` - Address allowed to reconfigure the oracle (must authorize)
    /// * `threshold` - Distinct reporters required to commit a value, at least 1
    /// * `reporters` - Addresses granted the reporter capability
    ///
    /// # Events
    /// Emits `init`, then `role_grt` for each newly granted reporter
    pub fn initialize(
        env: Env,
        admin: Address,
        threshold: u32,
        reporters: Vec<Address>,
    ) -> Result<(), OracleError> {
        if storage::is_initialized(&env) {
            return Err(OracleError::AlreadyInitialized);
        }

        admin.require_auth();

        let threshold = validate_threshold(threshold)?;

        access::set_admin(&env, &admin);
        storage::save(&env, &OracleState::new(threshold, Bounds::default()));

        events::initialized(&env, &admin, threshold);

        for reporter in reporters.iter() {
            if access::grant(&env, &reporter) {
                events::role_granted(&env, &reporter);
            }
        }

        Ok(())
    }

    /// Submit a candidate value (reporter only).
    ///
    /// The vote either extends the pending round, resets it, or finalizes it.
    /// A finalized value must pass the bounds guard against the last committed
    /// value; if it does not, the whole call fails with `BoundsViolation` and
    /// the round is left exactly as it was before the call.
    ///
    /// # Events
    /// Emits `voted`, `v_reset` or `updated` depending on the outcome
    pub fn submit(env: Env, reporter: Address, value: u128) -> Result<(), OracleError> {
        let mut state = storage::load(&env)?;
        access::require_reporter(&env, &reporter)?;

        let outcome = consensus::vote(
            &env,
            state.take_candidate(),
            state.threshold,
            &reporter,
            value,
        );

        match outcome {
            VoteOutcome::Pending(candidate) => {
                let count = candidate.voters.len();
                state.set_candidate(candidate);
                storage::save(&env, &state);

                events::voted(&env, &reporter, value, count);
            }
            VoteOutcome::Reset(reason) => {
                storage::save(&env, &state);

                events::vote_reset(&env, &reporter, value, reason);
            }
            VoteOutcome::Finalized(value) => {
                let reference = state.latest.value;
                if let Err(err) = state.bounds.check(value, reference) {
                    log!(&env, "bounds violation", value, reference);
                    return Err(err);
                }

                let record = Record {
                    timestamp: env.ledger().timestamp(),
                    value,
                };
                history::append(&env, &mut state.history, &record);
                state.latest = record;
                storage::save(&env, &state);

                events::data_updated(&env, &record, state.history.count);
            }
        }

        Ok(())
    }

    /// Set the number of distinct reporters required to commit (admin only).
    /// Clears the pending round.
    pub fn set_threshold(env: Env, caller: Address, threshold: u32) -> Result<(), OracleError> {
        access::require_admin(&env, &caller)?;
        let threshold = validate_threshold(threshold)?;

        let mut state = storage::load(&env)?;
        state.threshold = threshold;
        state.clear_candidate();
        storage::save(&env, &state);

        events::threshold_set(&env, threshold);
        Ok(())
    }

    /// Set the maximum relative increase per commit, 0 to 100 (admin only).
    /// Clears the pending round.
    pub fn set_max_up_percent(env: Env, caller: Address, percent: u32) -> Result<(), OracleError> {
        access::require_admin(&env, &caller)?;
        let percent = bounds::validate_percent(percent)?;

        let mut state = storage::load(&env)?;
        state.bounds.max_up_percent = percent;
        state.clear_candidate();
        storage::save(&env, &state);

        events::max_up_set(&env, percent);
        Ok(())
    }

    /// Set the maximum relative decrease per commit, 0 to 100 (admin only).
    /// Clears the pending round.
    pub fn set_max_down_percent(
        env: Env,
        caller: Address,
        percent: u32,
    ) -> Result<(), OracleError> {
        access::require_admin(&env, &caller)?;
        let percent = bounds::validate_percent(percent)?;

        let mut state = storage::load(&env)?;
        state.bounds.max_down_percent = percent;
        state.clear_candidate();
        storage::save(&env, &state);

        events::max_down_set(&env, percent);
        Ok(())
    }

    /// Set the reference value at or below which the bounds guard is
    /// bypassed (admin only). Clears the pending round.
    pub fn set_bounds_cutoff(env: Env, caller: Address, cutoff: u128) -> Result<(), OracleError> {
        access::require_admin(&env, &caller)?;

        let mut state = storage::load(&env)?;
        state.bounds.cutoff = cutoff;
        state.clear_candidate();
        storage::save(&env, &state);

        events::cutoff_set(&env, cutoff);
        Ok(())
    }

    /// Grant the reporter capability (admin only). Idempotent.
    pub fn grant_role(env: Env, caller: Address, reporter: Address) -> Result<(), OracleError> {
        access::require_admin(&env, &caller)?;

        if access::grant(&env, &reporter) {
            events::role_granted(&env, &reporter);
        }
        Ok(())
    }

    /// Revoke the reporter capability (admin only). Idempotent.
    ///
    /// A vote the reporter already cast in the pending round still counts.
    pub fn revoke_role(env: Env, caller: Address, reporter: Address) -> Result<(), OracleError> {
        access::require_admin(&env, &caller)?;

        if access::revoke(&env, &reporter) {
            events::role_revoked(&env, &reporter);
        }
        Ok(())
    }

    /// Hand the administrator capability to `new_admin` (admin only).
    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), OracleError> {
        access::require_admin(&env, &caller)?;

        access::set_admin(&env, &new_admin);

        events::admin_set(&env, &new_admin);
        Ok(())
    }

    // Queries

    /// Last committed value, zero before the first commit.
    pub fn last_value(env: Env) -> u128 {
        storage::load_or_default(&env).latest.value
    }

    /// Last committed `(timestamp, value)` record.
    pub fn last_update(env: Env) -> Record {
        storage::load_or_default(&env).latest
    }

    /// Votes backing the pending candidate, zero when idle.
    pub fn vote_count(env: Env) -> u32 {
        consensus::vote_count(storage::load_or_default(&env).candidate())
    }

    /// Distinct reporters required to commit a value.
    pub fn threshold(env: Env) -> u32 {
        storage::load_or_default(&env).threshold
    }

    /// Reference value at or below which the bounds guard is bypassed.
    pub fn bounds_cutoff(env: Env) -> u128 {
        storage::load_or_default(&env).bounds.cutoff
    }

    /// Maximum relative increase per commit, in percent.
    pub fn max_up_percent(env: Env) -> u32 {
        storage::load_or_default(&env).bounds.max_up_percent
    }

    /// Maximum relative decrease per commit, in percent.
    pub fn max_down_percent(env: Env) -> u32 {
        storage::load_or_default(&env).bounds.max_down_percent
    }

    /// History record by index, 0 being the oldest retained commit.
    ///
    /// # Returns
    /// `IndexOutOfRange` when `index >= historical_count()`
    pub fn historical_data(env: Env, index: u32) -> Result<Record, OracleError> {
        let state = storage::load_or_default(&env);
        history::get(&env, &state.history, index)
    }

    /// Number of retained history records.
    pub fn historical_count(env: Env) -> u32 {
        storage::load_or_default(&env).history.count
    }

    /// Records retained before the oldest is overwritten.
    pub fn history_capacity(_env: Env) -> u32 {
        HISTORY_CAPACITY
    }

    /// Whether `address` currently holds the reporter capability.
    pub fn is_reporter(env: Env, address: Address) -> bool {
        access::has(&env, &address)
    }

    /// Current administrator, `None` before initialization.
    pub fn admin(env: Env) -> Option<Address> {
        access::admin(&env)
    }
}

fn validate_threshold(threshold: u32) -> Result<u32, OracleError> {
    if threshold == 0 {
        return Err(OracleError::InvalidParameter);
    }
    Ok(threshold)
}
