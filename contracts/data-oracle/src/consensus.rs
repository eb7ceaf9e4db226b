//! Threshold voting over a single in-flight candidate.
//!
//! The round is either idle (`None`) or pending with a candidate value and
//! the distinct reporters backing it. A vote either extends the round,
//! finalizes it once `threshold` reporters agree, or discards it when a
//! reporter repeats itself or a new reporter disagrees. A discarding vote is
//! never carried into a fresh round.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub value: u128,
    /// Pairwise distinct, always fewer than the threshold.
    pub voters: Vec<Address>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResetReason {
    /// The reporter had already voted for the pending candidate.
    RepeatVoter,
    /// A new reporter voted for a different value.
    Disagreement,
}

impl ResetReason {
    pub fn symbol(&self) -> Symbol {
        match self {
            ResetReason::RepeatVoter => symbol_short!("repeat"),
            ResetReason::Disagreement => symbol_short!("dissent"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VoteOutcome {
    /// The round continues with the returned candidate.
    Pending(Candidate),
    /// Enough reporters agreed; the value is ready for the bounds guard.
    Finalized(u128),
    /// The round was discarded and the engine is idle again.
    Reset(ResetReason),
}

/// Apply one reporter vote to the current round.
///
/// The caller has already checked the reporter capability and guarantees
/// `threshold >= 1`.
pub fn vote(
    env: &Env,
    candidate: Option<Candidate>,
    threshold: u32,
    reporter: &Address,
    value: u128,
) -> VoteOutcome {
    let mut candidate = match candidate {
        None => Candidate {
            value,
            voters: Vec::new(env),
        },
        Some(current) => {
            if current.voters.contains(reporter) {
                return VoteOutcome::Reset(ResetReason::RepeatVoter);
            }
            if current.value != value {
                return VoteOutcome::Reset(ResetReason::Disagreement);
            }
            current
        }
    };

    candidate.voters.push_back(reporter.clone());

    if candidate.voters.len() >= threshold {
        VoteOutcome::Finalized(candidate.value)
    } else {
        VoteOutcome::Pending(candidate)
    }
}

/// Number of votes backing the candidate, zero when idle.
pub fn vote_count(candidate: Option<&Candidate>) -> u32 {
    candidate.map_or(0, |c| c.voters.len())
}
