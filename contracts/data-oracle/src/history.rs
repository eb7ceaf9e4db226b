//! Bounded history of committed values.
//!
//! Records live in persistent storage under `DataKey::History(slot)` for
//! `slot < HISTORY_CAPACITY`. The write cursor and retained count are kept
//! in [`Ring`], which is part of the oracle state so it is saved together
//! with the commit that appends to it.

use soroban_sdk::{contracttype, Env};

use crate::config::HISTORY_CAPACITY;
use crate::error::OracleError;
use crate::storage::{self, DataKey};

/// One committed value and the ledger timestamp it was committed at.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Record {
    pub timestamp: u64,
    pub value: u128,
}

/// Ring buffer bookkeeping.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Ring {
    /// Slot the next record is written to.
    pub cursor: u32,
    /// Records retained, capped at the capacity.
    pub count: u32,
}

impl Ring {
    /// Claim the slot for a new record, overwriting the oldest one when full.
    pub fn advance(&mut self, capacity: u32) -> u32 {
        let slot = self.cursor;
        self.cursor = (self.cursor + 1) % capacity;
        if self.count < capacity {
            self.count += 1;
        }
        slot
    }

    /// Storage slot of the `index`-th retained record, oldest first.
    pub fn slot_of(&self, index: u32, capacity: u32) -> Option<u32> {
        if index >= self.count {
            return None;
        }
        let oldest = (self.cursor + capacity - self.count) % capacity;
        Some((oldest + index) % capacity)
    }
}

pub fn append(env: &Env, ring: &mut Ring, record: &Record) {
    let key = DataKey::History(ring.advance(HISTORY_CAPACITY));
    env.storage().persistent().set(&key, record);
    storage::bump(env, &key);
}

pub fn get(env: &Env, ring: &Ring, index: u32) -> Result<Record, OracleError> {
    let slot = ring
        .slot_of(index, HISTORY_CAPACITY)
        .ok_or(OracleError::IndexOutOfRange)?;

    env.storage()
        .persistent()
        .get(&DataKey::History(slot))
        .ok_or(OracleError::IndexOutOfRange)
}
