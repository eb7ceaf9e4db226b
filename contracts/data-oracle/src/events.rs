//! Contract events.
//!
//! Publishing always happens after the last fallible step of an operation,
//! so a failed call emits nothing.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::consensus::ResetReason;
use crate::history::Record;

pub const INITIALIZED: Symbol = symbol_short!("init");
pub const DATA_UPDATED: Symbol = symbol_short!("updated");
pub const VOTED: Symbol = symbol_short!("voted");
pub const VOTE_RESET: Symbol = symbol_short!("v_reset");
pub const THRESHOLD_SET: Symbol = symbol_short!("thresh");
pub const MAX_UP_SET: Symbol = symbol_short!("max_up");
pub const MAX_DOWN_SET: Symbol = symbol_short!("max_down");
pub const CUTOFF_SET: Symbol = symbol_short!("cutoff");
pub const ROLE_GRANTED: Symbol = symbol_short!("role_grt");
pub const ROLE_REVOKED: Symbol = symbol_short!("role_rev");
pub const ADMIN_SET: Symbol = symbol_short!("adm_set");

pub fn initialized(env: &Env, admin: &Address, threshold: u32) {
    env.events()
        .publish((INITIALIZED,), (admin.clone(), threshold));
}

/// `historical_count` is the retained count after the append.
pub fn data_updated(env: &Env, record: &Record, historical_count: u32) {
    env.events().publish(
        (DATA_UPDATED,),
        (record.timestamp, record.value, historical_count),
    );
}

pub fn voted(env: &Env, reporter: &Address, value: u128, vote_count: u32) {
    env.events()
        .publish((VOTED,), (reporter.clone(), value, vote_count));
}

pub fn vote_reset(env: &Env, reporter: &Address, value: u128, reason: ResetReason) {
    env.events()
        .publish((VOTE_RESET,), (reporter.clone(), value, reason.symbol()));
}

pub fn threshold_set(env: &Env, threshold: u32) {
    env.events().publish((THRESHOLD_SET,), (threshold,));
}

pub fn max_up_set(env: &Env, percent: u32) {
    env.events().publish((MAX_UP_SET,), (percent,));
}

pub fn max_down_set(env: &Env, percent: u32) {
    env.events().publish((MAX_DOWN_SET,), (percent,));
}

pub fn cutoff_set(env: &Env, cutoff: u128) {
    env.events().publish((CUTOFF_SET,), (cutoff,));
}

pub fn role_granted(env: &Env, reporter: &Address) {
    env.events().publish((ROLE_GRANTED,), (reporter.clone(),));
}

pub fn role_revoked(env: &Env, reporter: &Address) {
    env.events().publish((ROLE_REVOKED,), (reporter.clone(),));
}

pub fn admin_set(env: &Env, admin: &Address) {
    env.events().publish((ADMIN_SET,), (admin.clone(),));
}
