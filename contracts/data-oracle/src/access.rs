//! Administrator and reporter capabilities.
//!
//! The guards authenticate the acting address with `require_auth` and then
//! check its capability, returning `Unauthorized` instead of aborting.

use soroban_sdk::{Address, Env};

use crate::error::OracleError;
use crate::storage::{self, DataKey};

pub fn admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    storage::bump_instance(env);
}

pub fn require_admin(env: &Env, caller: &Address) -> Result<(), OracleError> {
    let admin = admin(env).ok_or(OracleError::NotInitialized)?;

    caller.require_auth();

    if *caller != admin {
        return Err(OracleError::Unauthorized);
    }

    Ok(())
}

pub fn require_reporter(env: &Env, caller: &Address) -> Result<(), OracleError> {
    caller.require_auth();

    if !has(env, caller) {
        return Err(OracleError::Unauthorized);
    }
    storage::bump(env, &DataKey::Reporter(caller.clone()));

    Ok(())
}

pub fn has(env: &Env, reporter: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Reporter(reporter.clone()))
        .unwrap_or(false)
}

/// Grant the reporter capability. Returns whether membership changed.
pub fn grant(env: &Env, reporter: &Address) -> bool {
    if has(env, reporter) {
        return false;
    }
    let key = DataKey::Reporter(reporter.clone());
    env.storage().persistent().set(&key, &true);
    storage::bump(env, &key);
    true
}

/// Revoke the reporter capability. Returns whether membership changed.
pub fn revoke(env: &Env, reporter: &Address) -> bool {
    if !has(env, reporter) {
        return false;
    }
    env.storage()
        .persistent()
        .remove(&DataKey::Reporter(reporter.clone()));
    true
}
