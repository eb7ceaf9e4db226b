//! Deployment-time constants.
//!
//! None of these can be changed after the contract is built. The bounds
//! defaults only seed `initialize`; the administrator may reconfigure them
//! at runtime through the setters on the contract.

/// Number of commits retained by the history ring buffer.
pub const HISTORY_CAPACITY: u32 = 128;

/// Largest accepted value for either percentage limit.
pub const MAX_PERCENT: u32 = 100;

pub const DEFAULT_MAX_UP_PERCENT: u32 = 10;
pub const DEFAULT_MAX_DOWN_PERCENT: u32 = 10;

/// A committed value at or below the cutoff disables the bounds guard.
pub const DEFAULT_BOUNDS_CUTOFF: u128 = 0;

/// Threshold reported by queries before `initialize` has run.
pub const DEFAULT_THRESHOLD: u32 = 1;

const LEDGERS_PER_DAY: u32 = 17_280;

/// Entries whose remaining TTL drops below this are extended on write.
pub const TTL_THRESHOLD: u32 = 7 * LEDGERS_PER_DAY;
pub const TTL_EXTEND_TO: u32 = 30 * LEDGERS_PER_DAY;
