use soroban_sdk::contracterror;

/// Contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum OracleError {
    /// Caller lacks the administrator or reporter capability.
    Unauthorized = 1,
    /// Threshold below one or a percentage outside `0..=100`.
    InvalidParameter = 2,
    /// The finalized value deviates too far from the committed one.
    BoundsViolation = 3,
    /// History lookup past the retained window.
    IndexOutOfRange = 4,
    AlreadyInitialized = 5,
    NotInitialized = 6,
}
