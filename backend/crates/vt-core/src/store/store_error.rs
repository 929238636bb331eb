use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures a credential store can report, independent of its backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transient infrastructure fault; the caller may retry
    #[error("Credential store unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Uniqueness violation (username or email already taken)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// A stored row could not be mapped back into a record
    #[error("Corrupt record: {message} {location}")]
    Corrupt {
        message: String,
        location: ErrorLocation,
    },
}

pub type StoreResult<T> = StdResult<T, StoreError>;
