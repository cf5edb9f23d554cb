//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (`GridError`, `SetupError`) live next to the code
//! that raises them. [`PartyError`] covers precondition violations by the
//! orchestration layer: intents that a well-behaved caller never issues.
//!
//! Illegal-but-expected player intents are not errors. They come back as
//! [`crate::ActionOutcome::Rejected`].

use crate::state::PlayerId;

/// Severity level of an error, used for logging and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input; reject without retry.
    Validation,

    /// Caller broke a contract of this crate. Indicates a bug upstream.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Precondition violations reported by [`crate::Party`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    #[error("no fight is in progress")]
    NoActiveFight,

    #[error("player {0} is not part of this party")]
    UnknownPlayer(PlayerId),

    #[error("party is already over")]
    Finished,

    #[error("party was already started")]
    AlreadyStarted,
}

impl GameError for PartyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownPlayer(_) => ErrorSeverity::Validation,
            Self::NoActiveFight | Self::Finished | Self::AlreadyStarted => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveFight => "NO_ACTIVE_FIGHT",
            Self::UnknownPlayer(_) => "UNKNOWN_PLAYER",
            Self::Finished => "PARTY_FINISHED",
            Self::AlreadyStarted => "PARTY_ALREADY_STARTED",
        }
    }
}
