//! Unified error types surfaced by the runtime API.
//!
//! Wraps party rule violations, setup failures and worker coordination
//! failures so transports can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use tactics_core::{ErrorSeverity, GameError, PartyError, PartyId, SetupError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Party(#[from] PartyError),

    #[error("party setup rejected")]
    Setup(#[from] SetupError),

    #[error("party worker command channel closed")]
    CommandChannelClosed,

    #[error("party worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("party worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("unknown party {0}")]
    UnknownParty(PartyId),

    #[error("party {0} already exists")]
    DuplicateParty(PartyId),

    #[error("event bus closed")]
    BusClosed,
}

impl RuntimeError {
    /// Severity of the underlying failure. Channel and worker failures are
    /// always internal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Party(err) => err.severity(),
            RuntimeError::Setup(err) => err.severity(),
            RuntimeError::UnknownParty(_) | RuntimeError::DuplicateParty(_) => {
                ErrorSeverity::Validation
            }
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_)
            | RuntimeError::BusClosed => ErrorSeverity::Internal,
        }
    }
}
