//! Workflow status for one cash-out attempt.
//!
//! The attempt moves through five sequential states and two terminal ones:
//! **IDLE → RESOLVING_ROUTE → RESOLVING_ADDRESS → AWAITING_CLAIM →
//! RECORDING → DONE**, with `Failed` absorbing from any non-terminal state.
//! No state is ever re-entered within an attempt.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FailureKind;

/// Observable status of a cash-out attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    /// No attempt in flight.
    Idle,
    /// Deciding between a direct settlement and a bridged one.
    ResolvingRoute,
    /// Looking up or provisioning the partner liquidation address.
    ResolvingAddress,
    /// The on-chain claim has been dispatched; this is the irrevocable step.
    AwaitingClaim,
    /// Claim succeeded; recording the settlement with the partner.
    Recording,
    /// Settlement fully recorded.
    Done,
    /// The attempt failed; the kind says at which step.
    Failed(FailureKind),
}

impl WorkflowStatus {
    /// Whether the attempt has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::ResolvingRoute => write!(f, "RESOLVING_ROUTE"),
            Self::ResolvingAddress => write!(f, "RESOLVING_ADDRESS"),
            Self::AwaitingClaim => write!(f, "AWAITING_CLAIM"),
            Self::Recording => write!(f, "RECORDING"),
            Self::Done => write!(f, "DONE"),
            Self::Failed(kind) => write!(f, "FAILED({kind})"),
        }
    }
}
