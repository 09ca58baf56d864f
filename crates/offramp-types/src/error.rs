//! Error types for the OffRamp cash-out engine.
//!
//! All errors use the `OR_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Context / account errors
//! - 2xx: Routing errors
//! - 3xx: Liquidation address errors
//! - 4xx: Claim errors
//! - 5xx: Submission errors
//! - 6xx: Recovery storage errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{AttemptId, ChainId};

/// Central error enum for all OffRamp operations.
#[derive(Debug, Error)]
pub enum OfframpError {
    // =================================================================
    // Context / Account Errors (1xx)
    // =================================================================
    /// Required user, session, or account data is absent. Nothing can be
    /// retried until the upstream identity flow provides it.
    #[error("OR_ERR_100: Missing context: {reason}")]
    MissingContext { reason: String },

    /// No linked bank account matched the requested recipient identifier.
    #[error("OR_ERR_101: No linked account matches recipient")]
    AccountNotFound,

    // =================================================================
    // Routing Errors (2xx)
    // =================================================================
    /// No eligible bridging path exists for the source chain.
    #[error("OR_ERR_200: No bridging route available from chain {0}")]
    RouteUnavailable(ChainId),

    /// The escrow contract on the source chain predates cross-chain claims.
    #[error("OR_ERR_201: Contract version {actual} is below required {required}")]
    ContractVersionTooOld { required: String, actual: String },

    /// The bridging venue returned no computable route to the fallback asset.
    #[error("OR_ERR_202: Bridging venue could not compute a route to the fallback asset")]
    FallbackRouteMissing,

    // =================================================================
    // Liquidation Address Errors (3xx)
    // =================================================================
    /// The partner could not list or create a liquidation address.
    #[error("OR_ERR_300: Liquidation address provisioning failed: {reason}")]
    AddressProvisioning { reason: String },

    // =================================================================
    // Claim Errors (4xx)
    // =================================================================
    /// The on-chain claim failed. The link was not consumed; funds remain
    /// redeemable by the link holder.
    #[error("OR_ERR_400: Link claim failed: {reason}")]
    ClaimExecution { reason: String },

    /// The link could not be inspected on-chain.
    #[error("OR_ERR_401: Could not fetch link details: {reason}")]
    LinkInspection { reason: String },

    // =================================================================
    // Submission Errors (5xx)
    // =================================================================
    /// Settlement recording failed after a successful claim. The transaction
    /// hash is preserved for manual reconciliation.
    #[error("OR_ERR_500: Settlement submission failed: {reason}")]
    Submission { reason: String },

    // =================================================================
    // Recovery Storage Errors (6xx)
    // =================================================================
    /// The durable recovery store rejected a write or read.
    #[error("OR_ERR_600: Recovery storage error: {0}")]
    Storage(String),

    /// A live recovery entry already exists for this attempt.
    #[error("OR_ERR_601: Recovery entry already exists for attempt {0}")]
    RecoveryEntryExists(AttemptId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OR_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("OR_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (bad asset map, missing recovery dir, etc.).
    #[error("OR_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OfframpError>;

impl From<std::io::Error> for OfframpError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for OfframpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Coarse classification of a failed attempt, carried by the workflow's
/// terminal `Failed` state and shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FailureKind {
    /// User/session/account data absent.
    MissingContext,
    /// No eligible route or contract too old.
    RouteUnavailable,
    /// Partner could not list/create the liquidation address.
    AddressProvisioning,
    /// The on-chain claim failed; the link was not consumed.
    ClaimExecution,
    /// Settlement recording failed after a successful claim.
    Submission,
    /// Storage, serialization, configuration, or internal error.
    Internal,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContext => write!(f, "MISSING_CONTEXT"),
            Self::RouteUnavailable => write!(f, "ROUTE_UNAVAILABLE"),
            Self::AddressProvisioning => write!(f, "ADDRESS_PROVISIONING"),
            Self::ClaimExecution => write!(f, "CLAIM_EXECUTION"),
            Self::Submission => write!(f, "SUBMISSION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl OfframpError {
    /// Map an error to the failure classification surfaced by the workflow.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingContext { .. } | Self::AccountNotFound => FailureKind::MissingContext,
            Self::RouteUnavailable(_)
            | Self::ContractVersionTooOld { .. }
            | Self::FallbackRouteMissing => FailureKind::RouteUnavailable,
            Self::AddressProvisioning { .. } => FailureKind::AddressProvisioning,
            Self::ClaimExecution { .. } | Self::LinkInspection { .. } => FailureKind::ClaimExecution,
            Self::Submission { .. } => FailureKind::Submission,
            Self::Storage(_)
            | Self::RecoveryEntryExists(_)
            | Self::Internal(_)
            | Self::Serialization(_)
            | Self::Configuration(_) => FailureKind::Internal,
        }
    }
}
