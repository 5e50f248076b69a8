// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! The taxonomy distinguishes validation, authentication, authorization,
//! not-found, and conflict failures; everything else is reported
//! generically while the underlying cause is recorded for operators.

use thiserror::Error;
use tracing::error;

use procura_domain::DomainError;
use procura_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed or missing input; never reaches the store.
    #[error("Invalid '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The caller identity does not resolve.
    #[error("Authentication failed: {reason}")]
    Authentication {
        /// The reason authentication failed.
        reason: String,
    },
    /// The identity resolves but lacks permission for the action.
    #[error("Forbidden: {reason}")]
    Authorization {
        /// The reason the action is forbidden.
        reason: String,
    },
    /// The entity or historical version does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// What was not found.
        resource: String,
    },
    /// The current state does not permit the requested transition.
    #[error("Conflict: {reason}")]
    Conflict {
        /// The reason the state rejects the request.
        reason: String,
    },
    /// A store or transaction failure unrelated to caller input. The
    /// message is recorded for operators, not shown to callers.
    #[error("An internal error occurred")]
    Internal {
        /// Operator-facing description of the failure.
        message: String,
    },
}

fn field_of(err: &DomainError) -> &'static str {
    match err {
        DomainError::InvalidName(_) => "name",
        DomainError::InvalidDescription(_) => "description",
        DomainError::InvalidUsername(_) => "username",
        DomainError::InvalidFeedback(_) => "bidFeedback",
        DomainError::InvalidServiceType(_) => "serviceType",
        DomainError::InvalidTenderStatus(_)
        | DomainError::InvalidBidStatus(_)
        | DomainError::InvalidStatusTransition { .. } => "status",
        DomainError::InvalidAuthorType(_) => "authorType",
        DomainError::InvalidDecision(_) => "decision",
        DomainError::InvalidOrganizationType(_) => "organizationType",
        DomainError::InvalidPageLimit { .. } => "limit",
        DomainError::InvalidPageOffset { .. } => "offset",
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation {
            field: field_of(&err).to_string(),
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UnknownEmployee(_)
            | PersistenceError::EmployeeNotFound(_)
            | PersistenceError::CallerRequired => Self::Authentication {
                reason: err.to_string(),
            },
            PersistenceError::NoOrganizationMembership { .. }
            | PersistenceError::PermissionDenied { .. } => Self::Authorization {
                reason: err.to_string(),
            },
            PersistenceError::OrganizationNotFound(_)
            | PersistenceError::TenderNotFound(_)
            | PersistenceError::TenderVersionNotFound { .. }
            | PersistenceError::BidNotFound(_)
            | PersistenceError::BidVersionNotFound { .. }
            | PersistenceError::NotFound(_) => Self::NotFound {
                resource: err.to_string(),
            },
            PersistenceError::TenderNotPublished { .. }
            | PersistenceError::BidNotPublished { .. }
            | PersistenceError::RuleViolation(_)
            | PersistenceError::ConcurrentModification { .. } => Self::Conflict {
                reason: err.to_string(),
            },
            _ => {
                error!(error = %err, "Persistence failure");
                Self::Internal {
                    message: err.to_string(),
                }
            }
        }
    }
}
