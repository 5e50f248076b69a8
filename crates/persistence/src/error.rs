// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use procura_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The caller username does not resolve to an employee.
    UnknownEmployee(String),
    /// An employee id does not resolve.
    EmployeeNotFound(i64),
    /// An operation that needs a caller identity received none.
    CallerRequired,
    /// The requested organization was not found.
    OrganizationNotFound(i64),
    /// The employee is not a responsible member of any organization.
    NoOrganizationMembership {
        /// The employee without a membership.
        employee_id: i64,
    },
    /// The requested tender was not found.
    TenderNotFound(i64),
    /// The requested tender version does not exist in history.
    TenderVersionNotFound {
        /// The tender.
        tender_id: i64,
        /// The missing version.
        version: i32,
    },
    /// The requested bid was not found.
    BidNotFound(i64),
    /// The requested bid version does not exist in history.
    BidVersionNotFound {
        /// The bid.
        bid_id: i64,
        /// The missing version.
        version: i32,
    },
    /// The caller lacks permission for the requested action.
    PermissionDenied {
        /// The action that was attempted.
        action: String,
    },
    /// A bid may only target a Published tender.
    TenderNotPublished {
        /// The tender.
        tender_id: i64,
        /// Its current status.
        status: String,
    },
    /// Decisions apply only to Published bids.
    BidNotPublished {
        /// The bid.
        bid_id: i64,
        /// Its current status.
        status: String,
    },
    /// A lifecycle rule rejected the operation.
    RuleViolation(DomainError),
    /// The row was modified by another writer between read and update.
    ConcurrentModification {
        /// The entity kind.
        entity: &'static str,
        /// The row id.
        id: i64,
    },
    /// The row disappeared between read and update.
    RowVanished {
        /// The entity kind.
        entity: &'static str,
        /// The row id.
        id: i64,
    },
    /// A stored column holds a value outside its closed domain.
    InvalidStoredValue(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UnknownEmployee(username) => {
                write!(f, "No employee with username '{username}'")
            }
            Self::EmployeeNotFound(id) => write!(f, "Employee {id} not found"),
            Self::CallerRequired => write!(f, "A caller username is required"),
            Self::OrganizationNotFound(id) => write!(f, "Organization {id} not found"),
            Self::NoOrganizationMembership { employee_id } => {
                write!(
                    f,
                    "Employee {employee_id} is not a responsible member of any organization"
                )
            }
            Self::TenderNotFound(id) => write!(f, "Tender {id} not found"),
            Self::TenderVersionNotFound { tender_id, version } => {
                write!(f, "Tender {tender_id} has no version {version}")
            }
            Self::BidNotFound(id) => write!(f, "Bid {id} not found"),
            Self::BidVersionNotFound { bid_id, version } => {
                write!(f, "Bid {bid_id} has no version {version}")
            }
            Self::PermissionDenied { action } => {
                write!(f, "Not enough permissions to {action}")
            }
            Self::TenderNotPublished { tender_id, status } => {
                write!(
                    f,
                    "Tender {tender_id} is {status}; bids may only target a Published tender"
                )
            }
            Self::BidNotPublished { bid_id, status } => {
                write!(
                    f,
                    "Bid {bid_id} is {status}; decisions apply only to Published bids"
                )
            }
            Self::RuleViolation(err) => write!(f, "{err}"),
            Self::ConcurrentModification { entity, id } => {
                write!(f, "Concurrent modification of {entity} {id}")
            }
            Self::RowVanished { entity, id } => {
                write!(f, "{entity} {id} disappeared during update")
            }
            Self::InvalidStoredValue(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
