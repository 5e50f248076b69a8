// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The tender/bid lifecycle engine.
//!
//! Every operation that performs more than one read/write step runs inside
//! a single database transaction obtained from the connection: permission
//! checks, pre-image snapshots, version bumps, and the approval-quorum
//! protocol commit together or not at all. The engine is generic over
//! [`PersistenceBackend`] so one implementation serves both backends.

pub mod bids;
pub mod directory;
pub mod tenders;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::backend::PersistenceBackend;
use crate::data_models::{
    BidRow, BidUpdate, EmployeeRow, NewBidHistoryRow, NewTenderHistoryRow, TenderRow, TenderUpdate,
};
use crate::error::PersistenceError;
use procura::{AuthorFacts, author_has_permissions};
use procura_domain::{AuthorType, Bid, ServiceType, Tender, TenderStatus};

/// Request value for tender creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTender {
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    /// The seed status supplied by the caller.
    pub status: TenderStatus,
    pub organization_id: i64,
    pub creator_username: String,
}

/// Request value for bid creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBid {
    pub name: String,
    pub description: String,
    pub tender_id: i64,
    pub author_type: AuthorType,
    /// Employee id of the submitting author.
    pub author_id: i64,
}

/// Current UTC time in the stored RFC 3339 format.
pub(crate) fn now_rfc3339() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

/// Snapshots the current tender row into history, then rewrites the row
/// with `updated`'s business fields at version `current.version + 1`.
///
/// Must run inside the caller's transaction. Zero affected rows means the
/// row vanished or was concurrently modified; both abort the unit of work.
pub(crate) fn commit_tender_update<C: PersistenceBackend>(
    conn: &mut C,
    current: &TenderRow,
    updated: &Tender,
) -> Result<Tender, PersistenceError> {
    conn.insert_tender_history(&NewTenderHistoryRow::pre_image(current))?;

    let update = TenderUpdate {
        tender_id: current.tender_id,
        expected_version: current.version,
        name: updated.name.clone(),
        description: updated.description.clone(),
        service_type: updated.service_type.as_str().to_string(),
        status: updated.status.as_str().to_string(),
        organization_id: updated.organization_id,
    };

    let affected = conn.update_tender_row(&update)?;
    if affected == 0 {
        return Err(if conn.tender_by_id(current.tender_id)?.is_some() {
            PersistenceError::ConcurrentModification {
                entity: "tender",
                id: current.tender_id,
            }
        } else {
            PersistenceError::RowVanished {
                entity: "tender",
                id: current.tender_id,
            }
        });
    }

    conn.tender_by_id(current.tender_id)?
        .ok_or(PersistenceError::RowVanished {
            entity: "tender",
            id: current.tender_id,
        })?
        .into_tender()
}

/// Snapshots the current bid row into history, then rewrites the row with
/// `updated`'s business fields at version `current.version + 1`.
///
/// Must run inside the caller's transaction.
pub(crate) fn commit_bid_update<C: PersistenceBackend>(
    conn: &mut C,
    current: &BidRow,
    updated: &Bid,
) -> Result<Bid, PersistenceError> {
    conn.insert_bid_history(&NewBidHistoryRow::pre_image(current))?;

    let update = BidUpdate {
        bid_id: current.bid_id,
        expected_version: current.version,
        name: updated.name.clone(),
        description: updated.description.clone(),
        status: updated.status.as_str().to_string(),
        tender_id: updated.tender_id,
        author_type: updated.author_type.as_str().to_string(),
        author_id: updated.author_id,
    };

    let affected = conn.update_bid_row(&update)?;
    if affected == 0 {
        return Err(if conn.bid_by_id(current.bid_id)?.is_some() {
            PersistenceError::ConcurrentModification {
                entity: "bid",
                id: current.bid_id,
            }
        } else {
            PersistenceError::RowVanished {
                entity: "bid",
                id: current.bid_id,
            }
        });
    }

    conn.bid_by_id(current.bid_id)?
        .ok_or(PersistenceError::RowVanished {
            entity: "bid",
            id: current.bid_id,
        })?
        .into_bid()
}

/// Resolves the facts the author permission rule needs, within the
/// caller's transaction.
///
/// Strict variant for single-bid operations: an unknown caller is an
/// authentication failure, and an Organization-type author without a
/// membership is a permission failure.
pub(crate) fn resolve_author_facts<C: PersistenceBackend>(
    conn: &mut C,
    author_type: AuthorType,
    author_id: i64,
    username: &str,
) -> Result<AuthorFacts, PersistenceError> {
    let caller = conn
        .employee_by_username(username)?
        .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

    let caller_responsible_for_author_org = match author_type {
        AuthorType::Organization => {
            let org = conn.organization_of_employee(author_id)?.ok_or(
                PersistenceError::NoOrganizationMembership {
                    employee_id: author_id,
                },
            )?;
            conn.is_responsible(org.organization_id, username)?
        }
        AuthorType::User => false,
    };

    Ok(AuthorFacts {
        author_type,
        author_id,
        caller_employee_id: caller.employee_id,
        caller_responsible_for_author_org,
    })
}

/// Lenient author-rule evaluation used when filtering listings: a bid
/// whose author facts cannot be resolved is simply invisible to the
/// caller rather than failing the whole listing.
pub(crate) fn author_permission_flag<C: PersistenceBackend>(
    conn: &mut C,
    bid: &Bid,
    caller: &EmployeeRow,
) -> Result<bool, PersistenceError> {
    match bid.author_type {
        AuthorType::User => Ok(caller.employee_id == bid.author_id),
        AuthorType::Organization => match conn.organization_of_employee(bid.author_id)? {
            Some(org) => conn.is_responsible(org.organization_id, &caller.username),
            None => Ok(false),
        },
    }
}

/// Strict author-rule gate shared by the single-bid operations.
pub(crate) fn require_author_permissions<C: PersistenceBackend>(
    conn: &mut C,
    bid: &Bid,
    username: &str,
    action: &str,
) -> Result<(), PersistenceError> {
    let facts = resolve_author_facts(conn, bid.author_type, bid.author_id, username)?;
    if author_has_permissions(&facts) {
        Ok(())
    } else {
        Err(PersistenceError::PermissionDenied {
            action: action.to_string(),
        })
    }
}
