// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender lifecycle operations.

use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewTenderRow, TenderRow};
use crate::engine::{NewTender, commit_tender_update, now_rfc3339};
use crate::error::PersistenceError;
use procura::TenderPatch;
use procura_domain::{PageWindow, ServiceType, Tender, TenderStatus};

/// Creates a tender at version 1 with the caller-supplied seed status.
///
/// The creator must resolve to an employee and the organization must
/// exist; both checks and the insert share one transaction.
///
/// # Errors
///
/// Returns an error if the creator is unknown, the organization does not
/// exist, or the insert fails.
pub fn create<C: PersistenceBackend>(
    conn: &mut C,
    request: &NewTender,
) -> Result<Tender, PersistenceError> {
    conn.transaction(|conn| {
        conn.employee_by_username(&request.creator_username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(request.creator_username.clone()))?;

        conn.organization_by_id(request.organization_id)?
            .ok_or(PersistenceError::OrganizationNotFound(
                request.organization_id,
            ))?;

        let row = NewTenderRow {
            name: request.name.clone(),
            description: request.description.clone(),
            service_type: request.service_type.as_str().to_string(),
            status: request.status.as_str().to_string(),
            organization_id: request.organization_id,
            creator_username: request.creator_username.clone(),
            version: 1,
            created_at: now_rfc3339()?,
        };
        let tender_id = conn.insert_tender(&row)?;
        info!(tender_id, creator = %request.creator_username, "Created tender");

        conn.tender_by_id(tender_id)?
            .ok_or(PersistenceError::RowVanished {
                entity: "tender",
                id: tender_id,
            })?
            .into_tender()
    })
}

/// The authoritative current state of a tender.
///
/// # Errors
///
/// Returns an error if the tender does not exist.
pub fn find<C: PersistenceBackend>(
    conn: &mut C,
    tender_id: i64,
) -> Result<Tender, PersistenceError> {
    conn.tender_by_id(tender_id)?
        .ok_or(PersistenceError::TenderNotFound(tender_id))?
        .into_tender()
}

/// Published tenders, optionally narrowed by service type.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn published<C: PersistenceBackend>(
    conn: &mut C,
    service_types: &[ServiceType],
    page: PageWindow,
) -> Result<Vec<Tender>, PersistenceError> {
    let filters: Vec<String> = service_types
        .iter()
        .map(|s| s.as_str().to_string())
        .collect();

    conn.published_tenders(&filters, page.limit(), page.offset())?
        .into_iter()
        .map(TenderRow::into_tender)
        .collect()
}

/// Tenders created by the caller, in any status.
///
/// # Errors
///
/// Returns an error if the caller does not resolve to an employee.
pub fn by_creator<C: PersistenceBackend>(
    conn: &mut C,
    username: &str,
    page: PageWindow,
) -> Result<Vec<Tender>, PersistenceError> {
    conn.transaction(|conn| {
        conn.employee_by_username(username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

        conn.tenders_by_creator(username, page.limit(), page.offset())?
            .into_iter()
            .map(TenderRow::into_tender)
            .collect()
    })
}

/// The status of a tender under the visibility rule: Published is public;
/// any other status requires a caller responsible for the tender's
/// organization.
///
/// # Errors
///
/// Returns an error if the tender does not exist, no caller is supplied
/// for a non-Published tender, or the caller lacks responsibility.
pub fn status_view<C: PersistenceBackend>(
    conn: &mut C,
    tender_id: i64,
    username: Option<&str>,
) -> Result<TenderStatus, PersistenceError> {
    conn.transaction(|conn| {
        let tender = find(conn, tender_id)?;

        if tender.status == TenderStatus::Published {
            return Ok(tender.status);
        }

        let username = username.ok_or(PersistenceError::CallerRequired)?;
        conn.employee_by_username(username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

        if conn.is_responsible(tender.organization_id, username)? {
            Ok(tender.status)
        } else {
            Err(PersistenceError::PermissionDenied {
                action: "read tender status".to_string(),
            })
        }
    })
}

/// Moves a tender forward through its status machine.
///
/// Only the tender's creator may edit its status, and the transition must
/// be a forward one.
///
/// # Errors
///
/// Returns an error if the caller is unknown or not the creator, the
/// tender does not exist, or the transition is rejected.
pub fn edit_status<C: PersistenceBackend>(
    conn: &mut C,
    tender_id: i64,
    username: &str,
    new_status: TenderStatus,
) -> Result<Tender, PersistenceError> {
    conn.transaction(|conn| {
        conn.employee_by_username(username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

        let current = conn
            .tender_by_id(tender_id)?
            .ok_or(PersistenceError::TenderNotFound(tender_id))?;
        let mut tender = current.clone().into_tender()?;

        if tender.creator_username != username {
            return Err(PersistenceError::PermissionDenied {
                action: "edit tender status".to_string(),
            });
        }

        tender
            .status
            .validate_transition(new_status)
            .map_err(PersistenceError::RuleViolation)?;
        tender.status = new_status;

        let updated = commit_tender_update(conn, &current, &tender)?;
        info!(tender_id, status = new_status.as_str(), "Tender status changed");
        Ok(updated)
    })
}

/// Applies a partial edit to a tender's mutable fields.
///
/// # Errors
///
/// Returns an error if the caller is unknown or not the creator, or the
/// tender does not exist.
pub fn edit<C: PersistenceBackend>(
    conn: &mut C,
    tender_id: i64,
    username: &str,
    patch: TenderPatch,
) -> Result<Tender, PersistenceError> {
    conn.transaction(|conn| {
        conn.employee_by_username(username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

        let current = conn
            .tender_by_id(tender_id)?
            .ok_or(PersistenceError::TenderNotFound(tender_id))?;
        let mut tender = current.clone().into_tender()?;

        if tender.creator_username != username {
            return Err(PersistenceError::PermissionDenied {
                action: "edit tender".to_string(),
            });
        }

        patch.apply(&mut tender);
        let updated = commit_tender_update(conn, &current, &tender)?;
        debug!(tender_id, version = updated.version, "Tender edited");
        Ok(updated)
    })
}

/// Replays the historical snapshot at `version` as a new, higher version.
///
/// The caller is authorized against the snapshot's organization, so a
/// rollback cannot bypass the permission model through past authorship.
/// The version counter never rewinds.
///
/// # Errors
///
/// Returns an error if the version never existed, the caller is unknown
/// or not responsible for the snapshot's organization, or the tender
/// row is gone.
pub fn rollback<C: PersistenceBackend>(
    conn: &mut C,
    tender_id: i64,
    version: i32,
    username: &str,
) -> Result<Tender, PersistenceError> {
    conn.transaction(|conn| {
        let snapshot = conn
            .tender_history_at(tender_id, version)?
            .ok_or(PersistenceError::TenderVersionNotFound { tender_id, version })?
            .into_tender()?;

        conn.employee_by_username(username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

        if !conn.is_responsible(snapshot.organization_id, username)? {
            return Err(PersistenceError::PermissionDenied {
                action: "rollback tender".to_string(),
            });
        }

        let current = conn
            .tender_by_id(tender_id)?
            .ok_or(PersistenceError::TenderNotFound(tender_id))?;

        let restored = commit_tender_update(conn, &current, &snapshot)?;
        info!(
            tender_id,
            from_version = version,
            new_version = restored.version,
            "Tender rolled back"
        );
        Ok(restored)
    })
}

/// The historical snapshot of a tender at an exact version.
///
/// # Errors
///
/// Returns an error if that version never existed.
pub fn find_at_version<C: PersistenceBackend>(
    conn: &mut C,
    tender_id: i64,
    version: i32,
) -> Result<Tender, PersistenceError> {
    conn.tender_history_at(tender_id, version)?
        .ok_or(PersistenceError::TenderVersionNotFound { tender_id, version })?
        .into_tender()
}
