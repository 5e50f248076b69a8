// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid lifecycle operations, including the approval-quorum protocol.

use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{BidRow, NewBidRow, NewReviewRow, ReviewRow};
use crate::engine::{
    NewBid, author_permission_flag, commit_bid_update, commit_tender_update, now_rfc3339,
    require_author_permissions,
};
use crate::error::PersistenceError;
use procura::{BidPatch, quorum_reached};
use procura_domain::{AuthorType, Bid, BidStatus, Decision, PageWindow, Review, TenderStatus};

/// Creates a bid at status Created, version 1.
///
/// The author id must resolve to an employee; an Organization-type author
/// must additionally hold a responsible membership; and the target tender
/// must be Published. All checks and the insert share one transaction so a
/// tender status flip and a bid insert never interleave inconsistently.
///
/// # Errors
///
/// Returns an error if the author does not resolve, the membership is
/// missing, the tender is absent or not Published, or the insert fails.
pub fn create<C: PersistenceBackend>(
    conn: &mut C,
    request: &NewBid,
) -> Result<Bid, PersistenceError> {
    conn.transaction(|conn| {
        let author = conn
            .employee_by_id(request.author_id)?
            .ok_or(PersistenceError::EmployeeNotFound(request.author_id))?;

        if request.author_type == AuthorType::Organization {
            conn.organization_of_employee(author.employee_id)?.ok_or(
                PersistenceError::NoOrganizationMembership {
                    employee_id: author.employee_id,
                },
            )?;
        }

        let tender = conn
            .tender_by_id(request.tender_id)?
            .ok_or(PersistenceError::TenderNotFound(request.tender_id))?
            .into_tender()?;
        if tender.status != TenderStatus::Published {
            return Err(PersistenceError::TenderNotPublished {
                tender_id: tender.tender_id,
                status: tender.status.as_str().to_string(),
            });
        }

        let row = NewBidRow {
            name: request.name.clone(),
            description: request.description.clone(),
            status: BidStatus::Created.as_str().to_string(),
            tender_id: request.tender_id,
            author_type: request.author_type.as_str().to_string(),
            author_id: request.author_id,
            version: 1,
            created_at: now_rfc3339()?,
        };
        let bid_id = conn.insert_bid(&row)?;
        info!(bid_id, tender_id = request.tender_id, "Created bid");

        conn.bid_by_id(bid_id)?
            .ok_or(PersistenceError::RowVanished {
                entity: "bid",
                id: bid_id,
            })?
            .into_bid()
    })
}

/// The authoritative current state of a bid.
///
/// # Errors
///
/// Returns an error if the bid does not exist.
pub fn find<C: PersistenceBackend>(conn: &mut C, bid_id: i64) -> Result<Bid, PersistenceError> {
    conn.bid_by_id(bid_id)?
        .ok_or(PersistenceError::BidNotFound(bid_id))?
        .into_bid()
}

/// Bids authored by the caller, in any status.
///
/// # Errors
///
/// Returns an error if the caller does not resolve to an employee.
pub fn by_author<C: PersistenceBackend>(
    conn: &mut C,
    username: &str,
    page: PageWindow,
) -> Result<Vec<Bid>, PersistenceError> {
    conn.transaction(|conn| {
        let caller = conn
            .employee_by_username(username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

        conn.bids_by_author(caller.employee_id, page.limit(), page.offset())?
            .into_iter()
            .map(BidRow::into_bid)
            .collect()
    })
}

/// Bids targeting a tender, filtered by the visibility rule.
///
/// A caller responsible for the tender's organization sees Published bids;
/// a bid's own author (or a responsible member of the author's
/// organization) sees the bid in any status; everything else is invisible.
/// The whole evaluation shares one transaction for a consistent snapshot.
///
/// # Errors
///
/// Returns an error if the caller or tender does not resolve.
pub fn by_tender<C: PersistenceBackend>(
    conn: &mut C,
    tender_id: i64,
    username: &str,
    page: PageWindow,
) -> Result<Vec<Bid>, PersistenceError> {
    conn.transaction(|conn| {
        let caller = conn
            .employee_by_username(username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

        let tender = conn
            .tender_by_id(tender_id)?
            .ok_or(PersistenceError::TenderNotFound(tender_id))?
            .into_tender()?;
        let caller_is_responsible = conn.is_responsible(tender.organization_id, username)?;

        let rows = conn.bids_by_tender(tender_id, page.limit(), page.offset())?;
        let mut visible = Vec::with_capacity(rows.len());
        for row in rows {
            let bid = row.into_bid()?;

            if caller_is_responsible && bid.status == BidStatus::Published {
                visible.push(bid);
                continue;
            }

            if author_permission_flag(conn, &bid, &caller)? {
                visible.push(bid);
            }
        }

        Ok(visible)
    })
}

/// The status of a bid, gated by the author permission rule.
///
/// # Errors
///
/// Returns an error if the bid does not exist or the caller fails the
/// author rule.
pub fn status_view<C: PersistenceBackend>(
    conn: &mut C,
    bid_id: i64,
    username: &str,
) -> Result<BidStatus, PersistenceError> {
    conn.transaction(|conn| {
        let bid = find(conn, bid_id)?;
        require_author_permissions(conn, &bid, username, "read bid status")?;
        Ok(bid.status)
    })
}

/// Moves a bid through its status machine.
///
/// # Errors
///
/// Returns an error if the bid does not exist, the caller fails the
/// author rule, or the transition is rejected.
pub fn edit_status<C: PersistenceBackend>(
    conn: &mut C,
    bid_id: i64,
    username: &str,
    new_status: BidStatus,
) -> Result<Bid, PersistenceError> {
    conn.transaction(|conn| {
        let current = conn
            .bid_by_id(bid_id)?
            .ok_or(PersistenceError::BidNotFound(bid_id))?;
        let mut bid = current.clone().into_bid()?;

        require_author_permissions(conn, &bid, username, "edit bid status")?;

        bid.status
            .validate_transition(new_status)
            .map_err(PersistenceError::RuleViolation)?;
        bid.status = new_status;

        let updated = commit_bid_update(conn, &current, &bid)?;
        info!(bid_id, status = new_status.as_str(), "Bid status changed");
        Ok(updated)
    })
}

/// Applies a partial edit to a bid's mutable fields.
///
/// # Errors
///
/// Returns an error if the bid does not exist or the caller fails the
/// author rule.
pub fn edit<C: PersistenceBackend>(
    conn: &mut C,
    bid_id: i64,
    username: &str,
    patch: BidPatch,
) -> Result<Bid, PersistenceError> {
    conn.transaction(|conn| {
        let current = conn
            .bid_by_id(bid_id)?
            .ok_or(PersistenceError::BidNotFound(bid_id))?;
        let mut bid = current.clone().into_bid()?;

        require_author_permissions(conn, &bid, username, "edit bid")?;

        patch.apply(&mut bid);
        let updated = commit_bid_update(conn, &current, &bid)?;
        debug!(bid_id, version = updated.version, "Bid edited");
        Ok(updated)
    })
}

/// Applies a responsible employee's decision to a Published bid.
///
/// Rejection is immediate. An approval records the caller's vote
/// (idempotently), then evaluates the quorum: at or past
/// min(3, responsible-count) distinct votes the bid becomes Approved and
/// its tender becomes Closed in the same commit. Below the threshold the
/// still-Published bid is re-read and returned; that is an expected
/// intermediate outcome, not an error.
///
/// The vote insert serializes concurrent callers on the same bid, so two
/// "last" votes cannot both observe a pre-threshold count.
///
/// # Errors
///
/// Returns an error if the bid or tender does not resolve, the bid is not
/// Published, or the caller is not responsible for the tender's
/// organization.
pub fn submit_decision<C: PersistenceBackend>(
    conn: &mut C,
    bid_id: i64,
    username: &str,
    decision: Decision,
) -> Result<Bid, PersistenceError> {
    conn.transaction(|conn| {
        let current = conn
            .bid_by_id(bid_id)?
            .ok_or(PersistenceError::BidNotFound(bid_id))?;
        let mut bid = current.clone().into_bid()?;

        if bid.status != BidStatus::Published {
            return Err(PersistenceError::BidNotPublished {
                bid_id,
                status: bid.status.as_str().to_string(),
            });
        }

        let tender_row = conn
            .tender_by_id(bid.tender_id)?
            .ok_or(PersistenceError::TenderNotFound(bid.tender_id))?;
        let mut tender = tender_row.clone().into_tender()?;

        if !conn.is_responsible(tender.organization_id, username)? {
            return Err(PersistenceError::PermissionDenied {
                action: "submit a decision".to_string(),
            });
        }

        match decision {
            Decision::Rejected => {
                bid.status = BidStatus::Rejected;
                let updated = commit_bid_update(conn, &current, &bid)?;
                info!(bid_id, "Bid rejected");
                Ok(updated)
            }
            Decision::Approved => {
                let caller = conn
                    .employee_by_username(username)?
                    .ok_or_else(|| PersistenceError::UnknownEmployee(username.to_string()))?;

                conn.insert_approval(bid_id, caller.employee_id)?;

                let votes = conn.approval_count(bid_id)?;
                let votes = usize::try_from(votes).map_err(|_| {
                    PersistenceError::InvalidStoredValue(format!(
                        "negative approval count for bid {bid_id}"
                    ))
                })?;
                let responsible = conn.responsible_employee_ids(tender.organization_id)?;
                debug!(
                    bid_id,
                    votes,
                    responsible = responsible.len(),
                    "Approval vote recorded"
                );

                if quorum_reached(votes, responsible.len()) {
                    bid.status = BidStatus::Approved;
                    let approved = commit_bid_update(conn, &current, &bid)?;

                    tender.status = TenderStatus::Closed;
                    commit_tender_update(conn, &tender_row, &tender)?;

                    info!(
                        bid_id,
                        tender_id = tender.tender_id,
                        votes,
                        "Bid approved; tender closed"
                    );
                    Ok(approved)
                } else {
                    find(conn, bid_id)
                }
            }
        }
    })
}

/// Appends feedback to a bid on behalf of the tender's organization.
///
/// No state transition; the unchanged bid is returned as confirmation.
///
/// # Errors
///
/// Returns an error if the bid or tender does not resolve or the caller
/// is not responsible for the tender's organization.
pub fn send_feedback<C: PersistenceBackend>(
    conn: &mut C,
    bid_id: i64,
    username: &str,
    feedback: &str,
) -> Result<Bid, PersistenceError> {
    conn.transaction(|conn| {
        let bid = find(conn, bid_id)?;

        let tender = conn
            .tender_by_id(bid.tender_id)?
            .ok_or(PersistenceError::TenderNotFound(bid.tender_id))?
            .into_tender()?;

        if !conn.is_responsible(tender.organization_id, username)? {
            return Err(PersistenceError::PermissionDenied {
                action: "send feedback".to_string(),
            });
        }

        conn.insert_review(&NewReviewRow {
            bid_id,
            description: feedback.to_string(),
            created_at: now_rfc3339()?,
        })?;
        debug!(bid_id, "Feedback recorded");

        Ok(bid)
    })
}

/// Replays the historical snapshot at `version` as a new, higher version.
///
/// The caller is authorized against the snapshot's authorship, so a
/// rollback cannot bypass the permission model through past authorship.
///
/// # Errors
///
/// Returns an error if the version never existed, the caller fails the
/// author rule on the snapshot, or the bid row is gone.
pub fn rollback<C: PersistenceBackend>(
    conn: &mut C,
    bid_id: i64,
    version: i32,
    username: &str,
) -> Result<Bid, PersistenceError> {
    conn.transaction(|conn| {
        let snapshot = conn
            .bid_history_at(bid_id, version)?
            .ok_or(PersistenceError::BidVersionNotFound { bid_id, version })?
            .into_bid()?;

        require_author_permissions(conn, &snapshot, username, "rollback bid")?;

        let current = conn
            .bid_by_id(bid_id)?
            .ok_or(PersistenceError::BidNotFound(bid_id))?;

        let restored = commit_bid_update(conn, &current, &snapshot)?;
        info!(
            bid_id,
            from_version = version,
            new_version = restored.version,
            "Bid rolled back"
        );
        Ok(restored)
    })
}

/// Reviews of a named author's bids within a tender's organization.
///
/// The requester must belong to the organization that owns the tender;
/// the reviews returned are those attached to the organization's bids
/// authored by `author_username`.
///
/// # Errors
///
/// Returns an error if either username does not resolve, the requester
/// has no organization membership, the tender does not exist, or the
/// tender belongs to a different organization.
pub fn reviews_by_tender<C: PersistenceBackend>(
    conn: &mut C,
    tender_id: i64,
    author_username: &str,
    requester_username: &str,
    page: PageWindow,
) -> Result<Vec<Review>, PersistenceError> {
    conn.transaction(|conn| {
        let requester = conn
            .employee_by_username(requester_username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(requester_username.to_string()))?;

        let author = conn
            .employee_by_username(author_username)?
            .ok_or_else(|| PersistenceError::UnknownEmployee(author_username.to_string()))?;

        let org = conn.organization_of_employee(requester.employee_id)?.ok_or(
            PersistenceError::NoOrganizationMembership {
                employee_id: requester.employee_id,
            },
        )?;

        let tender = conn
            .tender_by_id(tender_id)?
            .ok_or(PersistenceError::TenderNotFound(tender_id))?
            .into_tender()?;
        if tender.organization_id != org.organization_id {
            return Err(PersistenceError::PermissionDenied {
                action: "read reviews".to_string(),
            });
        }

        let bid_ids: Vec<i64> = conn
            .bids_by_organization(org.organization_id)?
            .into_iter()
            .filter(|bid| bid.author_id == author.employee_id)
            .map(|bid| bid.bid_id)
            .collect();

        Ok(conn
            .reviews_for_bids(&bid_ids, page.limit(), page.offset())?
            .into_iter()
            .map(ReviewRow::into_review)
            .collect())
    })
}

/// The historical snapshot of a bid at an exact version.
///
/// # Errors
///
/// Returns an error if that version never existed.
pub fn find_at_version<C: PersistenceBackend>(
    conn: &mut C,
    bid_id: i64,
    version: i32,
) -> Result<Bid, PersistenceError> {
    conn.bid_history_at(bid_id, version)?
        .ok_or(PersistenceError::BidVersionNotFound { bid_id, version })?
        .into_bid()
}
