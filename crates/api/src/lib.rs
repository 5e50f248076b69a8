// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Procura tender marketplace.
//!
//! Each operation validates its input, translates strings into domain
//! enums, delegates to the persistence adapter (which runs the lifecycle
//! engine inside one unit of work), and maps failures into the
//! [`ApiError`] taxonomy. Caller identity and page windows are explicit
//! parameters throughout; there is no ambient state.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use request_response::{
    AssignResponsibleRequest, BidResponse, CreateBidRequest, CreateTenderRequest, EditBidRequest,
    EditTenderRequest, EmployeeResponse, OrganizationResponse, RegisterEmployeeRequest,
    RegisterOrganizationRequest, ReviewResponse, TenderResponse,
};

use tracing::debug;

use procura::{BidPatch, TenderPatch};
use procura_domain::{
    AuthorType, BidStatus, Decision, OrganizationType, PageWindow, ServiceType, TenderStatus,
    validate_bid_fields, validate_description, validate_feedback, validate_name,
    validate_tender_fields, validate_username,
};
use procura_persistence::{NewBid, NewTender, Persistence};

fn page(limit: Option<i64>, offset: Option<i64>) -> Result<PageWindow, ApiError> {
    Ok(PageWindow::new(limit, offset)?)
}

/// Creates a tender.
///
/// # Errors
///
/// Returns a validation error for malformed input, an authentication
/// error for an unknown creator, or a not-found error for an unknown
/// organization.
pub fn create_tender(
    persistence: &mut Persistence,
    request: &CreateTenderRequest,
) -> Result<TenderResponse, ApiError> {
    validate_username(&request.creator_username)?;
    validate_tender_fields(&request.name, &request.description)?;
    let service_type: ServiceType = request.service_type.parse()?;
    let status: TenderStatus = request.status.parse()?;

    debug!(creator = %request.creator_username, "create_tender");
    let tender = persistence.create_tender(&NewTender {
        name: request.name.clone(),
        description: request.description.clone(),
        service_type,
        status,
        organization_id: request.organization_id,
        creator_username: request.creator_username.clone(),
    })?;

    Ok(tender.into())
}

/// Lists Published tenders, optionally narrowed by service types.
///
/// # Errors
///
/// Returns a validation error for an unknown service type or a bad page
/// window.
pub fn list_tenders(
    persistence: &mut Persistence,
    service_types: &[String],
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<TenderResponse>, ApiError> {
    let parsed: Vec<ServiceType> = service_types
        .iter()
        .map(|s| s.parse::<ServiceType>())
        .collect::<Result<_, _>>()?;
    let window = page(limit, offset)?;

    let tenders = persistence.published_tenders(&parsed, window)?;
    Ok(tenders.into_iter().map(Into::into).collect())
}

/// Lists the caller's own tenders, in any status.
///
/// # Errors
///
/// Returns an authentication error if the caller does not resolve.
pub fn my_tenders(
    persistence: &mut Persistence,
    username: &str,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<TenderResponse>, ApiError> {
    validate_username(username)?;
    let window = page(limit, offset)?;

    let tenders = persistence.tenders_by_creator(username, window)?;
    Ok(tenders.into_iter().map(Into::into).collect())
}

/// The status of a tender under the visibility rule.
///
/// # Errors
///
/// Returns an authentication error when a non-Published tender is read
/// without a caller, or an authorization error when the caller is not
/// responsible for the tender's organization.
pub fn tender_status(
    persistence: &mut Persistence,
    tender_id: i64,
    username: Option<&str>,
) -> Result<String, ApiError> {
    let status = persistence.tender_status(tender_id, username)?;
    Ok(status.as_str().to_string())
}

/// Moves a tender forward through its status machine.
///
/// # Errors
///
/// Returns an authorization error if the caller is not the creator, or a
/// conflict error for a backward transition.
pub fn update_tender_status(
    persistence: &mut Persistence,
    tender_id: i64,
    username: &str,
    status: &str,
) -> Result<TenderResponse, ApiError> {
    validate_username(username)?;
    let new_status: TenderStatus = status.parse()?;

    debug!(tender_id, status, "update_tender_status");
    let tender = persistence.edit_tender_status(tender_id, username, new_status)?;
    Ok(tender.into())
}

/// Applies a partial edit to a tender's mutable fields.
///
/// # Errors
///
/// Returns a validation error for malformed fields or an authorization
/// error if the caller is not the creator.
pub fn edit_tender(
    persistence: &mut Persistence,
    tender_id: i64,
    username: &str,
    request: &EditTenderRequest,
) -> Result<TenderResponse, ApiError> {
    validate_username(username)?;
    if let Some(name) = &request.name {
        validate_name(name)?;
    }
    if let Some(description) = &request.description {
        validate_description(description)?;
    }
    let service_type: Option<ServiceType> = match &request.service_type {
        Some(s) => Some(s.parse()?),
        None => None,
    };

    let patch = TenderPatch {
        name: request.name.clone(),
        description: request.description.clone(),
        service_type,
    };

    debug!(tender_id, "edit_tender");
    let tender = persistence.edit_tender(tender_id, username, patch)?;
    Ok(tender.into())
}

/// Replays a historical tender snapshot as a new, higher version.
///
/// # Errors
///
/// Returns a not-found error if the version never existed, or an
/// authorization error if the caller is not responsible for the
/// snapshot's organization.
pub fn rollback_tender(
    persistence: &mut Persistence,
    tender_id: i64,
    version: i32,
    username: &str,
) -> Result<TenderResponse, ApiError> {
    validate_username(username)?;

    debug!(tender_id, version, "rollback_tender");
    let tender = persistence.rollback_tender(tender_id, version, username)?;
    Ok(tender.into())
}

/// Creates a bid against a Published tender.
///
/// # Errors
///
/// Returns a validation error for malformed input, an authentication
/// error for an unknown author, an authorization error for an
/// Organization-type author without a membership, or a conflict error
/// when the tender is not Published.
pub fn create_bid(
    persistence: &mut Persistence,
    request: &CreateBidRequest,
) -> Result<BidResponse, ApiError> {
    validate_bid_fields(&request.name, &request.description)?;
    let author_type: AuthorType = request.author_type.parse()?;

    debug!(tender_id = request.tender_id, "create_bid");
    let bid = persistence.create_bid(&NewBid {
        name: request.name.clone(),
        description: request.description.clone(),
        tender_id: request.tender_id,
        author_type,
        author_id: request.author_id,
    })?;

    Ok(bid.into())
}

/// Lists the caller's own bids, in any status.
///
/// # Errors
///
/// Returns an authentication error if the caller does not resolve.
pub fn my_bids(
    persistence: &mut Persistence,
    username: &str,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<BidResponse>, ApiError> {
    validate_username(username)?;
    let window = page(limit, offset)?;

    let bids = persistence.bids_by_author(username, window)?;
    Ok(bids.into_iter().map(Into::into).collect())
}

/// Lists a tender's bids, filtered by the visibility rule.
///
/// # Errors
///
/// Returns an authentication error if the caller does not resolve, or a
/// not-found error for an unknown tender.
pub fn bids_by_tender(
    persistence: &mut Persistence,
    tender_id: i64,
    username: &str,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<BidResponse>, ApiError> {
    validate_username(username)?;
    let window = page(limit, offset)?;

    let bids = persistence.bids_by_tender(tender_id, username, window)?;
    Ok(bids.into_iter().map(Into::into).collect())
}

/// The status of a bid, gated by the author permission rule.
///
/// # Errors
///
/// Returns an authorization error if the caller fails the author rule.
pub fn bid_status(
    persistence: &mut Persistence,
    bid_id: i64,
    username: &str,
) -> Result<String, ApiError> {
    validate_username(username)?;
    let status = persistence.bid_status(bid_id, username)?;
    Ok(status.as_str().to_string())
}

/// Moves a bid through its status machine.
///
/// # Errors
///
/// Returns an authorization error if the caller fails the author rule,
/// or a conflict error for an illegal transition.
pub fn update_bid_status(
    persistence: &mut Persistence,
    bid_id: i64,
    username: &str,
    status: &str,
) -> Result<BidResponse, ApiError> {
    validate_username(username)?;
    let new_status: BidStatus = status.parse()?;

    debug!(bid_id, status, "update_bid_status");
    let bid = persistence.edit_bid_status(bid_id, username, new_status)?;
    Ok(bid.into())
}

/// Applies a partial edit to a bid's mutable fields.
///
/// # Errors
///
/// Returns a validation error for malformed fields or an authorization
/// error if the caller fails the author rule.
pub fn edit_bid(
    persistence: &mut Persistence,
    bid_id: i64,
    username: &str,
    request: &EditBidRequest,
) -> Result<BidResponse, ApiError> {
    validate_username(username)?;
    if let Some(name) = &request.name {
        validate_name(name)?;
    }
    if let Some(description) = &request.description {
        validate_description(description)?;
    }

    let patch = BidPatch {
        name: request.name.clone(),
        description: request.description.clone(),
    };

    debug!(bid_id, "edit_bid");
    let bid = persistence.edit_bid(bid_id, username, patch)?;
    Ok(bid.into())
}

/// Applies a responsible employee's decision to a Published bid.
///
/// An approval below the quorum threshold returns the still-Published
/// bid; reaching the threshold approves the bid and closes its tender in
/// the same commit.
///
/// # Errors
///
/// Returns an authorization error if the caller is not responsible for
/// the tender's organization, or a conflict error if the bid is not
/// Published.
pub fn submit_decision(
    persistence: &mut Persistence,
    bid_id: i64,
    username: &str,
    decision: &str,
) -> Result<BidResponse, ApiError> {
    validate_username(username)?;
    let decision: Decision = decision.parse()?;

    debug!(bid_id, decision = decision.as_str(), "submit_decision");
    let bid = persistence.submit_decision(bid_id, username, decision)?;
    Ok(bid.into())
}

/// Attaches feedback to a bid on behalf of the tender's organization.
///
/// # Errors
///
/// Returns an authorization error if the caller is not responsible for
/// the tender's organization.
pub fn send_feedback(
    persistence: &mut Persistence,
    bid_id: i64,
    username: &str,
    feedback: &str,
) -> Result<BidResponse, ApiError> {
    validate_username(username)?;
    validate_feedback(feedback)?;

    debug!(bid_id, "send_feedback");
    let bid = persistence.send_feedback(bid_id, username, feedback)?;
    Ok(bid.into())
}

/// Replays a historical bid snapshot as a new, higher version.
///
/// # Errors
///
/// Returns a not-found error if the version never existed, or an
/// authorization error if the caller fails the author rule on the
/// snapshot.
pub fn rollback_bid(
    persistence: &mut Persistence,
    bid_id: i64,
    version: i32,
    username: &str,
) -> Result<BidResponse, ApiError> {
    validate_username(username)?;

    debug!(bid_id, version, "rollback_bid");
    let bid = persistence.rollback_bid(bid_id, version, username)?;
    Ok(bid.into())
}

/// Reviews of a named author's bids within a tender's organization.
///
/// # Errors
///
/// Returns an authorization error if the requester's organization does
/// not own the tender.
pub fn reviews_by_tender(
    persistence: &mut Persistence,
    tender_id: i64,
    author_username: &str,
    requester_username: &str,
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<Vec<ReviewResponse>, ApiError> {
    validate_username(author_username)?;
    validate_username(requester_username)?;
    let window = page(limit, offset)?;

    let reviews =
        persistence.reviews_by_tender(tender_id, author_username, requester_username, window)?;
    Ok(reviews.into_iter().map(Into::into).collect())
}

/// Registers an employee in the directory.
///
/// # Errors
///
/// Returns a validation error for an empty username or an internal error
/// if the username is already taken.
pub fn register_employee(
    persistence: &mut Persistence,
    request: &RegisterEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    validate_username(&request.username)?;

    let employee =
        persistence.create_employee(&request.username, &request.first_name, &request.last_name)?;
    Ok(employee.into())
}

/// Registers an organization in the directory.
///
/// # Errors
///
/// Returns a validation error for a malformed name or organization type.
pub fn register_organization(
    persistence: &mut Persistence,
    request: &RegisterOrganizationRequest,
) -> Result<OrganizationResponse, ApiError> {
    validate_name(&request.name)?;
    let organization_type: OrganizationType = request.organization_type.parse()?;

    let organization =
        persistence.create_organization(&request.name, &request.description, organization_type)?;
    Ok(organization.into())
}

/// Marks an employee as responsible for an organization. Idempotent.
///
/// # Errors
///
/// Returns a not-found error if either side of the membership does not
/// exist.
pub fn assign_responsible(
    persistence: &mut Persistence,
    request: &AssignResponsibleRequest,
) -> Result<(), ApiError> {
    persistence.assign_responsible(request.organization_id, request.employee_id)?;
    Ok(())
}
