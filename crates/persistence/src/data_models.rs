// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row-level models for the relational tables and their conversions into
//! domain types.
//!
//! Status and type columns are stored as their canonical strings; a stored
//! value outside the closed domain enums fails row decoding as an internal
//! error, never as a user-facing denial.

use diesel::prelude::*;

use crate::error::PersistenceError;
use procura_domain::{Bid, Employee, Organization, Review, Tender};

fn decode<T: std::str::FromStr<Err = procura_domain::DomainError>>(
    value: &str,
) -> Result<T, PersistenceError> {
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))
}

/// Current tender row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::tenders)]
pub struct TenderRow {
    pub tender_id: i64,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: i64,
    pub creator_username: String,
    pub version: i32,
    pub created_at: String,
}

impl TenderRow {
    /// Decodes the row into a domain tender.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum column holds an unknown value.
    pub fn into_tender(self) -> Result<Tender, PersistenceError> {
        Ok(Tender {
            tender_id: self.tender_id,
            name: self.name,
            description: self.description,
            service_type: decode(&self.service_type)?,
            status: decode(&self.status)?,
            organization_id: self.organization_id,
            creator_username: self.creator_username,
            version: self.version,
            created_at: self.created_at,
        })
    }
}

/// Insertable tender row; the id is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::tenders)]
pub struct NewTenderRow {
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: i64,
    pub creator_username: String,
    pub version: i32,
    pub created_at: String,
}

/// Append-only pre-image of a tender row, written before every update.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::tenders_history)]
pub struct NewTenderHistoryRow {
    pub tender_id: i64,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: i64,
    pub creator_username: String,
    pub created_at: String,
}

impl NewTenderHistoryRow {
    /// Captures the pre-image of the current row.
    #[must_use]
    pub fn pre_image(row: &TenderRow) -> Self {
        Self {
            tender_id: row.tender_id,
            version: row.version,
            name: row.name.clone(),
            description: row.description.clone(),
            service_type: row.service_type.clone(),
            status: row.status.clone(),
            organization_id: row.organization_id,
            creator_username: row.creator_username.clone(),
            created_at: row.created_at.clone(),
        }
    }
}

/// Historical tender snapshot as read back from the history table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::tenders_history)]
pub struct TenderHistoryRow {
    pub history_id: i64,
    pub tender_id: i64,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: i64,
    pub creator_username: String,
    pub created_at: String,
}

impl TenderHistoryRow {
    /// Decodes the snapshot into a domain tender at its historical version.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum column holds an unknown value.
    pub fn into_tender(self) -> Result<Tender, PersistenceError> {
        Ok(Tender {
            tender_id: self.tender_id,
            name: self.name,
            description: self.description,
            service_type: decode(&self.service_type)?,
            status: decode(&self.status)?,
            organization_id: self.organization_id,
            creator_username: self.creator_username,
            version: self.version,
            created_at: self.created_at,
        })
    }
}

/// The new field values for a guarded tender update.
///
/// The update applies only when the row still holds `expected_version`;
/// the version column advances to `expected_version + 1`.
#[derive(Debug, Clone)]
pub struct TenderUpdate {
    pub tender_id: i64,
    pub expected_version: i32,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: i64,
}

/// Current bid row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::bids)]
pub struct BidRow {
    pub bid_id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: i64,
    pub author_type: String,
    pub author_id: i64,
    pub version: i32,
    pub created_at: String,
}

impl BidRow {
    /// Decodes the row into a domain bid.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum column holds an unknown value.
    pub fn into_bid(self) -> Result<Bid, PersistenceError> {
        Ok(Bid {
            bid_id: self.bid_id,
            name: self.name,
            description: self.description,
            status: decode(&self.status)?,
            tender_id: self.tender_id,
            author_type: decode(&self.author_type)?,
            author_id: self.author_id,
            version: self.version,
            created_at: self.created_at,
        })
    }
}

/// Insertable bid row; the id is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::bids)]
pub struct NewBidRow {
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: i64,
    pub author_type: String,
    pub author_id: i64,
    pub version: i32,
    pub created_at: String,
}

/// Append-only pre-image of a bid row, written before every update.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::bids_history)]
pub struct NewBidHistoryRow {
    pub bid_id: i64,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: i64,
    pub author_type: String,
    pub author_id: i64,
    pub created_at: String,
}

impl NewBidHistoryRow {
    /// Captures the pre-image of the current row.
    #[must_use]
    pub fn pre_image(row: &BidRow) -> Self {
        Self {
            bid_id: row.bid_id,
            version: row.version,
            name: row.name.clone(),
            description: row.description.clone(),
            status: row.status.clone(),
            tender_id: row.tender_id,
            author_type: row.author_type.clone(),
            author_id: row.author_id,
            created_at: row.created_at.clone(),
        }
    }
}

/// Historical bid snapshot as read back from the history table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::bids_history)]
pub struct BidHistoryRow {
    pub history_id: i64,
    pub bid_id: i64,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: i64,
    pub author_type: String,
    pub author_id: i64,
    pub created_at: String,
}

impl BidHistoryRow {
    /// Decodes the snapshot into a domain bid at its historical version.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum column holds an unknown value.
    pub fn into_bid(self) -> Result<Bid, PersistenceError> {
        Ok(Bid {
            bid_id: self.bid_id,
            name: self.name,
            description: self.description,
            status: decode(&self.status)?,
            tender_id: self.tender_id,
            author_type: decode(&self.author_type)?,
            author_id: self.author_id,
            version: self.version,
            created_at: self.created_at,
        })
    }
}

/// The new field values for a guarded bid update.
#[derive(Debug, Clone)]
pub struct BidUpdate {
    pub bid_id: i64,
    pub expected_version: i32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: i64,
    pub author_type: String,
    pub author_id: i64,
}

/// Employee row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

impl EmployeeRow {
    /// Converts the row into a domain employee.
    #[must_use]
    pub fn into_employee(self) -> Employee {
        Employee {
            employee_id: self.employee_id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
        }
    }
}

/// Insertable employee row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::employees)]
pub struct NewEmployeeRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

/// Organization row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::organizations)]
pub struct OrganizationRow {
    pub organization_id: i64,
    pub name: String,
    pub description: String,
    pub organization_type: String,
    pub created_at: String,
}

impl OrganizationRow {
    /// Decodes the row into a domain organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored organization type is unknown.
    pub fn into_organization(self) -> Result<Organization, PersistenceError> {
        Ok(Organization {
            organization_id: self.organization_id,
            name: self.name,
            description: self.description,
            organization_type: decode(&self.organization_type)?,
            created_at: self.created_at,
        })
    }
}

/// Insertable organization row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::organizations)]
pub struct NewOrganizationRow {
    pub name: String,
    pub description: String,
    pub organization_type: String,
    pub created_at: String,
}

/// Insertable responsible-employee membership row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::organization_responsible)]
pub struct NewResponsibleRow {
    pub organization_id: i64,
    pub employee_id: i64,
}

/// Insertable approval-vote row; unique on (bid, employee).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::bid_approvals)]
pub struct NewApprovalRow {
    pub bid_id: i64,
    pub employee_id: i64,
}

/// Review row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = crate::diesel_schema::bid_reviews)]
pub struct ReviewRow {
    pub review_id: i64,
    pub bid_id: i64,
    pub description: String,
    pub created_at: String,
}

impl ReviewRow {
    /// Converts the row into a domain review.
    #[must_use]
    pub fn into_review(self) -> Review {
        Review {
            review_id: self.review_id,
            bid_id: self.bid_id,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// Insertable review row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::bid_reviews)]
pub struct NewReviewRow {
    pub bid_id: i64,
    pub description: String,
    pub created_at: String,
}
