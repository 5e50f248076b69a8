// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response value types for the API boundary.
//!
//! Enum-like fields arrive as strings and are parsed into domain enums
//! during validation; responses carry the canonical string forms.

use serde::{Deserialize, Serialize};

use procura_domain::{Bid, Employee, Organization, Review, Tender};

/// Request to create a tender.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderRequest {
    pub name: String,
    pub description: String,
    pub service_type: String,
    /// The seed status, usually `Created` or `Published`.
    pub status: String,
    pub organization_id: i64,
    pub creator_username: String,
}

/// Request to create a bid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    pub name: String,
    pub description: String,
    pub tender_id: i64,
    pub author_type: String,
    pub author_id: i64,
}

/// Partial tender edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

/// Partial bid edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBidRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to register an employee in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEmployeeRequest {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Request to register an organization in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganizationRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub organization_type: String,
}

/// Request to mark an employee responsible for an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignResponsibleRequest {
    pub organization_id: i64,
    pub employee_id: i64,
}

/// A tender as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub organization_id: i64,
    pub creator_username: String,
    pub version: i32,
    pub created_at: String,
}

impl From<Tender> for TenderResponse {
    fn from(tender: Tender) -> Self {
        Self {
            id: tender.tender_id,
            name: tender.name,
            description: tender.description,
            service_type: tender.service_type.as_str().to_string(),
            status: tender.status.as_str().to_string(),
            organization_id: tender.organization_id,
            creator_username: tender.creator_username,
            version: tender.version,
            created_at: tender.created_at,
        }
    }
}

/// A bid as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: i64,
    pub author_type: String,
    pub author_id: i64,
    pub version: i32,
    pub created_at: String,
}

impl From<Bid> for BidResponse {
    fn from(bid: Bid) -> Self {
        Self {
            id: bid.bid_id,
            name: bid.name,
            description: bid.description,
            status: bid.status.as_str().to_string(),
            tender_id: bid.tender_id,
            author_type: bid.author_type.as_str().to_string(),
            author_id: bid.author_id,
            version: bid.version,
            created_at: bid.created_at,
        }
    }
}

/// A review as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i64,
    pub bid_id: i64,
    pub description: String,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.review_id,
            bid_id: review.bid_id,
            description: review.description,
            created_at: review.created_at,
        }
    }
}

/// An employee as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.employee_id,
            username: employee.username,
            first_name: employee.first_name,
            last_name: employee.last_name,
            created_at: employee.created_at,
        }
    }
}

/// An organization as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub organization_type: String,
    pub created_at: String,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.organization_id,
            name: organization.name,
            description: organization.description,
            organization_type: organization.organization_type.as_str().to_string(),
            created_at: organization.created_at,
        }
    }
}
