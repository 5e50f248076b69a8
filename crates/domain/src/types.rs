// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core entity types for the tender marketplace.

use crate::bid_status::BidStatus;
use crate::error::DomainError;
use crate::tender_status::TenderStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of work a tender requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    Construction,
    Delivery,
    Manufacture,
}

impl ServiceType {
    /// Returns the string representation used for persistence and APIs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Construction => "Construction",
            Self::Delivery => "Delivery",
            Self::Manufacture => "Manufacture",
        }
    }
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Construction" => Ok(Self::Construction),
            "Delivery" => Ok(Self::Delivery),
            "Manufacture" => Ok(Self::Manufacture),
            _ => Err(DomainError::InvalidServiceType(s.to_string())),
        }
    }
}

/// Whether a bid is authored by an individual employee or on behalf of
/// an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorType {
    User,
    Organization,
}

impl AuthorType {
    /// Returns the string representation used for persistence and APIs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Organization => "Organization",
        }
    }
}

impl FromStr for AuthorType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Self::User),
            "Organization" => Ok(Self::Organization),
            _ => Err(DomainError::InvalidAuthorType(s.to_string())),
        }
    }
}

/// A responsible employee's verdict on a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Returns the string representation used for APIs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidDecision(s.to_string())),
        }
    }
}

/// Legal form of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationType {
    /// Individual entrepreneur
    Ie,
    /// Limited liability company
    Llc,
    /// Joint-stock company
    Jsc,
}

impl OrganizationType {
    /// Returns the string representation used for persistence and APIs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ie => "IE",
            Self::Llc => "LLC",
            Self::Jsc => "JSC",
        }
    }
}

impl FromStr for OrganizationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IE" => Ok(Self::Ie),
            "LLC" => Ok(Self::Llc),
            "JSC" => Ok(Self::Jsc),
            _ => Err(DomainError::InvalidOrganizationType(s.to_string())),
        }
    }
}

/// A published request for work from an organization.
///
/// The current row is authoritative; every mutation snapshots the prior
/// version into history before the version counter advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tender {
    pub tender_id: i64,
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub status: TenderStatus,
    pub organization_id: i64,
    pub creator_username: String,
    pub version: i32,
    pub created_at: String,
}

/// A proposal submitted against a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    pub bid_id: i64,
    pub name: String,
    pub description: String,
    pub status: BidStatus,
    pub tender_id: i64,
    pub author_type: AuthorType,
    /// Employee id of the submitting author. For Organization-type bids the
    /// author's organization is resolved through this employee's membership.
    pub author_id: i64,
    pub version: i32,
    pub created_at: String,
}

/// Identity anchor; the username is the external handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

/// An organization that publishes tenders and may author bids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub organization_id: i64,
    pub name: String,
    pub description: String,
    pub organization_type: OrganizationType,
    pub created_at: String,
}

/// Feedback attached to a bid by the tender-owning organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub review_id: i64,
    pub bid_id: i64,
    pub description: String,
    pub created_at: String,
}
