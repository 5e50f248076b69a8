// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod lifecycle_tests;
mod state_tests;

use crate::{NewBid, NewTender, Persistence};
use procura_domain::{
    AuthorType, Bid, BidStatus, Employee, Organization, OrganizationType, ServiceType, Tender,
    TenderStatus,
};

pub fn setup_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to set up in-memory persistence")
}

pub fn create_test_employee(persistence: &mut Persistence, username: &str) -> Employee {
    persistence
        .create_employee(username, "Test", "Employee")
        .expect("Failed to create employee")
}

pub fn create_test_organization(persistence: &mut Persistence, name: &str) -> Organization {
    persistence
        .create_organization(name, "A test organization", OrganizationType::Llc)
        .expect("Failed to create organization")
}

pub fn assign_test_responsible(
    persistence: &mut Persistence,
    organization_id: i64,
    employee_id: i64,
) {
    persistence
        .assign_responsible(organization_id, employee_id)
        .expect("Failed to assign responsible employee");
}

pub fn create_test_tender(
    persistence: &mut Persistence,
    organization_id: i64,
    creator_username: &str,
    status: TenderStatus,
) -> Tender {
    persistence
        .create_tender(&NewTender {
            name: String::from("Warehouse construction"),
            description: String::from("Build a warehouse in the north district"),
            service_type: ServiceType::Construction,
            status,
            organization_id,
            creator_username: creator_username.to_string(),
        })
        .expect("Failed to create tender")
}

pub fn create_test_bid(persistence: &mut Persistence, tender_id: i64, author_id: i64) -> Bid {
    persistence
        .create_bid(&NewBid {
            name: String::from("Competitive offer"),
            description: String::from("We can build this"),
            tender_id,
            author_type: AuthorType::User,
            author_id,
        })
        .expect("Failed to create bid")
}

/// Creates a User-type bid and publishes it so decisions can apply.
pub fn create_published_bid(
    persistence: &mut Persistence,
    tender_id: i64,
    author: &Employee,
) -> Bid {
    let bid = create_test_bid(persistence, tender_id, author.employee_id);
    persistence
        .edit_bid_status(bid.bid_id, &author.username, BidStatus::Published)
        .expect("Failed to publish bid")
}
