// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{
    AssignResponsibleRequest, BidResponse, CreateBidRequest, CreateTenderRequest,
    RegisterEmployeeRequest, RegisterOrganizationRequest, TenderResponse,
};
use procura_persistence::Persistence;

pub fn setup_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to set up in-memory persistence")
}

pub fn register_test_employee(persistence: &mut Persistence, username: &str) -> i64 {
    let employee = crate::register_employee(
        persistence,
        &RegisterEmployeeRequest {
            username: username.to_string(),
            first_name: String::from("Test"),
            last_name: String::from("Employee"),
        },
    )
    .expect("Failed to register employee");
    employee.id
}

pub fn register_test_organization(persistence: &mut Persistence, name: &str) -> i64 {
    let organization = crate::register_organization(
        persistence,
        &RegisterOrganizationRequest {
            name: name.to_string(),
            description: String::from("A test organization"),
            organization_type: String::from("LLC"),
        },
    )
    .expect("Failed to register organization");
    organization.id
}

pub fn make_responsible(persistence: &mut Persistence, organization_id: i64, employee_id: i64) {
    crate::assign_responsible(
        persistence,
        &AssignResponsibleRequest {
            organization_id,
            employee_id,
        },
    )
    .expect("Failed to assign responsible employee");
}

pub fn create_published_tender(
    persistence: &mut Persistence,
    organization_id: i64,
    creator: &str,
) -> TenderResponse {
    crate::create_tender(
        persistence,
        &CreateTenderRequest {
            name: String::from("Office renovation"),
            description: String::from("Renovate floor three"),
            service_type: String::from("Construction"),
            status: String::from("Published"),
            organization_id,
            creator_username: creator.to_string(),
        },
    )
    .expect("Failed to create tender")
}

pub fn create_published_bid(
    persistence: &mut Persistence,
    tender_id: i64,
    author_id: i64,
    author_username: &str,
) -> BidResponse {
    let bid = crate::create_bid(
        persistence,
        &CreateBidRequest {
            name: String::from("Our offer"),
            description: String::from("We renovate offices"),
            tender_id,
            author_type: String::from("User"),
            author_id,
        },
    )
    .expect("Failed to create bid");

    crate::update_bid_status(persistence, bid.id, author_username, "Published")
        .expect("Failed to publish bid")
}
