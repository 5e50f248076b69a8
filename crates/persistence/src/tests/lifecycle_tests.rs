// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle enforcement: creation preconditions, status machines,
//! permission rules, the approval quorum, and listing visibility.

use super::{
    assign_test_responsible, create_published_bid, create_test_bid, create_test_employee,
    create_test_organization, create_test_tender, setup_persistence,
};
use crate::{NewBid, PersistenceError};
use procura_domain::{AuthorType, BidStatus, Decision, PageWindow, TenderStatus};

#[test]
fn test_bid_creation_requires_published_tender() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let bidder = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);

    for status in [TenderStatus::Created, TenderStatus::Closed] {
        let tender = create_test_tender(&mut persistence, org.organization_id, "gus", status);

        let result = persistence.create_bid(&NewBid {
            name: String::from("Competitive offer"),
            description: String::from("We can build this"),
            tender_id: tender.tender_id,
            author_type: AuthorType::User,
            author_id: bidder.employee_id,
        });

        assert!(matches!(
            result,
            Err(PersistenceError::TenderNotPublished { .. })
        ));
    }

    // No bid row was created by the failed attempts.
    let bids = persistence
        .bids_by_author("mike", PageWindow::default())
        .expect("Listing failed");
    assert!(bids.is_empty());
}

#[test]
fn test_bid_creation_against_missing_tender_is_not_found() {
    let mut persistence = setup_persistence();
    let bidder = create_test_employee(&mut persistence, "mike");

    let result = persistence.create_bid(&NewBid {
        name: String::from("Competitive offer"),
        description: String::from("We can build this"),
        tender_id: 999,
        author_type: AuthorType::User,
        author_id: bidder.employee_id,
    });

    assert!(matches!(result, Err(PersistenceError::TenderNotFound(999))));
}

#[test]
fn test_bid_creation_requires_existing_author() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);
    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );

    let result = persistence.create_bid(&NewBid {
        name: String::from("Ghost offer"),
        description: String::from("From nobody"),
        tender_id: tender.tender_id,
        author_type: AuthorType::User,
        author_id: 999,
    });

    assert!(matches!(
        result,
        Err(PersistenceError::EmployeeNotFound(999))
    ));
}

#[test]
fn test_organization_bid_requires_membership() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let loner = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);
    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );

    // An employee with no organization membership is not a valid
    // Organization-type author.
    let result = persistence.create_bid(&NewBid {
        name: String::from("Corporate offer"),
        description: String::from("On behalf of nothing"),
        tender_id: tender.tender_id,
        author_type: AuthorType::Organization,
        author_id: loner.employee_id,
    });

    assert!(matches!(
        result,
        Err(PersistenceError::NoOrganizationMembership { .. })
    ));
}

#[test]
fn test_bid_status_machine_rejects_illegal_transitions() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let bidder = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);
    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );
    let bid = create_test_bid(&mut persistence, tender.tender_id, bidder.employee_id);

    // Created bids cannot jump straight to Approved.
    let result = persistence.edit_bid_status(bid.bid_id, "mike", BidStatus::Approved);
    assert!(matches!(result, Err(PersistenceError::RuleViolation(_))));

    // Created → Published → Canceled → Published is a legal path.
    let bid = persistence
        .edit_bid_status(bid.bid_id, "mike", BidStatus::Published)
        .expect("Publish failed");
    let bid = persistence
        .edit_bid_status(bid.bid_id, "mike", BidStatus::Canceled)
        .expect("Cancel failed");
    persistence
        .edit_bid_status(bid.bid_id, "mike", BidStatus::Published)
        .expect("Republish failed");
}

#[test]
fn test_tender_status_moves_forward_only() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);
    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );

    let result = persistence.edit_tender_status(tender.tender_id, "gus", TenderStatus::Created);
    assert!(matches!(result, Err(PersistenceError::RuleViolation(_))));

    let closed = persistence
        .edit_tender_status(tender.tender_id, "gus", TenderStatus::Closed)
        .expect("Close failed");
    assert_eq!(closed.status, TenderStatus::Closed);

    // Closed is terminal.
    let result = persistence.edit_tender_status(tender.tender_id, "gus", TenderStatus::Published);
    assert!(matches!(result, Err(PersistenceError::RuleViolation(_))));
}

#[test]
fn test_tender_status_edit_requires_creator() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let other = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);
    assign_test_responsible(&mut persistence, org.organization_id, other.employee_id);
    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Created,
    );

    // Even a responsible teammate is not the creator.
    let result = persistence.edit_tender_status(tender.tender_id, "mike", TenderStatus::Published);
    assert!(matches!(
        result,
        Err(PersistenceError::PermissionDenied { .. })
    ));
}

#[test]
fn test_tender_status_visibility() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let outsider = create_test_employee(&mut persistence, "hector");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);

    let hidden = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Created,
    );

    // A non-Published tender requires a caller.
    assert!(matches!(
        persistence.tender_status(hidden.tender_id, None),
        Err(PersistenceError::CallerRequired)
    ));

    // And the caller must be responsible for the organization.
    assert!(matches!(
        persistence.tender_status(hidden.tender_id, Some("hector")),
        Err(PersistenceError::PermissionDenied { .. })
    ));

    assert_eq!(
        persistence
            .tender_status(hidden.tender_id, Some("gus"))
            .expect("Owner read failed"),
        TenderStatus::Created
    );

    // Published tenders are public.
    let public = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );
    assert_eq!(
        persistence
            .tender_status(public.tender_id, None)
            .expect("Public read failed"),
        TenderStatus::Published
    );
}

#[test]
fn test_user_bid_permissions_are_exact() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let bidder = create_test_employee(&mut persistence, "mike");
    let teammate = create_test_employee(&mut persistence, "victor");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);

    // The bidder and a teammate share an organization; it must not matter
    // for a User-type bid.
    let bidders_org = create_test_organization(&mut persistence, "Crew");
    assign_test_responsible(
        &mut persistence,
        bidders_org.organization_id,
        bidder.employee_id,
    );
    assign_test_responsible(
        &mut persistence,
        bidders_org.organization_id,
        teammate.employee_id,
    );

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );
    let bid = create_test_bid(&mut persistence, tender.tender_id, bidder.employee_id);

    assert_eq!(
        persistence
            .bid_status(bid.bid_id, "mike")
            .expect("Author read failed"),
        BidStatus::Created
    );
    assert!(matches!(
        persistence.bid_status(bid.bid_id, "victor"),
        Err(PersistenceError::PermissionDenied { .. })
    ));
}

#[test]
fn test_organization_bid_permissions_cover_members() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let author = create_test_employee(&mut persistence, "mike");
    let teammate = create_test_employee(&mut persistence, "victor");
    let outsider = create_test_employee(&mut persistence, "hector");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);

    let bidders_org = create_test_organization(&mut persistence, "Crew");
    assign_test_responsible(
        &mut persistence,
        bidders_org.organization_id,
        author.employee_id,
    );
    assign_test_responsible(
        &mut persistence,
        bidders_org.organization_id,
        teammate.employee_id,
    );

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );
    let bid = persistence
        .create_bid(&NewBid {
            name: String::from("Corporate offer"),
            description: String::from("From the crew"),
            tender_id: tender.tender_id,
            author_type: AuthorType::Organization,
            author_id: author.employee_id,
        })
        .expect("Organization bid failed");

    // Any responsible member of the author's organization may act.
    assert!(persistence.bid_status(bid.bid_id, "mike").is_ok());
    assert!(persistence.bid_status(bid.bid_id, "victor").is_ok());
    assert!(matches!(
        persistence.bid_status(bid.bid_id, "hector"),
        Err(PersistenceError::PermissionDenied { .. })
    ));
}

#[test]
fn test_quorum_two_responsible_employees() {
    let mut persistence = setup_persistence();
    let anna = create_test_employee(&mut persistence, "anna");
    let boris = create_test_employee(&mut persistence, "boris");
    let bidder = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, anna.employee_id);
    assign_test_responsible(&mut persistence, org.organization_id, boris.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "anna",
        TenderStatus::Published,
    );
    let bid = create_published_bid(&mut persistence, tender.tender_id, &bidder);

    // First approval: threshold is min(3, 2) = 2, so the bid stays
    // Published.
    let after_first = persistence
        .submit_decision(bid.bid_id, "anna", Decision::Approved)
        .expect("First approval failed");
    assert_eq!(after_first.status, BidStatus::Published);

    let tender_now = persistence
        .find_tender(tender.tender_id)
        .expect("Tender lookup failed");
    assert_eq!(tender_now.status, TenderStatus::Published);

    // Second distinct approval crosses the threshold: the bid becomes
    // Approved and the tender becomes Closed in the same commit.
    let after_second = persistence
        .submit_decision(bid.bid_id, "boris", Decision::Approved)
        .expect("Second approval failed");
    assert_eq!(after_second.status, BidStatus::Approved);

    let tender_now = persistence
        .find_tender(tender.tender_id)
        .expect("Tender lookup failed");
    assert_eq!(tender_now.status, TenderStatus::Closed);
}

#[test]
fn test_duplicate_approvals_never_advance_the_count() {
    let mut persistence = setup_persistence();
    let anna = create_test_employee(&mut persistence, "anna");
    let boris = create_test_employee(&mut persistence, "boris");
    let bidder = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, anna.employee_id);
    assign_test_responsible(&mut persistence, org.organization_id, boris.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "anna",
        TenderStatus::Published,
    );
    let bid = create_published_bid(&mut persistence, tender.tender_id, &bidder);

    for _ in 0..3 {
        let after = persistence
            .submit_decision(bid.bid_id, "anna", Decision::Approved)
            .expect("Duplicate approval failed");
        assert_eq!(after.status, BidStatus::Published);
    }

    let tender_now = persistence
        .find_tender(tender.tender_id)
        .expect("Tender lookup failed");
    assert_eq!(tender_now.status, TenderStatus::Published);
}

#[test]
fn test_quorum_capped_at_three_for_large_organizations() {
    let mut persistence = setup_persistence();
    let org = create_test_organization(&mut persistence, "Los Pollos");
    let usernames = ["anna", "boris", "carla", "dmitri", "elena"];
    for username in usernames {
        let employee = create_test_employee(&mut persistence, username);
        assign_test_responsible(&mut persistence, org.organization_id, employee.employee_id);
    }
    let bidder = create_test_employee(&mut persistence, "mike");

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "anna",
        TenderStatus::Published,
    );
    let bid = create_published_bid(&mut persistence, tender.tender_id, &bidder);

    let after = persistence
        .submit_decision(bid.bid_id, "anna", Decision::Approved)
        .expect("Approval failed");
    assert_eq!(after.status, BidStatus::Published);

    let after = persistence
        .submit_decision(bid.bid_id, "boris", Decision::Approved)
        .expect("Approval failed");
    assert_eq!(after.status, BidStatus::Published);

    let after = persistence
        .submit_decision(bid.bid_id, "carla", Decision::Approved)
        .expect("Approval failed");
    assert_eq!(after.status, BidStatus::Approved);
}

#[test]
fn test_rejection_is_immediate_and_terminal() {
    let mut persistence = setup_persistence();
    let anna = create_test_employee(&mut persistence, "anna");
    let boris = create_test_employee(&mut persistence, "boris");
    let bidder = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, anna.employee_id);
    assign_test_responsible(&mut persistence, org.organization_id, boris.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "anna",
        TenderStatus::Published,
    );
    let bid = create_published_bid(&mut persistence, tender.tender_id, &bidder);

    let rejected = persistence
        .submit_decision(bid.bid_id, "anna", Decision::Rejected)
        .expect("Rejection failed");
    assert_eq!(rejected.status, BidStatus::Rejected);

    // The tender stays open and the rejected bid takes no more decisions.
    let tender_now = persistence
        .find_tender(tender.tender_id)
        .expect("Tender lookup failed");
    assert_eq!(tender_now.status, TenderStatus::Published);

    let result = persistence.submit_decision(bid.bid_id, "boris", Decision::Approved);
    assert!(matches!(
        result,
        Err(PersistenceError::BidNotPublished { .. })
    ));
}

#[test]
fn test_decision_requires_published_bid() {
    let mut persistence = setup_persistence();
    let anna = create_test_employee(&mut persistence, "anna");
    let bidder = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, anna.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "anna",
        TenderStatus::Published,
    );
    let bid = create_test_bid(&mut persistence, tender.tender_id, bidder.employee_id);

    // Still Created: no decision applies, and no vote is recorded.
    let result = persistence.submit_decision(bid.bid_id, "anna", Decision::Approved);
    assert!(matches!(
        result,
        Err(PersistenceError::BidNotPublished { .. })
    ));
}

#[test]
fn test_decision_requires_tender_organization_responsibility() {
    let mut persistence = setup_persistence();
    let anna = create_test_employee(&mut persistence, "anna");
    let bidder = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, anna.employee_id);

    // The bidder is responsible for their own organization, but that is
    // the wrong organization for a decision.
    let bidders_org = create_test_organization(&mut persistence, "Crew");
    assign_test_responsible(
        &mut persistence,
        bidders_org.organization_id,
        bidder.employee_id,
    );

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "anna",
        TenderStatus::Published,
    );
    let bid = create_published_bid(&mut persistence, tender.tender_id, &bidder);

    let result = persistence.submit_decision(bid.bid_id, "mike", Decision::Approved);
    assert!(matches!(
        result,
        Err(PersistenceError::PermissionDenied { .. })
    ));
}

#[test]
fn test_bids_by_tender_visibility() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let bidder = create_test_employee(&mut persistence, "mike");
    let stranger = create_test_employee(&mut persistence, "hector");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );
    let created_bid = create_test_bid(&mut persistence, tender.tender_id, bidder.employee_id);
    let published_bid = persistence
        .create_bid(&NewBid {
            name: String::from("Visible offer"),
            description: String::from("Published for review"),
            tender_id: tender.tender_id,
            author_type: AuthorType::User,
            author_id: bidder.employee_id,
        })
        .and_then(|bid| {
            persistence.edit_bid_status(bid.bid_id, "mike", BidStatus::Published)
        })
        .expect("Publish failed");

    // The tender's organization sees only Published bids.
    let seen_by_owner = persistence
        .bids_by_tender(tender.tender_id, "gus", PageWindow::default())
        .expect("Owner listing failed");
    assert_eq!(seen_by_owner.len(), 1);
    assert_eq!(seen_by_owner[0].bid_id, published_bid.bid_id);

    // The author sees their bids in any status.
    let seen_by_author = persistence
        .bids_by_tender(tender.tender_id, "mike", PageWindow::default())
        .expect("Author listing failed");
    assert_eq!(seen_by_author.len(), 2);
    assert!(seen_by_author.iter().any(|b| b.bid_id == created_bid.bid_id));

    // A stranger sees nothing.
    let seen_by_stranger = persistence
        .bids_by_tender(tender.tender_id, "hector", PageWindow::default())
        .expect("Stranger listing failed");
    assert!(seen_by_stranger.is_empty());
}

#[test]
fn test_feedback_and_review_lookup() {
    let mut persistence = setup_persistence();
    let owner = create_test_employee(&mut persistence, "gus");
    let bidder = create_test_employee(&mut persistence, "mike");
    let org = create_test_organization(&mut persistence, "Los Pollos");
    assign_test_responsible(&mut persistence, org.organization_id, owner.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "gus",
        TenderStatus::Published,
    );
    let bid = create_published_bid(&mut persistence, tender.tender_id, &bidder);

    // Only the tender's organization may leave feedback.
    let result = persistence.send_feedback(bid.bid_id, "mike", "Nice try");
    assert!(matches!(
        result,
        Err(PersistenceError::PermissionDenied { .. })
    ));

    persistence
        .send_feedback(bid.bid_id, "gus", "Solid proposal")
        .expect("Feedback failed");
    persistence
        .send_feedback(bid.bid_id, "gus", "Price is too high")
        .expect("Feedback failed");

    let reviews = persistence
        .reviews_by_tender(tender.tender_id, "mike", "gus", PageWindow::default())
        .expect("Review lookup failed");
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].description, "Solid proposal");

    // A requester outside the tender's organization is rejected.
    let result = persistence.reviews_by_tender(tender.tender_id, "mike", "mike", PageWindow::default());
    assert!(matches!(
        result,
        Err(PersistenceError::NoOrganizationMembership { .. })
    ));
}
