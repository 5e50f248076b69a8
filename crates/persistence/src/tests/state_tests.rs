// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Version monotonicity, history pre-images, and rollback semantics.

use super::{
    assign_test_responsible, create_test_employee, create_test_organization, create_test_tender,
    setup_persistence,
};
use crate::PersistenceError;
use procura::{BidPatch, TenderPatch};
use procura_domain::{BidStatus, ServiceType, TenderStatus};

#[test]
fn test_tender_version_starts_at_one() {
    let mut persistence = setup_persistence();
    let employee = create_test_employee(&mut persistence, "walter");
    let org = create_test_organization(&mut persistence, "Builders Ltd");
    assign_test_responsible(&mut persistence, org.organization_id, employee.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "walter",
        TenderStatus::Created,
    );

    assert_eq!(tender.version, 1);
    assert_eq!(tender.status, TenderStatus::Created);
}

#[test]
fn test_each_edit_bumps_version_and_snapshots_pre_image() {
    let mut persistence = setup_persistence();
    let employee = create_test_employee(&mut persistence, "walter");
    let org = create_test_organization(&mut persistence, "Builders Ltd");
    assign_test_responsible(&mut persistence, org.organization_id, employee.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "walter",
        TenderStatus::Created,
    );

    let v2 = persistence
        .edit_tender(
            tender.tender_id,
            "walter",
            TenderPatch {
                name: Some(String::from("Warehouse construction phase 2")),
                description: None,
                service_type: None,
            },
        )
        .expect("First edit failed");
    assert_eq!(v2.version, 2);

    let v3 = persistence
        .edit_tender(
            tender.tender_id,
            "walter",
            TenderPatch {
                name: None,
                description: Some(String::from("Updated scope")),
                service_type: Some(ServiceType::Manufacture),
            },
        )
        .expect("Second edit failed");
    assert_eq!(v3.version, 3);

    // History holds exactly versions 1 and 2, each equal to the
    // pre-mutation snapshot at that step.
    let snapshot_v1 = persistence
        .find_tender_at_version(tender.tender_id, 1)
        .expect("Version 1 missing from history");
    assert_eq!(snapshot_v1.name, tender.name);
    assert_eq!(snapshot_v1.description, tender.description);
    assert_eq!(snapshot_v1.version, 1);

    let snapshot_v2 = persistence
        .find_tender_at_version(tender.tender_id, 2)
        .expect("Version 2 missing from history");
    assert_eq!(snapshot_v2.name, "Warehouse construction phase 2");
    assert_eq!(snapshot_v2.description, tender.description);

    // The live row holds the current version; it is not in history.
    assert!(matches!(
        persistence.find_tender_at_version(tender.tender_id, 3),
        Err(PersistenceError::TenderVersionNotFound { .. })
    ));
}

#[test]
fn test_partial_edit_leaves_absent_fields_unchanged() {
    let mut persistence = setup_persistence();
    let employee = create_test_employee(&mut persistence, "walter");
    let org = create_test_organization(&mut persistence, "Builders Ltd");
    assign_test_responsible(&mut persistence, org.organization_id, employee.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "walter",
        TenderStatus::Created,
    );

    let edited = persistence
        .edit_tender(
            tender.tender_id,
            "walter",
            TenderPatch {
                name: Some(String::from("Renamed tender")),
                description: None,
                service_type: None,
            },
        )
        .expect("Edit failed");

    assert_eq!(edited.name, "Renamed tender");
    assert_eq!(edited.description, tender.description);
    assert_eq!(edited.service_type, tender.service_type);
    assert_eq!(edited.status, tender.status);
}

#[test]
fn test_rollback_replays_content_at_new_version() {
    let mut persistence = setup_persistence();
    let employee = create_test_employee(&mut persistence, "walter");
    let org = create_test_organization(&mut persistence, "Builders Ltd");
    assign_test_responsible(&mut persistence, org.organization_id, employee.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "walter",
        TenderStatus::Created,
    );

    persistence
        .edit_tender(
            tender.tender_id,
            "walter",
            TenderPatch {
                name: Some(String::from("Renamed tender")),
                description: None,
                service_type: None,
            },
        )
        .expect("Edit failed");

    let restored = persistence
        .rollback_tender(tender.tender_id, 1, "walter")
        .expect("Rollback failed");

    // Content equals the version-1 snapshot; the version is new, never 1.
    assert_eq!(restored.name, tender.name);
    assert_eq!(restored.description, tender.description);
    assert_eq!(restored.version, 3);

    // The pre-rollback state is itself preserved in history.
    let snapshot_v2 = persistence
        .find_tender_at_version(tender.tender_id, 2)
        .expect("Version 2 missing from history");
    assert_eq!(snapshot_v2.name, "Renamed tender");
}

#[test]
fn test_rollback_to_missing_version_is_not_found() {
    let mut persistence = setup_persistence();
    let employee = create_test_employee(&mut persistence, "walter");
    let org = create_test_organization(&mut persistence, "Builders Ltd");
    assign_test_responsible(&mut persistence, org.organization_id, employee.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "walter",
        TenderStatus::Created,
    );

    let result = persistence.rollback_tender(tender.tender_id, 7, "walter");
    assert!(matches!(
        result,
        Err(PersistenceError::TenderVersionNotFound {
            version: 7,
            ..
        })
    ));
}

#[test]
fn test_rollback_requires_snapshot_organization_responsibility() {
    let mut persistence = setup_persistence();
    let employee = create_test_employee(&mut persistence, "walter");
    let outsider = create_test_employee(&mut persistence, "hector");
    let org = create_test_organization(&mut persistence, "Builders Ltd");
    assign_test_responsible(&mut persistence, org.organization_id, employee.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "walter",
        TenderStatus::Created,
    );
    persistence
        .edit_tender(
            tender.tender_id,
            "walter",
            TenderPatch {
                name: Some(String::from("Renamed tender")),
                description: None,
                service_type: None,
            },
        )
        .expect("Edit failed");

    let result = persistence.rollback_tender(tender.tender_id, 1, &outsider.username);
    assert!(matches!(
        result,
        Err(PersistenceError::PermissionDenied { .. })
    ));
}

#[test]
fn test_bid_versioning_mirrors_tender_versioning() {
    let mut persistence = setup_persistence();
    let employee = create_test_employee(&mut persistence, "walter");
    let bidder = create_test_employee(&mut persistence, "jesse");
    let org = create_test_organization(&mut persistence, "Builders Ltd");
    assign_test_responsible(&mut persistence, org.organization_id, employee.employee_id);

    let tender = create_test_tender(
        &mut persistence,
        org.organization_id,
        "walter",
        TenderStatus::Published,
    );
    let bid = super::create_test_bid(&mut persistence, tender.tender_id, bidder.employee_id);
    assert_eq!(bid.version, 1);
    assert_eq!(bid.status, BidStatus::Created);

    let edited = persistence
        .edit_bid(
            bid.bid_id,
            "jesse",
            BidPatch {
                name: Some(String::from("Sharper offer")),
                description: None,
            },
        )
        .expect("Bid edit failed");
    assert_eq!(edited.version, 2);

    let snapshot = persistence
        .find_bid_at_version(bid.bid_id, 1)
        .expect("Bid version 1 missing from history");
    assert_eq!(snapshot.name, bid.name);

    let restored = persistence
        .rollback_bid(bid.bid_id, 1, "jesse")
        .expect("Bid rollback failed");
    assert_eq!(restored.name, bid.name);
    assert_eq!(restored.version, 3);
}
