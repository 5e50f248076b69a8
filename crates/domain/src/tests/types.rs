// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AuthorType, Decision, DomainError, OrganizationType, ServiceType};

#[test]
fn test_service_type_round_trip() {
    for service_type in [
        ServiceType::Construction,
        ServiceType::Delivery,
        ServiceType::Manufacture,
    ] {
        assert_eq!(service_type.as_str().parse::<ServiceType>(), Ok(service_type));
    }
}

#[test]
fn test_service_type_rejects_unknown() {
    assert_eq!(
        "Plumbing".parse::<ServiceType>(),
        Err(DomainError::InvalidServiceType(String::from("Plumbing")))
    );
    assert!("construction".parse::<ServiceType>().is_err());
}

#[test]
fn test_author_type_round_trip() {
    assert_eq!("User".parse::<AuthorType>(), Ok(AuthorType::User));
    assert_eq!(
        "Organization".parse::<AuthorType>(),
        Ok(AuthorType::Organization)
    );
    assert_eq!(AuthorType::User.as_str(), "User");
    assert_eq!(AuthorType::Organization.as_str(), "Organization");
}

#[test]
fn test_author_type_rejects_unknown() {
    assert_eq!(
        "Robot".parse::<AuthorType>(),
        Err(DomainError::InvalidAuthorType(String::from("Robot")))
    );
}

#[test]
fn test_decision_round_trip() {
    assert_eq!("Approved".parse::<Decision>(), Ok(Decision::Approved));
    assert_eq!("Rejected".parse::<Decision>(), Ok(Decision::Rejected));
    assert!("Maybe".parse::<Decision>().is_err());
}

#[test]
fn test_organization_type_round_trip() {
    for org_type in [
        OrganizationType::Ie,
        OrganizationType::Llc,
        OrganizationType::Jsc,
    ] {
        assert_eq!(org_type.as_str().parse::<OrganizationType>(), Ok(org_type));
    }
    assert!("GmbH".parse::<OrganizationType>().is_err());
}
