// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AuthorFacts, author_has_permissions};
use procura_domain::AuthorType;

#[test]
fn test_user_bid_exact_author_only() {
    let facts = AuthorFacts {
        author_type: AuthorType::User,
        author_id: 7,
        caller_employee_id: 7,
        caller_responsible_for_author_org: false,
    };
    assert!(author_has_permissions(&facts));
}

#[test]
fn test_user_bid_rejects_teammate() {
    // Responsibility over the author's organization does not help for a
    // User-type bid.
    let facts = AuthorFacts {
        author_type: AuthorType::User,
        author_id: 7,
        caller_employee_id: 8,
        caller_responsible_for_author_org: true,
    };
    assert!(!author_has_permissions(&facts));
}

#[test]
fn test_organization_bid_any_responsible_member() {
    let facts = AuthorFacts {
        author_type: AuthorType::Organization,
        author_id: 7,
        caller_employee_id: 8,
        caller_responsible_for_author_org: true,
    };
    assert!(author_has_permissions(&facts));
}

#[test]
fn test_organization_bid_rejects_outsider() {
    // Even the author themselves is rejected if they are no longer a
    // responsible member of the organization.
    let facts = AuthorFacts {
        author_type: AuthorType::Organization,
        author_id: 7,
        caller_employee_id: 7,
        caller_responsible_for_author_org: false,
    };
    assert!(!author_has_permissions(&facts));
}
