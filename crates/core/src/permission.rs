// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The author permission rule.
//!
//! This rule gates bid status reads, status edits, field edits, and
//! rollback. It is distinct from approval-decision authorization, which
//! checks responsibility over the *tender's* organization instead.

use procura_domain::AuthorType;

/// Facts resolved by the stores for one permission evaluation.
///
/// The caller of [`author_has_permissions`] is responsible for resolving
/// these against a consistent snapshot (one unit of work).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorFacts {
    /// The bid's author type.
    pub author_type: AuthorType,
    /// The bid's author employee id.
    pub author_id: i64,
    /// The caller, resolved to an employee id.
    pub caller_employee_id: i64,
    /// Whether the caller is a responsible employee of the author's
    /// organization. Only consulted for Organization-type bids; `false`
    /// when the author has no organization membership.
    pub caller_responsible_for_author_org: bool,
}

/// Evaluates whether the caller may act as the bid's author.
///
/// - Organization-type bids: any responsible employee of the author's
///   organization may act.
/// - User-type bids: only the exact matching employee may act; teammates
///   may not.
#[must_use]
pub const fn author_has_permissions(facts: &AuthorFacts) -> bool {
    match facts.author_type {
        AuthorType::Organization => facts.caller_responsible_for_author_org,
        AuthorType::User => facts.caller_employee_id == facts.author_id,
    }
}
