// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Partial-update application.
//!
//! Edits carry only the fields the caller wants to change; absent fields
//! are left untouched on the current row.

use procura_domain::{Bid, ServiceType, Tender};

/// The mutable fields of a tender edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TenderPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
}

impl TenderPatch {
    /// Applies the patch to a tender loaded from the store.
    pub fn apply(self, tender: &mut Tender) {
        if let Some(name) = self.name {
            tender.name = name;
        }
        if let Some(description) = self.description {
            tender.description = description;
        }
        if let Some(service_type) = self.service_type {
            tender.service_type = service_type;
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.service_type.is_none()
    }
}

/// The mutable fields of a bid edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BidPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl BidPatch {
    /// Applies the patch to a bid loaded from the store.
    pub fn apply(self, bid: &mut Bid) {
        if let Some(name) = self.name {
            bid.name = name;
        }
        if let Some(description) = self.description {
            bid.description = description;
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
