// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender status tracking and transition logic.
//!
//! A tender only ever moves forward: Created → Published → Closed.
//! There is no path back into Created or Published once Closed.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tender lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenderStatus {
    /// Tender exists but is not yet visible to bidders
    Created,
    /// Tender is open for bids
    Published,
    /// Tender is closed; no further bids or transitions
    Closed,
}

impl TenderStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Published => "Published",
            Self::Closed => "Closed",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Created" => Ok(Self::Created),
            "Published" => Ok(Self::Published),
            "Closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidTenderStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Position of the status in the forward-only ordering.
    const fn rank(self) -> u8 {
        match self {
            Self::Created => 0,
            Self::Published => 1,
            Self::Closed => 2,
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Forward motion only; skipping Published is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        if new_status.rank() > self.rank() {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "tender status only moves forward".to_string(),
            })
        }
    }
}

impl FromStr for TenderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
