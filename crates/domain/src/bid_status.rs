// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid status tracking and transition logic.
//!
//! A bid moves Created → Published, and from Published into exactly one
//! of Canceled, Approved, or Rejected. Approved and Rejected are terminal;
//! a Canceled bid may be published again.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bid lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidStatus {
    /// Bid exists but is not yet visible to the tender's organization
    Created,
    /// Bid is visible and eligible for approval decisions
    Published,
    /// Bid was withdrawn by its author
    Canceled,
    /// Bid reached the approval quorum
    Approved,
    /// Bid was rejected by a responsible employee
    Rejected,
}

impl BidStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Published => "Published",
            Self::Canceled => "Canceled",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Created" => Ok(Self::Created),
            "Published" => Ok(Self::Published),
            "Canceled" => Ok(Self::Canceled),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidBidStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Validates if a transition from this status to another is permitted.
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

        let valid = match self {
            Self::Created | Self::Canceled => matches!(new_status, Self::Published),
            Self::Published => {
                matches!(new_status, Self::Canceled | Self::Approved | Self::Rejected)
            }
            Self::Approved | Self::Rejected => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by status lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for BidStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
