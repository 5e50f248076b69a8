// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// A validated limit/offset window for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    limit: i64,
    offset: i64,
}

impl PageWindow {
    /// Default number of rows returned when no limit is supplied.
    pub const DEFAULT_LIMIT: i64 = 5;
    /// Largest limit a caller may request.
    pub const MAX_LIMIT: i64 = 50;

    /// Creates a window from optional caller-supplied values.
    ///
    /// # Errors
    ///
    /// Returns an error if the limit is outside `0..=50` or the offset is
    /// negative.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, DomainError> {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        if !(0..=Self::MAX_LIMIT).contains(&limit) {
            return Err(DomainError::InvalidPageLimit { limit });
        }

        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(DomainError::InvalidPageOffset { offset });
        }

        Ok(Self { limit, offset })
    }

    /// The maximum number of rows to return.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// The number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let window = PageWindow::default();
        assert_eq!(window.limit(), 5);
        assert_eq!(window.offset(), 0);

        match PageWindow::new(None, None) {
            Ok(window) => {
                assert_eq!(window.limit(), 5);
                assert_eq!(window.offset(), 0);
            }
            Err(e) => panic!("Default window rejected: {e}"),
        }
    }

    #[test]
    fn test_limit_bounds() {
        assert!(PageWindow::new(Some(0), None).is_ok());
        assert!(PageWindow::new(Some(50), None).is_ok());
        assert!(PageWindow::new(Some(51), None).is_err());
        assert!(PageWindow::new(Some(-1), None).is_err());
    }

    #[test]
    fn test_offset_bounds() {
        assert!(PageWindow::new(None, Some(0)).is_ok());
        assert!(PageWindow::new(None, Some(1000)).is_ok());
        assert!(PageWindow::new(None, Some(-1)).is_err());
    }
}
