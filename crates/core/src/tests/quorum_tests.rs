// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{APPROVAL_QUORUM_CAP, approval_threshold, quorum_reached};

#[test]
fn test_threshold_capped_at_three() {
    assert_eq!(approval_threshold(1), 1);
    assert_eq!(approval_threshold(2), 2);
    assert_eq!(approval_threshold(3), 3);
    assert_eq!(approval_threshold(4), 3);
    assert_eq!(approval_threshold(100), APPROVAL_QUORUM_CAP);
}

#[test]
fn test_quorum_exactness_small_org() {
    // Organization with 2 responsible employees: threshold is 2.
    assert!(!quorum_reached(0, 2));
    assert!(!quorum_reached(1, 2));
    assert!(quorum_reached(2, 2));
}

#[test]
fn test_quorum_exactness_large_org() {
    // Organization with 10 responsible employees: threshold stays 3.
    assert!(!quorum_reached(2, 10));
    assert!(quorum_reached(3, 10));
    assert!(quorum_reached(4, 10));
}

#[test]
fn test_single_responsible_employee() {
    assert!(quorum_reached(1, 1));
    assert!(!quorum_reached(0, 1));
}
