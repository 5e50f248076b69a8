// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! All state-changing leaf operations live here. Each function is generated
//! in backend-specific monomorphic versions (`_sqlite` and `_mysql`) by the
//! `backend_fn!` macro and surfaces through the `PersistenceBackend` trait.
//! Multi-step orchestration belongs to `engine/`, never here.

pub mod bids;
pub mod directory;
pub mod tenders;
