// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates backend-specific initialization, migration,
//! and helper functions that cannot be expressed in backend-agnostic
//! Diesel DSL.
//!
//! ## Backend Support
//!
//! - `sqlite` — `SQLite` backend (default for development and testing)
//! - `mysql` — MySQL/MariaDB backend (validated via opt-in tests)
//!
//! ## The `PersistenceBackend` trait
//!
//! Diesel's type system requires concrete backend types at compile time,
//! so every leaf query and mutation is generated twice (`_sqlite` /
//! `_mysql`) by the `backend_fn!` macro. The trait below re-exposes that
//! leaf surface as methods implemented for both connection types, which
//! lets the lifecycle engine in `engine/` be written once, generically,
//! while staying fully monomorphic after instantiation.

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::data_models::{
    BidHistoryRow, BidRow, BidUpdate, EmployeeRow, NewApprovalRow, NewBidHistoryRow, NewBidRow,
    NewEmployeeRow, NewOrganizationRow, NewResponsibleRow, NewReviewRow, NewTenderHistoryRow,
    NewTenderRow, OrganizationRow, ReviewRow, TenderHistoryRow, TenderRow, TenderUpdate,
};
use crate::error::PersistenceError;
use crate::{mutations, queries};

/// Trait exposing the backend-specific leaf operations to generic code.
///
/// Implemented for both `SqliteConnection` and `MysqlConnection`; each
/// method delegates to the monomorphic `_sqlite`/`_mysql` function pair
/// generated by `backend_fn!`.
#[allow(clippy::missing_errors_doc)]
pub trait PersistenceBackend: Connection {
    /// Retrieves the last inserted row ID.
    fn last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    // Directory lookups

    fn employee_by_username(&mut self, username: &str)
    -> Result<Option<EmployeeRow>, PersistenceError>;

    fn employee_by_id(&mut self, employee_id: i64)
    -> Result<Option<EmployeeRow>, PersistenceError>;

    fn organization_by_id(
        &mut self,
        organization_id: i64,
    ) -> Result<Option<OrganizationRow>, PersistenceError>;

    /// The organization the employee is a responsible member of, if any.
    fn organization_of_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Option<OrganizationRow>, PersistenceError>;

    fn is_responsible(
        &mut self,
        organization_id: i64,
        username: &str,
    ) -> Result<bool, PersistenceError>;

    fn responsible_employee_ids(
        &mut self,
        organization_id: i64,
    ) -> Result<Vec<i64>, PersistenceError>;

    // Tender rows

    fn tender_by_id(&mut self, tender_id: i64) -> Result<Option<TenderRow>, PersistenceError>;

    fn tender_history_at(
        &mut self,
        tender_id: i64,
        version: i32,
    ) -> Result<Option<TenderHistoryRow>, PersistenceError>;

    fn tenders_by_creator(
        &mut self,
        username: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TenderRow>, PersistenceError>;

    fn published_tenders(
        &mut self,
        service_types: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TenderRow>, PersistenceError>;

    fn insert_tender(&mut self, row: &NewTenderRow) -> Result<i64, PersistenceError>;

    fn insert_tender_history(&mut self, row: &NewTenderHistoryRow)
    -> Result<(), PersistenceError>;

    /// Guarded update; returns the number of affected rows (0 or 1).
    fn update_tender_row(&mut self, update: &TenderUpdate) -> Result<usize, PersistenceError>;

    // Bid rows

    fn bid_by_id(&mut self, bid_id: i64) -> Result<Option<BidRow>, PersistenceError>;

    fn bid_history_at(
        &mut self,
        bid_id: i64,
        version: i32,
    ) -> Result<Option<BidHistoryRow>, PersistenceError>;

    fn bids_by_author(
        &mut self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BidRow>, PersistenceError>;

    fn bids_by_tender(
        &mut self,
        tender_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BidRow>, PersistenceError>;

    /// Bids whose tender belongs to the organization.
    fn bids_by_organization(
        &mut self,
        organization_id: i64,
    ) -> Result<Vec<BidRow>, PersistenceError>;

    fn insert_bid(&mut self, row: &NewBidRow) -> Result<i64, PersistenceError>;

    fn insert_bid_history(&mut self, row: &NewBidHistoryRow) -> Result<(), PersistenceError>;

    /// Guarded update; returns the number of affected rows (0 or 1).
    fn update_bid_row(&mut self, update: &BidUpdate) -> Result<usize, PersistenceError>;

    /// Idempotent vote insert; a duplicate (bid, employee) pair is a no-op.
    fn insert_approval(&mut self, bid_id: i64, employee_id: i64)
    -> Result<(), PersistenceError>;

    /// Count of distinct approving employees for the bid.
    fn approval_count(&mut self, bid_id: i64) -> Result<i64, PersistenceError>;

    fn insert_review(&mut self, row: &NewReviewRow) -> Result<(), PersistenceError>;

    fn reviews_for_bids(
        &mut self,
        bid_ids: &[i64],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewRow>, PersistenceError>;

    // Directory mutations

    fn insert_employee(&mut self, row: &NewEmployeeRow) -> Result<i64, PersistenceError>;

    fn insert_organization(&mut self, row: &NewOrganizationRow) -> Result<i64, PersistenceError>;

    /// Idempotent membership insert.
    fn insert_responsible(&mut self, row: &NewResponsibleRow) -> Result<(), PersistenceError>;
}

macro_rules! delegate_backend {
    ($conn_ty:ty, $suffix:ident) => {
        pastey::paste! {
            impl PersistenceBackend for $conn_ty {
                fn last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
                    $suffix::get_last_insert_rowid(self)
                }

                fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
                    $suffix::verify_foreign_key_enforcement(self)
                }

                fn employee_by_username(
                    &mut self,
                    username: &str,
                ) -> Result<Option<EmployeeRow>, PersistenceError> {
                    queries::directory::[<employee_by_username_ $suffix>](self, username)
                }

                fn employee_by_id(
                    &mut self,
                    employee_id: i64,
                ) -> Result<Option<EmployeeRow>, PersistenceError> {
                    queries::directory::[<employee_by_id_ $suffix>](self, employee_id)
                }

                fn organization_by_id(
                    &mut self,
                    organization_id: i64,
                ) -> Result<Option<OrganizationRow>, PersistenceError> {
                    queries::directory::[<organization_by_id_ $suffix>](self, organization_id)
                }

                fn organization_of_employee(
                    &mut self,
                    employee_id: i64,
                ) -> Result<Option<OrganizationRow>, PersistenceError> {
                    queries::directory::[<organization_of_employee_ $suffix>](self, employee_id)
                }

                fn is_responsible(
                    &mut self,
                    organization_id: i64,
                    username: &str,
                ) -> Result<bool, PersistenceError> {
                    queries::directory::[<is_responsible_ $suffix>](self, organization_id, username)
                }

                fn responsible_employee_ids(
                    &mut self,
                    organization_id: i64,
                ) -> Result<Vec<i64>, PersistenceError> {
                    queries::directory::[<responsible_employee_ids_ $suffix>](self, organization_id)
                }

                fn tender_by_id(
                    &mut self,
                    tender_id: i64,
                ) -> Result<Option<TenderRow>, PersistenceError> {
                    queries::tenders::[<tender_by_id_ $suffix>](self, tender_id)
                }

                fn tender_history_at(
                    &mut self,
                    tender_id: i64,
                    version: i32,
                ) -> Result<Option<TenderHistoryRow>, PersistenceError> {
                    queries::tenders::[<tender_history_at_ $suffix>](self, tender_id, version)
                }

                fn tenders_by_creator(
                    &mut self,
                    username: &str,
                    limit: i64,
                    offset: i64,
                ) -> Result<Vec<TenderRow>, PersistenceError> {
                    queries::tenders::[<tenders_by_creator_ $suffix>](self, username, limit, offset)
                }

                fn published_tenders(
                    &mut self,
                    service_types: &[String],
                    limit: i64,
                    offset: i64,
                ) -> Result<Vec<TenderRow>, PersistenceError> {
                    queries::tenders::[<published_tenders_ $suffix>](
                        self,
                        service_types,
                        limit,
                        offset,
                    )
                }

                fn insert_tender(&mut self, row: &NewTenderRow) -> Result<i64, PersistenceError> {
                    mutations::tenders::[<insert_tender_ $suffix>](self, row)
                }

                fn insert_tender_history(
                    &mut self,
                    row: &NewTenderHistoryRow,
                ) -> Result<(), PersistenceError> {
                    mutations::tenders::[<insert_tender_history_ $suffix>](self, row)
                }

                fn update_tender_row(
                    &mut self,
                    update: &TenderUpdate,
                ) -> Result<usize, PersistenceError> {
                    mutations::tenders::[<update_tender_row_ $suffix>](self, update)
                }

                fn bid_by_id(&mut self, bid_id: i64) -> Result<Option<BidRow>, PersistenceError> {
                    queries::bids::[<bid_by_id_ $suffix>](self, bid_id)
                }

                fn bid_history_at(
                    &mut self,
                    bid_id: i64,
                    version: i32,
                ) -> Result<Option<BidHistoryRow>, PersistenceError> {
                    queries::bids::[<bid_history_at_ $suffix>](self, bid_id, version)
                }

                fn bids_by_author(
                    &mut self,
                    author_id: i64,
                    limit: i64,
                    offset: i64,
                ) -> Result<Vec<BidRow>, PersistenceError> {
                    queries::bids::[<bids_by_author_ $suffix>](self, author_id, limit, offset)
                }

                fn bids_by_tender(
                    &mut self,
                    tender_id: i64,
                    limit: i64,
                    offset: i64,
                ) -> Result<Vec<BidRow>, PersistenceError> {
                    queries::bids::[<bids_by_tender_ $suffix>](self, tender_id, limit, offset)
                }

                fn bids_by_organization(
                    &mut self,
                    organization_id: i64,
                ) -> Result<Vec<BidRow>, PersistenceError> {
                    queries::bids::[<bids_by_organization_ $suffix>](self, organization_id)
                }

                fn insert_bid(&mut self, row: &NewBidRow) -> Result<i64, PersistenceError> {
                    mutations::bids::[<insert_bid_ $suffix>](self, row)
                }

                fn insert_bid_history(
                    &mut self,
                    row: &NewBidHistoryRow,
                ) -> Result<(), PersistenceError> {
                    mutations::bids::[<insert_bid_history_ $suffix>](self, row)
                }

                fn update_bid_row(
                    &mut self,
                    update: &BidUpdate,
                ) -> Result<usize, PersistenceError> {
                    mutations::bids::[<update_bid_row_ $suffix>](self, update)
                }

                fn insert_approval(
                    &mut self,
                    bid_id: i64,
                    employee_id: i64,
                ) -> Result<(), PersistenceError> {
                    mutations::bids::[<insert_approval_ $suffix>](self, bid_id, employee_id)
                }

                fn approval_count(&mut self, bid_id: i64) -> Result<i64, PersistenceError> {
                    queries::bids::[<approval_count_ $suffix>](self, bid_id)
                }

                fn insert_review(&mut self, row: &NewReviewRow) -> Result<(), PersistenceError> {
                    mutations::bids::[<insert_review_ $suffix>](self, row)
                }

                fn reviews_for_bids(
                    &mut self,
                    bid_ids: &[i64],
                    limit: i64,
                    offset: i64,
                ) -> Result<Vec<ReviewRow>, PersistenceError> {
                    queries::bids::[<reviews_for_bids_ $suffix>](self, bid_ids, limit, offset)
                }

                fn insert_employee(
                    &mut self,
                    row: &NewEmployeeRow,
                ) -> Result<i64, PersistenceError> {
                    mutations::directory::[<insert_employee_ $suffix>](self, row)
                }

                fn insert_organization(
                    &mut self,
                    row: &NewOrganizationRow,
                ) -> Result<i64, PersistenceError> {
                    mutations::directory::[<insert_organization_ $suffix>](self, row)
                }

                fn insert_responsible(
                    &mut self,
                    row: &NewResponsibleRow,
                ) -> Result<(), PersistenceError> {
                    mutations::directory::[<insert_responsible_ $suffix>](self, row)
                }
            }
        }
    };
}

delegate_backend!(SqliteConnection, sqlite);
delegate_backend!(MysqlConnection, mysql);
