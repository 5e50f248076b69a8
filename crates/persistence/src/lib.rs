// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer and lifecycle engine for the Procura tender
//! marketplace.
//!
//! This crate owns the relational store (tenders, bids, their append-only
//! version history, approval votes, the employee/organization directory,
//! and reviews) and the transactional lifecycle engine that orchestrates
//! multi-entity units of work over it. It is built on Diesel and supports
//! multiple database backends.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default) — Used for development, unit tests, and
//!   integration tests. Always available, no external infrastructure.
//! - **`MariaDB`/`MySQL`** — Compiled by default, validated via explicit
//!   opt-in tests only:
//!
//! ```bash
//! cargo xtask test-mariadb
//! ```
//!
//! This command starts a `MariaDB` container via Docker, runs migrations,
//! executes backend validation tests marked with `#[ignore]`, and cleans
//! up the container.
//!
//! ### Migration Strategy
//!
//! Due to `SQL` syntax differences between backends, we maintain separate
//! migration directories:
//!
//! - `migrations/` — `SQLite`-specific (default)
//! - `migrations_mysql/` — `MySQL`/`MariaDB`-specific
//!
//! Both produce identical schema semantics but use backend-appropriate
//! syntax. See the `backend` module for details.
//!
//! ## Testing Philosophy
//!
//! - Standard tests (`cargo test`) run against `SQLite` only
//! - Backend validation tests are explicitly marked `#[ignore]`
//! - External database tests never run automatically
//! - All infrastructure is orchestrated by `xtask`, not embedded in tests

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{MysqlConnection, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use procura::{BidPatch, TenderPatch};
use procura_domain::{
    Bid, BidStatus, Decision, Employee, Organization, OrganizationType, PageWindow, Review,
    ServiceType, Tender, TenderStatus,
};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Macro to generate monomorphic backend-specific query/mutation functions.
///
/// This macro generates two separate functions from a single function body:
/// - One suffixed with `_sqlite` taking `&mut SqliteConnection`
/// - One suffixed with `_mysql` taking `&mut MysqlConnection`
///
/// This approach is required because Diesel's type system requires concrete
/// backend types at compile time and cannot handle generic backend functions.
///
/// # Constraints
///
/// - The macro ONLY duplicates function bodies and substitutes connection types
/// - No logic, branching, or dispatch occurs within the macro
/// - Backend dispatch happens exclusively through the `PersistenceBackend`
///   trait and the `Persistence` adapter
/// - The generated functions are completely monomorphic
///
/// # Usage
///
/// ```ignore
/// backend_fn! {
///     pub fn my_query(conn: &mut _, param: i64) -> Result<String, PersistenceError> {
///         // Function body using conn - same for both backends
///         diesel_schema::table::table
///             .filter(diesel_schema::table::id.eq(param))
///             .first::<String>(conn)
///             .map_err(Into::into)
///     }
/// }
/// ```
///
/// This generates:
/// - `my_query_sqlite(&mut SqliteConnection, i64) -> Result<String, PersistenceError>`
/// - `my_query_mysql(&mut MysqlConnection, i64) -> Result<String, PersistenceError>`
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            // Generate SQLite version
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            // Generate MySQL version
            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod engine;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use engine::{NewBid, NewTender};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Internal enum for backend-specific database connections.
///
/// This enum allows the persistence adapter to work with either `SQLite`
/// or `MySQL` backends while maintaining a single public API.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Dispatches an adapter call to the engine with the concrete connection.
macro_rules! with_conn {
    ($self:ident, $conn:ident => $expr:expr) => {
        match &mut $self.conn {
            BackendConnection::Sqlite($conn) => $expr,
            BackendConnection::Mysql($conn) => $expr,
        }
    };
}

/// Persistence adapter for the tender marketplace store.
///
/// This adapter is backend-agnostic and works with both `SQLite` and
/// `MySQL`/`MariaDB`. Backend selection happens once at construction time
/// and is transparent to callers. Every method that performs more than one
/// read/write step runs as one database transaction.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests
        // are isolated. Atomic counter instead of timestamp to eliminate
        // race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL gives better read concurrency for file-based databases
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Creates a new persistence adapter connected to a `MySQL`/`MariaDB`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;

        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// Verifies that foreign key enforcement is active on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is disabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        with_conn!(self, conn => PersistenceBackend::verify_foreign_key_enforcement(conn))
    }

    // Directory

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is taken or the insert fails.
    pub fn create_employee(
        &mut self,
        username: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Employee, PersistenceError> {
        with_conn!(self, conn => engine::directory::create_employee(conn, username, first_name, last_name))
    }

    /// Creates an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_organization(
        &mut self,
        name: &str,
        description: &str,
        organization_type: OrganizationType,
    ) -> Result<Organization, PersistenceError> {
        with_conn!(self, conn => engine::directory::create_organization(conn, name, description, organization_type))
    }

    /// Marks an employee as responsible for an organization. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if either side of the membership does not exist.
    pub fn assign_responsible(
        &mut self,
        organization_id: i64,
        employee_id: i64,
    ) -> Result<(), PersistenceError> {
        with_conn!(self, conn => engine::directory::assign_responsible(conn, organization_id, employee_id))
    }

    // Tenders

    /// Creates a tender at version 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the creator or organization does not resolve.
    pub fn create_tender(&mut self, request: &NewTender) -> Result<Tender, PersistenceError> {
        with_conn!(self, conn => engine::tenders::create(conn, request))
    }

    /// The authoritative current state of a tender.
    ///
    /// # Errors
    ///
    /// Returns an error if the tender does not exist.
    pub fn find_tender(&mut self, tender_id: i64) -> Result<Tender, PersistenceError> {
        with_conn!(self, conn => engine::tenders::find(conn, tender_id))
    }

    /// The historical snapshot of a tender at an exact version.
    ///
    /// # Errors
    ///
    /// Returns an error if that version never existed.
    pub fn find_tender_at_version(
        &mut self,
        tender_id: i64,
        version: i32,
    ) -> Result<Tender, PersistenceError> {
        with_conn!(self, conn => engine::tenders::find_at_version(conn, tender_id, version))
    }

    /// Published tenders, optionally narrowed by service type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn published_tenders(
        &mut self,
        service_types: &[ServiceType],
        page: PageWindow,
    ) -> Result<Vec<Tender>, PersistenceError> {
        with_conn!(self, conn => engine::tenders::published(conn, service_types, page))
    }

    /// Tenders created by the caller, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not resolve to an employee.
    pub fn tenders_by_creator(
        &mut self,
        username: &str,
        page: PageWindow,
    ) -> Result<Vec<Tender>, PersistenceError> {
        with_conn!(self, conn => engine::tenders::by_creator(conn, username, page))
    }

    /// The status of a tender under the visibility rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the tender does not exist or the caller may not
    /// see a non-Published tender.
    pub fn tender_status(
        &mut self,
        tender_id: i64,
        username: Option<&str>,
    ) -> Result<TenderStatus, PersistenceError> {
        with_conn!(self, conn => engine::tenders::status_view(conn, tender_id, username))
    }

    /// Moves a tender forward through its status machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not the creator or the transition
    /// is rejected.
    pub fn edit_tender_status(
        &mut self,
        tender_id: i64,
        username: &str,
        new_status: TenderStatus,
    ) -> Result<Tender, PersistenceError> {
        with_conn!(self, conn => engine::tenders::edit_status(conn, tender_id, username, new_status))
    }

    /// Applies a partial edit to a tender.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not the creator or the tender
    /// does not exist.
    pub fn edit_tender(
        &mut self,
        tender_id: i64,
        username: &str,
        patch: TenderPatch,
    ) -> Result<Tender, PersistenceError> {
        with_conn!(self, conn => engine::tenders::edit(conn, tender_id, username, patch))
    }

    /// Replays a historical tender snapshot as a new, higher version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version never existed or the caller is not
    /// responsible for the snapshot's organization.
    pub fn rollback_tender(
        &mut self,
        tender_id: i64,
        version: i32,
        username: &str,
    ) -> Result<Tender, PersistenceError> {
        with_conn!(self, conn => engine::tenders::rollback(conn, tender_id, version, username))
    }

    // Bids

    /// Creates a bid at status Created, version 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the author does not resolve or the tender is
    /// not Published.
    pub fn create_bid(&mut self, request: &NewBid) -> Result<Bid, PersistenceError> {
        with_conn!(self, conn => engine::bids::create(conn, request))
    }

    /// The authoritative current state of a bid.
    ///
    /// # Errors
    ///
    /// Returns an error if the bid does not exist.
    pub fn find_bid(&mut self, bid_id: i64) -> Result<Bid, PersistenceError> {
        with_conn!(self, conn => engine::bids::find(conn, bid_id))
    }

    /// The historical snapshot of a bid at an exact version.
    ///
    /// # Errors
    ///
    /// Returns an error if that version never existed.
    pub fn find_bid_at_version(
        &mut self,
        bid_id: i64,
        version: i32,
    ) -> Result<Bid, PersistenceError> {
        with_conn!(self, conn => engine::bids::find_at_version(conn, bid_id, version))
    }

    /// Bids authored by the caller, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not resolve to an employee.
    pub fn bids_by_author(
        &mut self,
        username: &str,
        page: PageWindow,
    ) -> Result<Vec<Bid>, PersistenceError> {
        with_conn!(self, conn => engine::bids::by_author(conn, username, page))
    }

    /// Bids targeting a tender, filtered by the visibility rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller or tender does not resolve.
    pub fn bids_by_tender(
        &mut self,
        tender_id: i64,
        username: &str,
        page: PageWindow,
    ) -> Result<Vec<Bid>, PersistenceError> {
        with_conn!(self, conn => engine::bids::by_tender(conn, tender_id, username, page))
    }

    /// The status of a bid, gated by the author permission rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the bid does not exist or the caller fails the
    /// author rule.
    pub fn bid_status(
        &mut self,
        bid_id: i64,
        username: &str,
    ) -> Result<BidStatus, PersistenceError> {
        with_conn!(self, conn => engine::bids::status_view(conn, bid_id, username))
    }

    /// Moves a bid through its status machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller fails the author rule or the
    /// transition is rejected.
    pub fn edit_bid_status(
        &mut self,
        bid_id: i64,
        username: &str,
        new_status: BidStatus,
    ) -> Result<Bid, PersistenceError> {
        with_conn!(self, conn => engine::bids::edit_status(conn, bid_id, username, new_status))
    }

    /// Applies a partial edit to a bid.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller fails the author rule or the bid
    /// does not exist.
    pub fn edit_bid(
        &mut self,
        bid_id: i64,
        username: &str,
        patch: BidPatch,
    ) -> Result<Bid, PersistenceError> {
        with_conn!(self, conn => engine::bids::edit(conn, bid_id, username, patch))
    }

    /// Applies a responsible employee's decision to a Published bid.
    ///
    /// # Errors
    ///
    /// Returns an error if the bid is not Published or the caller is not
    /// responsible for the tender's organization.
    pub fn submit_decision(
        &mut self,
        bid_id: i64,
        username: &str,
        decision: Decision,
    ) -> Result<Bid, PersistenceError> {
        with_conn!(self, conn => engine::bids::submit_decision(conn, bid_id, username, decision))
    }

    /// Appends feedback to a bid on behalf of the tender's organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not responsible for the tender's
    /// organization.
    pub fn send_feedback(
        &mut self,
        bid_id: i64,
        username: &str,
        feedback: &str,
    ) -> Result<Bid, PersistenceError> {
        with_conn!(self, conn => engine::bids::send_feedback(conn, bid_id, username, feedback))
    }

    /// Replays a historical bid snapshot as a new, higher version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version never existed or the caller fails
    /// the author rule on the snapshot.
    pub fn rollback_bid(
        &mut self,
        bid_id: i64,
        version: i32,
        username: &str,
    ) -> Result<Bid, PersistenceError> {
        with_conn!(self, conn => engine::bids::rollback(conn, bid_id, version, username))
    }

    /// Reviews of a named author's bids within a tender's organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the requester's organization does not own the
    /// tender.
    pub fn reviews_by_tender(
        &mut self,
        tender_id: i64,
        author_username: &str,
        requester_username: &str,
        page: PageWindow,
    ) -> Result<Vec<Review>, PersistenceError> {
        with_conn!(self, conn => engine::bids::reviews_by_tender(conn, tender_id, author_username, requester_username, page))
    }
}
