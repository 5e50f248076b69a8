// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender row and history mutations.
//!
//! The history insert and the guarded update are separate leaves; the
//! engine composes them inside one transaction so the pre-image snapshot
//! and the version bump commit together or not at all.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewTenderHistoryRow, NewTenderRow, TenderUpdate};
use crate::diesel_schema::{tenders, tenders_history};
use crate::error::PersistenceError;

backend_fn! {

/// Inserts a tender at version 1 and returns the assigned id.
pub fn insert_tender(conn: &mut _, row: &NewTenderRow) -> Result<i64, PersistenceError> {
    diesel::insert_into(tenders::table)
        .values(row)
        .execute(conn)?;
    conn.last_insert_rowid()
}

}

backend_fn! {

/// Appends a pre-image snapshot to the tender history.
pub fn insert_tender_history(
    conn: &mut _,
    row: &NewTenderHistoryRow,
) -> Result<(), PersistenceError> {
    diesel::insert_into(tenders_history::table)
        .values(row)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Rewrites the current tender row, advancing the version by exactly one.
///
/// The update applies only while the row still holds `expected_version`;
/// the caller must treat 0 affected rows as a conflict, never a no-op.
pub fn update_tender_row(
    conn: &mut _,
    update: &TenderUpdate,
) -> Result<usize, PersistenceError> {
    diesel::update(
        tenders::table
            .filter(tenders::tender_id.eq(update.tender_id))
            .filter(tenders::version.eq(update.expected_version)),
    )
    .set((
        tenders::name.eq(&update.name),
        tenders::description.eq(&update.description),
        tenders::service_type.eq(&update.service_type),
        tenders::status.eq(&update.status),
        tenders::organization_id.eq(update.organization_id),
        tenders::version.eq(update.expected_version + 1),
    ))
    .execute(conn)
    .map_err(Into::into)
}

}
