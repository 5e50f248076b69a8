// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender row and history queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{TenderHistoryRow, TenderRow};
use crate::diesel_schema::{tenders, tenders_history};
use crate::error::PersistenceError;
use procura_domain::TenderStatus;

backend_fn! {

/// The authoritative current row of a tender.
pub fn tender_by_id(
    conn: &mut _,
    tender_id: i64,
) -> Result<Option<TenderRow>, PersistenceError> {
    tenders::table
        .filter(tenders::tender_id.eq(tender_id))
        .select(TenderRow::as_select())
        .first::<TenderRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// The historical snapshot of a tender at an exact version.
pub fn tender_history_at(
    conn: &mut _,
    tender_id: i64,
    version: i32,
) -> Result<Option<TenderHistoryRow>, PersistenceError> {
    tenders_history::table
        .filter(tenders_history::tender_id.eq(tender_id))
        .filter(tenders_history::version.eq(version))
        .select(TenderHistoryRow::as_select())
        .first::<TenderHistoryRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// Tenders created by the given username, in any status.
pub fn tenders_by_creator(
    conn: &mut _,
    username: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<TenderRow>, PersistenceError> {
    tenders::table
        .filter(tenders::creator_username.eq(username))
        .order(tenders::name.asc())
        .limit(limit)
        .offset(offset)
        .select(TenderRow::as_select())
        .load::<TenderRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Published tenders, optionally narrowed to a set of service types.
///
/// Only Published tenders are externally listable.
pub fn published_tenders(
    conn: &mut _,
    service_types: &[String],
    limit: i64,
    offset: i64,
) -> Result<Vec<TenderRow>, PersistenceError> {
    let mut query = tenders::table
        .select(TenderRow::as_select())
        .filter(tenders::status.eq(TenderStatus::Published.as_str()))
        .into_boxed();

    if !service_types.is_empty() {
        query = query.filter(tenders::service_type.eq_any(service_types));
    }

    query
        .order(tenders::name.asc())
        .limit(limit)
        .offset(offset)
        .load::<TenderRow>(conn)
        .map_err(Into::into)
}

}
