// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid row, history, approval-vote, and review mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::{BidUpdate, NewApprovalRow, NewBidHistoryRow, NewBidRow, NewReviewRow};
use crate::diesel_schema::{bid_approvals, bid_reviews, bids, bids_history};
use crate::error::PersistenceError;

backend_fn! {

/// Inserts a bid at version 1 and returns the assigned id.
pub fn insert_bid(conn: &mut _, row: &NewBidRow) -> Result<i64, PersistenceError> {
    diesel::insert_into(bids::table)
        .values(row)
        .execute(conn)?;
    conn.last_insert_rowid()
}

}

backend_fn! {

/// Appends a pre-image snapshot to the bid history.
pub fn insert_bid_history(
    conn: &mut _,
    row: &NewBidHistoryRow,
) -> Result<(), PersistenceError> {
    diesel::insert_into(bids_history::table)
        .values(row)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Rewrites the current bid row, advancing the version by exactly one.
///
/// The update applies only while the row still holds `expected_version`;
/// the caller must treat 0 affected rows as a conflict, never a no-op.
pub fn update_bid_row(conn: &mut _, update: &BidUpdate) -> Result<usize, PersistenceError> {
    diesel::update(
        bids::table
            .filter(bids::bid_id.eq(update.bid_id))
            .filter(bids::version.eq(update.expected_version)),
    )
    .set((
        bids::name.eq(&update.name),
        bids::description.eq(&update.description),
        bids::status.eq(&update.status),
        bids::tender_id.eq(update.tender_id),
        bids::author_type.eq(&update.author_type),
        bids::author_id.eq(update.author_id),
        bids::version.eq(update.expected_version + 1),
    ))
    .execute(conn)
    .map_err(Into::into)
}

}

backend_fn! {

/// Records an approval vote. Idempotent: a duplicate vote by the same
/// employee is ignored, which is what keeps quorum counting safe against
/// double submission. The unique-key insert also serializes concurrent
/// voters on the same bid for the duration of the enclosing transaction.
pub fn insert_approval(
    conn: &mut _,
    bid_id: i64,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    let row = NewApprovalRow { bid_id, employee_id };

    diesel::insert_or_ignore_into(bid_approvals::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

}

backend_fn! {

/// Appends a review to a bid.
pub fn insert_review(conn: &mut _, row: &NewReviewRow) -> Result<(), PersistenceError> {
    diesel::insert_into(bid_reviews::table)
        .values(row)
        .execute(conn)?;
    Ok(())
}

}
