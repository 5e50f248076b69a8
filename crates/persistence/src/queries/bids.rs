// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid row, history, approval-vote, and review queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{BidHistoryRow, BidRow, ReviewRow};
use crate::diesel_schema::{bid_approvals, bid_reviews, bids, bids_history, tenders};
use crate::error::PersistenceError;

backend_fn! {

/// The authoritative current row of a bid.
pub fn bid_by_id(conn: &mut _, bid_id: i64) -> Result<Option<BidRow>, PersistenceError> {
    bids::table
        .filter(bids::bid_id.eq(bid_id))
        .select(BidRow::as_select())
        .first::<BidRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// The historical snapshot of a bid at an exact version.
pub fn bid_history_at(
    conn: &mut _,
    bid_id: i64,
    version: i32,
) -> Result<Option<BidHistoryRow>, PersistenceError> {
    bids_history::table
        .filter(bids_history::bid_id.eq(bid_id))
        .filter(bids_history::version.eq(version))
        .select(BidHistoryRow::as_select())
        .first::<BidHistoryRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// Bids authored by the given employee, in any status.
pub fn bids_by_author(
    conn: &mut _,
    author_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<BidRow>, PersistenceError> {
    bids::table
        .filter(bids::author_id.eq(author_id))
        .order(bids::name.asc())
        .limit(limit)
        .offset(offset)
        .select(BidRow::as_select())
        .load::<BidRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// All bids targeting a tender, unfiltered.
///
/// Visibility filtering is the engine's job; this query must return every
/// status so the author rule can be applied per row.
pub fn bids_by_tender(
    conn: &mut _,
    tender_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<BidRow>, PersistenceError> {
    bids::table
        .filter(bids::tender_id.eq(tender_id))
        .order(bids::name.asc())
        .limit(limit)
        .offset(offset)
        .select(BidRow::as_select())
        .load::<BidRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Bids whose tender belongs to the organization.
pub fn bids_by_organization(
    conn: &mut _,
    organization_id: i64,
) -> Result<Vec<BidRow>, PersistenceError> {
    bids::table
        .inner_join(tenders::table)
        .filter(tenders::organization_id.eq(organization_id))
        .order(bids::bid_id.asc())
        .select(BidRow::as_select())
        .load::<BidRow>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Count of distinct approving employees for the bid.
///
/// The (bid, employee) pair is unique, so the row count is the distinct
/// voter count.
pub fn approval_count(conn: &mut _, bid_id: i64) -> Result<i64, PersistenceError> {
    bid_approvals::table
        .filter(bid_approvals::bid_id.eq(bid_id))
        .count()
        .get_result::<i64>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Reviews attached to any of the given bids, oldest first.
pub fn reviews_for_bids(
    conn: &mut _,
    bid_ids: &[i64],
    limit: i64,
    offset: i64,
) -> Result<Vec<ReviewRow>, PersistenceError> {
    bid_reviews::table
        .filter(bid_reviews::bid_id.eq_any(bid_ids))
        .order(bid_reviews::review_id.asc())
        .limit(limit)
        .offset(offset)
        .select(ReviewRow::as_select())
        .load::<ReviewRow>(conn)
        .map_err(Into::into)
}

}
