// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and organization directory mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewEmployeeRow, NewOrganizationRow, NewResponsibleRow};
use crate::diesel_schema::{employees, organization_responsible, organizations};
use crate::error::PersistenceError;

backend_fn! {

/// Inserts an employee and returns the assigned id.
pub fn insert_employee(conn: &mut _, row: &NewEmployeeRow) -> Result<i64, PersistenceError> {
    diesel::insert_into(employees::table)
        .values(row)
        .execute(conn)?;
    conn.last_insert_rowid()
}

}

backend_fn! {

/// Inserts an organization and returns the assigned id.
pub fn insert_organization(
    conn: &mut _,
    row: &NewOrganizationRow,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(organizations::table)
        .values(row)
        .execute(conn)?;
    conn.last_insert_rowid()
}

}

backend_fn! {

/// Records a responsible-employee membership. Idempotent on the unique
/// (organization, employee) pair.
pub fn insert_responsible(
    conn: &mut _,
    row: &NewResponsibleRow,
) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(organization_responsible::table)
        .values(row)
        .execute(conn)?;
    Ok(())
}

}
