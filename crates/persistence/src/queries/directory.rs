// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity and membership lookups.
//!
//! These are pure reads; the identity gate semantics (unknown username is
//! an authentication failure, missing membership is a permission failure)
//! are applied by the engine, not here.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{EmployeeRow, OrganizationRow};
use crate::diesel_schema::{employees, organization_responsible, organizations};
use crate::error::PersistenceError;

backend_fn! {

/// Looks up an employee by their unique username.
pub fn employee_by_username(
    conn: &mut _,
    username: &str,
) -> Result<Option<EmployeeRow>, PersistenceError> {
    employees::table
        .filter(employees::username.eq(username))
        .select(EmployeeRow::as_select())
        .first::<EmployeeRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// Looks up an employee by id.
pub fn employee_by_id(
    conn: &mut _,
    employee_id: i64,
) -> Result<Option<EmployeeRow>, PersistenceError> {
    employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first::<EmployeeRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// Looks up an organization by id.
pub fn organization_by_id(
    conn: &mut _,
    organization_id: i64,
) -> Result<Option<OrganizationRow>, PersistenceError> {
    organizations::table
        .filter(organizations::organization_id.eq(organization_id))
        .select(OrganizationRow::as_select())
        .first::<OrganizationRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// The organization an employee is a responsible member of, if any.
///
/// An employee responsible for several organizations resolves to the one
/// with the lowest id.
pub fn organization_of_employee(
    conn: &mut _,
    employee_id: i64,
) -> Result<Option<OrganizationRow>, PersistenceError> {
    organization_responsible::table
        .inner_join(organizations::table)
        .filter(organization_responsible::employee_id.eq(employee_id))
        .order(organization_responsible::organization_id.asc())
        .select(OrganizationRow::as_select())
        .first::<OrganizationRow>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// Whether the username belongs to a responsible employee of the organization.
pub fn is_responsible(
    conn: &mut _,
    organization_id: i64,
    username: &str,
) -> Result<bool, PersistenceError> {
    let found: Option<i64> = organization_responsible::table
        .inner_join(employees::table)
        .filter(organization_responsible::organization_id.eq(organization_id))
        .filter(employees::username.eq(username))
        .select(organization_responsible::id)
        .first::<i64>(conn)
        .optional()?;

    Ok(found.is_some())
}

}

backend_fn! {

/// All responsible employee ids of the organization.
pub fn responsible_employee_ids(
    conn: &mut _,
    organization_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    organization_responsible::table
        .filter(organization_responsible::organization_id.eq(organization_id))
        .select(organization_responsible::employee_id)
        .load::<i64>(conn)
        .map_err(Into::into)
}

}
