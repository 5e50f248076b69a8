// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory administration: employees, organizations, memberships.
//!
//! Identity stays trust-based; these operations only seed the records the
//! lifecycle engine resolves against.

use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewEmployeeRow, NewOrganizationRow, NewResponsibleRow};
use crate::engine::now_rfc3339;
use crate::error::PersistenceError;
use procura_domain::{Employee, Organization, OrganizationType};

/// Creates an employee.
///
/// # Errors
///
/// Returns an error if the username is already taken or the insert fails.
pub fn create_employee<C: PersistenceBackend>(
    conn: &mut C,
    username: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Employee, PersistenceError> {
    conn.transaction(|conn| {
        let row = NewEmployeeRow {
            username: username.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: now_rfc3339()?,
        };
        let employee_id = conn.insert_employee(&row)?;
        info!(employee_id, username, "Created employee");

        Ok(conn
            .employee_by_id(employee_id)?
            .ok_or(PersistenceError::EmployeeNotFound(employee_id))?
            .into_employee())
    })
}

/// Creates an organization.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_organization<C: PersistenceBackend>(
    conn: &mut C,
    name: &str,
    description: &str,
    organization_type: OrganizationType,
) -> Result<Organization, PersistenceError> {
    conn.transaction(|conn| {
        let row = NewOrganizationRow {
            name: name.to_string(),
            description: description.to_string(),
            organization_type: organization_type.as_str().to_string(),
            created_at: now_rfc3339()?,
        };
        let organization_id = conn.insert_organization(&row)?;
        info!(organization_id, name, "Created organization");

        conn.organization_by_id(organization_id)?
            .ok_or(PersistenceError::OrganizationNotFound(organization_id))?
            .into_organization()
    })
}

/// Marks an employee as responsible for an organization. Idempotent.
///
/// # Errors
///
/// Returns an error if either side of the membership does not exist.
pub fn assign_responsible<C: PersistenceBackend>(
    conn: &mut C,
    organization_id: i64,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        conn.organization_by_id(organization_id)?
            .ok_or(PersistenceError::OrganizationNotFound(organization_id))?;
        // A missing target employee here is a bad reference, not a failed
        // identity gate.
        conn.employee_by_id(employee_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("employee {employee_id}")))?;

        conn.insert_responsible(&NewResponsibleRow {
            organization_id,
            employee_id,
        })?;
        info!(organization_id, employee_id, "Responsible employee assigned");
        Ok(())
    })
}
