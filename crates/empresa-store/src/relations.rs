//! Department ↔ Employee/Manager references.
//!
//! Departments store ids. Every read path calls [`populate`] (or
//! [`populate_all`]) to replace those ids with the current records; ids that
//! no longer resolve are dropped from the expanded view. Attach and detach
//! keep the stored id list free of duplicates.

use empresa_core::{Department, EntityId, PopulatedDepartment};

use crate::error::Result;
use crate::store::EntityStore;

/// Expand one department's employee and manager references.
pub async fn populate(store: &dyn EntityStore, department: Department) -> Result<PopulatedDepartment> {
    let employees = store.get_employees(&department.employees).await?;
    if employees.len() < department.employees.len() {
        tracing::debug!(
            department = %department.name,
            missing = department.employees.len() - employees.len(),
            "Dropping unresolved employee references"
        );
    }

    let manager = match department.manager {
        Some(id) => store.get_manager(&id).await?,
        None => None,
    };

    Ok(PopulatedDepartment {
        id: department.id,
        name: department.name,
        slogan: department.slogan,
        employees,
        manager,
        created_at: department.created_at,
        updated_at: department.updated_at,
    })
}

/// Expand a list of departments, preserving order.
pub async fn populate_all(
    store: &dyn EntityStore,
    departments: Vec<Department>,
) -> Result<Vec<PopulatedDepartment>> {
    let mut populated = Vec::with_capacity(departments.len());
    for department in departments {
        populated.push(populate(store, department).await?);
    }
    Ok(populated)
}

/// Add an employee reference if absent and persist. Calling it again with the
/// same id leaves the department unchanged.
pub async fn attach_employee(
    store: &dyn EntityStore,
    mut department: Department,
    employee: &EntityId,
) -> Result<Department> {
    if !department.attach(*employee) {
        return Ok(department);
    }
    let saved = store.save_department(&department).await?;
    tracing::info!(department = %saved.name, employee = %employee, "Employee attached");
    Ok(saved)
}

/// Remove every reference to an employee and persist.
pub async fn detach_employee(
    store: &dyn EntityStore,
    mut department: Department,
    employee: &EntityId,
) -> Result<Department> {
    if !department.detach(*employee) {
        return Ok(department);
    }
    let saved = store.save_department(&department).await?;
    tracing::info!(department = %saved.name, employee = %employee, "Employee detached");
    Ok(saved)
}

/// Case-insensitive regular-expression lookup, unanchored unless `name`
/// anchors itself; the first match in insertion order wins.
pub async fn find_by_name(store: &dyn EntityStore, name: &str) -> Result<Option<Department>> {
    store.find_department_matching(name).await
}
