//! Read and write operations behind the GraphQL schema.
//!
//! Each operation runs its store calls sequentially. Department reads always
//! pass through [`relations::populate`] before returning.

use std::sync::Arc;

use empresa_core::{
    validate, Employee, Manager, NewDepartment, NewEmployee, NewManager, PopulatedDepartment,
};
use empresa_store::{relations, EntityStore, StoreError};

use crate::error::{ApiError, Result};

pub const GREETING: &str = "¡Hola desde GraphQL!";

/// Input for creating a department together with brand-new employees.
#[derive(Debug, Clone, Default)]
pub struct DepartmentDraft {
    pub name: String,
    pub slogan: String,
    pub employees: Vec<NewEmployee>,
}

/// The organization directory: every query and mutation of the API.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn EntityStore>,
}

impl Directory {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }

    // ── Reads ────────────────────────────────────────────────────

    pub fn hello(&self) -> &'static str {
        GREETING
    }

    pub fn greet(&self, name: &str) -> String {
        format!("Hola {name}!")
    }

    pub async fn employees(&self) -> Result<Vec<Employee>> {
        let employees = self.store.list_employees().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list employees");
            ApiError::Internal(format!("failed to list employees: {e}"))
        })?;
        tracing::info!(count = employees.len(), "Listed employees");
        Ok(employees)
    }

    pub async fn managers(&self) -> Result<Vec<Manager>> {
        let managers = self.store.list_managers().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list managers");
            ApiError::Internal(format!("failed to list managers: {e}"))
        })?;
        tracing::info!(count = managers.len(), "Listed managers");
        Ok(managers)
    }

    pub async fn departments(&self) -> Result<Vec<PopulatedDepartment>> {
        let failed = |e: StoreError| {
            tracing::error!(error = %e, "Failed to list departments");
            ApiError::Internal(format!("failed to list departments: {e}"))
        };
        let departments = self.store.list_departments().await.map_err(failed)?;
        let populated = relations::populate_all(self.store(), departments)
            .await
            .map_err(failed)?;
        tracing::info!(count = populated.len(), "Listed departments");
        Ok(populated)
    }

    /// Look a department up by (partial, case-insensitive) name and describe
    /// the outcome as text. This never fails: misses and store errors are
    /// reported in the returned string.
    pub async fn describe_department(&self, name: &str) -> String {
        tracing::info!(name, "Looking up department");
        match relations::find_by_name(self.store(), name).await {
            Ok(Some(department)) => format!("{}!", department.name),
            Ok(None) => format!("Departamento {name} no encontrado!"),
            Err(e) => {
                tracing::error!(error = %e, name, "Department lookup failed");
                format!("Error buscando departamento {name}!")
            }
        }
    }

    /// Employees whose salary lies in `[min, max]`.
    pub async fn employees_by_salary(&self, min: f64, max: f64) -> Result<Vec<Employee>> {
        Ok(self.store.find_employees_by_salary(min, max).await?)
    }

    // ── Writes ───────────────────────────────────────────────────

    pub async fn create_employee(&self, input: NewEmployee) -> Result<Employee> {
        let employee = self.store.insert_employee(&input).await.map_err(|e| {
            tracing::warn!(error = %e, "Employee rejected");
            ApiError::from(e)
        })?;
        tracing::info!(id = %employee.id, name = %employee.name, "Employee created");
        Ok(employee)
    }

    /// Create a manager. The email is checked against existing managers
    /// (case-insensitively) before the insert; the store constraint still
    /// applies afterwards.
    pub async fn create_manager(&self, input: NewManager) -> Result<Manager> {
        let email = validate::normalize_email(&input.email);
        if self.store.find_manager_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "Duplicate manager email");
            return Err(ApiError::DuplicateEmail(email));
        }

        let manager = self.store.insert_manager(&input).await.map_err(|e| {
            tracing::warn!(error = %e, "Manager rejected");
            ApiError::from(e)
        })?;
        tracing::info!(id = %manager.id, name = %manager.name, "Manager created");
        Ok(manager)
    }

    /// Create a department and its inline employees.
    ///
    /// Employees are inserted one at a time in input order. If one fails, the
    /// ones already inserted stay persisted and the department is not created.
    pub async fn create_department(&self, draft: DepartmentDraft) -> Result<PopulatedDepartment> {
        let name = draft.name.trim();
        if self.store.find_department_by_name(name).await?.is_some() {
            tracing::warn!(name, "Duplicate department name");
            return Err(ApiError::DuplicateDepartment(name.to_string()));
        }

        let mut employee_ids = Vec::with_capacity(draft.employees.len());
        for input in &draft.employees {
            match self.store.insert_employee(input).await {
                Ok(employee) => employee_ids.push(employee.id),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        department = name,
                        orphaned = employee_ids.len(),
                        "Inline employee rejected; earlier employees remain persisted"
                    );
                    return Err(e.into());
                }
            }
        }

        let input = NewDepartment::new(draft.name.clone(), draft.slogan).with_employees(employee_ids);
        let department = match self.store.insert_department(&input).await {
            Ok(department) => department,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    orphaned = input.employees.len(),
                    "Department rejected; inline employees remain persisted"
                );
                return Err(e.into());
            }
        };

        let populated = relations::populate(self.store(), department).await?;
        tracing::info!(
            id = %populated.id,
            name = %populated.name,
            employees = populated.employees.len(),
            "Department created"
        );
        Ok(populated)
    }
}
