//! The data-access seam between the directory operations and a backend.

use async_trait::async_trait;

use empresa_core::{
    Department, Employee, EntityId, EntityKind, Manager, NewDepartment, NewEmployee, NewManager,
};

use crate::client::GraphClient;
use crate::error::Result;

/// Persistence for the three entity kinds.
///
/// Writes validate and normalize their input (see [`empresa_core::validate`])
/// and enforce uniqueness of `Gerente.email` and `Departamento.nombre`,
/// failing with [`crate::StoreError::Validation`]. Reads have no side effects
/// and return records in insertion order.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn insert_employee(&self, input: &NewEmployee) -> Result<Employee>;

    async fn insert_manager(&self, input: &NewManager) -> Result<Manager>;

    async fn insert_department(&self, input: &NewDepartment) -> Result<Department>;

    /// Persist an existing department's fields and references.
    async fn save_department(&self, department: &Department) -> Result<Department>;

    async fn list_employees(&self) -> Result<Vec<Employee>>;

    async fn list_managers(&self) -> Result<Vec<Manager>>;

    async fn list_departments(&self) -> Result<Vec<Department>>;

    /// Existing employees among `ids`, in the order of `ids`. Unknown ids are skipped.
    async fn get_employees(&self, ids: &[EntityId]) -> Result<Vec<Employee>>;

    async fn get_employee(&self, id: &EntityId) -> Result<Option<Employee>> {
        let found = self.get_employees(std::slice::from_ref(id)).await?;
        Ok(found.into_iter().next())
    }

    async fn get_manager(&self, id: &EntityId) -> Result<Option<Manager>>;

    async fn get_department(&self, id: &EntityId) -> Result<Option<Department>>;

    /// Exact match on the stored (lowercased) email.
    async fn find_manager_by_email(&self, email: &str) -> Result<Option<Manager>>;

    /// Exact match on the stored department name.
    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>>;

    /// First department whose name matches the regular expression `pattern`
    /// anywhere, ignoring case. An invalid pattern is a validation error.
    async fn find_department_matching(&self, pattern: &str) -> Result<Option<Department>>;

    /// Employees with `min <= salary <= max`.
    async fn find_employees_by_salary(&self, min: f64, max: f64) -> Result<Vec<Employee>>;

    /// Remove every record of one kind. Returns how many were removed.
    async fn delete_all(&self, kind: EntityKind) -> Result<u64>;
}

#[async_trait]
impl EntityStore for GraphClient {
    async fn insert_employee(&self, input: &NewEmployee) -> Result<Employee> {
        GraphClient::create_employee(self, input).await
    }

    async fn insert_manager(&self, input: &NewManager) -> Result<Manager> {
        GraphClient::create_manager(self, input).await
    }

    async fn insert_department(&self, input: &NewDepartment) -> Result<Department> {
        GraphClient::create_department(self, input).await
    }

    async fn save_department(&self, department: &Department) -> Result<Department> {
        GraphClient::update_department(self, department).await
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        GraphClient::employees(self).await
    }

    async fn list_managers(&self) -> Result<Vec<Manager>> {
        GraphClient::managers(self).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        GraphClient::departments(self).await
    }

    async fn get_employees(&self, ids: &[EntityId]) -> Result<Vec<Employee>> {
        GraphClient::employees_by_ids(self, ids).await
    }

    async fn get_manager(&self, id: &EntityId) -> Result<Option<Manager>> {
        GraphClient::manager_by_id(self, id).await
    }

    async fn get_department(&self, id: &EntityId) -> Result<Option<Department>> {
        GraphClient::department_by_id(self, id).await
    }

    async fn find_manager_by_email(&self, email: &str) -> Result<Option<Manager>> {
        GraphClient::manager_by_email(self, email).await
    }

    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>> {
        GraphClient::department_by_name(self, name).await
    }

    async fn find_department_matching(&self, pattern: &str) -> Result<Option<Department>> {
        GraphClient::department_name_matching(self, pattern).await
    }

    async fn find_employees_by_salary(&self, min: f64, max: f64) -> Result<Vec<Employee>> {
        GraphClient::employees_in_salary_range(self, min, max).await
    }

    async fn delete_all(&self, kind: EntityKind) -> Result<u64> {
        GraphClient::delete_all_nodes(self, kind).await
    }
}
