//! Process-local store backed by `tokio::sync::RwLock<Vec<_>>` collections.
//!
//! Used for tests and for running the API without a database. Uniqueness is
//! checked while holding the collection's write lock, so concurrent creates
//! with the same email or name cannot both succeed.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use empresa_core::{
    validate, Department, Employee, EntityId, EntityKind, Manager, NewDepartment, NewEmployee,
    NewManager, ValidationError,
};

use crate::error::{Result, StoreError};
use crate::store::EntityStore;

/// In-memory implementation of [`EntityStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<Vec<Employee>>,
    managers: RwLock<Vec<Manager>>,
    departments: RwLock<Vec<Department>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_employee(&self, input: &NewEmployee) -> Result<Employee> {
        let input = validate::employee(input)?;
        let now = Utc::now();
        let employee = Employee {
            id: EntityId::new(),
            name: input.name,
            salary: input.salary,
            created_at: now,
            updated_at: now,
        };
        self.employees.write().await.push(employee.clone());
        Ok(employee)
    }

    async fn insert_manager(&self, input: &NewManager) -> Result<Manager> {
        let input = validate::manager(input)?;
        let mut managers = self.managers.write().await;
        if managers.iter().any(|m| m.email == input.email) {
            return Err(ValidationError::NotUnique {
                field: "email",
                value: input.email,
            }
            .into());
        }

        let now = Utc::now();
        let manager = Manager {
            id: EntityId::new(),
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        };
        managers.push(manager.clone());
        Ok(manager)
    }

    async fn insert_department(&self, input: &NewDepartment) -> Result<Department> {
        let input = validate::department(input)?;
        let mut departments = self.departments.write().await;
        if departments.iter().any(|d| d.name == input.name) {
            return Err(ValidationError::NotUnique {
                field: "nombre",
                value: input.name,
            }
            .into());
        }

        let now = Utc::now();
        let department = Department {
            id: EntityId::new(),
            name: input.name,
            slogan: input.slogan,
            employees: input.employees,
            manager: input.manager,
            created_at: now,
            updated_at: now,
        };
        departments.push(department.clone());
        Ok(department)
    }

    async fn save_department(&self, department: &Department) -> Result<Department> {
        let normalized = validate::department(&NewDepartment {
            name: department.name.clone(),
            slogan: department.slogan.clone(),
            employees: department.employees.clone(),
            manager: department.manager,
        })?;

        let mut departments = self.departments.write().await;
        if departments
            .iter()
            .any(|d| d.id != department.id && d.name == normalized.name)
        {
            return Err(ValidationError::NotUnique {
                field: "nombre",
                value: normalized.name,
            }
            .into());
        }

        let stored = departments
            .iter_mut()
            .find(|d| d.id == department.id)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Department,
                id: department.id.to_string(),
            })?;

        stored.name = normalized.name;
        stored.slogan = normalized.slogan;
        stored.employees = normalized.employees;
        stored.manager = normalized.manager;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.read().await.clone())
    }

    async fn list_managers(&self) -> Result<Vec<Manager>> {
        Ok(self.managers.read().await.clone())
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        Ok(self.departments.read().await.clone())
    }

    async fn get_employees(&self, ids: &[EntityId]) -> Result<Vec<Employee>> {
        let employees = self.employees.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| employees.iter().find(|e| e.id == *id).cloned())
            .collect())
    }

    async fn get_manager(&self, id: &EntityId) -> Result<Option<Manager>> {
        let managers = self.managers.read().await;
        Ok(managers.iter().find(|m| m.id == *id).cloned())
    }

    async fn get_department(&self, id: &EntityId) -> Result<Option<Department>> {
        let departments = self.departments.read().await;
        Ok(departments.iter().find(|d| d.id == *id).cloned())
    }

    async fn find_manager_by_email(&self, email: &str) -> Result<Option<Manager>> {
        let managers = self.managers.read().await;
        Ok(managers.iter().find(|m| m.email == email).cloned())
    }

    async fn find_department_by_name(&self, name: &str) -> Result<Option<Department>> {
        let departments = self.departments.read().await;
        Ok(departments.iter().find(|d| d.name == name).cloned())
    }

    async fn find_department_matching(&self, pattern: &str) -> Result<Option<Department>> {
        let pattern = validate::name_pattern(pattern)?;
        let departments = self.departments.read().await;
        Ok(departments
            .iter()
            .find(|d| pattern.is_match(&d.name))
            .cloned())
    }

    async fn find_employees_by_salary(&self, min: f64, max: f64) -> Result<Vec<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees
            .iter()
            .filter(|e| e.salary >= min && e.salary <= max)
            .cloned()
            .collect())
    }

    async fn delete_all(&self, kind: EntityKind) -> Result<u64> {
        let removed = match kind {
            EntityKind::Employee => std::mem::take(&mut *self.employees.write().await).len(),
            EntityKind::Manager => std::mem::take(&mut *self.managers.write().await).len(),
            EntityKind::Department => std::mem::take(&mut *self.departments.write().await).len(),
        };
        Ok(removed as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_employee_assigns_id_and_keeps_order() {
        let store = MemoryStore::new();
        let ana = store
            .insert_employee(&NewEmployee::new("Ana García", 3500.0))
            .await
            .unwrap();
        let carlos = store
            .insert_employee(&NewEmployee::new("Carlos Rodríguez", 4200.5))
            .await
            .unwrap();
        assert_ne!(ana.id, carlos.id);

        let all = store.list_employees().await.unwrap();
        let names: Vec<_> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ana García", "Carlos Rodríguez"]);
    }

    #[tokio::test]
    async fn invalid_employee_is_not_persisted() {
        let store = MemoryStore::new();
        let err = store
            .insert_employee(&NewEmployee::new("Ana", -1.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Negative { field: "sueldo" })
        ));
        assert!(store.list_employees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn manager_email_unique_ignoring_case() {
        let store = MemoryStore::new();
        let original = store
            .insert_manager(&NewManager::new("Roberto Silva", "roberto.silva@empresa.com"))
            .await
            .unwrap();

        let err = store
            .insert_manager(&NewManager::new("Otro", "Roberto.Silva@Empresa.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NotUnique { field: "email", .. })
        ));

        let managers = store.list_managers().await.unwrap();
        assert_eq!(managers, vec![original]);
    }

    #[tokio::test]
    async fn department_name_unique() {
        let store = MemoryStore::new();
        store
            .insert_department(&NewDepartment::new("Ventas", "Crecimiento y resultados"))
            .await
            .unwrap();
        let err = store
            .insert_department(&NewDepartment::new(" Ventas ", "Otro"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NotUnique { field: "nombre", .. })
        ));
        assert_eq!(store.list_departments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_department_rejects_unknown_id_and_name_clash() {
        let store = MemoryStore::new();
        let ventas = store
            .insert_department(&NewDepartment::new("Ventas", "Crecimiento"))
            .await
            .unwrap();
        let mut marketing = store
            .insert_department(&NewDepartment::new("Marketing", "Cliente"))
            .await
            .unwrap();

        marketing.name = ventas.name.clone();
        assert!(matches!(
            store.save_department(&marketing).await,
            Err(StoreError::Validation(ValidationError::NotUnique { .. }))
        ));

        let mut ghost = ventas.clone();
        ghost.id = EntityId::new();
        ghost.name = "Fantasma".to_string();
        assert!(matches!(
            store.save_department(&ghost).await,
            Err(StoreError::NotFound {
                kind: EntityKind::Department,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn get_employees_follows_requested_order_and_skips_unknown() {
        let store = MemoryStore::new();
        let a = store.insert_employee(&NewEmployee::new("A", 1.0)).await.unwrap();
        let b = store.insert_employee(&NewEmployee::new("B", 2.0)).await.unwrap();

        let found = store
            .get_employees(&[b.id, EntityId::new(), a.id])
            .await
            .unwrap();
        assert_eq!(found, vec![b.clone(), a.clone()]);
        assert_eq!(store.get_employee(&a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn find_department_matching_accepts_patterns() {
        let store = MemoryStore::new();
        for name in ["Desarrollo", "Recursos Humanos"] {
            store
                .insert_department(&NewDepartment::new(name, "Lema"))
                .await
                .unwrap();
        }

        let found = store.find_department_matching("recursos.humanos").await.unwrap();
        assert_eq!(found.map(|d| d.name), Some("Recursos Humanos".to_string()));
        let found = store.find_department_matching("^hum").await.unwrap();
        assert!(found.is_none());

        let err = store.find_department_matching("[").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::InvalidFormat { field: "nombre", .. })
        ));
    }

    #[tokio::test]
    async fn find_department_matching_is_case_insensitive_substring() {
        let store = MemoryStore::new();
        store
            .insert_department(&NewDepartment::new("Recursos Humanos", "Talento"))
            .await
            .unwrap();

        let found = store.find_department_matching("humanos").await.unwrap();
        assert_eq!(found.map(|d| d.name), Some("Recursos Humanos".to_string()));
        assert!(store.find_department_matching("Legal").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn salary_range_is_inclusive() {
        let store = MemoryStore::new();
        for (name, salary) in [("A", 3000.0), ("B", 3500.0), ("C", 4000.0)] {
            store
                .insert_employee(&NewEmployee::new(name, salary))
                .await
                .unwrap();
        }
        let found = store.find_employees_by_salary(3000.0, 3500.0).await.unwrap();
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn delete_all_reports_count() {
        let store = MemoryStore::new();
        store.insert_employee(&NewEmployee::new("A", 1.0)).await.unwrap();
        store.insert_employee(&NewEmployee::new("B", 1.0)).await.unwrap();

        assert_eq!(store.delete_all(EntityKind::Employee).await.unwrap(), 2);
        assert_eq!(store.delete_all(EntityKind::Employee).await.unwrap(), 0);
        assert!(store.list_employees().await.unwrap().is_empty());
    }
}
