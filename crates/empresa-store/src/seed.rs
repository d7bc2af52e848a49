//! Demo dataset: wipes all three collections and loads a fixed organization.

use serde::Serialize;

use empresa_core::{EntityKind, NewDepartment, NewEmployee, NewManager};

use crate::error::Result;
use crate::store::EntityStore;

const EMPLOYEES: [(&str, f64); 7] = [
    ("Ana García", 3500.00),
    ("Carlos Rodríguez", 4200.50),
    ("Laura Martínez", 3800.75),
    ("Miguel Torres", 4500.00),
    ("Sofia López", 3200.25),
    ("Pedro Silva", 3000.00),
    ("Elena Ruiz", 3900.00),
];

const MANAGERS: [(&str, &str); 3] = [
    ("Roberto Silva", "roberto.silva@empresa.com"),
    ("Carmen Delgado", "carmen.delgado@empresa.com"),
    ("Fernando López", "fernando.lopez@empresa.com"),
];

/// (name, slogan, employee indexes, manager index)
const DEPARTMENTS: [(&str, &str, &[usize], usize); 4] = [
    ("Desarrollo", "Innovación y Tecnología", &[0, 1], 0),
    ("Marketing", "Conectando con el cliente", &[2, 4], 1),
    ("Ventas", "Crecimiento y resultados", &[3], 2),
    ("Recursos Humanos", "Gestionando el talento", &[5, 6], 0),
];

/// Counts of what a seed run created.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SeedSummary {
    pub employees: usize,
    pub managers: usize,
    pub departments: usize,
}

/// Delete every employee, manager, and department, then load the demo dataset.
pub async fn seed(store: &dyn EntityStore) -> Result<SeedSummary> {
    for kind in EntityKind::ALL {
        let removed = store.delete_all(kind).await?;
        tracing::debug!(collection = kind.collection(), removed, "Collection cleared");
    }

    let mut employees = Vec::with_capacity(EMPLOYEES.len());
    for (name, salary) in EMPLOYEES {
        employees.push(store.insert_employee(&NewEmployee::new(name, salary)).await?);
    }

    let mut managers = Vec::with_capacity(MANAGERS.len());
    for (name, email) in MANAGERS {
        managers.push(store.insert_manager(&NewManager::new(name, email)).await?);
    }

    let mut departments = 0;
    for (name, slogan, members, manager) in DEPARTMENTS {
        let input = NewDepartment::new(name, slogan)
            .with_employees(members.iter().map(|&i| employees[i].id).collect())
            .with_manager(managers[manager].id);
        store.insert_department(&input).await?;
        departments += 1;
    }

    let summary = SeedSummary {
        employees: employees.len(),
        managers: managers.len(),
        departments,
    };
    tracing::info!(
        employees = summary.employees,
        managers = summary.managers,
        departments = summary.departments,
        "Seed data loaded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::relations;

    #[tokio::test]
    async fn seed_loads_fixture_and_is_repeatable() {
        let store = MemoryStore::new();
        let first = seed(&store).await.unwrap();
        let second = seed(&store).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            second,
            SeedSummary {
                employees: 7,
                managers: 3,
                departments: 4
            }
        );
        assert_eq!(store.list_employees().await.unwrap().len(), 7);
        assert_eq!(store.list_departments().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn desarrollo_has_expected_members() {
        let store = MemoryStore::new();
        seed(&store).await.unwrap();

        let dept = store
            .find_department_by_name("Desarrollo")
            .await
            .unwrap()
            .unwrap();
        let populated = relations::populate(&store, dept).await.unwrap();

        assert_eq!(populated.slogan, "Innovación y Tecnología");
        let members: Vec<_> = populated
            .employees
            .iter()
            .map(|e| (e.name.as_str(), e.salary))
            .collect();
        assert_eq!(
            members,
            vec![("Ana García", 3500.00), ("Carlos Rodríguez", 4200.50)]
        );
        let manager = populated.manager.unwrap();
        assert_eq!(manager.name, "Roberto Silva");
        assert_eq!(manager.email, "roberto.silva@empresa.com");
    }
}
