//! Write operations against the Neo4j backend.
//!
//! Inputs are validated before any Cypher runs. Uniqueness is enforced by the
//! constraints from [`GraphClient::ensure_constraints`]; a rejected write is
//! reported as [`ValidationError::NotUnique`].

use chrono::Utc;
use neo4rs::query;

use empresa_core::{
    validate, Department, Employee, EntityId, EntityKind, Manager, NewDepartment, NewEmployee,
    NewManager, ValidationError,
};

use crate::client::{is_constraint_violation, GraphClient};
use crate::error::{Result, StoreError};
use crate::queries::node_to_department;

impl GraphClient {
    // ── Creates ──────────────────────────────────────────────────

    pub async fn create_employee(&self, input: &NewEmployee) -> Result<Employee> {
        let input = validate::employee(input)?;
        let now = Utc::now();
        let employee = Employee {
            id: EntityId::new(),
            name: input.name,
            salary: input.salary,
            created_at: now,
            updated_at: now,
        };

        let q = query(
            "CREATE (n:Empleado {
               id: $id, nombre: $nombre, sueldo: $sueldo,
               created_at: $now, updated_at: $now
             })",
        )
        .param("id", employee.id.to_string())
        .param("nombre", employee.name.clone())
        .param("sueldo", employee.salary)
        .param("now", now.to_rfc3339());

        self.run(q).await?;
        tracing::debug!(id = %employee.id, "Employee node created");
        Ok(employee)
    }

    pub async fn create_manager(&self, input: &NewManager) -> Result<Manager> {
        let input = validate::manager(input)?;
        let now = Utc::now();
        let manager = Manager {
            id: EntityId::new(),
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        };

        let q = query(
            "CREATE (n:Gerente {
               id: $id, nombre: $nombre, email: $email,
               created_at: $now, updated_at: $now
             })",
        )
        .param("id", manager.id.to_string())
        .param("nombre", manager.name.clone())
        .param("email", manager.email.clone())
        .param("now", now.to_rfc3339());

        match self.run(q).await {
            Ok(()) => {
                tracing::debug!(id = %manager.id, "Manager node created");
                Ok(manager)
            }
            Err(e) if is_constraint_violation(&e) => Err(ValidationError::NotUnique {
                field: "email",
                value: manager.email,
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    pub async fn create_department(&self, input: &NewDepartment) -> Result<Department> {
        let input = validate::department(input)?;
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

        let q = query(
            "CREATE (n:Departamento {
               id: $id, nombre: $nombre, slogan: $slogan,
               empleados: $empleados, gerente: $gerente,
               created_at: $now, updated_at: $now
             })",
        )
        .param("id", department.id.to_string())
        .param("nombre", department.name.clone())
        .param("slogan", department.slogan.clone())
        .param("empleados", id_strings(&department.employees))
        .param("gerente", opt_id(&department.manager))
        .param("now", now.to_rfc3339());

        match self.run(q).await {
            Ok(()) => {
                tracing::debug!(
                    id = %department.id,
                    employees = department.employees.len(),
                    "Department node created"
                );
                Ok(department)
            }
            Err(e) if is_constraint_violation(&e) => Err(ValidationError::NotUnique {
                field: "nombre",
                value: department.name,
            }
            .into()),
            Err(e) => Err(e),
        }
    }

    // ── Updates ──────────────────────────────────────────────────

    /// Overwrite a department's fields and references.
    pub async fn update_department(&self, department: &Department) -> Result<Department> {
        let normalized = validate::department(&NewDepartment {
            name: department.name.clone(),
            slogan: department.slogan.clone(),
            employees: department.employees.clone(),
            manager: department.manager,
        })?;

        let q = query(
            "MATCH (n:Departamento {id: $id})
             SET n.nombre = $nombre, n.slogan = $slogan,
                 n.empleados = $empleados, n.gerente = $gerente,
                 n.updated_at = $now
             RETURN n",
        )
        .param("id", department.id.to_string())
        .param("nombre", normalized.name.clone())
        .param("slogan", normalized.slogan)
        .param("empleados", id_strings(&normalized.employees))
        .param("gerente", opt_id(&normalized.manager))
        .param("now", Utc::now().to_rfc3339());

        let row = match self.query_one(q).await {
            Ok(row) => row,
            Err(e) if is_constraint_violation(&e) => {
                return Err(ValidationError::NotUnique {
                    field: "nombre",
                    value: normalized.name,
                }
                .into())
            }
            Err(e) => return Err(e),
        };

        match row {
            Some(row) => {
                let node: neo4rs::Node = row.get("n").map_err(|e| {
                    StoreError::Serialization(format!("Failed to deserialize node: {e}"))
                })?;
                node_to_department(&node)
            }
            None => Err(StoreError::NotFound {
                kind: EntityKind::Department,
                id: department.id.to_string(),
            }),
        }
    }

    // ── Deletes ──────────────────────────────────────────────────

    /// Delete every node of one kind. Returns the count of deleted nodes.
    pub async fn delete_all_nodes(&self, kind: EntityKind) -> Result<u64> {
        let label = kind.label();
        let cypher = format!(
            "MATCH (n:{label})
             DETACH DELETE n
             RETURN count(n) AS cnt"
        );

        match self.query_one(query(&cypher)).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0).max(0) as u64),
            None => Ok(0),
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn id_strings(ids: &[EntityId]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn opt_id(id: &Option<EntityId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}
