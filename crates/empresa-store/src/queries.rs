//! Read operations against the Neo4j backend.
//!
//! Every list is ordered by `created_at` then `id`, which reproduces
//! insertion order for nodes written by this crate.

use chrono::{DateTime, Utc};
use neo4rs::query;

use empresa_core::{validate, Department, Employee, EntityId, EntityKind, Manager};

use crate::client::GraphClient;
use crate::error::{Result, StoreError};

impl GraphClient {
    // ── Employees ────────────────────────────────────────────────

    pub async fn employees(&self) -> Result<Vec<Employee>> {
        let q = query(
            "MATCH (n:Empleado)
             RETURN n
             ORDER BY n.created_at ASC, n.id ASC",
        );
        self.collect_nodes(q, node_to_employee).await
    }

    /// Fetch employees by id, returned in the order of `ids`.
    pub async fn employees_by_ids(&self, ids: &[EntityId]) -> Result<Vec<Employee>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let q = query(
            "MATCH (n:Empleado)
             WHERE n.id IN $ids
             RETURN n",
        )
        .param("ids", ids.iter().map(|id| id.to_string()).collect::<Vec<_>>());

        let found = self.collect_nodes(q, node_to_employee).await?;
        Ok(ids
            .iter()
            .filter_map(|id| found.iter().find(|e| e.id == *id).cloned())
            .collect())
    }

    pub async fn employees_in_salary_range(&self, min: f64, max: f64) -> Result<Vec<Employee>> {
        let q = query(
            "MATCH (n:Empleado)
             WHERE n.sueldo >= $min AND n.sueldo <= $max
             RETURN n
             ORDER BY n.created_at ASC, n.id ASC",
        )
        .param("min", min)
        .param("max", max);
        self.collect_nodes(q, node_to_employee).await
    }

    // ── Managers ─────────────────────────────────────────────────

    pub async fn managers(&self) -> Result<Vec<Manager>> {
        let q = query(
            "MATCH (n:Gerente)
             RETURN n
             ORDER BY n.created_at ASC, n.id ASC",
        );
        self.collect_nodes(q, node_to_manager).await
    }

    pub async fn manager_by_id(&self, id: &EntityId) -> Result<Option<Manager>> {
        let q = query("MATCH (n:Gerente {id: $id}) RETURN n").param("id", id.to_string());
        self.first_node(q, node_to_manager).await
    }

    pub async fn manager_by_email(&self, email: &str) -> Result<Option<Manager>> {
        let q = query("MATCH (n:Gerente {email: $email}) RETURN n LIMIT 1")
            .param("email", email.to_string());
        self.first_node(q, node_to_manager).await
    }

    // ── Departments ──────────────────────────────────────────────

    pub async fn departments(&self) -> Result<Vec<Department>> {
        let q = query(
            "MATCH (n:Departamento)
             RETURN n
             ORDER BY n.created_at ASC, n.id ASC",
        );
        self.collect_nodes(q, node_to_department).await
    }

    pub async fn department_by_id(&self, id: &EntityId) -> Result<Option<Department>> {
        let q = query("MATCH (n:Departamento {id: $id}) RETURN n").param("id", id.to_string());
        self.first_node(q, node_to_department).await
    }

    pub async fn department_by_name(&self, name: &str) -> Result<Option<Department>> {
        let q = query("MATCH (n:Departamento {nombre: $nombre}) RETURN n LIMIT 1")
            .param("nombre", name.to_string());
        self.first_node(q, node_to_department).await
    }

    /// First department whose name matches `pattern` anywhere, ignoring case.
    /// The pattern is checked locally first so an invalid one never reaches
    /// the server.
    pub async fn department_name_matching(&self, pattern: &str) -> Result<Option<Department>> {
        validate::name_pattern(pattern)?;
        let q = query(
            "MATCH (n:Departamento)
             WHERE n.nombre =~ $pattern
             RETURN n
             ORDER BY n.created_at ASC, n.id ASC
             LIMIT 1",
        )
        .param("pattern", format!("(?is).*(?:{pattern}).*"));
        self.first_node(q, node_to_department).await
    }

    // ── Row Helpers ──────────────────────────────────────────────

    async fn collect_nodes<T>(
        &self,
        q: neo4rs::Query,
        convert: fn(&neo4rs::Node) -> Result<T>,
    ) -> Result<Vec<T>> {
        let rows = self.query_rows(q).await?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let node: neo4rs::Node = row.get("n").map_err(|e| {
                StoreError::Serialization(format!("Failed to deserialize node: {e}"))
            })?;
            results.push(convert(&node)?);
        }
        Ok(results)
    }

    async fn first_node<T>(
        &self,
        q: neo4rs::Query,
        convert: fn(&neo4rs::Node) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.query_one(q).await? {
            Some(row) => {
                let node: neo4rs::Node = row.get("n").map_err(|e| {
                    StoreError::Serialization(format!("Failed to deserialize node: {e}"))
                })?;
                Ok(Some(convert(&node)?))
            }
            None => Ok(None),
        }
    }
}

// ── Node Conversion ──────────────────────────────────────────────

pub(crate) fn node_to_employee(node: &neo4rs::Node) -> Result<Employee> {
    Ok(Employee {
        id: id_prop(node, EntityKind::Employee, "id")?,
        name: string_prop(node, "nombre")?,
        salary: node
            .get::<f64>("sueldo")
            .map_err(|e| StoreError::Serialization(format!("Invalid sueldo: {e}")))?,
        created_at: time_prop(node, "created_at")?,
        updated_at: time_prop(node, "updated_at")?,
    })
}

pub(crate) fn node_to_manager(node: &neo4rs::Node) -> Result<Manager> {
    Ok(Manager {
        id: id_prop(node, EntityKind::Manager, "id")?,
        name: string_prop(node, "nombre")?,
        email: string_prop(node, "email")?,
        created_at: time_prop(node, "created_at")?,
        updated_at: time_prop(node, "updated_at")?,
    })
}

pub(crate) fn node_to_department(node: &neo4rs::Node) -> Result<Department> {
    let employees = node
        .get::<Vec<String>>("empleados")
        .unwrap_or_default()
        .iter()
        .map(|raw| parse_id(EntityKind::Employee, raw))
        .collect::<Result<Vec<_>>>()?;

    // An empty string stands for "no manager".
    let manager = match node.get::<String>("gerente") {
        Ok(raw) if !raw.is_empty() => Some(parse_id(EntityKind::Manager, &raw)?),
        _ => None,
    };

    Ok(Department {
        id: id_prop(node, EntityKind::Department, "id")?,
        name: string_prop(node, "nombre")?,
        slogan: string_prop(node, "slogan")?,
        employees,
        manager,
        created_at: time_prop(node, "created_at")?,
        updated_at: time_prop(node, "updated_at")?,
    })
}

fn string_prop(node: &neo4rs::Node, key: &str) -> Result<String> {
    node.get::<String>(key)
        .map_err(|e| StoreError::Serialization(format!("Missing property {key}: {e}")))
}

fn id_prop(node: &neo4rs::Node, kind: EntityKind, key: &str) -> Result<EntityId> {
    parse_id(kind, &string_prop(node, key)?)
}

fn parse_id(kind: EntityKind, raw: &str) -> Result<EntityId> {
    raw.parse()
        .map_err(|e| StoreError::Serialization(format!("Invalid {kind} id {raw}: {e}")))
}

fn time_prop(node: &neo4rs::Node, key: &str) -> Result<DateTime<Utc>> {
    let raw = string_prop(node, key)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Serialization(format!("Invalid {key} {raw}: {e}")))
}
