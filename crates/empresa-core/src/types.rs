//! Core domain types for the Empresa directory.
//!
//! Departments refer to Employees and Managers by id only. Expanded views
//! (`PopulatedDepartment`) are built at read time and never persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Identity ──────────────────────────────────────────────────────

/// Unique, system-generated identifier for any entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// The three persisted collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Employee,
    Manager,
    Department,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [Self::Employee, Self::Manager, Self::Department];

    /// Storage label (Neo4j node label / document model name).
    pub fn label(self) -> &'static str {
        match self {
            Self::Employee => "Empleado",
            Self::Manager => "Gerente",
            Self::Department => "Departamento",
        }
    }

    /// Collection name as exposed to clients.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Employee => "empleados",
            Self::Manager => "gerentes",
            Self::Department => "departamentos",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Entities ──────────────────────────────────────────────────────

/// An employee (`Empleado`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "sueldo")]
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A manager (`Gerente`). The email is stored lowercased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manager {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A department (`Departamento`) as stored: references, not copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub slogan: String,
    #[serde(rename = "empleados")]
    pub employees: Vec<EntityId>,
    #[serde(rename = "gerente")]
    pub manager: Option<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Department {
    /// Add an employee reference unless it is already present.
    /// Returns `true` if the list changed.
    pub fn attach(&mut self, employee: EntityId) -> bool {
        if self.employees.contains(&employee) {
            return false;
        }
        self.employees.push(employee);
        true
    }

    /// Remove every occurrence of an employee reference.
    /// Returns `true` if the list changed.
    pub fn detach(&mut self, employee: EntityId) -> bool {
        let before = self.employees.len();
        self.employees.retain(|id| *id != employee);
        self.employees.len() != before
    }
}

/// A department with its references replaced by the referenced records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PopulatedDepartment {
    pub id: EntityId,
    pub name: String,
    pub slogan: String,
    pub employees: Vec<Employee>,
    pub manager: Option<Manager>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Creation Inputs ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewEmployee {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "sueldo")]
    pub salary: f64,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            salary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewManager {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
}

impl NewManager {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewDepartment {
    #[serde(rename = "nombre")]
    pub name: String,
    pub slogan: String,
    #[serde(rename = "empleados", default)]
    pub employees: Vec<EntityId>,
    #[serde(rename = "gerente", default)]
    pub manager: Option<EntityId>,
}

impl NewDepartment {
    pub fn new(name: impl Into<String>, slogan: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slogan: slogan.into(),
            ..Default::default()
        }
    }

    pub fn with_employees(mut self, employees: Vec<EntityId>) -> Self {
        self.employees = employees;
        self
    }

    pub fn with_manager(mut self, manager: EntityId) -> Self {
        self.manager = Some(manager);
        self
    }
}
