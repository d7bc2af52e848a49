use async_graphql::{InputObject, SimpleObject, ID};

use empresa_core::{Employee, Manager, NewEmployee, NewManager, PopulatedDepartment};

use crate::directory::DepartmentDraft;

// ── Output Types ─────────────────────────────────────────────────

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Empleado")]
pub struct EmpleadoObject {
    #[graphql(name = "_id")]
    pub id: ID,
    pub nombre: String,
    pub sueldo: f64,
}

impl From<Employee> for EmpleadoObject {
    fn from(e: Employee) -> Self {
        Self {
            id: ID(e.id.to_string()),
            nombre: e.name,
            sueldo: e.salary,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Gerente")]
pub struct GerenteObject {
    #[graphql(name = "_id")]
    pub id: ID,
    pub nombre: String,
    pub email: String,
}

impl From<Manager> for GerenteObject {
    fn from(m: Manager) -> Self {
        Self {
            id: ID(m.id.to_string()),
            nombre: m.name,
            email: m.email,
        }
    }
}

/// A department with its employees and manager already expanded.
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Departamento")]
pub struct DepartamentoObject {
    #[graphql(name = "_id")]
    pub id: ID,
    pub nombre: String,
    pub slogan: String,
    pub empleados: Vec<EmpleadoObject>,
    pub gerente: Option<GerenteObject>,
}

impl From<PopulatedDepartment> for DepartamentoObject {
    fn from(d: PopulatedDepartment) -> Self {
        Self {
            id: ID(d.id.to_string()),
            nombre: d.name,
            slogan: d.slogan,
            empleados: d.employees.into_iter().map(Into::into).collect(),
            gerente: d.manager.map(Into::into),
        }
    }
}

// ── Input Types ──────────────────────────────────────────────────

#[derive(InputObject, Debug, Clone)]
pub struct EmpleadoInput {
    pub nombre: String,
    pub sueldo: f64,
}

impl From<EmpleadoInput> for NewEmployee {
    fn from(input: EmpleadoInput) -> Self {
        NewEmployee::new(input.nombre, input.sueldo)
    }
}

#[derive(InputObject, Debug, Clone)]
pub struct GerenteInput {
    pub nombre: String,
    pub email: String,
}

impl From<GerenteInput> for NewManager {
    fn from(input: GerenteInput) -> Self {
        NewManager::new(input.nombre, input.email)
    }
}

#[derive(InputObject, Debug, Clone)]
pub struct DepartamentoInput {
    pub nombre: String,
    pub slogan: String,
    /// New employees created together with the department.
    #[graphql(default)]
    pub empleados: Vec<EmpleadoInput>,
}

impl From<DepartamentoInput> for DepartmentDraft {
    fn from(input: DepartamentoInput) -> Self {
        Self {
            name: input.nombre,
            slogan: input.slogan,
            employees: input.empleados.into_iter().map(Into::into).collect(),
        }
    }
}
