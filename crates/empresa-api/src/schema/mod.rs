//! GraphQL schema for the directory
//!
//! - [`QueryRoot`]: reads (`hello`, `saludar`, `empleados`, `empleadosPorSueldo`, `departamentos`, `departamento`, `gerentes`)
//! - [`MutationRoot`]: writes (`createEmpleado`, `createGerente`, `createDepartamento`)

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::*;

use async_graphql::{EmptySubscription, Schema};

use crate::directory::Directory;

pub type EmpresaSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around a directory.
pub fn build_schema(directory: Directory) -> EmpresaSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(directory)
        .finish()
}
