//! empresa-api: GraphQL interface for the Empresa directory.
//!
//! [`Directory`] holds the read and write operations; [`schema`] exposes them
//! as GraphQL queries and mutations; [`server`] serves the schema over HTTP.

pub mod directory;
pub mod error;
pub mod schema;
pub mod server;

pub use directory::{DepartmentDraft, Directory};
pub use error::ApiError;
pub use schema::{build_schema, EmpresaSchema};
