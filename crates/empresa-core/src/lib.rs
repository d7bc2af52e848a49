//! empresa-core: Shared types, validation, configuration, and error handling.
//!
//! This crate provides the foundational pieces used by every Empresa crate:
//! - Entity types (Employee, Manager, Department) and their creation inputs
//! - Field validation and normalization rules applied before persistence
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;
pub mod validate;

pub use error::{ConfigError, ValidationError};
pub use types::{
    Department, Employee, EntityId, EntityKind, Manager, NewDepartment, NewEmployee, NewManager,
    PopulatedDepartment,
};
