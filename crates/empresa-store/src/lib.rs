//! empresa-store: persistence for employees, managers, and departments.
//!
//! All reads and writes flow through the [`EntityStore`] trait so that
//! validation, uniqueness, and insertion order behave the same on every
//! backend. Two backends are provided: Neo4j ([`GraphClient`]) and a
//! process-local [`MemoryStore`].
//!
//! Department references are expanded by [`relations`], never by the store.

pub mod client;
pub mod error;
pub mod memory;
pub mod mutations;
pub mod queries;
pub mod relations;
pub mod seed;
pub mod store;

pub use client::{GraphClient, GraphConfig};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::EntityStore;
