//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for local runs and tests
//! - **auth**: Argon2 password hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod auth;
pub mod memory;
pub mod persistence;
