//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process stores used when no database is configured
//! - **user_directory**: reqwest client for the remote user directory
//! - **credentials**: Argon2id password hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod credentials;
pub mod memory;
pub mod persistence;
pub mod user_directory;
