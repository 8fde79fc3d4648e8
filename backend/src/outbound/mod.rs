//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories used when no database is configured
//! - **argon2_password_hasher**: Argon2id password hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

mod argon2_password_hasher;
pub mod memory;
pub mod persistence;

pub use argon2_password_hasher::Argon2PasswordHasher;
