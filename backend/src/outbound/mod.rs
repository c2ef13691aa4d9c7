//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel and `diesel-async`.
//! - **security**: Argon2id password hashing and JWT issuance/verification.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod persistence;
pub mod security;
