//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//! - **memory**: in-process repositories used when no database is configured.
//!
//! Adapters translate between domain types and storage representations and
//! contain no marketplace rules.

pub mod memory;
pub mod persistence;
