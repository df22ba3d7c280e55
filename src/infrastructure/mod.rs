//! Infrastructure layer for external integrations.
//!
//! Implements the traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Link store implementations (PostgreSQL, in-memory)
//! - [`dns`] - Host resolvers (hickory-resolver, no-op)

pub mod dns;
pub mod persistence;
