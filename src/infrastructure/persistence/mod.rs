//! Link store implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL via SQLx
//! - [`MemoryLinkRepository`] - in-process map, for local runs and tests

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
