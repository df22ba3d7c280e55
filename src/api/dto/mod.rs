//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde; link records are serialized in camelCase.

pub mod health;
pub mod link;
