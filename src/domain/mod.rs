//! Domain layer containing business entities and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`resolver`] - Name-resolution trait used by the existence check
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Implementations live in [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
pub mod resolver;
