//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations by coordinating repository and
//! resolver calls with the validation helpers in [`crate::utils`].
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation pipeline and queries
//! - [`services::domain_checker::DomainChecker`] - DNS existence check for target hosts

pub mod services;
