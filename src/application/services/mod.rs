//! Business logic services for the application layer.

pub mod domain_checker;
pub mod link_service;

pub use domain_checker::DomainChecker;
pub use link_service::LinkService;
