//! Pure helpers used by the link-creation pipeline.
//!
//! - [`url_normalizer`] - Coerce raw input into an absolute URL
//! - [`url_format`] - Scheme, hostname and TLD checks
//! - [`tld_registry`] - Recognized top-level domains
//! - [`special_hosts`] - Path-shape rules for document hosts
//! - [`code_generator`] - Short code generation and validation
//! - [`db_error`] - SQL error classification

pub mod code_generator;
pub mod db_error;
pub mod special_hosts;
pub mod tld_registry;
pub mod url_format;
pub mod url_normalizer;
