//! Core domain entities.
//!
//! - [`Link`] - A stored short link
//! - [`NewLink`] - Insert input for a link

pub mod link;

pub use link::{Link, NewLink};
