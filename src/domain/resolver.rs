//! Name-resolution abstraction used by the domain existence check.

use async_trait::async_trait;

/// Looks up DNS records for a hostname.
///
/// Lookup failures of any kind (NXDOMAIN, no records, network error) are
/// reported as `false`; callers treat the answer as a liveness heuristic.
///
/// # Implementations
///
/// - [`crate::infrastructure::dns::HickoryResolver`] - live DNS via hickory-resolver
/// - [`crate::infrastructure::dns::NullResolver`] - treats every host as existing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Primary lookup: does the host resolve to at least one IP address?
    async fn has_address_records(&self, hostname: &str) -> bool;

    /// Fallback lookup: does the host answer a query for any record type?
    async fn has_any_records(&self, hostname: &str) -> bool;
}
