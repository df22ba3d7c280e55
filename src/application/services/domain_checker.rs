//! Liveness probe for link target hostnames.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::resolver::HostResolver;
use crate::error::AppError;
use crate::utils::url_format::is_local_host;

/// Default bound on the primary and fallback lookups together.
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(3);

/// Decides whether a hostname exists by resolving it.
///
/// Local hosts (`localhost`, `127.0.0.1`, `*.local`) are never looked up.
/// For anything else an address lookup runs first; if it finds nothing, one
/// fallback lookup for any record type follows. Both share a single timeout,
/// and running out of time counts as "does not exist".
///
/// Resolution is a heuristic: parked domains resolve, and a resolver outage
/// rejects real ones. There is no retry.
#[derive(Clone)]
pub struct DomainChecker {
    resolver: Arc<dyn HostResolver>,
    timeout: Duration,
}

impl DomainChecker {
    pub fn new(resolver: Arc<dyn HostResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Returns true if `hostname` is local or resolves within the timeout.
    pub async fn exists(&self, hostname: &str) -> bool {
        if is_local_host(hostname) {
            tracing::debug!(hostname, "Skipping DNS check for local host");
            return true;
        }

        let lookup = async {
            if self.resolver.has_address_records(hostname).await {
                return true;
            }
            tracing::debug!(hostname, "Address lookup found nothing, trying ANY");
            self.resolver.has_any_records(hostname).await
        };

        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(found) => found,
            Err(_) => {
                tracing::warn!(
                    hostname,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "DNS existence check timed out"
                );
                false
            }
        }
    }

    /// Like [`Self::exists`], but as a pipeline step.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DomainUnreachable`] naming the host if it does not
    /// resolve.
    pub async fn ensure_exists(&self, hostname: &str) -> Result<(), AppError> {
        if self.exists(hostname).await {
            Ok(())
        } else {
            Err(AppError::DomainUnreachable {
                hostname: hostname.to_string(),
            })
        }
    }
}
