//! DNS-backed host resolution using hickory-resolver.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::system_conf::read_system_conf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::resolver::HostResolver;

/// Resolver that queries DNS.
///
/// Uses the system configuration (`/etc/resolv.conf`) when available and
/// falls back to the library's default public resolvers otherwise.
pub struct HickoryResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryResolver {
    /// Creates a resolver whose individual queries time out after `timeout`.
    ///
    /// The existence check bounds both lookups together on top of this.
    pub fn new(timeout: Duration) -> Self {
        let (config, opts) = match read_system_conf() {
            Ok((config, opts)) => {
                info!("DNS resolver initialized from system configuration");
                (config, opts)
            }
            Err(e) => {
                warn!(error = %e, "System DNS configuration unavailable, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };

        let resolver = TokioAsyncResolver::tokio(config, Self::options(opts, timeout));

        Self { resolver }
    }

    fn options(mut opts: ResolverOpts, timeout: Duration) -> ResolverOpts {
        opts.timeout = timeout;
        opts.attempts = 1;
        opts
    }
}

#[async_trait]
impl HostResolver for HickoryResolver {
    async fn has_address_records(&self, hostname: &str) -> bool {
        match self.resolver.lookup_ip(hostname).await {
            Ok(response) => {
                let found = response.iter().next().is_some();
                debug!(hostname, found, "Address lookup completed");
                found
            }
            Err(e) => {
                debug!(hostname, error = %e, "Address lookup failed");
                false
            }
        }
    }

    async fn has_any_records(&self, hostname: &str) -> bool {
        match self.resolver.lookup(hostname, RecordType::ANY).await {
            Ok(response) => {
                let found = response.iter().next().is_some();
                debug!(hostname, found, "ANY lookup completed");
                found
            }
            Err(e) => {
                debug!(hostname, error = %e, "ANY lookup failed");
                false
            }
        }
    }
}

/// Resolver that reports every host as existing.
///
/// Used when `DOMAIN_CHECK=off`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl NullResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for NullResolver {
    async fn has_address_records(&self, _hostname: &str) -> bool {
        true
    }

    async fn has_any_records(&self, _hostname: &str) -> bool {
        true
    }
}
