#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use std::sync::Arc;
use std::time::Duration;

use snaplink::api::handlers::health_handler;
use snaplink::api::routes::link_routes;
use snaplink::application::services::{DomainChecker, LinkService};
use snaplink::domain::resolver::HostResolver;
use snaplink::infrastructure::persistence::MemoryLinkRepository;
use snaplink::state::AppState;
use snaplink::utils::code_generator::CodeGenerator;
use snaplink::utils::tld_registry::TldRegistry;

/// Resolver that knows every host except those under `.invalid`.
pub struct StaticResolver;

impl StaticResolver {
    fn resolves(hostname: &str) -> bool {
        !hostname.to_ascii_lowercase().ends_with(".invalid")
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn has_address_records(&self, hostname: &str) -> bool {
        Self::resolves(hostname)
    }

    async fn has_any_records(&self, hostname: &str) -> bool {
        Self::resolves(hostname)
    }
}

/// Built-in TLDs plus `invalid`, so `.invalid` hosts reach the DNS step.
pub fn test_tlds() -> Arc<TldRegistry> {
    let mut tlds = TldRegistry::default();
    tlds.extend(["invalid"]);
    Arc::new(tlds)
}

pub fn create_test_service() -> LinkService {
    let checker = DomainChecker::new(Arc::new(StaticResolver), Duration::from_secs(3));
    LinkService::new(Arc::new(MemoryLinkRepository::new()), checker, test_tlds())
}

pub fn create_test_state() -> AppState {
    state_from(create_test_service())
}

pub fn create_test_state_with_generator(generator: Arc<dyn CodeGenerator>) -> AppState {
    state_from(create_test_service().with_code_generator(generator))
}

fn state_from(service: LinkService) -> AppState {
    AppState {
        link_service: Arc::new(service),
        storage: "memory",
    }
}

pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", link_routes())
        .with_state(state)
}
