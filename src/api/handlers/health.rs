//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{ComponentCheck, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports whether the link store answers.
///
/// `GET /health` returns 200 with `"status": "healthy"` when a link count
/// succeeds, and 503 with `"status": "degraded"` otherwise:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "storage": { "status": "ok", "message": "postgres, 42 links" } }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = probe_storage(&state).await;

    let (code, status) = if storage.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { storage },
    };

    (code, Json(response))
}

async fn probe_storage(state: &AppState) -> ComponentCheck {
    match state.link_service.count_links().await {
        Ok(count) => ComponentCheck::ok(format!("{}, {} links", state.storage, count)),
        Err(e) => {
            tracing::warn!(error = ?e, "Storage health check failed");
            ComponentCheck::error(format!("{} unavailable", state.storage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{DomainChecker, LinkService};
    use crate::domain::repositories::MockLinkRepository;
    use crate::error::AppError;
    use crate::infrastructure::dns::NullResolver;
    use crate::utils::tld_registry::TldRegistry;
    use std::sync::Arc;
    use std::time::Duration;

    fn state_with(repo: MockLinkRepository) -> AppState {
        let checker = DomainChecker::new(Arc::new(NullResolver::new()), Duration::from_secs(1));
        let service = LinkService::new(Arc::new(repo), checker, Arc::new(TldRegistry::default()));
        AppState {
            link_service: Arc::new(service),
            storage: "postgres",
        }
    }

    #[tokio::test]
    async fn test_healthy_when_count_succeeds() {
        let mut repo = MockLinkRepository::new();
        repo.expect_count().returning(|| Ok(42));

        let (code, Json(body)) = health_handler(State(state_with(repo))).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "healthy");
        assert_eq!(
            body.checks.storage.message.as_deref(),
            Some("postgres, 42 links")
        );
    }

    #[tokio::test]
    async fn test_degraded_when_store_fails() {
        let mut repo = MockLinkRepository::new();
        repo.expect_count()
            .returning(|| Err(AppError::internal("connection refused")));

        let (code, Json(body)) = health_handler(State(state_with(repo))).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert!(!body.checks.storage.is_ok());
    }
}
