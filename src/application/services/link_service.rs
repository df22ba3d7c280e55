//! Link creation and retrieval service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::DomainChecker;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, validate_custom_code};
use crate::utils::special_hosts::SpecialHostRules;
use crate::utils::tld_registry::TldRegistry;
use crate::utils::url_format::{extract_hostname, is_valid_url_format};
use crate::utils::url_normalizer::normalize_url;

/// Attempts made to place an auto-generated code before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Service for creating, listing, fetching and deleting short links.
///
/// Link creation runs a fixed pipeline; the first failing step ends it and
/// nothing is written:
///
/// 1. Require a non-blank URL
/// 2. Normalize (prepend `https://` if needed)
/// 3. Check format and TLD
/// 4. Resolve the hostname
/// 5. Check special-host path shapes
/// 6. Allocate a code and insert
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    domain_checker: DomainChecker,
    tlds: Arc<TldRegistry>,
    special_hosts: Arc<SpecialHostRules>,
    code_generator: Arc<dyn CodeGenerator>,
    store_timeout: Duration,
}

impl LinkService {
    /// Creates a link service with the default special-host rules, random
    /// code generation and store timeout.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        domain_checker: DomainChecker,
        tlds: Arc<TldRegistry>,
    ) -> Self {
        Self {
            link_repository,
            domain_checker,
            tlds,
            special_hosts: Arc::new(SpecialHostRules::default()),
            code_generator: Arc::new(RandomCodeGenerator),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_special_hosts(mut self, special_hosts: Arc<SpecialHostRules>) -> Self {
        self.special_hosts = special_hosts;
        self
    }

    pub fn with_code_generator(mut self, code_generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Validates `raw_url`, allocates a code and stores the link.
    ///
    /// A `custom_code` that is `None` or blank means "generate one".
    /// Otherwise the value is used exactly as given.
    ///
    /// # Errors
    ///
    /// - [`AppError::InputMissing`] - URL is blank
    /// - [`AppError::FormatInvalid`] - scheme, hostname or TLD check failed
    /// - [`AppError::DomainUnreachable`] - hostname does not resolve
    /// - [`AppError::SpecialShapeInvalid`] - document-host path is malformed
    /// - [`AppError::CodeFormatInvalid`] - custom code is malformed
    /// - [`AppError::CodeConflict`] - custom code is taken
    /// - [`AppError::CodeSpaceExhausted`] - no free generated code found
    /// - [`AppError::Internal`] - storage failure or timeout
    pub async fn create_link(
        &self,
        raw_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        let result = self.run_create_pipeline(raw_url, custom_code).await;

        match &result {
            Ok(link) => {
                tracing::info!(code = %link.code, target_url = %link.target_url, "Link created");
            }
            Err(AppError::Internal(_)) => {}
            Err(e) => {
                tracing::info!(kind = e.kind(), reason = %e, "Link creation rejected");
            }
        }

        result
    }

    async fn run_create_pipeline(
        &self,
        raw_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        if raw_url.trim().is_empty() {
            return Err(AppError::InputMissing);
        }

        let target_url = normalize_url(raw_url);
        tracing::debug!(target_url = %target_url, "Normalized URL");

        if !is_valid_url_format(&target_url, &self.tlds) {
            return Err(AppError::FormatInvalid);
        }

        let hostname = extract_hostname(&target_url).ok_or(AppError::FormatInvalid)?;

        self.domain_checker.ensure_exists(&hostname).await?;
        tracing::debug!(hostname = %hostname, "Hostname resolves");

        self.special_hosts.validate(&target_url)?;

        match custom_code.filter(|code| !code.trim().is_empty()) {
            Some(code) => self.create_with_custom_code(code, target_url).await,
            None => self.create_with_generated_code(target_url).await,
        }
    }

    /// Inserts under a caller-chosen code. Conflicts are reported, not retried.
    async fn create_with_custom_code(
        &self,
        code: &str,
        target_url: String,
    ) -> Result<Link, AppError> {
        validate_custom_code(code)?;

        if self
            .bounded(self.link_repository.find_by_code(code))
            .await?
            .is_some()
        {
            return Err(AppError::CodeConflict {
                code: code.to_string(),
            });
        }

        // A concurrent insert between the check and here surfaces as
        // CodeConflict from the store.
        self.bounded(self.link_repository.create(NewLink {
            code: code.to_string(),
            target_url,
        }))
        .await
    }

    /// Inserts under a generated code, retrying on collisions.
    ///
    /// A collision found by the pre-check and one reported by the store at
    /// insert time both consume an attempt.
    async fn create_with_generated_code(&self, target_url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = self.code_generator.generate();

            if self
                .bounded(self.link_repository.find_by_code(&code))
                .await?
                .is_some()
            {
                tracing::debug!(attempt, code = %code, "Generated code already taken");
                continue;
            }

            let new_link = NewLink {
                code: code.clone(),
                target_url: target_url.clone(),
            };

            match self.bounded(self.link_repository.create(new_link)).await {
                Ok(link) => return Ok(link),
                Err(AppError::CodeConflict { .. }) => {
                    tracing::debug!(attempt, code = %code, "Generated code collided at insert");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            attempts = MAX_CODE_ATTEMPTS,
            "Failed to allocate a unique generated code"
        );

        Err(AppError::CodeSpaceExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    /// Lists all links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.bounded(self.link_repository.list()).await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.bounded(self.link_repository.find_by_code(code))
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Deletes a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code, including
    /// when a concurrent request deleted it first.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        self.get_link(code).await?;

        if !self.bounded(self.link_repository.delete(code)).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!(code, "Link deleted");
        Ok(())
    }

    /// Counts stored links; used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.bounded(self.link_repository.count()).await
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| {
                AppError::internal(format!(
                    "Link store call timed out after {}ms",
                    self.store_timeout.as_millis()
                ))
            })?
    }
}
