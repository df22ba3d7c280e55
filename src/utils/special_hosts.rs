//! Path-shape rules for multi-tenant document hosts.
//!
//! On hosts like `docs.google.com` the resource lives in the path, so a URL
//! that only names the host is useless as a short-link target. Each rule pins
//! the host to an expected path pattern.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::error::AppError;

static GOOGLE_DOCS_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(spreadsheets|document|presentation|forms)/d/[A-Za-z0-9_-]+")
        .expect("valid Google Docs path regex")
});

const GOOGLE_DOCS_MESSAGE: &str = "Invalid Google Docs URL. Must be in format: https://docs.google.com/spreadsheets/d/... (or document/presentation/forms)";

/// A host whose URLs must match a specific path shape.
#[derive(Debug, Clone)]
pub struct SpecialHostRule {
    host: String,
    path_pattern: Regex,
    message: String,
}

impl SpecialHostRule {
    pub fn new(host: impl Into<String>, path_pattern: Regex, message: impl Into<String>) -> Self {
        Self {
            host: host.into().to_ascii_lowercase(),
            path_pattern,
            message: message.into(),
        }
    }

    /// Google Docs, Sheets, Slides and Forms: `/<kind>/d/<id>`.
    pub fn google_docs() -> Self {
        Self::new(
            "docs.google.com",
            GOOGLE_DOCS_PATH.clone(),
            GOOGLE_DOCS_MESSAGE,
        )
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn applies_to(&self, hostname: &str) -> bool {
        self.host.eq_ignore_ascii_case(hostname)
    }

    pub fn matches_path(&self, path: &str) -> bool {
        self.path_pattern.is_match(path)
    }
}

/// Ordered set of special-host rules.
#[derive(Debug, Clone)]
pub struct SpecialHostRules {
    rules: Vec<SpecialHostRule>,
}

impl SpecialHostRules {
    pub fn new(rules: Vec<SpecialHostRule>) -> Self {
        Self { rules }
    }

    /// Rules that match nothing.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Validates `url` against the rule for its host, if any.
    ///
    /// URLs on hosts without a rule pass unchanged. Unparseable URLs pass as
    /// well; the format check is responsible for rejecting them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SpecialShapeInvalid`] with the rule's message when
    /// the path does not have the expected shape.
    pub fn validate(&self, url: &str) -> Result<(), AppError> {
        let Ok(parsed) = Url::parse(url) else {
            return Ok(());
        };
        let Some(hostname) = parsed.host_str() else {
            return Ok(());
        };

        match self.rules.iter().find(|rule| rule.applies_to(hostname)) {
            Some(rule) if !rule.matches_path(parsed.path()) => {
                Err(AppError::SpecialShapeInvalid {
                    message: rule.message.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for SpecialHostRules {
    fn default() -> Self {
        Self::new(vec![SpecialHostRule::google_docs()])
    }
}
