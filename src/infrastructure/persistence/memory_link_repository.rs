//! In-process link repository.
//!
//! Selected with `STORAGE_BACKEND=memory`. Data lives only as long as the
//! process. The uniqueness check and the insert happen under one lock, which
//! gives the same write-time guarantee as the PostgreSQL constraint.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    links: HashMap<String, Link>,
}

/// Link repository backed by a mutex-guarded map keyed by code.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: Mutex<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::internal("In-memory link store lock poisoned"))
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.lock()?;

        if inner.links.contains_key(&new_link.code) {
            return Err(AppError::CodeConflict {
                code: new_link.code,
            });
        }

        inner.next_id += 1;
        let link = Link::new(
            inner.next_id,
            new_link.code.clone(),
            new_link.target_url,
            Utc::now(),
        );
        inner.links.insert(new_link.code, link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.lock()?.links.get(code).cloned())
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.lock()?.links.values().cloned().collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(links)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.lock()?.links.len() as i64)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.lock()?.links.remove(code).is_some())
    }
}
