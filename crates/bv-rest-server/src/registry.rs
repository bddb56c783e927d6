// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory catalog of repositories and recorded comparisons.
//!
//! The registry is the only cross-request mutable state in the process.
//! It is constructor-injected through [`crate::state::AppState`] so tests
//! can run against isolated instances, and kept behind a trait so a
//! durable store can be swapped in without touching the service layer.

use async_trait::async_trait;
use bv_rest_api_contract::{Comparison, DiffResult, Repository};
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Registry interface used by the services and handlers.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// All known repositories in id order.
    async fn list_repositories(&self) -> anyhow::Result<Vec<Repository>>;

    async fn get_repository(&self, id: i64) -> anyhow::Result<Option<Repository>>;

    async fn get_repository_by_path(&self, path: &str) -> anyhow::Result<Option<Repository>>;

    /// Register a repository. Re-adding an existing path updates its
    /// `lastAccessed` and returns the existing record rather than creating
    /// a duplicate.
    async fn add_repository(&self, name: String, path: String) -> anyhow::Result<Repository>;

    /// Update `lastAccessed`; a no-op for unknown ids.
    async fn touch_repository(&self, id: i64) -> anyhow::Result<()>;

    /// Store an immutable comparison snapshot and return the stored record.
    async fn record_comparison(
        &self,
        repository_id: Option<i64>,
        source_branch: String,
        target_branch: String,
        result: DiffResult,
    ) -> anyhow::Result<Comparison>;

    async fn get_comparison(&self, id: i64) -> anyhow::Result<Option<Comparison>>;
}

#[derive(Default)]
struct Inner {
    repositories: BTreeMap<i64, Repository>,
    comparisons: BTreeMap<i64, Comparison>,
    next_repository_id: i64,
    next_comparison_id: i64,
}

/// Process-memory registry. Records vanish on restart.
pub struct InMemoryRegistry {
    inner: RwLock<Inner>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_repository_id: 1,
                next_comparison_id: 1,
                ..Inner::default()
            }),
        }
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistry {
    async fn list_repositories(&self) -> anyhow::Result<Vec<Repository>> {
        let inner = self.inner.read().await;
        Ok(inner.repositories.values().cloned().collect())
    }

    async fn get_repository(&self, id: i64) -> anyhow::Result<Option<Repository>> {
        let inner = self.inner.read().await;
        Ok(inner.repositories.get(&id).cloned())
    }

    async fn get_repository_by_path(&self, path: &str) -> anyhow::Result<Option<Repository>> {
        let inner = self.inner.read().await;
        Ok(inner.repositories.values().find(|r| r.path == path).cloned())
    }

    async fn add_repository(&self, name: String, path: String) -> anyhow::Result<Repository> {
        let mut inner = self.inner.write().await;
        if let Some(id) = inner.repositories.values().find(|r| r.path == path).map(|r| r.id) {
            let existing = inner
                .repositories
                .get_mut(&id)
                .expect("repository present under held write lock");
            existing.last_accessed = Utc::now();
            return Ok(existing.clone());
        }

        let id = inner.next_repository_id;
        inner.next_repository_id += 1;
        let repository = Repository {
            id,
            name,
            path,
            last_accessed: Utc::now(),
        };
        inner.repositories.insert(id, repository.clone());
        Ok(repository)
    }

    async fn touch_repository(&self, id: i64) -> anyhow::Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(repository) = inner.repositories.get_mut(&id) {
            repository.last_accessed = Utc::now();
        }
        Ok(())
    }

    async fn record_comparison(
        &self,
        repository_id: Option<i64>,
        source_branch: String,
        target_branch: String,
        result: DiffResult,
    ) -> anyhow::Result<Comparison> {
        let mut inner = self.inner.write().await;
        let id = inner.next_comparison_id;
        inner.next_comparison_id += 1;
        let comparison = Comparison {
            id,
            repository_id,
            source_branch,
            target_branch,
            changed_files: result,
            created_at: Utc::now(),
        };
        inner.comparisons.insert(id, comparison.clone());
        Ok(comparison)
    }

    async fn get_comparison(&self, id: i64) -> anyhow::Result<Option<Comparison>> {
        let inner = self.inner.read().await;
        Ok(inner.comparisons.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_result() -> DiffResult {
        DiffResult {
            files: vec![],
            total_additions: 0,
            total_deletions: 0,
            comparison_id: None,
        }
    }

    #[tokio::test]
    async fn re_adding_same_path_is_idempotent() {
        let registry = InMemoryRegistry::new();

        let first = registry
            .add_repository("proj".to_string(), "/tmp/proj".to_string())
            .await
            .unwrap();
        let second = registry
            .add_repository("renamed".to_string(), "/tmp/proj".to_string())
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "proj");
        assert!(second.last_accessed >= first.last_accessed);
        assert_eq!(registry.list_repositories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ids_are_monotonic_from_one() {
        let registry = InMemoryRegistry::new();

        let a = registry.add_repository("a".to_string(), "/a".to_string()).await.unwrap();
        let b = registry.add_repository("b".to_string(), "/b".to_string()).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn comparison_counter_is_independent() {
        let registry = InMemoryRegistry::new();
        registry.add_repository("a".to_string(), "/a".to_string()).await.unwrap();
        registry.add_repository("b".to_string(), "/b".to_string()).await.unwrap();

        let comparison = registry
            .record_comparison(Some(1), "main".to_string(), "feature".to_string(), empty_result())
            .await
            .unwrap();
        assert_eq!(comparison.id, 1);

        let stored = registry.get_comparison(1).await.unwrap().unwrap();
        assert_eq!(stored.source_branch, "main");
        assert_eq!(stored.repository_id, Some(1));
    }

    #[tokio::test]
    async fn touch_unknown_id_is_a_no_op() {
        let registry = InMemoryRegistry::new();
        registry.touch_repository(42).await.unwrap();
        assert!(registry.list_repositories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_is_stable_between_reads() {
        let registry = InMemoryRegistry::new();
        registry.add_repository("b".to_string(), "/b".to_string()).await.unwrap();
        registry.add_repository("a".to_string(), "/a".to_string()).await.unwrap();

        let first = registry.list_repositories().await.unwrap();
        let second = registry.list_repositories().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].id, 1);
        assert_eq!(first[1].id, 2);
    }

    #[tokio::test]
    async fn unknown_lookups_are_none() {
        let registry = InMemoryRegistry::new();
        assert!(registry.get_repository(7).await.unwrap().is_none());
        assert!(registry.get_repository_by_path("/nowhere").await.unwrap().is_none());
        assert!(registry.get_comparison(7).await.unwrap().is_none());
    }
}
