// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Business logic services

use crate::error::{ServerError, ServerResult};
use crate::registry::RegistryStore;
use bv_repo::GitGateway;
use bv_rest_api_contract::{DiffResult, FileContent, FileDiff, FileStatus, GitFile, Repository};
use std::path::Path;
use std::sync::Arc;

/// Repository service for registry and gateway orchestration.
pub struct RepositoryService {
    registry: Arc<dyn RegistryStore>,
    gateway: Arc<dyn GitGateway>,
}

impl RepositoryService {
    pub fn new(registry: Arc<dyn RegistryStore>, gateway: Arc<dyn GitGateway>) -> Self {
        Self { registry, gateway }
    }

    pub async fn list(&self) -> ServerResult<Vec<Repository>> {
        self.registry.list_repositories().await.map_err(|err| {
            tracing::error!("Failed to list repositories: {}", err);
            ServerError::Internal("Failed to fetch repositories".to_string())
        })
    }

    /// Register a local directory. Re-adding a known path refreshes its
    /// `lastAccessed` and returns the existing record.
    pub async fn add(&self, name: Option<String>, path: String) -> ServerResult<Repository> {
        self.gateway.verify_repository(Path::new(&path)).await.map_err(|err| {
            tracing::warn!(path = %path, "repository verification failed: {}", err);
            ServerError::Validation(
                "Invalid repository path or not a git repository".to_string(),
            )
        })?;

        let name = name.unwrap_or_else(|| basename(&path));
        self.registry.add_repository(name, path).await.map_err(|err| {
            tracing::error!("Failed to register repository: {}", err);
            ServerError::Internal("Failed to add repository".to_string())
        })
    }

    /// Clone a remote repository, or adopt an already-present checkout.
    ///
    /// There is intentionally no guard against two concurrent clones into
    /// the same destination; the second git invocation loses and surfaces
    /// its own error.
    pub async fn clone_repository(
        &self,
        url: String,
        local_path: String,
        name: Option<String>,
    ) -> ServerResult<Repository> {
        let dest = Path::new(&local_path);

        if tokio::fs::metadata(dest).await.is_ok() {
            if let Some(existing) = self
                .registry
                .get_repository_by_path(&local_path)
                .await
                .map_err(ServerError::from)?
            {
                self.registry.touch_repository(existing.id).await.map_err(ServerError::from)?;
                let refreshed =
                    self.registry.get_repository(existing.id).await.map_err(ServerError::from)?;
                return Ok(refreshed.unwrap_or(existing));
            }
            // Present on disk but unknown to us; adopt it if it checks out.
            if self.gateway.verify_repository(dest).await.is_ok() {
                let name = name.unwrap_or_else(|| basename(&local_path));
                return self
                    .registry
                    .add_repository(name, local_path)
                    .await
                    .map_err(ServerError::from);
            }
            return Err(ServerError::Validation(
                "Directory already exists and is not a valid git repository".to_string(),
            ));
        }

        self.gateway.clone_repository(&url, dest).await.map_err(|err| {
            tracing::error!(url = %url, path = %local_path, "clone failed: {}", err);
            ServerError::Internal(format!("Failed to clone repository: {}", err))
        })?;

        let name = name.unwrap_or_else(|| basename(&local_path));
        self.registry.add_repository(name, local_path).await.map_err(ServerError::from)
    }

    pub async fn branches(&self, id: i64) -> ServerResult<Vec<String>> {
        let repository = self.require(id).await?;
        self.gateway.list_branches(Path::new(&repository.path)).await.map_err(|err| {
            tracing::error!("Failed to list branches for repository {}: {}", id, err);
            ServerError::Internal("Failed to fetch branches".to_string())
        })
    }

    pub async fn file_content(
        &self,
        id: i64,
        branch: &str,
        file_path: &str,
    ) -> ServerResult<FileContent> {
        let repository = self.require(id).await?;
        match self
            .gateway
            .show_file(Path::new(&repository.path), branch, file_path)
            .await
        {
            Ok(Some(content)) => Ok(FileContent {
                content,
                exists: true,
            }),
            // Missing at that ref is a successful response, not a failure.
            Ok(None) => Ok(FileContent {
                content: String::new(),
                exists: false,
            }),
            Err(err) => {
                tracing::error!("Failed to read {} at {}: {}", file_path, branch, err);
                Err(ServerError::Internal(
                    "Failed to fetch file content".to_string(),
                ))
            }
        }
    }

    pub async fn file_diff(
        &self,
        id: i64,
        source_branch: &str,
        target_branch: &str,
        file_path: &str,
    ) -> ServerResult<FileDiff> {
        let repository = self.require(id).await?;
        let diff = self
            .gateway
            .file_diff(
                Path::new(&repository.path),
                source_branch,
                target_branch,
                file_path,
            )
            .await
            .map_err(|err| {
                tracing::error!("Failed to diff {} for repository {}: {}", file_path, id, err);
                ServerError::Internal("Failed to fetch file diff".to_string())
            })?;
        Ok(FileDiff { diff })
    }

    async fn require(&self, id: i64) -> ServerResult<Repository> {
        self.registry
            .get_repository(id)
            .await
            .map_err(ServerError::from)?
            .ok_or(ServerError::RepositoryNotFound(id))
    }
}

/// Comparison service: the only place combining gateway output with
/// registry persistence.
pub struct ComparisonService {
    registry: Arc<dyn RegistryStore>,
    gateway: Arc<dyn GitGateway>,
    classify_unchanged: bool,
}

impl ComparisonService {
    pub fn new(
        registry: Arc<dyn RegistryStore>,
        gateway: Arc<dyn GitGateway>,
        classify_unchanged: bool,
    ) -> Self {
        Self {
            registry,
            gateway,
            classify_unchanged,
        }
    }

    /// Compare two branches, persist the snapshot, and return the result
    /// with its comparison id attached. Gateway failures propagate without
    /// retries; an unknown repository id writes nothing.
    pub async fn compare(
        &self,
        repository_id: i64,
        source_branch: &str,
        target_branch: &str,
    ) -> ServerResult<DiffResult> {
        let repository = self
            .registry
            .get_repository(repository_id)
            .await
            .map_err(ServerError::from)?
            .ok_or(ServerError::RepositoryNotFound(repository_id))?;

        let summary = self
            .gateway
            .diff_summary(Path::new(&repository.path), source_branch, target_branch)
            .await
            .map_err(|err| {
                tracing::error!(
                    "Failed to compare {}..{} in {}: {}",
                    source_branch,
                    target_branch,
                    repository.path,
                    err
                );
                ServerError::Internal("Failed to compare branches".to_string())
            })?;

        let files = summary
            .files
            .iter()
            .map(|entry| GitFile {
                path: entry.path.clone(),
                status: self.classify(entry.insertions, entry.deletions),
                additions: entry.insertions,
                deletions: entry.deletions,
            })
            .collect();

        let result = DiffResult {
            files,
            total_additions: summary.insertions,
            total_deletions: summary.deletions,
            comparison_id: None,
        };

        let stored = self
            .registry
            .record_comparison(
                Some(repository.id),
                source_branch.to_string(),
                target_branch.to_string(),
                result.clone(),
            )
            .await
            .map_err(ServerError::from)?;

        Ok(DiffResult {
            comparison_id: Some(stored.id),
            ..result
        })
    }

    fn classify(&self, additions: u64, deletions: u64) -> FileStatus {
        if self.classify_unchanged && additions == 0 && deletions == 0 {
            FileStatus::Unchanged
        } else {
            FileStatus::from_counts(additions, deletions)
        }
    }
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
