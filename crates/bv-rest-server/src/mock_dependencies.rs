// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Canned gateway implementation for handler and service tests.

use async_trait::async_trait;
use bv_repo::{DiffSummary, GitError, GitGateway, GitResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Gateway double with fixed responses. Repositories under a path starting
/// with `invalid` fail verification, everything else passes.
pub struct MockGitGateway {
    pub branches: Vec<String>,
    pub summary: DiffSummary,
    /// Keyed by `"<ref>:<file>"`.
    pub files: HashMap<String, String>,
    pub diff_text: String,
    pub verify_ok: bool,
    pub clone_calls: AtomicUsize,
}

impl Default for MockGitGateway {
    fn default() -> Self {
        Self {
            branches: vec!["main".to_string(), "feature".to_string()],
            summary: DiffSummary::default(),
            files: HashMap::new(),
            diff_text: String::new(),
            verify_ok: true,
            clone_calls: AtomicUsize::new(0),
        }
    }
}

impl MockGitGateway {
    pub fn rejecting_verification() -> Self {
        Self {
            verify_ok: false,
            ..Self::default()
        }
    }

    pub fn with_summary(summary: DiffSummary) -> Self {
        Self {
            summary,
            ..Self::default()
        }
    }
}

#[async_trait]
impl GitGateway for MockGitGateway {
    async fn verify_repository(&self, path: &Path) -> GitResult<()> {
        if self.verify_ok {
            Ok(())
        } else {
            Err(GitError::NotARepository(path.to_path_buf()))
        }
    }

    async fn clone_repository(&self, _url: &str, _dest: &Path) -> GitResult<()> {
        self.clone_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_branches(&self, _path: &Path) -> GitResult<Vec<String>> {
        Ok(self.branches.clone())
    }

    async fn diff_summary(
        &self,
        _path: &Path,
        _source: &str,
        _target: &str,
    ) -> GitResult<DiffSummary> {
        Ok(self.summary.clone())
    }

    async fn show_file(
        &self,
        _path: &Path,
        reference: &str,
        file: &str,
    ) -> GitResult<Option<String>> {
        Ok(self.files.get(&format!("{reference}:{file}")).cloned())
    }

    async fn file_diff(
        &self,
        _path: &Path,
        _source: &str,
        _target: &str,
        _file: &str,
    ) -> GitResult<String> {
        Ok(self.diff_text.clone())
    }
}
