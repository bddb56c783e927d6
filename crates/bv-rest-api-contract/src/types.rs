// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API contract types for the Branchview comparison service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered repository on the local filesystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub last_accessed: DateTime<Utc>,
}

/// A stored branch comparison. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub id: i64,
    pub repository_id: Option<i64>,
    pub source_branch: String,
    pub target_branch: String,
    pub changed_files: DiffResult,
    pub created_at: DateTime<Utc>,
}

/// Change classification for a single file in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    /// Only produced when the corrected zero-change classification is
    /// enabled; see [`FileStatus::from_counts`].
    Unchanged,
}

impl FileStatus {
    /// Classify a file from its insertion/deletion counts.
    ///
    /// Historical rule: both positive means modified, insertions alone
    /// means added, everything else means deleted. Note that a file with
    /// zero insertions and zero deletions (e.g. a pure rename) lands on
    /// `Deleted` under this rule; the server exposes a flag that maps that
    /// case to [`FileStatus::Unchanged`] instead.
    pub fn from_counts(additions: u64, deletions: u64) -> Self {
        if additions > 0 && deletions > 0 {
            FileStatus::Modified
        } else if additions > 0 {
            FileStatus::Added
        } else {
            FileStatus::Deleted
        }
    }
}

/// Per-file entry of a [`DiffResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitFile {
    pub path: String,
    pub status: FileStatus,
    pub additions: u64,
    pub deletions: u64,
}

/// Result of comparing two branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub files: Vec<GitFile>,
    pub total_additions: u64,
    pub total_deletions: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comparison_id: Option<i64>,
}

/// File content at a ref. A missing file is a successful response with
/// `exists: false` and empty content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    pub content: String,
    pub exists: bool,
}

/// Raw patch text for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDiff {
    pub diff: String,
}

/// One subdirectory in a browse listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    pub is_git_repo: bool,
}

/// Directory listing for the repository picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResult {
    pub current_path: String,
    pub parent: String,
    pub directories: Vec<DirectoryEntry>,
}

/// Body of `POST /api/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddRepositoryRequest {
    pub name: Option<String>,
    pub path: Option<String>,
}

/// Body of `POST /api/repositories/clone`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneRepositoryRequest {
    pub url: Option<String>,
    pub local_path: Option<String>,
    pub name: Option<String>,
}

/// Body of `POST /api/browse`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseRequest {
    #[serde(default)]
    pub dir_path: Option<String>,
}

/// Body of `POST /api/repositories/:id/compare`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(default)]
    pub source_branch: String,
    #[serde(default)]
    pub target_branch: String,
}

/// Query of `GET /api/repositories/:id/file`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContentQuery {
    pub branch: Option<String>,
    pub file_path: Option<String>,
}

/// Query of `GET /api/repositories/:id/diff`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiffQuery {
    pub source_branch: Option<String>,
    pub target_branch: Option<String>,
    pub file_path: Option<String>,
}
