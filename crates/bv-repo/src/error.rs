// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Gateway error types

use std::path::PathBuf;

/// Gateway result type
pub type GitResult<T> = Result<T, GitError>;

/// Errors surfaced by the git gateway
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("repository not found at {}", .0.display())]
    RepositoryNotFound(PathBuf),

    #[error("clone failed: {0}")]
    CloneFailed(String),

    #[error("git {command} exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("malformed git output: {0}")]
    MalformedOutput(String),

    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
}
