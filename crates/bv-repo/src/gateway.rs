// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Git gateway trait and the CLI-backed implementation.

use crate::diff::{parse_numstat, DiffSummary};
use crate::error::{GitError, GitResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

/// Repository operations needed by the comparison pipeline.
///
/// Every method is an await point; implementations must not block the
/// runtime while the underlying tool runs.
#[async_trait]
pub trait GitGateway: Send + Sync {
    /// Succeeds iff `path` is a working directory under git control.
    async fn verify_repository(&self, path: &Path) -> GitResult<()>;

    /// Clone `url` into `dest`, creating parent directories as needed.
    async fn clone_repository(&self, url: &str, dest: &Path) -> GitResult<()>;

    /// Local branch names, remote-tracking refs excluded, remote prefixes
    /// stripped, duplicates collapsed by insertion order.
    async fn list_branches(&self, path: &Path) -> GitResult<Vec<String>>;

    /// Three-dot diff summary: changes reachable from `target` since it
    /// diverged from `source`.
    async fn diff_summary(&self, path: &Path, source: &str, target: &str)
        -> GitResult<DiffSummary>;

    /// File content at `reference`, or `None` when the file does not exist
    /// there. Absence is a normal outcome, not a failure.
    async fn show_file(&self, path: &Path, reference: &str, file: &str)
        -> GitResult<Option<String>>;

    /// Raw three-dot patch text restricted to `file`.
    async fn file_diff(
        &self,
        path: &Path,
        source: &str,
        target: &str,
        file: &str,
    ) -> GitResult<String>;
}

/// Gateway backed by the `git` executable on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct CliGit;

impl CliGit {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, dir: Option<&Path>, args: &[&str]) -> GitResult<Output> {
        let mut command = Command::new("git");
        command.args(args);
        // Never hang on credential prompts; failures surface as errors.
        command.env("GIT_TERMINAL_PROMPT", "0");
        if let Some(dir) = dir {
            command.current_dir(dir);
        }
        let output = command.output().await?;
        tracing::debug!(
            args = ?args,
            status = ?output.status.code(),
            "git invocation finished"
        );
        Ok(output)
    }
}

#[async_trait]
impl GitGateway for CliGit {
    async fn verify_repository(&self, path: &Path) -> GitResult<()> {
        // A vanished directory fails the spawn itself; either way the path
        // does not hold a usable repository.
        let output = self
            .run(Some(path), &["status", "--porcelain"])
            .await
            .map_err(|_| GitError::NotARepository(path.to_path_buf()))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(GitError::NotARepository(path.to_path_buf()))
        }
    }

    async fn clone_repository(&self, url: &str, dest: &Path) -> GitResult<()> {
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let dest_str = dest.to_string_lossy();
        let output = self.run(None, &["clone", url, dest_str.as_ref()]).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(GitError::CloneFailed(stderr_message(&output)))
        }
    }

    async fn list_branches(&self, path: &Path) -> GitResult<Vec<String>> {
        let output = self
            .run(Some(path), &["branch", "--all"])
            .await
            .map_err(|_| GitError::RepositoryNotFound(path.to_path_buf()))?;
        if !output.status.success() {
            return Err(GitError::RepositoryNotFound(path.to_path_buf()));
        }
        Ok(parse_branches(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn diff_summary(
        &self,
        path: &Path,
        source: &str,
        target: &str,
    ) -> GitResult<DiffSummary> {
        let range = format!("{source}...{target}");
        let output = self.run(Some(path), &["diff", "--numstat", &range]).await?;
        if !output.status.success() {
            return Err(command_failed("diff", &output));
        }
        parse_numstat(&String::from_utf8_lossy(&output.stdout))
    }

    async fn show_file(
        &self,
        path: &Path,
        reference: &str,
        file: &str,
    ) -> GitResult<Option<String>> {
        let spec = format!("{reference}:{file}");
        let output = self.run(Some(path), &["show", &spec]).await?;
        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
        } else {
            // Missing at that ref; callers report `exists: false`.
            Ok(None)
        }
    }

    async fn file_diff(
        &self,
        path: &Path,
        source: &str,
        target: &str,
        file: &str,
    ) -> GitResult<String> {
        let range = format!("{source}...{target}");
        let output = self.run(Some(path), &["diff", &range, "--", file]).await?;
        if !output.status.success() {
            return Err(command_failed("diff", &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn stderr_message(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

fn command_failed(command: &str, output: &Output) -> GitError {
    GitError::CommandFailed {
        command: command.to_string(),
        status: output.status.code().unwrap_or(-1),
        stderr: stderr_message(output),
    }
}

/// Parse `git branch --all` output into user-facing branch names.
///
/// Remote-tracking lines (`remotes/...`) and symref arrows are dropped,
/// current/worktree markers are trimmed, and any surviving `origin/` prefix
/// is stripped. The first occurrence of a name wins.
fn parse_branches(raw: &str) -> Vec<String> {
    let mut branches: Vec<String> = Vec::new();
    for line in raw.lines() {
        let name = line.trim_start_matches(['*', '+', ' ']).trim();
        if name.is_empty()
            || name.starts_with("remotes/")
            || name.starts_with('(')
            || name.contains("->")
        {
            continue;
        }
        let name = name.strip_prefix("origin/").unwrap_or(name);
        if !branches.iter().any(|b| b == name) {
            branches.push(name.to_string());
        }
    }
    branches
}

#[cfg(test)]
mod tests {
    use super::parse_branches;

    #[test]
    fn strips_current_branch_marker() {
        let branches = parse_branches("* main\n  feature\n");
        assert_eq!(branches, vec!["main", "feature"]);
    }

    #[test]
    fn excludes_remote_tracking_refs() {
        let raw = "* main\n  feature\n  remotes/origin/HEAD -> origin/main\n  remotes/origin/main\n  remotes/origin/feature\n";
        let branches = parse_branches(raw);
        assert_eq!(branches, vec!["main", "feature"]);
        assert!(branches.iter().all(|b| !b.contains("origin/")));
    }

    #[test]
    fn strips_remote_prefix_and_dedupes_in_order() {
        let branches = parse_branches("  origin/main\n  main\n  origin/release\n");
        assert_eq!(branches, vec!["main", "release"]);
    }

    #[test]
    fn skips_detached_head_line() {
        let branches = parse_branches("* (HEAD detached at 1a2b3c4)\n  main\n");
        assert_eq!(branches, vec!["main"]);
    }
}
