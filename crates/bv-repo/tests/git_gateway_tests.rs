// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::fs;
use std::path::Path;
use std::process::Stdio;
use tempfile::TempDir;

use bv_repo::{CliGit, GitError, GitGateway};

fn check_git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Repo with `main` holding README.md and `feature` adding a ten-line a.txt.
fn setup_repo() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path();

    git(path, &["init", "-b", "main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    fs::write(path.join("README.md"), "Initial content\n").expect("write README");
    git(path, &["add", "README.md"]);
    git(path, &["commit", "-m", "Initial commit"]);

    git(path, &["checkout", "-b", "feature"]);
    let ten_lines: String = (1..=10).map(|i| format!("line {i}\n")).collect();
    fs::write(path.join("a.txt"), ten_lines).expect("write a.txt");
    git(path, &["add", "a.txt"]);
    git(path, &["commit", "-m", "Add a.txt"]);
    git(path, &["checkout", "main"]);

    dir
}

#[tokio::test]
async fn verify_accepts_repository_and_rejects_plain_dir() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let repo = setup_repo();
    let plain = TempDir::new().unwrap();
    let gateway = CliGit::new();

    gateway.verify_repository(repo.path()).await.expect("valid repo");

    let err = gateway.verify_repository(plain.path()).await.unwrap_err();
    assert!(matches!(err, GitError::NotARepository(_)));

    let missing = plain.path().join("does-not-exist");
    let err = gateway.verify_repository(&missing).await.unwrap_err();
    assert!(matches!(err, GitError::NotARepository(_)));
}

#[tokio::test]
async fn lists_local_branches_only() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let repo = setup_repo();
    let gateway = CliGit::new();

    let branches = gateway.list_branches(repo.path()).await.expect("branches");
    assert!(branches.contains(&"main".to_string()));
    assert!(branches.contains(&"feature".to_string()));
    assert!(branches.iter().all(|b| !b.contains("remotes/")));
}

#[tokio::test]
async fn list_branches_reports_missing_repository() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let plain = TempDir::new().unwrap();
    let gateway = CliGit::new();

    let err = gateway.list_branches(&plain.path().join("gone")).await.unwrap_err();
    assert!(matches!(err, GitError::RepositoryNotFound(_)));
}

#[tokio::test]
async fn diff_summary_reports_added_file() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let repo = setup_repo();
    let gateway = CliGit::new();

    let summary = gateway
        .diff_summary(repo.path(), "main", "feature")
        .await
        .expect("diff summary");

    assert_eq!(summary.files.len(), 1);
    assert_eq!(summary.files[0].path, "a.txt");
    assert_eq!(summary.files[0].insertions, 10);
    assert_eq!(summary.files[0].deletions, 0);
    assert_eq!(summary.insertions, 10);
    assert_eq!(summary.deletions, 0);
}

#[tokio::test]
async fn diff_summary_fails_on_unknown_ref() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let repo = setup_repo();
    let gateway = CliGit::new();

    let err = gateway
        .diff_summary(repo.path(), "main", "no-such-branch")
        .await
        .unwrap_err();
    assert!(matches!(err, GitError::CommandFailed { .. }));
}

#[tokio::test]
async fn show_file_returns_content_or_none() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let repo = setup_repo();
    let gateway = CliGit::new();

    let content = gateway
        .show_file(repo.path(), "main", "README.md")
        .await
        .expect("show")
        .expect("exists on main");
    assert_eq!(content, "Initial content\n");

    // a.txt only exists on feature; absence is not an error.
    let missing = gateway.show_file(repo.path(), "main", "a.txt").await.expect("show");
    assert!(missing.is_none());

    let on_feature = gateway.show_file(repo.path(), "feature", "a.txt").await.expect("show");
    assert!(on_feature.is_some());
}

#[tokio::test]
async fn file_diff_returns_patch_text() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let repo = setup_repo();
    let gateway = CliGit::new();

    let patch = gateway
        .file_diff(repo.path(), "main", "feature", "a.txt")
        .await
        .expect("file diff");
    assert!(patch.contains("+line 1"));
    assert!(patch.contains("a.txt"));

    // Restricting to an untouched file yields an empty patch.
    let untouched = gateway
        .file_diff(repo.path(), "main", "feature", "README.md")
        .await
        .expect("file diff");
    assert!(untouched.is_empty());
}

#[tokio::test]
async fn clone_from_local_path_produces_repository() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let source = setup_repo();
    let dest_root = TempDir::new().unwrap();
    let dest = dest_root.path().join("nested").join("clone");
    let gateway = CliGit::new();

    gateway
        .clone_repository(&source.path().to_string_lossy(), &dest)
        .await
        .expect("clone");
    gateway.verify_repository(&dest).await.expect("cloned repo is valid");
}

#[tokio::test]
async fn clone_failure_carries_git_message() {
    if !check_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }
    let dest_root = TempDir::new().unwrap();
    let dest = dest_root.path().join("clone");
    let gateway = CliGit::new();

    let err = gateway
        .clone_repository(&dest_root.path().join("no-such-source").to_string_lossy(), &dest)
        .await
        .unwrap_err();
    match err {
        GitError::CloneFailed(message) => assert!(!message.is_empty()),
        other => panic!("expected CloneFailed, got {other:?}"),
    }
}
