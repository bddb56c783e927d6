// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Directory browsing handler for the repository picker

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use bv_rest_api_contract::{BrowseRequest, BrowseResult, DirectoryEntry};
use std::path::PathBuf;

/// List subdirectories of a path, probing each for git metadata
pub async fn browse_directories(
    State(state): State<AppState>,
    Json(request): Json<BrowseRequest>,
) -> ServerResult<Json<BrowseResult>> {
    let target: PathBuf = match request.dir_path {
        Some(path) => PathBuf::from(path),
        None => match &state.config.browse_root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        },
    };

    let mut entries = tokio::fs::read_dir(&target).await.map_err(|err| {
        tracing::warn!(path = %target.display(), "browse failed: {}", err);
        ServerError::Internal("Failed to browse directory".to_string())
    })?;

    let mut directories = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|err| {
        tracing::warn!(path = %target.display(), "browse failed: {}", err);
        ServerError::Internal("Failed to browse directory".to_string())
    })? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let file_type = match entry.file_type().await {
            Ok(file_type) => file_type,
            Err(_) => continue,
        };
        if !file_type.is_dir() {
            continue;
        }
        let path = entry.path();
        let is_git_repo = state.gateway.verify_repository(&path).await.is_ok();
        directories.push(DirectoryEntry {
            name,
            path: path.to_string_lossy().into_owned(),
            is_git_repo,
        });
    }
    directories.sort_by(|a, b| a.name.cmp(&b.name));

    let parent = target
        .parent()
        .unwrap_or(target.as_path())
        .to_string_lossy()
        .into_owned();

    Ok(Json(BrowseResult {
        current_path: target.to_string_lossy().into_owned(),
        parent,
        directories,
    }))
}
