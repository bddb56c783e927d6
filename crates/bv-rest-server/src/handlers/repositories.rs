// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Repository-related handlers

use crate::error::{ServerError, ServerResult};
use crate::services::RepositoryService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use bv_rest_api_contract::{
    AddRepositoryRequest, CloneRepositoryRequest, FileContent, FileContentQuery, FileDiff,
    FileDiffQuery, Repository,
};

/// List all registered repositories
pub async fn list_repositories(
    State(state): State<AppState>,
) -> ServerResult<Json<Vec<Repository>>> {
    let service = RepositoryService::new(state.registry.clone(), state.gateway.clone());
    Ok(Json(service.list().await?))
}

/// Register a local repository
pub async fn add_repository(
    State(state): State<AppState>,
    Json(request): Json<AddRepositoryRequest>,
) -> ServerResult<Json<Repository>> {
    let path = request
        .path
        .ok_or_else(|| ServerError::Validation("Path is required".to_string()))?;

    let service = RepositoryService::new(state.registry.clone(), state.gateway.clone());
    Ok(Json(service.add(request.name, path).await?))
}

/// Clone a remote repository
pub async fn clone_repository(
    State(state): State<AppState>,
    Json(request): Json<CloneRepositoryRequest>,
) -> ServerResult<Json<Repository>> {
    let (url, local_path) = match (request.url, request.local_path) {
        (Some(url), Some(local_path)) => (url, local_path),
        _ => {
            return Err(ServerError::Validation(
                "URL and local path are required".to_string(),
            ))
        }
    };

    let service = RepositoryService::new(state.registry.clone(), state.gateway.clone());
    Ok(Json(service.clone_repository(url, local_path, request.name).await?))
}

/// List branches for a repository
pub async fn get_repository_branches(
    State(state): State<AppState>,
    Path(repository_id): Path<i64>,
) -> ServerResult<Json<Vec<String>>> {
    let service = RepositoryService::new(state.registry.clone(), state.gateway.clone());
    Ok(Json(service.branches(repository_id).await?))
}

/// Get file content at a branch
pub async fn get_file_content(
    State(state): State<AppState>,
    Path(repository_id): Path<i64>,
    Query(query): Query<FileContentQuery>,
) -> ServerResult<Json<FileContent>> {
    let (branch, file_path) = match (query.branch, query.file_path) {
        (Some(branch), Some(file_path)) => (branch, file_path),
        _ => {
            return Err(ServerError::Validation(
                "Branch and filePath are required".to_string(),
            ))
        }
    };

    let service = RepositoryService::new(state.registry.clone(), state.gateway.clone());
    Ok(Json(service.file_content(repository_id, &branch, &file_path).await?))
}

/// Get the patch text for one file between two branches
pub async fn get_file_diff(
    State(state): State<AppState>,
    Path(repository_id): Path<i64>,
    Query(query): Query<FileDiffQuery>,
) -> ServerResult<Json<FileDiff>> {
    let (source, target, file_path) = match (query.source_branch, query.target_branch, query.file_path)
    {
        (Some(source), Some(target), Some(file_path)) => (source, target, file_path),
        _ => {
            return Err(ServerError::Validation(
                "sourceBranch, targetBranch, and filePath are required".to_string(),
            ))
        }
    };

    let service = RepositoryService::new(state.registry.clone(), state.gateway.clone());
    Ok(Json(
        service.file_diff(repository_id, &source, &target, &file_path).await?,
    ))
}
