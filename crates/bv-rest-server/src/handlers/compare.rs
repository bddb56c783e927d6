// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Branch comparison handler

use crate::error::ServerResult;
use crate::services::ComparisonService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use bv_rest_api_contract::{CompareRequest, DiffResult};

/// Compare two branches of a repository and persist the result
pub async fn compare_branches(
    State(state): State<AppState>,
    Path(repository_id): Path<i64>,
    Json(request): Json<CompareRequest>,
) -> ServerResult<Json<DiffResult>> {
    let service = ComparisonService::new(
        state.registry.clone(),
        state.gateway.clone(),
        state.config.classify_unchanged,
    );
    let result = service
        .compare(repository_id, &request.source_branch, &request.target_branch)
        .await?;
    Ok(Json(result))
}
