// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Branchview REST API server
//!
//! This crate implements the HTTP boundary of the branch comparison
//! pipeline: an in-memory repository registry, a comparison service that
//! orchestrates git gateway calls, and axum handlers mapping registry and
//! service operations onto `/api` routes.

pub mod config;
pub mod error;
pub mod handlers;
pub mod mock_dependencies;
pub mod registry;
pub mod server;
pub mod services;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::Server;
