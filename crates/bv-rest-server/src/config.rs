// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server configuration

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,

    /// Enable permissive CORS headers for development
    pub enable_cors: bool,

    /// Root directory for the browse endpoint; the process working
    /// directory when unset
    pub browse_root: Option<PathBuf>,

    /// Classify zero-change diff entries as `unchanged` instead of the
    /// historical `deleted`
    pub classify_unchanged: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3001".parse().expect("valid default bind addr"),
            enable_cors: false,
            browse_root: None,
            classify_unchanged: false,
        }
    }
}
