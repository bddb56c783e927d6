// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Branchview REST API contract types
//!
//! This crate defines the JSON schema types shared between the server and
//! any client of the comparison API. Field names follow the wire format
//! (camelCase), so serialized output is the contract.

pub mod types;

pub use types::*;
