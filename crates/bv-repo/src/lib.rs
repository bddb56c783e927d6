// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Version-control gateway for Branchview.
//!
//! This crate wraps the external `git` command-line tool behind an async
//! trait so the HTTP layer never blocks on subprocess I/O and tests can
//! substitute a canned implementation. Results crossing the boundary are
//! parsed into explicit types; malformed git output fails fast instead of
//! leaking half-populated records upward.

pub mod diff;
pub mod error;
pub mod gateway;

pub use diff::{DiffEntry, DiffSummary};
pub use error::{GitError, GitResult};
pub use gateway::{CliGit, GitGateway};
