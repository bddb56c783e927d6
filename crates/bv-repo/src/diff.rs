// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Parsing of `git diff --numstat` output into validated summaries.

use crate::error::{GitError, GitResult};

/// Per-file insertion/deletion counts from a diff summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub path: String,
    pub insertions: u64,
    pub deletions: u64,
}

/// Aggregated diff summary for a ref pair.
///
/// `insertions`/`deletions` are the totals over all entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub files: Vec<DiffEntry>,
    pub insertions: u64,
    pub deletions: u64,
}

/// Parse raw `--numstat` output.
///
/// Each line is `<insertions>\t<deletions>\t<path>`. Binary files are
/// reported as `-\t-\t<path>` and carry zero counts. Anything else is
/// rejected rather than coerced, so a git version printing an unexpected
/// shape surfaces as an error instead of a silently empty diff.
pub fn parse_numstat(raw: &str) -> GitResult<DiffSummary> {
    let mut summary = DiffSummary::default();

    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.splitn(3, '\t');
        let (insertions, deletions, path) = match (parts.next(), parts.next(), parts.next()) {
            (Some(ins), Some(del), Some(path)) if !path.is_empty() => {
                (parse_count(ins, line)?, parse_count(del, line)?, path)
            }
            _ => {
                return Err(GitError::MalformedOutput(format!(
                    "unexpected numstat line: {line:?}"
                )))
            }
        };

        summary.insertions += insertions;
        summary.deletions += deletions;
        summary.files.push(DiffEntry {
            path: path.to_string(),
            insertions,
            deletions,
        });
    }

    Ok(summary)
}

fn parse_count(field: &str, line: &str) -> GitResult<u64> {
    // Binary files have no line counts.
    if field == "-" {
        return Ok(0);
    }
    field.parse::<u64>().map_err(|_| {
        GitError::MalformedOutput(format!("non-numeric count {field:?} in numstat line {line:?}"))
    })
}
