//! Offset/limit pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Default and maximum number of rows returned by a list query.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Largest offset Postgres accepts (`OFFSET` is a signed bigint).
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Offset/limit window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of rows to skip.
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of rows to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request, clamping the limit to `1..=MAX_PAGE_SIZE`
    /// and the offset to `MAX_OFFSET`.
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip: skip.min(MAX_OFFSET),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        self.skip
    }

    /// Maximum number of rows to return.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// `OFFSET` bind value, saturating instead of wrapping.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// `LIMIT` bind value, saturating instead of wrapping.
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}

fn default_limit() -> u64 {
    MAX_PAGE_SIZE
}
