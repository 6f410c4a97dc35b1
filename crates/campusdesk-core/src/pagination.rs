//! Limit/offset windows for list endpoints.
//!
//! A window is requested with `limit` plus either `offset` or a 1-based
//! `page`; a page wins over an offset. Every list response echoes the
//! window back in a [`PaginationMeta`] next to its `data`.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::deserialize_optional_i64;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// The window that was applied to a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Rows matching the filters, ignoring the window
    pub total: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Present only when the caller asked for a page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// True when rows exist past the end of this window
    pub has_more: bool,
}

/// `?limit=&offset=&page=` as sent by clients. Empty values count as absent
/// so that forms can submit blank fields.
#[derive(Debug, Clone, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Rows per response, 1 to 100 (default 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Rows to skip; ignored when `page` is given
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// 1-based page number
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_LIMIT),
            offset: Some(0),
            page: Some(1),
        }
    }
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.map_or(DEFAULT_LIMIT, |n| n.clamp(1, MAX_LIMIT))
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|n| n.max(1))
    }

    /// Rows to skip before the window starts, never negative. Saturates
    /// rather than wrapping for absurd page numbers.
    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.page() {
            Some(page) => (page - 1).saturating_mul(self.limit()),
            None => self.offset.map_or(0, |n| n.max(0)),
        }
    }

    /// Describes this window over a result set of `total` rows.
    #[must_use]
    pub fn meta(&self, total: i64) -> PaginationMeta {
        let (limit, offset) = (self.limit(), self.offset());
        PaginationMeta {
            total,
            limit,
            offset: Some(offset),
            page: self.page(),
            has_more: total > offset.saturating_add(limit),
        }
    }
}
