use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("limit must be greater than zero, got {0}")]
    InvalidLimit(i64),
    #[error("page must be at least 1, got {0}")]
    InvalidPage(i64),
    #[error("total must not be negative, got {0}")]
    InvalidTotal(i64),
    #[error("page {page} with limit {limit} is out of range")]
    OutOfRange { page: i64, limit: i64 },
}

/// Links to the neighbouring pages of a listing. `None` means there is no such page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// `?page=&limit=` query accepted by paginated endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

impl PageQuery {
    /// Rows to skip for this page; fails when the product does not fit in an `i64`.
    pub fn offset(&self) -> Result<i64, PaginationError> {
        self.page
            .saturating_sub(1)
            .max(0)
            .checked_mul(self.limit)
            .ok_or(PaginationError::OutOfRange {
                page: self.page,
                limit: self.limit,
            })
    }
}

pub fn build_links(
    base_url: &str,
    page: i64,
    limit: i64,
    total: i64,
) -> Result<PaginationLinks, PaginationError> {
    if limit <= 0 {
        return Err(PaginationError::InvalidLimit(limit));
    }
    if page < 1 {
        return Err(PaginationError::InvalidPage(page));
    }
    if total < 0 {
        return Err(PaginationError::InvalidTotal(total));
    }

    let total_pages = total / limit + i64::from(total % limit != 0);
    let link = |p: i64| format!("{base_url}?page={p}&limit={limit}");

    Ok(PaginationLinks {
        next: (page < total_pages).then(|| link(page + 1)),
        previous: (page > 1).then(|| link(page - 1)),
    })
}
