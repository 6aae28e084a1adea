//! Extract the list filter and page window from the query string.

use crate::error::AppError;
use crate::models::ListQuery;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// `name`, `pageNumber` (1-based) and `limit` from the query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub name: Option<String>,
    pub page_number: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn from_query(query: ListQuery) -> Result<Self, AppError> {
        let page_number = query.page_number.unwrap_or(1);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        if page_number < 1 {
            return Err(AppError::Validation("pageNumber must be at least 1".into()));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        Ok(PageRequest {
            name: query.name.filter(|n| !n.is_empty()),
            page_number,
            limit,
        })
    }

    /// Rows to skip before this page.
    pub fn skip(&self) -> u32 {
        (self.page_number - 1).saturating_mul(self.limit)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        PageRequest::from_query(query)
    }
}
