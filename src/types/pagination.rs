//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::{DEFAULT_PAGE_INDEX, DEFAULT_PAGE_SIZE, MAX_PAGE_INDEX, MAX_PAGE_SIZE};
use crate::domain::{CommentResponse, RecipeWithInteractions, UserWithInteractions};

/// Pagination query parameters, shared by every paged endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// 1-based page index
    #[serde(default = "default_page_index")]
    #[validate(range(
        min = 1,
        max = 1_000_000,
        message = "Page index must be between 1 and 1000000"
    ))]
    #[param(minimum = 1, maximum = 1_000_000, example = 1)]
    pub page_index: u64,
    /// Number of elements per page
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub page_size: u64,
}

fn default_page_index() -> u64 {
    DEFAULT_PAGE_INDEX
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    pub fn new(page_index: u64, page_size: u64) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.page_number().saturating_mul(self.limit())
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Zero-based page number for SeaORM paginators
    pub fn page_number(&self) -> u64 {
        self.page_index.clamp(1, MAX_PAGE_INDEX) - 1
    }

    /// Number of pages needed to hold `total` elements
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit())
    }

    /// Page over an already materialized list
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit() as usize)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_INDEX, DEFAULT_PAGE_SIZE)
    }
}

/// One page of rows as returned by a repository, with the unpaged total
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }
}

/// Paged response wrapper
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(
    PagedRecipes = PagedResponse<RecipeWithInteractions>,
    PagedComments = PagedResponse<CommentResponse>
)]
pub struct PagedResponse<T> {
    pub elements: Vec<T>,
    pub page_index: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PagedResponse<T> {
    /// Create new paged response
    pub fn new(elements: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let total_pages = request.total_pages(total);
        Self {
            elements,
            page_index: request.page_index,
            total_pages,
            has_previous_page: request.page_index > 1,
            has_next_page: request.page_index < total_pages,
        }
    }

    /// Convert a repository page, mapping each row into its response shape
    pub fn from_page<U>(page: Page<U>, request: &PageRequest) -> Self
    where
        T: From<U>,
    {
        let elements = page.items.into_iter().map(T::from).collect();
        Self::new(elements, request, page.total)
    }
}

/// Paged response that also reports the total number of matches
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(
    CountedRecipes = CountedPagedResponse<RecipeWithInteractions>,
    CountedUsers = CountedPagedResponse<UserWithInteractions>
)]
pub struct CountedPagedResponse<T> {
    pub elements: Vec<T>,
    pub page_index: u64,
    pub total_pages: u64,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub results_count: u64,
}

impl<T> CountedPagedResponse<T> {
    pub fn new(elements: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let PagedResponse {
            elements,
            page_index,
            total_pages,
            has_previous_page,
            has_next_page,
        } = PagedResponse::new(elements, request, total);

        Self {
            elements,
            page_index,
            total_pages,
            has_previous_page,
            has_next_page,
            results_count: total,
        }
    }
}
