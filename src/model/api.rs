use serde::{Deserialize, Serialize};

/// The response body when an API request fails
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDto {
    /// The error message
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

/// Single-item responses are wrapped in a `data` field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Raw list response as returned by the API.
///
/// Scoped lists (services of one game) omit the pagination block entirely, and some
/// endpoints omit `totalPages`, so both are optional here and normalized by [`ListResponse::into_page`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<PaginationDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    #[serde(alias = "currentPage")]
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Normalized pagination information for a fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl From<PaginationDto> for Pagination {
    fn from(dto: PaginationDto) -> Self {
        let total_pages = dto.total_pages.unwrap_or_else(|| {
            if dto.limit == 0 {
                0
            } else {
                dto.total_items.div_ceil(u64::from(dto.limit)) as u32
            }
        });

        Self {
            page: dto.page,
            limit: dto.limit,
            total_items: dto.total_items,
            total_pages,
        }
    }
}

/// One page of resources together with its pagination
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// An empty first page, used when a scoped list has nothing to show
    pub fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination {
                page: 1,
                limit,
                total_items: 0,
                total_pages: 0,
            },
        }
    }
}

impl<T> ListResponse<T> {
    /// Convert the raw response into a [`Page`].
    ///
    /// When the response has no pagination block, every returned item is treated as
    /// belonging to a single page.
    pub fn into_page(self) -> Page<T> {
        let pagination = match self.pagination {
            Some(dto) => Pagination::from(dto),
            None => {
                let count = self.data.len();
                Pagination {
                    page: 1,
                    limit: count as u32,
                    total_items: count as u64,
                    total_pages: u32::from(count > 0),
                }
            }
        };

        Page {
            items: self.data,
            pagination,
        }
    }
}

/// Query parameters for paginated list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListParams {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Free-text search, only sent to endpoints that support it
    pub search: Option<String>,
}

impl ListParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Search term with blank input normalized to an empty string
    pub fn search_term(&self) -> &str {
        self.search.as_deref().map(str::trim).unwrap_or("")
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// Result of a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub success: bool,
}
