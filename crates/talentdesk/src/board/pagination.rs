use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

/// Page selection as it arrives on the query string. Pages are 1-based.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl PageRequest {
    /// Builds a request from loose query parameters, falling back to the
    /// first page of ten when either value is absent.
    pub fn from_query(page: Option<usize>, page_size: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            page_size: page_size.unwrap_or_else(default_page_size),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Envelope returned by every paginated collection endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: usize,
    pub total_pages: usize,
    pub results: Vec<T>,
}

/// Slices an already-filtered, already-ordered collection. Page sizes are
/// clamped to [1, 100] and out-of-range page numbers land on the nearest
/// valid page rather than erroring.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let page_size = request.page_size.clamp(1, MAX_PAGE_SIZE);
    let count = items.len();
    let total_pages = count.div_ceil(page_size).max(1);
    let page = request.page.clamp(1, total_pages);

    let results = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        count,
        total_pages,
        results,
    }
}
