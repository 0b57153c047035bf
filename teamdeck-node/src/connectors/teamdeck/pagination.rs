//! Paged listing aggregator.
//!
//! Walks a listing endpoint page by page (`page`, `per_page=100`) and
//! concatenates the records. Pages are fetched strictly in sequence: whether
//! another page exists is only known from the previous response's
//! `x-pagination-page-count` header.
//!
//! Stop conditions, checked after each page is appended:
//! 1. the limit is reached (the last page may overshoot; it is truncated)
//! 2. the header reports no further page (missing/invalid header = 1 page)
//! 3. the page came back empty although the header reports more
//! 4. [`MAX_PAGES`] pages were fetched

use serde_json::Value;
use teamdeck::{ApiRequest, ApiResponse, RequestHelper, TeamdeckError};
use tracing::{debug, warn};

use super::config::{MAX_PAGES, PAGE_COUNT_HEADER, PER_PAGE};
use super::resource::Limit;
use super::transformer::{page_records, Page};

/// Fetches every page of `endpoint` (filtered by `filters`) until the limit
/// or the last page is reached.
///
/// Any failed page aborts the whole call; the error is wrapped with the
/// endpoint and page number.
pub async fn fetch_all(
    helper: &dyn RequestHelper,
    endpoint: &str,
    filters: &[(String, String)],
    limit: Limit,
) -> Result<Vec<Value>, TeamdeckError> {
    let mut results: Vec<Value> = Vec::new();
    let mut page = 1usize;

    loop {
        let mut query = filters.to_vec();
        query.push(("page".to_string(), page.to_string()));
        query.push(("per_page".to_string(), PER_PAGE.to_string()));

        let response = helper
            .request(ApiRequest::get(endpoint).with_query(query))
            .await
            .map_err(|e| e.with_context(format!("Failed to fetch {} page {}", endpoint, page)))?;

        let total_pages = page_count(&response);
        let has_more = page < total_pages;

        let (received, single) = match page_records(response.body) {
            Page::Records(records) => {
                let received = records.len();
                results.extend(records);
                (received, false)
            }
            Page::Single(record) => {
                results.push(record);
                (1, true)
            }
        };
        debug!(endpoint, page, received, total_pages, "Fetched page");

        if let Limit::AtMost(max) = limit {
            if results.len() >= max {
                results.truncate(max);
                break;
            }
        }
        if !has_more || single {
            break;
        }
        if received == 0 {
            warn!(
                endpoint,
                page, total_pages, "Empty page while more pages were reported; stopping"
            );
            break;
        }
        if page >= MAX_PAGES {
            warn!(endpoint, page, total_pages, "Page limit reached; stopping");
            break;
        }
        page += 1;
    }

    Ok(results)
}

/// Total page count from the response header; 1 when absent or invalid.
fn page_count(response: &ApiResponse) -> usize {
    response
        .header(PAGE_COUNT_HEADER)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(1)
}
