pub use teamdeck::config::DEFAULT_BASE_URL as BASE_URL;

/// Parameter schema version. Bump when a parameter or option is renamed.
pub const SCHEMA_VERSION: u32 = 1;

/// Records requested per page; the API maximum.
pub const PER_PAGE: usize = 100;

/// Safety bound on pages fetched by one listing call.
pub const MAX_PAGES: usize = 100;

/// Response header carrying the total number of pages.
pub const PAGE_COUNT_HEADER: &str = "x-pagination-page-count";

/// Default `limit` when `returnAll` is off.
pub const DEFAULT_LIMIT: usize = 50;

/// Default duration of a new time entry (minutes).
pub const DEFAULT_MINUTES: i64 = 60;

/// Default allocation of a new booking.
pub const DEFAULT_TIME_FRACTION: f64 = 1.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(BASE_URL, "https://api.teamdeck.io/v1");
        assert_eq!(PER_PAGE, 100);
        assert_eq!(MAX_PAGES, 100);
        assert_eq!(PAGE_COUNT_HEADER, "x-pagination-page-count");
        assert_eq!(DEFAULT_LIMIT, 50);
    }
}
