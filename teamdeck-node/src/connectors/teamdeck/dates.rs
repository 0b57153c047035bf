/// Truncates a host date-time value to the date-only form the API expects.
///
/// Accepts an ISO instant (`2024-03-01T10:00:00Z`) or a space-separated
/// date-time (`2024-03-01 10:00:00`) and returns the part before the
/// separator. This is textual; no timezone conversion happens.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    let separator = if raw.contains('T') { 'T' } else { ' ' };
    raw.split(separator).next().unwrap_or(raw).to_string()
}
