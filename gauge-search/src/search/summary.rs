//! Human-readable result summaries.

/// Describe a result set.
///
/// `near` is the search term when results came from a location search; it
/// is shown upper-cased, as postcodes are written.
pub fn summarize(total: usize, displayed: usize, near: Option<&str>) -> String {
    let place = near
        .map(|term| format!(" near to {}", term.trim().to_uppercase()))
        .unwrap_or_default();

    let mut summary = match total {
        0 => return "No matches.".to_string(),
        1 => format!("Found one station{place}."),
        n => format!("Found {n} stations{place}."),
    };

    if displayed < total {
        summary.push_str(&format!(" Showing the first {displayed}."));
    }

    summary
}
