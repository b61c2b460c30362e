//! Score rendering shared by text outputs.

/// Renders a score with at most two decimals and no trailing zeros.
///
/// ```
/// use fuzzmatch_report::format_score;
///
/// assert_eq!(format_score(100.0), "100");
/// assert_eq!(format_score(85.5), "85.5");
/// assert_eq!(format_score(72.25), "72.25");
/// ```
pub fn format_score(score: f64) -> String {
    let rendered = format!("{score:.2}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::format_score;

    #[test]
    fn drops_trailing_zeros() {
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(90.0), "90");
        assert_eq!(format_score(76.8), "76.8");
        assert_eq!(format_score(66.5), "66.5");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_score(88.123), "88.12");
        assert_eq!(format_score(99.999), "100");
    }
}
