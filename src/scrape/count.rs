use once_cell::sync::Lazy;
use regex::Regex;

static COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\d.]+)([km])?").expect("count pattern is valid"));

/// Converts a GitHub-style count string to an integer
///
/// Whitespace is trimmed, the text is lowercased and thousands separators
/// are removed. The first run of digits and dots, optionally followed by a
/// `k` or `m` suffix, is the value; the result is truncated toward zero.
/// Empty or unrecognizable text yields 0.
///
/// # Examples
///
/// ```
/// use repo_scout::scrape::parse_count;
///
/// assert_eq!(parse_count("1,234"), 1234);
/// assert_eq!(parse_count("2.3k"), 2300);
/// assert_eq!(parse_count("1M"), 1_000_000);
/// assert_eq!(parse_count(""), 0);
/// ```
pub fn parse_count(text: &str) -> u64 {
    let text = text.trim().to_lowercase().replace(',', "");
    if text.is_empty() {
        return 0;
    }

    let Some(caps) = COUNT.captures(&text) else {
        return 0;
    };

    let Ok(mut value) = caps[1].parse::<f64>() else {
        return 0;
    };

    match caps.get(2).map(|m| m.as_str()) {
        Some("k") => value *= 1_000.0,
        Some("m") => value *= 1_000_000.0,
        _ => {}
    }

    // Float-to-int `as` truncates toward zero and saturates
    value.trunc() as u64
}
