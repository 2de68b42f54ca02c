//! Currency amounts as printed on Vietnamese receipts: whole đồng, thousands
//! grouped with `.`, `,` or a space, optionally suffixed by a currency marker.

// Alternatives in priority order: currency-suffixed, grouped thousands, raw run of 4+ digits.
re!(re_amount,
    r"(?i)\b(?:\d{1,3}(?:[., ]\d{3})+|\d+) ?(?:vnđ|vnd|đ|₫)|\b\d{1,3}(?:[., ]\d{3})+\b|\b\d{4,}\b");
re!(re_currency_marker,
    r"(?i)vnđ|vnd|đ|₫");

/// Parse one amount-shaped substring into whole currency units.
///
/// Returns `None` unless what remains after dropping currency markers,
/// whitespace and grouping separators is a positive integer.
pub fn normalize_amount(raw: &str) -> Option<i64> {
    let stripped = re_currency_marker().replace_all(raw, "");
    let digits: String = stripped
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != ',')
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    (value > 0).then_some(value)
}

/// Every amount in `text` that normalizes, in order of appearance.
pub fn find_amounts(text: &str) -> Vec<i64> {
    re_amount()
        .find_iter(text)
        .filter_map(|m| normalize_amount(m.as_str()))
        .collect()
}

/// The largest amount in `text` lying within `[min, max]`.
pub fn max_amount_in(text: &str, min: i64, max: i64) -> Option<i64> {
    find_amounts(text)
        .into_iter()
        .filter(|v| (min..=max).contains(v))
        .max()
}
