//! Receipt dates in the handful of layouts Vietnamese tills print, resolved to
//! a canonical `dd/mm/yyyy`.

re!(re_date_dmy_long,
    r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})\b");
re!(re_date_ymd,
    r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b");
re!(re_date_dmy_short,
    r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{2})\b");
re!(re_date_verbose,
    r"(?i)ngày\s*(\d{1,2})\s*tháng\s*(\d{1,2})\s*năm\s*(\d{2,4})");
re!(re_digit_run,
    r"\d+");

/// The date layouts, tried in this order by [`find_date`].
fn date_patterns() -> [&'static regex::Regex; 4] {
    [re_date_dmy_long(), re_date_ymd(), re_date_dmy_short(), re_date_verbose()]
}

/// Normalize a date-shaped substring to `dd/mm/yyyy`.
///
/// The three numeric groups are read in order. A first group above 31 can only
/// be a year, so the groups are taken as year/month/day; otherwise as
/// day/month/year. Two-digit years are placed in the 2000s.
pub fn normalize_date(raw: &str) -> Option<String> {
    let groups: Vec<&str> = match re_date_verbose().captures(raw) {
        Some(c) => vec![c.get(1)?.as_str(), c.get(2)?.as_str(), c.get(3)?.as_str()],
        None => re_digit_run().find_iter(raw).map(|m| m.as_str()).collect(),
    };
    let [first, second, third] = groups.as_slice() else {
        return None;
    };

    let first_num: u32 = first.parse().ok()?;
    let (day, month, year) = if first_num > 31 {
        (*third, *second, *first)
    } else {
        (*first, *second, *third)
    };

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year = match year.len() {
        2 => format!("20{year}"),
        4 => year.to_string(),
        _ => return None,
    };

    if day == 0 || day > 31 || month == 0 || month > 12 {
        return None;
    }
    Some(format!("{day:02}/{month:02}/{year}"))
}

/// First date in `text` that normalizes, trying each layout in priority order.
pub fn find_date(text: &str) -> Option<String> {
    date_patterns()
        .into_iter()
        .flat_map(|re| re.find_iter(text))
        .find_map(|m| normalize_date(m.as_str()))
}

/// `text` with every date-shaped substring blanked out, so that years and
/// day/month digits are not mistaken for amounts.
pub fn mask_dates(text: &str) -> String {
    date_patterns()
        .into_iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, " ").into_owned())
}
