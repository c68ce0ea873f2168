use chrono::NaiveDate;

/// Run date as used in output file names, e.g. `04072025`
pub fn run_date_stamp(date: NaiveDate) -> String {
    date.format("%d%m%Y").to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Round to one decimal place on the exact binary value, exact halves to even.
/// Negative zero becomes `0.0`.
pub fn round_one_decimal(value: f64) -> f64 {
    let rounded = format!("{:.1}", value).parse::<f64>().unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
