use chrono::Month;

/// Parse a month given as a full English name ("March"), a three-letter
/// abbreviation ("mar") or a number ("3"). Case-insensitive.
pub fn parse_month(input: &str) -> Option<Month> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed
            .parse::<u8>()
            .ok()
            .and_then(|n| Month::try_from(n).ok());
    }

    trimmed.parse::<Month>().ok()
}

/// 1-indexed month number, as stored in the `sale_month` column.
pub fn month_number(month: Month) -> u32 {
    month.number_from_month()
}
