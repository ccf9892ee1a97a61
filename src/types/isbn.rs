/// Whether `query` plausibly encodes an ISBN.
///
/// Separators are ignored. What is left has to be digits, except for a
/// trailing `X` check digit, and 9 (ISBN-10 missing its leading zero), 10 or
/// 13 characters long.
pub fn maybe_isbn(query: &str) -> bool {
    let isbn = query
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>();
    let digits = isbn.trim_end_matches(['X', 'x']);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(isbn.chars().count(), 9 | 10 | 13)
}

/// Trims and upper-cases `query` (an `x` check digit is stored as `X`), then
/// left-pads it with zeros to ten characters.
pub fn normalize_isbn(query: &str) -> String {
    let isbn = query.trim().to_uppercase();
    let missing = 10_usize.saturating_sub(isbn.chars().count());
    "0".repeat(missing) + &isbn
}

/// Whether `query` is an ISBN with a correct check digit.
pub fn has_valid_check_digit(query: &str) -> bool {
    query.trim().parse::<isbn2::Isbn>().is_ok()
}
