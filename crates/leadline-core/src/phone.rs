//! Phone normalization for `tel:` links.

/// Normalize a free-text phone number for a click-to-call link.
///
/// - A number written with a leading `+` keeps only digits and `+`.
/// - Ten digits are treated as a US number and get `+1`.
/// - Eleven digits starting with `1` get `+`.
/// - Any other digit string passes through unchanged.
///
/// Returns an empty string when the input holds no digits.
pub fn click_to_call(phone: &str) -> String {
    let phone = phone.trim();
    if phone.starts_with('+') {
        return phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
    }

    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => format!("+1{digits}"),
        11 if digits.starts_with('1') => format!("+{digits}"),
        _ => digits,
    }
}
