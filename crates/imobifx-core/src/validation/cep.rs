/// Strip `-`, `.` and spaces; `Some(digits)` only when exactly 8 ASCII digits remain.
pub fn normalize_cep(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | ' '))
        .collect();

    (digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// `NNNNNNNN` to `NNNNN-NNN`.
///
/// Expects the output of [`normalize_cep`]; anything shorter than five
/// bytes is returned as is.
pub fn format_cep(digits: &str) -> String {
    match (digits.get(..5), digits.get(5..)) {
        (Some(head), Some(tail)) => format!("{}-{}", head, tail),
        _ => digits.to_string(),
    }
}

/// Canonical `NNNNN-NNN` form of any accepted spelling.
pub fn canonical_cep(raw: &str) -> Option<String> {
    normalize_cep(raw).map(|digits| format_cep(&digits))
}
