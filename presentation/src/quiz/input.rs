//! Parsing of typed answers.

/// Map a typed answer to a zero-based choice index.
///
/// Accepts the choice letter (`b`, `B`, `B)`) or its 1-based number (`2`).
/// Returns `None` for anything else, including `0`.
pub fn parse_choice(input: &str) -> Option<usize> {
    let token = input.trim().trim_end_matches([')', '.']);

    if let Ok(number) = token.parse::<usize>() {
        return number.checked_sub(1);
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
        }
        _ => None,
    }
}
