//! Parsing of free-text command arguments.

/// Parses an id typed by the cashier or picked from autocomplete, tolerating a
/// leading `#`.
#[must_use]
pub fn parse_id(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    trimmed
        .strip_prefix('#')
        .unwrap_or(trimmed)
        .parse()
        .ok()
        .filter(|id: &i64| *id > 0)
}

/// Parses a list of ids separated by commas and/or whitespace.
///
/// Returns the first token that is not a valid id as the error.
pub fn parse_id_list(input: &str) -> Result<Vec<i64>, String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| parse_id(token).ok_or_else(|| token.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("41"), Some(41));
        assert_eq!(parse_id(" #41 "), Some(41));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("abc"), None);
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1, 2 3,,4"), Ok(vec![1, 2, 3, 4]));
        assert_eq!(parse_id_list("  "), Ok(vec![]));
        assert_eq!(parse_id_list("5, x7"), Err("x7".to_string()));
    }
}
