//! Result code display formatting.

use std::fmt::Display;

/// Returned by [`pretty_code`] for anything that is not 6 characters long.
pub const INVALID_CODE: &str = "Invalid Code";

const CODE_LEN: usize = 6;
const GROUP_LEN: usize = 3;

/// Format a 6-character code as `"XXX XXX"`.
///
/// Numbers are rendered to text first. Any other length yields
/// [`INVALID_CODE`]; callers compare against it to detect bad input.
///
/// ```
/// use dynamics_results::{pretty_code, INVALID_CODE};
///
/// assert_eq!(pretty_code("123456"), "123 456");
/// assert_eq!(pretty_code(123456), "123 456");
/// assert_eq!(pretty_code("12345"), INVALID_CODE);
/// ```
pub fn pretty_code(code: impl Display) -> String {
    let text = code.to_string();
    if text.chars().count() != CODE_LEN {
        return INVALID_CODE.to_string();
    }

    let head: String = text.chars().take(GROUP_LEN).collect();
    let tail: String = text.chars().skip(GROUP_LEN).collect();
    format!("{} {}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_code_text() {
        assert_eq!(pretty_code("123456"), "123 456");
        assert_eq!(pretty_code("abcDEF"), "abc DEF");
    }

    #[test]
    fn test_pretty_code_numeric() {
        assert_eq!(pretty_code(123456), "123 456");
        assert_eq!(pretty_code(123456u64), "123 456");
    }

    #[test]
    fn test_pretty_code_wrong_length() {
        assert_eq!(pretty_code("12345"), INVALID_CODE);
        assert_eq!(pretty_code("1234567"), INVALID_CODE);
        assert_eq!(pretty_code(""), INVALID_CODE);
        // leading zeros are lost once the code is a number
        assert_eq!(pretty_code(12345), INVALID_CODE);
    }

    #[test]
    fn test_pretty_code_counts_characters_not_bytes() {
        assert_eq!(pretty_code("äbcdéf"), "äbc déf");
    }
}
