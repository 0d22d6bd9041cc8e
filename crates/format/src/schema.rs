//! Key and section names of the persistence format.

pub const SECTION_JOB: &str = "Job";

pub const KEY_PAGE_COUNT: &str = "PageCount";
pub const KEY_TEST_PAGE: &str = "TestPage";

pub const KEY_LINK_COUNT: &str = "LinkCount";
pub const KEY_WIDTH: &str = "Width";
pub const KEY_HEIGHT: &str = "Height";

pub const KEY_URL: &str = "URL";
pub const KEY_TITLE: &str = "Title";
pub const KEY_PAGE: &str = "Page";
pub const KEY_OFFSET_X: &str = "OffsetX";
pub const KEY_OFFSET_Y: &str = "OffsetY";
pub const KEY_TEXT: &str = "Text";
pub const KEY_REPEAT: &str = "Repeat";
pub const KEY_LEFT: &str = "Left";
pub const KEY_RIGHT: &str = "Right";
pub const KEY_TOP: &str = "Top";
pub const KEY_BOTTOM: &str = "Bottom";

/// Section name for a 1-based page number.
pub fn page_section(page: u32) -> String {
    format!("Page {page}")
}

/// Per-link key name, e.g. `URL3`.
pub fn numbered(key: &str, num: u32) -> String {
    format!("{key}{num}")
}

/// Integer parsing with atoi semantics: optional leading whitespace and
/// sign, then as many digits as there are. Anything else yields 0, which
/// is the format's "absent/default" value for numeric fields.
pub fn lenient_int(value: &str) -> i32 {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let mut result: i64 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        result = result * 10 + i64::from(byte - b'0');
        if result > i64::from(u32::MAX) {
            break;
        }
    }
    if negative {
        result = -result;
    }
    result.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_int_plain() {
        assert_eq!(lenient_int("42"), 42);
        assert_eq!(lenient_int("-17"), -17);
        assert_eq!(lenient_int("+5"), 5);
        assert_eq!(lenient_int("  9"), 9);
    }

    #[test]
    fn test_lenient_int_garbage_is_zero() {
        assert_eq!(lenient_int(""), 0);
        assert_eq!(lenient_int("abc"), 0);
        assert_eq!(lenient_int("-"), 0);
    }

    #[test]
    fn test_lenient_int_stops_at_first_non_digit() {
        assert_eq!(lenient_int("12px"), 12);
        assert_eq!(lenient_int("3 4"), 3);
    }

    #[test]
    fn test_lenient_int_overflow_clamps() {
        assert_eq!(lenient_int("99999999999999999"), i32::MAX);
        assert_eq!(lenient_int("-99999999999999999"), i32::MIN);
    }
}
