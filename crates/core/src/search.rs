//! Helpers for listing and free-text search queries.
//!
//! Search terms are always passed to the database as bound parameters; the
//! helpers here only shape the parameter value.

use crate::error::CoreError;

/// Default page size for listing endpoints.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum page size for listing endpoints.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Check a raw search term before it is bound as a query parameter.
///
/// PostgreSQL `TEXT` cannot hold U+0000, so such a term is rejected rather
/// than sent to the database.
pub fn validate_term(term: Option<&str>) -> Result<(), CoreError> {
    match term {
        Some(t) if t.contains('\0') => Err(CoreError::Validation(
            "Search term must not contain null characters".into(),
        )),
        _ => Ok(()),
    }
}

/// Normalize an optional search term: trimmed, and `None` when blank.
pub fn normalize_term(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}

/// Build a `LIKE`/`ILIKE` "contains" pattern that matches `term` literally.
///
/// `\`, `%` and `_` are escaped with a backslash, the default `LIKE` escape
/// character in PostgreSQL.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 50, 200), 50);
    }

    #[test]
    fn clamp_limit_respects_bounds() {
        assert_eq!(clamp_limit(Some(500), 50, 200), 200);
        assert_eq!(clamp_limit(Some(0), 50, 200), 1);
        assert_eq!(clamp_limit(Some(-3), 50, 200), 1);
        assert_eq!(clamp_limit(Some(25), 50, 200), 25);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn blank_terms_are_dropped() {
        assert_eq!(normalize_term(None), None);
        assert_eq!(normalize_term(Some("   ")), None);
        assert_eq!(normalize_term(Some(" vpn ")), Some("vpn"));
    }

    #[test]
    fn null_character_in_term_is_rejected() {
        assert_matches!(validate_term(Some("a\0b")), Err(CoreError::Validation(_)));
        assert_matches!(validate_term(Some("vpn")), Ok(()));
        assert_matches!(validate_term(None), Ok(()));
    }

    #[test]
    fn pattern_wraps_plain_terms() {
        assert_eq!(contains_pattern("server"), "%server%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\tmp"), "%c:\\\\tmp%");
    }

    #[test]
    fn injection_text_stays_a_plain_value() {
        let pattern = contains_pattern("' OR 1=1 --");
        assert_eq!(pattern, "%' OR 1=1 --%");
    }
}
