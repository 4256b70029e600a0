//! Cell-value coercion helpers.
//!
//! Spreadsheet exports hand us blank cells, pandas-style "nan" markers, and
//! numeric columns stringified with a trailing `.0`. Downstream consumers
//! depend on the exact fallback behavior here (blank/unparseable count → 0,
//! exactly one trailing `.0` stripped), so these are deliberate, not bugs.

/// Trimmed string; blank or the literal not-a-number export marker → `""`.
pub fn clean_string(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        ""
    } else {
        trimmed
    }
}

/// Like [`clean_string`], then strip a single trailing literal `.0` left by
/// numeric-typed phone columns.
pub fn clean_phone(value: &str) -> &str {
    let cleaned = clean_string(value);
    cleaned.strip_suffix(".0").unwrap_or(cleaned)
}

/// Volunteer head count: parse as float, truncate toward zero, clamp at 0.
/// Blank or unparseable input yields 0. Never fails.
pub fn coerce_volunteer_count(value: &str) -> u32 {
    let cleaned = clean_string(value);
    if cleaned.is_empty() {
        return 0;
    }
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 1.0 => n.trunc() as u32,
        _ => 0,
    }
}

/// Lowercase identifier-safe form of a display name: runs of
/// non-alphanumerics collapse to a single hyphen, no leading/trailing hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_string_trims() {
        assert_eq!(clean_string("  Ann  "), "Ann");
        assert_eq!(clean_string(""), "");
        assert_eq!(clean_string("   "), "");
    }

    #[test]
    fn clean_string_drops_nan_marker() {
        assert_eq!(clean_string("nan"), "");
        assert_eq!(clean_string("NaN"), "");
        assert_eq!(clean_string(" nan "), "");
        // Only the exact marker, not words containing it
        assert_eq!(clean_string("Nancy"), "Nancy");
    }

    #[test]
    fn clean_phone_strips_excel_float_artifact() {
        assert_eq!(clean_phone("5551234567.0"), "5551234567");
        assert_eq!(clean_phone("555-123-4567"), "555-123-4567");
        // Exactly one trailing .0
        assert_eq!(clean_phone("5551234567.0.0"), "5551234567.0");
        assert_eq!(clean_phone("nan"), "");
    }

    #[test]
    fn volunteer_count_truncates_floats() {
        assert_eq!(coerce_volunteer_count("12.0"), 12);
        assert_eq!(coerce_volunteer_count("12.9"), 12);
        assert_eq!(coerce_volunteer_count("40"), 40);
    }

    #[test]
    fn volunteer_count_defaults_to_zero() {
        assert_eq!(coerce_volunteer_count(""), 0);
        assert_eq!(coerce_volunteer_count("abc"), 0);
        assert_eq!(coerce_volunteer_count("nan"), 0);
        assert_eq!(coerce_volunteer_count("-5"), 0);
        assert_eq!(coerce_volunteer_count("0.5"), 0);
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("St. Mary's Food Bank!"), "st-mary-s-food-bank");
        assert_eq!(slugify("Food Bank"), "food-bank");
        assert_eq!(slugify("  --Park--  "), "park");
        assert_eq!(slugify(""), "");
    }
}
