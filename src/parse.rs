//! Pure text parsing for values read off a product page.

/// Brands whose first heading token is a truncation of the full name.
/// "New" is the only verified case; other multi-word brands are deliberately
/// left alone until a truncated heading is actually observed for them.
const BRAND_CORRECTIONS: &[(&str, &str)] = &[("New", "New Balance")];

/// First whitespace token of the heading, passed through the correction table.
pub fn brand_from_heading(heading: &str) -> String {
    let first = heading.split_whitespace().next().unwrap_or_default();
    for (token, full) in BRAND_CORRECTIONS {
        if first == *token {
            return (*full).to_owned();
        }
    }
    first.to_owned()
}

/// Full heading text with embedded newlines replaced by spaces.
pub fn category_from_heading(heading: &str) -> String {
    heading.replace('\r', "").replace('\n', " ").trim().to_owned()
}

/// Compound label with a leading unit token, e.g. `UK 9.5` -> `9.5`.
pub fn parse_prefixed_size_label(label: &str) -> Option<String> {
    let mut tokens = label.split_whitespace();
    let prefix = tokens.next()?;
    if !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let rest = tokens.collect::<Vec<_>>().join(" ");
    if rest.is_empty() { None } else { Some(rest) }
}

/// Label taken as-is; `None` only for an empty label (end of the grid).
pub fn parse_plain_size_label(label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Prefixed shape first, plain shape as the silent fallback.
pub fn parse_size_label(label: &str) -> Option<String> {
    parse_prefixed_size_label(label).or_else(|| parse_plain_size_label(label))
}

/// Drop a leading currency symbol, keep the amount as text.
pub fn strip_currency(text: &str) -> String {
    text.trim()
        .trim_start_matches(['$', '£', '€', '¥'])
        .trim_start()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_is_first_heading_token() {
        assert_eq!(brand_from_heading("Nike Dunk Low Retro"), "Nike");
        assert_eq!(brand_from_heading("Jordan 1 Retro High OG"), "Jordan");
    }

    #[test]
    fn brand_correction_restores_new_balance() {
        assert_eq!(brand_from_heading("New Balance 990v6 Grey"), "New Balance");
    }

    #[test]
    fn brand_of_empty_heading_is_empty() {
        assert_eq!(brand_from_heading(""), "");
    }

    #[test]
    fn category_replaces_newlines_with_spaces() {
        assert_eq!(
            category_from_heading("Nike Dunk Low\nRetro White Black"),
            "Nike Dunk Low Retro White Black"
        );
        assert_eq!(
            category_from_heading("Jordan 1\r\nRetro High"),
            "Jordan 1 Retro High"
        );
    }

    #[test]
    fn prefixed_label_strips_leading_unit_token() {
        assert_eq!(parse_prefixed_size_label("UK 9.5").as_deref(), Some("9.5"));
        assert_eq!(
            parse_prefixed_size_label("UK 9.5 W").as_deref(),
            Some("9.5 W")
        );
    }

    #[test]
    fn prefixed_label_rejects_numeric_first_token() {
        assert_eq!(parse_prefixed_size_label("9.5"), None);
        assert_eq!(parse_prefixed_size_label("UK"), None);
    }

    #[test]
    fn plain_label_keeps_text_unprocessed() {
        assert_eq!(parse_plain_size_label("9.5").as_deref(), Some("9.5"));
        assert_eq!(parse_plain_size_label("  "), None);
    }

    #[test]
    fn size_label_falls_back_to_plain_shape() {
        assert_eq!(parse_size_label("UK 9.5").as_deref(), Some("9.5"));
        assert_eq!(parse_size_label("9.5").as_deref(), Some("9.5"));
        assert_eq!(parse_size_label(""), None);
    }

    #[test]
    fn strip_currency_drops_leading_symbol() {
        assert_eq!(strip_currency("$240"), "240");
        assert_eq!(strip_currency("£ 185"), "185");
        assert_eq!(strip_currency("162"), "162");
    }
}
