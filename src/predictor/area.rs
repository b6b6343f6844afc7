use log::warn;

/// Number of Marla in one Kanal.
pub const MARLA_PER_KANAL: f32 = 20.0;

/// Parses a free-form area string into a numeric Marla value.
///
/// Accepts the formats the listing data uses: `"5 Marla"`, `"1 Kanal"`, or a
/// bare number (already in Marla). The `Kanal` token takes priority when both
/// unit tokens are present. Text that cannot be parsed yields `0.0` rather
/// than an error; the substitution is logged so it can be spotted in traces.
///
/// # Arguments
/// * `text` - The raw area text as entered by the user
///
/// # Example
/// ```
/// use makaan::parse_area;
///
/// assert_eq!(parse_area("1 Kanal"), 20.0);
/// assert_eq!(parse_area("5 Marla"), 5.0);
/// assert_eq!(parse_area("7"), 7.0);
/// assert_eq!(parse_area("abc"), 0.0);
/// ```
pub fn parse_area(text: &str) -> f32 {
    let text = text.trim();
    if text.contains("Kanal") {
        parse_number(&text.replace("Kanal", "")) * MARLA_PER_KANAL
    } else if text.contains("Marla") {
        parse_number(&text.replace("Marla", ""))
    } else {
        parse_number(text)
    }
}

fn parse_number(text: &str) -> f32 {
    let trimmed = text.trim();
    match trimmed.parse::<f32>() {
        Ok(value) => value,
        Err(_) => {
            warn!("Unparseable area text {:?}, substituting 0", trimmed);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kanal_converts_to_marla() {
        assert_eq!(parse_area("1 Kanal"), 20.0);
        assert_eq!(parse_area("2 Kanal"), 40.0);
        assert_eq!(parse_area("2.5 Kanal"), 50.0);
    }

    #[test]
    fn test_marla_passes_through() {
        assert_eq!(parse_area("5 Marla"), 5.0);
        assert_eq!(parse_area("12.5 Marla"), 12.5);
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(parse_area("7"), 7.0);
        assert_eq!(parse_area("3.25"), 3.25);
        assert_eq!(parse_area("  10  "), 10.0);
    }

    #[test]
    fn test_unit_token_without_spacing() {
        assert_eq!(parse_area("1Kanal"), 20.0);
        assert_eq!(parse_area("5Marla"), 5.0);
    }

    #[test]
    fn test_garbage_falls_back_to_zero() {
        assert_eq!(parse_area("abc"), 0.0);
        assert_eq!(parse_area(""), 0.0);
        assert_eq!(parse_area("   "), 0.0);
        assert_eq!(parse_area("xyz Kanal"), 0.0);
        assert_eq!(parse_area("-- Marla"), 0.0);
    }

    #[test]
    fn test_kanal_branch_wins_over_marla() {
        // Both tokens present: the Kanal branch strips only "Kanal", the
        // leftover "Marla" defeats the number parse, so this lands on 0.
        assert_eq!(parse_area("10 Kanal Marla"), 0.0);
    }

    #[test]
    fn test_negative_and_scientific_forms() {
        assert_eq!(parse_area("-5"), -5.0);
        assert_eq!(parse_area("1e1 Marla"), 10.0);
    }
}
