#[cfg(test)]
mod tests {
    use ingredient_scaler::formatter::format_quantity;
    use ingredient_scaler::scaler::scale;
    use ingredient_scaler::scanner::{QuantityKind, QuantityScanner};

    fn scan_and_scale(text: &str, factor: f64) -> String {
        let scanner = QuantityScanner::new();
        let mut out = text.to_string();
        for token in scanner.scan(text) {
            let scaled = scale(token.value, factor).unwrap();
            let replacement = format_quantity(scaled, &token.matched_text);
            out.replace_range(token.start..token.end, &replacement);
        }
        out
    }

    #[test]
    fn test_range_scans_as_single_token() {
        let scanner = QuantityScanner::new();
        let tokens = scanner.scan("2-3 db");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].matched_text, "2-3");
        assert_eq!(tokens[0].kind, QuantityKind::Range);
    }

    #[test]
    fn test_fraction_token_value() {
        let scanner = QuantityScanner::new();
        let tokens = scanner.scan("1/2 kg liszt");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value, 0.5);
    }

    #[test]
    fn test_decimal_wins_over_range_on_overlap() {
        let scanner = QuantityScanner::new();
        let tokens = scanner.scan("2,5-3 dl");

        // the decimal claims "2,5"; the overlapping range reading is
        // discarded entirely, leaving the trailing "3" as a bare whole
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].matched_text, "2,5");
        assert_eq!(tokens[1].kind, QuantityKind::Decimal);
        assert_eq!(tokens[0].matched_text, "3");
        assert_eq!(tokens[0].kind, QuantityKind::Whole);
    }

    #[test]
    fn test_scaled_text_substitution_whole() {
        assert_eq!(scan_and_scale("- 2 kg liszt", 2.0), "- 4 kg liszt");
        assert_eq!(scan_and_scale("- 2 kg liszt", 1.0), "- 2 kg liszt");
    }

    #[test]
    fn test_scaled_text_substitution_range() {
        assert_eq!(scan_and_scale("2-3 db tojás", 2.0), "4-6 db tojás");
        assert_eq!(scan_and_scale("1–2 kg", 2.0), "2–4 kg");
    }

    #[test]
    fn test_scaled_text_substitution_fraction() {
        assert_eq!(scan_and_scale("1/2 kg liszt", 2.0), "1 kg liszt");
        assert_eq!(scan_and_scale("1/2 kg liszt", 1.5), "0.75 kg liszt");
        // third-derived values never land exactly on a snap entry and
        // format as plain one-decimal comma numbers
        assert_eq!(scan_and_scale("2/3 kg tejföl", 2.0), "1,3 kg tejföl");
    }

    #[test]
    fn test_scaled_text_substitution_decimal() {
        assert_eq!(scan_and_scale("12,5 dkg vaj", 2.0), "25 dkg vaj");
        assert_eq!(scan_and_scale("12,5 dkg vaj", 0.5), "6,3 dkg vaj");
    }

    #[test]
    fn test_multiple_quantities_in_one_unit() {
        assert_eq!(scan_and_scale("2-3 db, 1 kg", 2.0), "4-6 db, 2 kg");
    }

    #[test]
    fn test_text_without_quantities_is_untouched() {
        assert_eq!(scan_and_scale("só ízlés szerint", 2.0), "só ízlés szerint");
    }

    #[test]
    fn test_format_preserves_notation_class() {
        assert_eq!(format_quantity(1.0, "1/2"), "1");
        assert_eq!(format_quantity(0.75, "1/2"), "0.75");
        assert_eq!(format_quantity(4.0, "2-3"), "4-6");
        assert_eq!(format_quantity(2.5, "2"), "2,5");
    }

    #[test]
    fn test_zero_first_endpoint_range_never_divides() {
        // formatter must fall back to plain formatting, not divide by zero
        assert_eq!(format_quantity(2.0, "0-3"), "2");
    }

    #[test]
    fn test_scaler_rejects_non_positive_factor() {
        assert!(scale(2.0, 0.0).is_err());
        assert!(scale(2.0, -2.0).is_err());
        assert!(scale(2.0, 0.0001).is_ok());
    }
}
