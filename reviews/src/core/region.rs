//! Region code extraction from free-text store addresses

/// Derive a two-letter region code from a store address.
///
/// Segments separated by commas are scanned from last to first, and the
/// tokens within a segment from left to right. The first token that is
/// exactly two uppercase ASCII letters wins. Any other two-letter uppercase
/// token (an initialism in a business name, say) is a false positive; that
/// is accepted behaviour.
pub fn extract_region(address: Option<&str>) -> Option<String> {
    let address = address?;

    address
        .rsplit(',')
        .flat_map(|segment| segment.split_whitespace())
        .find(|token| is_region_token(token))
        .map(str::to_string)
}

fn is_region_token(token: &str) -> bool {
    token.len() == 2 && token.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_full_address() {
        assert_eq!(extract_region(Some("123 Main St, Springfield, IL")), Some("IL".to_string()));
    }

    #[test]
    fn test_state_with_zip_code() {
        let address = "13749 US-183 Hwy, Austin, TX 78750, United States";
        assert_eq!(extract_region(Some(address)), Some("TX".to_string()));
    }

    #[test]
    fn test_no_state_token() {
        assert_eq!(extract_region(Some("123 Main St")), None);
        assert_eq!(extract_region(Some("")), None);
    }

    #[test]
    fn test_absent_address() {
        assert_eq!(extract_region(None), None);
    }

    #[test]
    fn test_lowercase_and_long_tokens_ignored() {
        assert_eq!(extract_region(Some("1 Elm St, Boston, ma")), None);
        assert_eq!(extract_region(Some("1 Elm St, Boston, MAS")), None);
    }

    #[test]
    fn test_later_segment_wins() {
        // "NY" sits in an earlier segment than "NJ"
        assert_eq!(extract_region(Some("NY Deli, 5 Rt 9, Newark, NJ")), Some("NJ".to_string()));
    }

    #[test]
    fn test_false_positive_is_preserved() {
        // Initialism in a plaza name is taken as the region
        assert_eq!(extract_region(Some("Unit 4, OK Corral Plaza")), Some("OK".to_string()));
    }

    #[test]
    fn test_first_matching_token_within_segment() {
        assert_eq!(extract_region(Some("Suite 1, AB CD")), Some("AB".to_string()));
    }
}
