//! Guardian phone normalization for the messaging gateway.

/// Normalize a guardian phone for delivery.
///
/// Strips every non-digit character. A result of 11 digits or fewer is
/// treated as a local-format Brazilian mobile number and gets the "55"
/// country code prepended; anything longer passes through unchanged.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() <= 11 {
        format!("55{}", digits)
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_number_gets_country_code() {
        assert_eq!(normalize_phone("11988543533"), "5511988543533");
    }

    #[test]
    fn test_full_number_is_identity() {
        assert_eq!(normalize_phone("5511988543533"), "5511988543533");
    }

    #[test]
    fn test_punctuation_is_stripped() {
        assert_eq!(normalize_phone("(11) 98854-3533"), "5511988543533");
        assert_eq!(normalize_phone("+55 11 98854-3533"), "5511988543533");
    }

    #[test]
    fn test_short_number_still_gets_prefix() {
        assert_eq!(normalize_phone("988543533"), "55988543533");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_phone(""), "55");
    }
}
