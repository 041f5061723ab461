//! Contact normalization for duplicate detection.

/// Minimum digits for a usable phone number.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Keeps the digits of a phone number; `None` when there are none.
///
/// A leading international `00` is dropped so `0092...` and `+92...` agree.
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.strip_prefix("00").map_or(digits.clone(), str::to_string);
    (!digits.is_empty()).then_some(digits)
}

/// Trims and lowercases an email; `None` when blank.
#[must_use]
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    (!email.is_empty()).then_some(email)
}

/// Returns true for `local@domain.tld` shaped addresses.
#[must_use]
pub fn is_well_formed_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+92 300 1234567", Some("923001234567"))]
    #[case("0092-300-1234567", Some("923001234567"))]
    #[case("(0300) 123-4567", Some("03001234567"))]
    #[case("  ", None)]
    fn test_normalize_phone(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_phone(raw).as_deref(), expected);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Ali.Khan@Example.COM ").as_deref(),
            Some("ali.khan@example.com")
        );
        assert_eq!(normalize_email(" "), None);
    }

    #[rstest]
    #[case("ali@example.com", true)]
    #[case("ali@mail.example.pk", true)]
    #[case("ali@example", false)]
    #[case("@example.com", false)]
    #[case("ali@@example.com", false)]
    #[case("ali khan@example.com", false)]
    #[case("ali@.com", false)]
    fn test_is_well_formed_email(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(is_well_formed_email(email), ok);
    }
}
