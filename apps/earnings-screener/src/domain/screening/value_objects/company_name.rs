//! Company name cleanup for display and search.

use std::sync::OnceLock;

use regex::Regex;

/// Strip listing boilerplate from a company description.
///
/// "Acme Corp Class A Common Stock" becomes "Acme Corp".
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
pub fn clean_company_name(name: &str) -> String {
    static SUFFIX_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = SUFFIX_REGEX.get_or_init(|| {
        Regex::new(r"\b(Common Stock|Registered Shares|Inc\b\.?|S\.A\.|Class [ABC12]\b.*)")
            .expect("company suffix regex is valid")
    });

    re.replace_all(name, "")
        .trim_matches(|c: char| c == ' ' || c == '-' || c == ',')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Apple Inc. - Common Stock", "Apple" ; "inc and common stock")]
    #[test_case("Alphabet Inc. Class A Common Stock", "Alphabet" ; "class suffix")]
    #[test_case("Spotify Technology S.A. Registered Shares", "Spotify Technology" ; "registered shares")]
    #[test_case("Netflix", "Netflix" ; "nothing to strip")]
    #[test_case("Incyte Corporation", "Incyte Corporation" ; "inc inside a word")]
    #[test_case("Classic Holdings Inc", "Classic Holdings" ; "class inside a word")]
    fn strips_suffixes(input: &str, expected: &str) {
        assert_eq!(clean_company_name(input), expected);
    }
}
