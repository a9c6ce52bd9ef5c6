use clap::ValueEnum;
use log::debug;
use regex::RegexBuilder;
use strum::{Display, EnumIter, EnumString};

/// How a query string is compared against a field value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum MatchMode {
    /// Value equals the query
    Exact,
    /// Query is a substring of the value
    #[default]
    Contains,
    /// Value starts with the query
    Prefix,
    /// Value ends with the query
    Suffix,
    /// Query is compiled as a regular expression
    Regex,
    /// Query characters appear in the value in order, gaps allowed
    Fuzzy,
}

/// Decide whether `value` matches `query` under the given mode.
///
/// An invalid regex pattern matches nothing rather than failing the call:
/// queries come from interactive input and a typo must not abort a batch
/// search. Fuzzy matching is always case-insensitive, mirroring the
/// subsequence test most users expect from that name.
#[must_use]
pub fn matches(value: &str, query: &str, mode: MatchMode, case_sensitive: bool) -> bool {
    match mode {
        MatchMode::Regex => regex_matches(value, query, case_sensitive),
        MatchMode::Fuzzy => subsequence_matches(value, query),
        MatchMode::Exact | MatchMode::Contains | MatchMode::Prefix | MatchMode::Suffix => {
            if case_sensitive {
                plain_matches(value, query, mode)
            } else {
                plain_matches(&value.to_lowercase(), &query.to_lowercase(), mode)
            }
        }
    }
}

fn plain_matches(value: &str, query: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => value == query,
        MatchMode::Contains => value.contains(query),
        MatchMode::Prefix => value.starts_with(query),
        MatchMode::Suffix => value.ends_with(query),
        MatchMode::Regex | MatchMode::Fuzzy => unreachable!("handled by the caller"),
    }
}

fn regex_matches(value: &str, query: &str, case_sensitive: bool) -> bool {
    match RegexBuilder::new(query).case_insensitive(!case_sensitive).build() {
        Ok(re) => re.is_match(value),
        Err(e) => {
            debug!("treating invalid pattern '{query}' as matching nothing: {e}");
            false
        }
    }
}

/// Classic subsequence test: every query character appears in the value in
/// the same relative order. The empty query matches everything.
fn subsequence_matches(value: &str, query: &str) -> bool {
    let mut pattern = query.chars().flat_map(char::to_lowercase);
    let mut next = pattern.next();

    for ch in value.chars().flat_map(char::to_lowercase) {
        match next {
            None => return true,
            Some(p) if p == ch => next = pattern.next(),
            Some(_) => {}
        }
    }

    next.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_requires_equality() {
        assert!(matches("Tokio", "tokio", MatchMode::Exact, false));
        assert!(!matches("Tokio", "tokio", MatchMode::Exact, true));
        assert!(!matches("tokio-util", "tokio", MatchMode::Exact, false));
    }

    #[test]
    fn empty_query_contains_everything_but_exact_does_not() {
        assert!(matches("anything", "", MatchMode::Contains, false));
        assert!(!matches("anything", "", MatchMode::Exact, false));
        assert!(matches("", "", MatchMode::Exact, false));
    }

    #[test]
    fn prefix_and_suffix() {
        assert!(matches("serde_json", "serde", MatchMode::Prefix, false));
        assert!(!matches("serde_json", "json", MatchMode::Prefix, false));
        assert!(matches("serde_json", "json", MatchMode::Suffix, false));
        assert!(matches("Serde_JSON", "json", MatchMode::Suffix, false));
    }

    #[test]
    fn regex_mode_matches_patterns() {
        assert!(matches("bug-fix #42", r"#\d+", MatchMode::Regex, false));
        assert!(matches("Feature", "^feat", MatchMode::Regex, false));
        assert!(!matches("Feature", "^feat", MatchMode::Regex, true));
    }

    #[test]
    fn invalid_regex_matches_nothing() {
        assert!(!matches("anything", "(", MatchMode::Regex, false));
        assert!(!matches("(", "(", MatchMode::Regex, true));
    }

    #[test]
    fn fuzzy_is_an_ordered_subsequence() {
        assert!(matches("documentation", "dcmt", MatchMode::Fuzzy, false));
        assert!(!matches("documentation", "tmcd", MatchMode::Fuzzy, false));
        assert!(matches("anything", "", MatchMode::Fuzzy, false));
    }

    #[test]
    fn fuzzy_ignores_case_even_when_sensitive() {
        assert!(matches("BugFix", "bgf", MatchMode::Fuzzy, true));
    }

    #[test]
    fn fuzzy_is_reflexive() {
        for value in ["alice", "Alice Smith", "räksmörgås"] {
            assert!(matches(value, value, MatchMode::Fuzzy, true));
            assert!(matches(value, value, MatchMode::Fuzzy, false));
        }
    }

    #[test]
    fn default_mode_is_contains() {
        assert_eq!(MatchMode::default(), MatchMode::Contains);
    }
}
