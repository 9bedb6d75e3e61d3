//! Go-style struct tag parsing (§4.1, §B.2): a tag string is a space
//! separated sequence of `key:"v1,v2"` pairs; values are compared literally,
//! never as regex.

/// One configured (key, value) pair that makes a tagged field a source,
/// e.g. `{key: "pii", val: "true"}` matching a tag `pii:"true"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTagRule {
    pub key: String,
    pub val: String,
}

/// Always active, regardless of configuration: a tag carrying
/// `levee:"source"` is always a source field.
const BUILTIN_KEY: &str = "levee";
const BUILTIN_VAL: &str = "source";

/// Parses a raw struct tag string into `(key, values)` pairs. Unparseable
/// fragments are skipped rather than treated as fatal — a malformed tag on
/// an unrelated field should not abort analysis.
pub fn parse_tag(tag: &str) -> Vec<(String, Vec<String>)> {
    let mut pairs = Vec::new();
    for token in tag.split_whitespace() {
        let Some((key, rest)) = token.split_once(':') else {
            continue;
        };
        let Some(quoted) = rest.strip_prefix('"').and_then(|r| r.strip_suffix('"')) else {
            continue;
        };
        let values = quoted.split(',').map(|v| v.to_string()).collect();
        pairs.push((key.to_string(), values));
    }
    pairs
}

/// True if `tag`, parsed as a struct tag, contains the key/value pair of
/// any configured rule, or the built-in `levee:"source"` pair.
pub fn tag_matches(tag: &str, rules: &[FieldTagRule]) -> bool {
    let parsed = parse_tag(tag);
    parsed.iter().any(|(key, values)| {
        (key == BUILTIN_KEY && values.iter().any(|v| v == BUILTIN_VAL))
            || rules
                .iter()
                .any(|rule| key == &rule.key && values.iter().any(|v| v == &rule.val))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_pair() {
        let parsed = parse_tag(r#"json:"name""#);
        assert_eq!(parsed, vec![("json".to_string(), vec!["name".to_string()])]);
    }

    #[test]
    fn parses_multiple_comma_values() {
        let parsed = parse_tag(r#"levee:"source,extra""#);
        assert_eq!(
            parsed,
            vec![("levee".to_string(), vec!["source".to_string(), "extra".to_string()])]
        );
    }

    #[test]
    fn parses_multiple_space_separated_pairs() {
        let parsed = parse_tag(r#"json:"name" levee:"source""#);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn builtin_levee_source_always_matches() {
        assert!(tag_matches(r#"levee:"source""#, &[]));
        assert!(!tag_matches(r#"levee:"other""#, &[]));
    }

    #[test]
    fn configured_rule_matches_alongside_builtin() {
        let rules = vec![FieldTagRule {
            key: "pii".to_string(),
            val: "true".to_string(),
        }];
        assert!(tag_matches(r#"pii:"true""#, &rules));
        assert!(!tag_matches(r#"pii:"false""#, &rules));
    }
}
