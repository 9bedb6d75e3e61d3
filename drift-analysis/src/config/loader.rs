//! TOML loading for `Configuration` (§A.3). The wire surface named in §6 is
//! YAML/JSON at a driver's discretion; this crate only ever consumes TOML,
//! matching the `drift-core`/`drift-analysis` convention elsewhere in this
//! repository.

use drift_core::errors::ConfigError;
use regex::Regex;
use serde::Deserialize;

use super::{Configuration, FieldTagRule, FuncMatcher, Rule, TypeMatcher};

#[derive(Debug, Default, Deserialize)]
struct RawTypeMatcher {
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    package_re: Option<String>,
    #[serde(default, rename = "type")]
    ty: Option<String>,
    #[serde(default)]
    type_re: Option<String>,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    field_re: Option<String>,
    #[serde(default)]
    exclude: Vec<RawTypeMatcher>,
}

impl RawTypeMatcher {
    fn compile(self) -> Result<TypeMatcher, ConfigError> {
        Ok(TypeMatcher {
            package: compile_axis(self.package, self.package_re, "Sources", "Package")?,
            ty: compile_axis(self.ty, self.type_re, "Sources", "Type")?,
            field: compile_axis(self.field, self.field_re, "Sources", "Field")?,
            exclude: self
                .exclude
                .into_iter()
                .map(RawTypeMatcher::compile)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFuncMatcher {
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    package_re: Option<String>,
    #[serde(default)]
    receiver: Option<String>,
    #[serde(default)]
    receiver_re: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    method_re: Option<String>,
    #[serde(default)]
    exclude: Vec<RawFuncMatcher>,
}

impl RawFuncMatcher {
    fn compile(self, rule_name: &'static str) -> Result<FuncMatcher, ConfigError> {
        Ok(FuncMatcher {
            package: compile_axis(self.package, self.package_re, rule_name, "Package")?,
            receiver: compile_axis(self.receiver, self.receiver_re, rule_name, "Receiver")?,
            method: compile_axis(self.method, self.method_re, rule_name, "Method")?,
            exclude: self
                .exclude
                .into_iter()
                .map(|m| m.compile(rule_name))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFieldTag {
    key: String,
    val: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfiguration {
    #[serde(default)]
    sources: Vec<RawTypeMatcher>,
    #[serde(default)]
    sinks: Vec<RawFuncMatcher>,
    #[serde(default)]
    sanitizers: Vec<RawFuncMatcher>,
    #[serde(default)]
    exclude: Vec<RawFuncMatcher>,
    #[serde(default)]
    field_tags: Vec<RawFieldTag>,
    #[serde(default)]
    allow_panic_on_tainted_values: bool,
    #[serde(default)]
    report_message: Option<String>,
    #[serde(default)]
    skip_test_packages: Option<bool>,
    #[serde(default)]
    test_package_markers: Option<Vec<String>>,
}

/// §4.1: a rule may not set both literal and regex on the same axis. A
/// rule with neither set is `Rule::Any`, a vacuous match.
fn compile_axis(
    literal: Option<String>,
    regex: Option<String>,
    rule_name: &'static str,
    axis: &'static str,
) -> Result<Rule, ConfigError> {
    match (literal, regex) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingAxisRule { rule: rule_name, axis }),
        (Some(lit), None) => Ok(Rule::Literal(lit)),
        (None, Some(pattern)) => Regex::new(&pattern)
            .map(Rule::Regex)
            .map_err(|source| ConfigError::InvalidRegex { pattern, source }),
        (None, None) => Ok(Rule::Any),
    }
}

impl Configuration {
    pub fn from_str_toml(text: &str) -> Result<Configuration, ConfigError> {
        let raw: RawConfiguration = toml::from_str(text)?;

        let defaults = Configuration::default();

        Ok(Configuration {
            sources: raw
                .sources
                .into_iter()
                .map(RawTypeMatcher::compile)
                .collect::<Result<Vec<_>, _>>()?,
            sinks: raw
                .sinks
                .into_iter()
                .map(|m| m.compile("Sinks"))
                .collect::<Result<Vec<_>, _>>()?,
            sanitizers: raw
                .sanitizers
                .into_iter()
                .map(|m| m.compile("Sanitizers"))
                .collect::<Result<Vec<_>, _>>()?,
            exclude: raw
                .exclude
                .into_iter()
                .map(|m| m.compile("Exclude"))
                .collect::<Result<Vec<_>, _>>()?,
            field_tags: raw
                .field_tags
                .into_iter()
                .map(|t| FieldTagRule { key: t.key, val: t.val })
                .collect(),
            allow_panic_on_tainted_values: raw.allow_panic_on_tainted_values,
            report_message: raw.report_message,
            skip_test_packages: raw.skip_test_packages.unwrap_or(defaults.skip_test_packages),
            test_package_markers: raw.test_package_markers.unwrap_or(defaults.test_package_markers),
        })
    }

    pub fn from_toml_file(path: &std::path::Path) -> Result<Configuration, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        Configuration::from_str_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_minimal_configuration() {
        let toml = r#"
            [[sources]]
            package = "core"
            type = "Source"

            [[sinks]]
            package = "core"
            method = "Sink"
        "#;
        let config = Configuration::from_str_toml(toml).unwrap();
        assert!(config.is_source_type("core", "Source"));
        assert!(config.is_sink("core", "", "Sink"));
    }

    #[test]
    fn rejects_conflicting_axis() {
        let toml = r#"
            [[sources]]
            package = "core"
            type = "Source"
            type_re = "^Source$"
        "#;
        let err = Configuration::from_str_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingAxisRule { .. }));
    }

    #[test]
    fn rejects_invalid_regex() {
        let toml = r#"
            [[sinks]]
            package_re = "("
        "#;
        let err = Configuration::from_str_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegex { .. }));
    }

    #[test]
    fn exclusion_rules_parse_and_apply() {
        let toml = r#"
            [[sinks]]
            package = "core"
            method_re = ".*"

            [[sinks.exclude]]
            package = "core"
            method = "SafeSink"
        "#;
        let config = Configuration::from_str_toml(toml).unwrap();
        assert!(config.is_sink("core", "", "Sink"));
        assert!(!config.is_sink("core", "", "SafeSink"));
    }

    #[test]
    fn missing_file_produces_unreadable_error() {
        let err = Configuration::from_toml_file(std::path::Path::new("/nonexistent/path.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }
}
