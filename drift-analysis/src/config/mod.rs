//! The configuration matcher (§4.1): classifies a (package, type, field) or
//! (package, receiver, method) triple as a source, sink, sanitizer, or
//! excluded, from literal strings and compiled regexes.

pub mod field_tags;
pub mod loader;
pub mod matcher;

pub use field_tags::FieldTagRule;
pub use matcher::{FuncMatcher, Rule, TypeMatcher};

/// Built once per analysis run, immutable and freely shared afterward —
/// cloning is cheap (compiled regexes live behind the matcher trees, never
/// recompiled per clone since `Configuration` itself is typically held
/// behind an `Arc` by callers that fan out per-package analysis).
#[derive(Debug, Clone)]
pub struct Configuration {
    pub sources: Vec<TypeMatcher>,
    pub sinks: Vec<FuncMatcher>,
    pub sanitizers: Vec<FuncMatcher>,
    /// Top-level exclusion list (distinct from each matcher's own `exclude`
    /// sub-list): vetoes a positive sink or sanitizer match regardless of
    /// which matcher produced it.
    pub exclude: Vec<FuncMatcher>,
    pub field_tags: Vec<FieldTagRule>,
    pub allow_panic_on_tainted_values: bool,
    pub report_message: Option<String>,
    pub skip_test_packages: bool,
    pub test_package_markers: Vec<String>,
}

impl Configuration {
    pub fn is_source_type(&self, path: &str, type_name: &str) -> bool {
        self.sources.iter().any(|m| m.matches_type(path, type_name))
    }

    pub fn is_source_field(&self, path: &str, type_name: &str, field_name: &str) -> bool {
        self.sources.iter().any(|m| m.matches_field(path, type_name, field_name))
    }

    pub fn is_tagged_source_field(&self, tag: &str) -> bool {
        field_tags::tag_matches(tag, &self.field_tags)
    }

    pub fn is_sink(&self, path: &str, receiver: &str, method: &str) -> bool {
        self.sinks.iter().any(|m| m.matches(path, receiver, method))
            && !self.exclude.iter().any(|m| m.matches(path, receiver, method))
    }

    pub fn is_sanitizer(&self, path: &str, receiver: &str, method: &str) -> bool {
        self.sanitizers.iter().any(|m| m.matches(path, receiver, method))
            && !self.exclude.iter().any(|m| m.matches(path, receiver, method))
    }

    /// §B.1 / scenario S6: does this package's import list mark it as a test
    /// package that should be skipped entirely?
    pub fn is_test_package(&self, imports: &[&str]) -> bool {
        self.skip_test_packages
            && imports.iter().any(|imp| {
                self.test_package_markers
                    .iter()
                    .any(|marker| imp == marker || imp.ends_with(&format!("/{marker}")))
            })
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            sources: Vec::new(),
            sinks: Vec::new(),
            sanitizers: Vec::new(),
            exclude: Vec::new(),
            field_tags: Vec::new(),
            allow_panic_on_tainted_values: false,
            report_message: None,
            skip_test_packages: true,
            test_package_markers: vec!["testing".to_string()],
        }
    }
}
