//! The three-way axis model (§4.1, §9 "Matchers"): `Literal | Regex | Any`,
//! collapsing the literal-or-regex-or-vacuous pattern that the original
//! encodes with two nullable fields plus a validation pass.

use regex::Regex;

/// One axis of a matcher (package, type, field, receiver, method).
#[derive(Debug, Clone)]
pub enum Rule {
    Literal(String),
    Regex(Regex),
    /// Unspecified axis: vacuously true.
    Any,
}

impl Rule {
    pub fn matches(&self, s: &str) -> bool {
        match self {
            Rule::Literal(lit) => lit == s,
            Rule::Regex(re) => re.is_match(s),
            Rule::Any => true,
        }
    }
}

/// Matches a (package, type, field) triple, with an exclusion list that
/// vetoes an otherwise-positive match — the `sourceMatcher` shape.
#[derive(Debug, Clone)]
pub struct TypeMatcher {
    pub package: Rule,
    pub ty: Rule,
    pub field: Rule,
    pub exclude: Vec<TypeMatcher>,
}

impl TypeMatcher {
    pub fn matches_type(&self, path: &str, type_name: &str) -> bool {
        if !(self.package.matches(path) && self.ty.matches(type_name)) {
            return false;
        }
        !self.exclude.iter().any(|ex| ex.matches_type(path, type_name))
    }

    pub fn matches_field(&self, path: &str, type_name: &str, field_name: &str) -> bool {
        if !(self.package.matches(path) && self.ty.matches(type_name) && self.field.matches(field_name)) {
            return false;
        }
        !self
            .exclude
            .iter()
            .any(|ex| ex.matches_field(path, type_name, field_name))
    }
}

/// Matches a (package, receiver, method) triple — the `funcMatcher` shape,
/// used for sinks, sanitizers, and the top-level exclusion list.
#[derive(Debug, Clone)]
pub struct FuncMatcher {
    pub package: Rule,
    pub receiver: Rule,
    pub method: Rule,
    pub exclude: Vec<FuncMatcher>,
}

impl FuncMatcher {
    pub fn matches(&self, path: &str, receiver: &str, method: &str) -> bool {
        if !(self.package.matches(path) && self.receiver.matches(receiver) && self.method.matches(method)) {
            return false;
        }
        !self.exclude.iter().any(|ex| ex.matches(path, receiver, method))
    }
}
