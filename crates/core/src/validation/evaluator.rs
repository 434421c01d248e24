//! Rule evaluator. Pure logic, no database access.

use std::collections::{HashMap, HashSet};
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::Regex;
use serde_json::{Map, Value};

use super::rules::{FieldRule, FieldViolation, Refinement, Rule, ValidationResult};

/// Field name reported by refinements that concern the record as a whole.
pub const ROOT_FIELD: &str = "_root";

pub(crate) static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

pub(crate) static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("valid regex")
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid regex"));

/// Compiled [`Rule::Pattern`] expressions, keyed by source text.
static PATTERNS: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Evaluate all field rules against a single data record.
///
/// Every field is checked; within one field, evaluation stops at the first
/// failing rule so each field reports at most one violation.
pub fn evaluate_rules(rules: &[FieldRule], data: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();
    let mut failed: HashSet<&str> = HashSet::new();

    for rule in rules {
        if failed.contains(rule.field.as_str()) {
            continue;
        }
        if let Some(violation) = evaluate_single_rule(rule, data.get(&rule.field)) {
            failed.insert(rule.field.as_str());
            errors.push(violation);
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Evaluate cross-field refinements against a record.
pub fn evaluate_refinements(
    refinements: &[Refinement],
    data: &Map<String, Value>,
) -> Vec<FieldViolation> {
    let mut errors = Vec::new();

    for refinement in refinements {
        match refinement {
            Refinement::AtLeastOne { fields, message } => {
                if !fields.iter().any(|f| is_present(data.get(f))) {
                    errors.push(FieldViolation::new(ROOT_FIELD, refinement.name(), message));
                }
            }
            Refinement::FieldsMatch {
                field,
                other,
                message,
            } => {
                let a = data.get(field).filter(|v| !v.is_null());
                let b = data.get(other).filter(|v| !v.is_null());
                if (a.is_some() || b.is_some()) && a != b {
                    errors.push(FieldViolation::new(field, refinement.name(), message));
                }
            }
            Refinement::RequiredTogether { fields, message } => {
                let present = fields.iter().filter(|f| is_present(data.get(*f))).count();
                if present > 0 && present < fields.len() {
                    for field in fields.iter().filter(|f| !is_present(data.get(*f))) {
                        errors.push(FieldViolation::new(field, refinement.name(), message));
                    }
                }
            }
        }
    }

    errors
}

/// Read a value as a number, accepting JSON numbers and numeric strings.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if NUMERIC_RE.is_match(s) => s.parse().ok(),
        _ => None,
    }
}

/// Read a value as a boolean flag, accepting JSON booleans and the usual
/// query-string spellings.
pub fn flag_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn evaluate_single_rule(rule: &FieldRule, value: Option<&Value>) -> Option<FieldViolation> {
    if let Rule::Required = rule.rule {
        return (!is_present(value)).then(|| violation(rule));
    }

    // Every other rule only constrains values that were supplied.
    let value = match value {
        Some(v) if !v.is_null() => v,
        _ => return None,
    };

    let ok = match &rule.rule {
        Rule::Required => true,
        Rule::Type { expected } => expected.matches(value),
        Rule::MinLength { min } => value.as_str().is_none_or(|s| s.chars().count() >= *min),
        Rule::MaxLength { max } => value.as_str().is_none_or(|s| s.chars().count() <= *max),
        Rule::MinValue { min } => numeric_value(value).is_none_or(|n| n >= *min),
        Rule::MaxValue { max } => numeric_value(value).is_none_or(|n| n <= *max),
        Rule::Pattern { pattern } => value.as_str().is_some_and(|s| pattern_matches(pattern, s)),
        Rule::OneOf { values } => values.contains(value),
        Rule::Digits => match value {
            Value::String(s) => DIGITS_RE.is_match(s),
            Value::Number(n) => n.is_u64(),
            _ => false,
        },
        Rule::Numeric => numeric_value(value).is_some(),
        Rule::Email => value.as_str().is_some_and(|s| EMAIL_RE.is_match(s)),
        Rule::Url => value.as_str().is_some_and(|s| URL_RE.is_match(s)),
        Rule::Date => value
            .as_str()
            .is_some_and(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
        Rule::Flag => flag_value(value).is_some(),
    };

    (!ok).then(|| violation(rule))
}

/// Match `text` against a cached compilation of `pattern`. An expression
/// that does not compile matches nothing.
fn pattern_matches(pattern: &str, text: &str) -> bool {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return re.is_match(text);
    }
    match Regex::new(pattern) {
        Ok(re) => {
            let matched = re.is_match(text);
            cache.insert(pattern.to_string(), re);
            matched
        }
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Invalid validation pattern");
            false
        }
    }
}

fn violation(rule: &FieldRule) -> FieldViolation {
    FieldViolation::new(&rule.field, rule.rule.name(), &rule.message)
}
