//! Validation rule and result types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON value kinds a [`Rule::Type`] can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    /// Whole number (JSON integer, no fractional part).
    Integer,
    /// Any JSON number.
    Number,
    Boolean,
    Array,
    Object,
}

impl ValueType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Integer => value.is_i64() || value.is_u64(),
            ValueType::Number => value.is_number(),
            ValueType::Boolean => value.is_boolean(),
            ValueType::Array => value.is_array(),
            ValueType::Object => value.is_object(),
        }
    }
}

/// A single constraint on one field.
///
/// Every rule except [`Rule::Required`] passes when the field is absent or
/// `null`, so optional fields only need to be valid when supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Field must be present, non-null and (for strings) non-blank.
    Required,
    Type { expected: ValueType },
    /// Minimum string length in characters.
    MinLength { min: usize },
    /// Maximum string length in characters.
    MaxLength { max: usize },
    /// Inclusive numeric lower bound.
    MinValue { min: f64 },
    /// Inclusive numeric upper bound.
    MaxValue { max: f64 },
    /// String must match the regular expression.
    Pattern { pattern: String },
    /// Value must equal one of the listed values.
    OneOf { values: Vec<Value> },
    /// A string made only of ASCII digits, or a non-negative JSON integer.
    /// Digit strings are coerced to numbers by the schema.
    Digits,
    /// A decimal number, either as a JSON number or as text such as
    /// `-122.4194`. Numeric strings are coerced to numbers by the schema.
    Numeric,
    Email,
    /// Absolute `http` or `https` URL.
    Url,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
    /// `true` / `false`, either as JSON booleans or query-string text.
    /// Text values are coerced to booleans by the schema.
    Flag,
}

impl Rule {
    /// Stable snake_case identifier reported in violations.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Type { .. } => "type",
            Rule::MinLength { .. } => "min_length",
            Rule::MaxLength { .. } => "max_length",
            Rule::MinValue { .. } => "min_value",
            Rule::MaxValue { .. } => "max_value",
            Rule::Pattern { .. } => "pattern",
            Rule::OneOf { .. } => "one_of",
            Rule::Digits => "digits",
            Rule::Numeric => "numeric",
            Rule::Email => "email",
            Rule::Url => "url",
            Rule::Date => "date",
            Rule::Flag => "flag",
        }
    }
}

/// A rule bound to a field, with the message reported when it fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,
    pub rule: Rule,
    pub message: String,
}

/// Constraints spanning more than one field, checked after field rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Refinement {
    /// At least one of the fields must be present and non-null.
    AtLeastOne { fields: Vec<String>, message: String },
    /// `field` must equal `other` whenever either is present.
    FieldsMatch {
        field: String,
        other: String,
        message: String,
    },
    /// The fields must be supplied all together or not at all.
    RequiredTogether { fields: Vec<String>, message: String },
}

impl Refinement {
    pub fn name(&self) -> &'static str {
        match self {
            Refinement::AtLeastOne { .. } => "at_least_one",
            Refinement::FieldsMatch { .. } => "fields_match",
            Refinement::RequiredTogether { .. } => "required_together",
        }
    }

    /// Fields the refinement reads.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Refinement::AtLeastOne { fields, .. } | Refinement::RequiredTogether { fields, .. } => {
                fields.iter().map(String::as_str).collect()
            }
            Refinement::FieldsMatch { field, other, .. } => vec![field.as_str(), other.as_str()],
        }
    }
}

/// Aggregated result of evaluating all rules against one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}
