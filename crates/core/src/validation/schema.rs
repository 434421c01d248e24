//! Declarative request schemas built from [`FieldRule`]s and [`Refinement`]s.
//!
//! A [`Schema`] describes one part of a request (path params, query string
//! or JSON body). [`Schema::validate`] trims string input (except fields
//! marked [`FieldSpec::untrimmed`]), evaluates every field rule and
//! refinement, and on success returns a normalized copy of the input:
//! unknown keys dropped, numeric and boolean text coerced, absent optional
//! fields left absent.

use std::collections::HashSet;

use serde_json::{Map, Number, Value};

use super::evaluator::{evaluate_refinements, evaluate_rules, flag_value, DIGITS_RE, NUMERIC_RE};
use super::rules::{FieldRule, FieldViolation, Refinement, Rule, ValueType};

/// Field rules and refinements for one part of a request.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRule>,
    refinements: Vec<Refinement>,
    untrimmed: Vec<String>,
    allow_unknown: bool,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field and its constraints, in evaluation order.
    pub fn field(mut self, name: &str, build: impl FnOnce(FieldSpec) -> FieldSpec) -> Self {
        let spec = build(FieldSpec::new(name));
        if !spec.trim {
            self.untrimmed.push(spec.name.clone());
        }
        self.fields.extend(spec.rules);
        self
    }

    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    /// Require at least one of the schema's declared fields. Used by every
    /// update payload.
    pub fn require_any_field(self) -> Self {
        let fields = self.field_names();
        self.refine(Refinement::AtLeastOne {
            fields,
            message: "At least one field is required".to_string(),
        })
    }

    /// Keep keys that no field rule mentions instead of dropping them.
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    /// Declared field names, in declaration order, without duplicates.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for rule in &self.fields {
            if !names.contains(&rule.field) {
                names.push(rule.field.clone());
            }
        }
        names
    }

    /// Validate one request part. Returns the normalized record, or every
    /// violation found.
    ///
    /// Refinements run even when field rules fail, except those that involve
    /// a field which already reported a violation.
    pub fn validate(&self, data: &Map<String, Value>) -> Result<Map<String, Value>, Vec<FieldViolation>> {
        let trimmed: Map<String, Value> = data
            .iter()
            .map(|(k, v)| {
                let value = if self.untrimmed.contains(k) {
                    v.clone()
                } else {
                    trim_value(v)
                };
                (k.clone(), value)
            })
            .collect();

        let mut errors = evaluate_rules(&self.fields, &trimmed).errors;

        let failed: HashSet<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        let applicable: Vec<Refinement> = self
            .refinements
            .iter()
            .filter(|r| r.fields().iter().all(|f| !failed.contains(f)))
            .cloned()
            .collect();
        errors.extend(evaluate_refinements(&applicable, &trimmed));

        if errors.is_empty() {
            Ok(self.normalize(trimmed))
        } else {
            Err(errors)
        }
    }

    fn normalize(&self, data: Map<String, Value>) -> Map<String, Value> {
        let names = self.field_names();
        let mut out = Map::new();

        for (key, value) in data {
            if !names.contains(&key) {
                if self.allow_unknown {
                    out.insert(key, value);
                }
                continue;
            }
            let coerced = self
                .fields
                .iter()
                .filter(|r| r.field == key)
                .fold(value, |v, r| coerce(&r.rule, v));
            out.insert(key, coerced);
        }

        out
    }
}

fn trim_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other.clone(),
    }
}

/// Convert validated text into the JSON type the rule promises.
fn coerce(rule: &Rule, value: Value) -> Value {
    match (rule, value) {
        (Rule::Digits, Value::String(s)) if DIGITS_RE.is_match(&s) => match s.parse::<u64>() {
            Ok(n) => Value::Number(n.into()),
            Err(_) => Value::String(s),
        },
        (Rule::Numeric, Value::String(s)) if NUMERIC_RE.is_match(&s) => {
            match s.parse::<f64>().ok().and_then(Number::from_f64) {
                Some(n) => Value::Number(n),
                None => Value::String(s),
            }
        }
        (Rule::Flag, v) => match flag_value(&v) {
            Some(b) => Value::Bool(b),
            None => v,
        },
        (_, v) => v,
    }
}

/// Builder for the constraints of a single field.
///
/// Each constraint gets a default human-readable message; call
/// [`FieldSpec::message`] right after a constraint to override it.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    rules: Vec<FieldRule>,
    trim: bool,
}

impl FieldSpec {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rules: Vec::new(),
            trim: true,
        }
    }

    fn push(mut self, rule: Rule) -> Self {
        let message = default_message(&self.name, &rule);
        self.rules.push(FieldRule {
            field: self.name.clone(),
            rule,
            message,
        });
        self
    }

    /// Replace the message of the most recently added constraint.
    pub fn message(mut self, message: &str) -> Self {
        if let Some(last) = self.rules.last_mut() {
            last.message = message.to_string();
        }
        self
    }

    /// Keep surrounding whitespace. Secrets are checked and stored exactly
    /// as submitted.
    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    pub fn required(self) -> Self {
        self.push(Rule::Required)
    }

    pub fn string(self) -> Self {
        self.push(Rule::Type {
            expected: ValueType::String,
        })
    }

    pub fn integer(self) -> Self {
        self.push(Rule::Type {
            expected: ValueType::Integer,
        })
    }

    pub fn number(self) -> Self {
        self.push(Rule::Type {
            expected: ValueType::Number,
        })
    }

    pub fn boolean(self) -> Self {
        self.push(Rule::Type {
            expected: ValueType::Boolean,
        })
    }

    pub fn min_length(self, min: usize) -> Self {
        self.push(Rule::MinLength { min })
    }

    pub fn max_length(self, max: usize) -> Self {
        self.push(Rule::MaxLength { max })
    }

    pub fn min(self, min: f64) -> Self {
        self.push(Rule::MinValue { min })
    }

    pub fn max(self, max: f64) -> Self {
        self.push(Rule::MaxValue { max })
    }

    /// Inclusive numeric range.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    pub fn pattern(self, pattern: &str) -> Self {
        self.push(Rule::Pattern {
            pattern: pattern.to_string(),
        })
    }

    pub fn one_of(self, values: Vec<Value>) -> Self {
        self.push(Rule::OneOf { values })
    }

    pub fn digits(self) -> Self {
        self.push(Rule::Digits)
    }

    pub fn numeric(self) -> Self {
        self.push(Rule::Numeric)
    }

    pub fn email(self) -> Self {
        self.push(Rule::Email)
    }

    pub fn url(self) -> Self {
        self.push(Rule::Url)
    }

    pub fn date(self) -> Self {
        self.push(Rule::Date)
    }

    pub fn flag(self) -> Self {
        self.push(Rule::Flag)
    }
}

fn default_message(field: &str, rule: &Rule) -> String {
    match rule {
        Rule::Required => format!("{field} is required"),
        Rule::Type { expected } => {
            let kind = match expected {
                ValueType::String => "a string",
                ValueType::Integer => "an integer",
                ValueType::Number => "a number",
                ValueType::Boolean => "a boolean",
                ValueType::Array => "an array",
                ValueType::Object => "an object",
            };
            format!("{field} must be {kind}")
        }
        Rule::MinLength { min } => format!("{field} must be at least {min} characters"),
        Rule::MaxLength { max } => format!("{field} must be at most {max} characters"),
        Rule::MinValue { min } => format!("{field} must be greater than or equal to {min}"),
        Rule::MaxValue { max } => format!("{field} must be less than or equal to {max}"),
        Rule::Pattern { .. } => format!("{field} has an invalid format"),
        Rule::OneOf { values } => {
            let allowed: Vec<String> = values.iter().map(Value::to_string).collect();
            format!("{field} must be one of: {}", allowed.join(", "))
        }
        Rule::Digits => format!("{field} must be a non-negative whole number"),
        Rule::Numeric => format!("{field} must be a number"),
        Rule::Email => format!("{field} must be a valid email address"),
        Rule::Url => format!("{field} must be a valid http(s) URL"),
        Rule::Date => format!("{field} must be a date in YYYY-MM-DD format"),
        Rule::Flag => format!("{field} must be true or false"),
    }
}

/// The raw, untrusted parts of an HTTP request as string/JSON maps.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub params: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: Map<String, Value>,
}

/// Schemas for each part of a request. Parts without a schema are ignored.
#[derive(Debug, Clone, Default)]
pub struct RequestSchema {
    pub params: Option<Schema>,
    pub query: Option<Schema>,
    pub body: Option<Schema>,
}

impl RequestSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(mut self, schema: Schema) -> Self {
        self.params = Some(schema);
        self
    }

    pub fn query(mut self, schema: Schema) -> Self {
        self.query = Some(schema);
        self
    }

    pub fn body(mut self, schema: Schema) -> Self {
        self.body = Some(schema);
        self
    }

    /// Validate every part, collecting violations across all of them.
    ///
    /// On success returns `{ "params": {..}, "query": {..}, "body": {..} }`
    /// containing only the parts that have a schema.
    pub fn validate(&self, raw: &RawRequest) -> Result<Map<String, Value>, Vec<FieldViolation>> {
        let parts = [
            ("params", self.params.as_ref(), &raw.params),
            ("query", self.query.as_ref(), &raw.query),
            ("body", self.body.as_ref(), &raw.body),
        ];

        let mut out = Map::new();
        let mut errors = Vec::new();

        for (name, schema, data) in parts {
            let Some(schema) = schema else { continue };
            match schema.validate(data) {
                Ok(normalized) => {
                    out.insert(name.to_string(), Value::Object(normalized));
                }
                Err(violations) => errors.extend(violations),
            }
        }

        if errors.is_empty() {
            Ok(out)
        } else {
            Err(errors)
        }
    }
}
