//! Request schema validation engine.
//!
//! Provides tagged rule types, a pure-logic evaluator and the [`Schema`]
//! builder that API extractors run before any handler code.

pub mod evaluator;
pub mod rules;
pub mod schema;

pub use evaluator::{evaluate_refinements, evaluate_rules, ROOT_FIELD};
pub use rules::{FieldRule, FieldViolation, Refinement, Rule, ValidationResult, ValueType};
pub use schema::{FieldSpec, RawRequest, RequestSchema, Schema};
