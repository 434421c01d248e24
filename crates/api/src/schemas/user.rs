use std::sync::LazyLock;

use dogland_core::validation::{Refinement, RequestSchema, Schema};
use dogland_db::models::user::{CreateUser, UpdateUser, UserFilter};
use serde::Deserialize;

use super::organization::PHONE_PATTERN;
use super::{id_params, lookup_id, page_query, record_id, required_if, IdParams};
use crate::middleware::validation::Validated;
use crate::query::ListQuery;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

fn profile_body(required: bool) -> Schema {
    Schema::new()
        .field("name", |f| {
            required_if(f, required).string().min_length(1).max_length(100)
        })
        .field("surnames", |f| {
            required_if(f, required).string().min_length(1).max_length(150)
        })
        .field("email", |f| required_if(f, required).string().email())
        .field("phone", |f| {
            f.string()
                .pattern(PHONE_PATTERN)
                .message("phone must be a valid phone number")
        })
        .field("birth_date", |f| f.string().date())
        .field("sex_id", lookup_id)
        .field("city_id", lookup_id)
        .field("organization_id", record_id)
        .field("role_id", lookup_id)
}

static LIST: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().query(
        page_query()
            .field("organization_id", record_id)
            .field("role_id", lookup_id)
            .field("city_id", lookup_id)
            .field("is_active", |f| f.flag()),
    )
});

static CREATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().body(
        profile_body(true)
            .field("password", |f| {
                f.untrimmed()
                    .required()
                    .string()
                    .min_length(MIN_PASSWORD_LENGTH)
                    .max_length(MAX_PASSWORD_LENGTH)
            })
            .field("password_confirmation", |f| f.untrimmed().required().string())
            .refine(Refinement::FieldsMatch {
                field: "password_confirmation".to_string(),
                other: "password".to_string(),
                message: "Password confirmation does not match".to_string(),
            }),
    )
});

static UPDATE: LazyLock<RequestSchema> = LazyLock::new(|| {
    RequestSchema::new().params(id_params()).body(
        profile_body(false)
            .field("is_active", |f| f.boolean())
            .require_any_field(),
    )
});

#[derive(Debug, Deserialize)]
pub struct ListUsersRequest {
    pub query: ListQuery<UserFilter>,
}

impl Validated for ListUsersRequest {
    fn schema() -> &'static RequestSchema {
        &LIST
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub body: CreateUser,
}

impl Validated for CreateUserRequest {
    fn schema() -> &'static RequestSchema {
        &CREATE
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub params: IdParams,
    pub body: UpdateUser,
}

impl Validated for UpdateUserRequest {
    fn schema() -> &'static RequestSchema {
        &UPDATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogland_core::validation::RawRequest;
    use serde_json::{json, Value};

    fn body(value: Value) -> RawRequest {
        let Value::Object(map) = value else {
            panic!("expected object")
        };
        RawRequest {
            body: map,
            ..Default::default()
        }
    }

    fn registration(confirmation: &str) -> Value {
        json!({
            "name": "Ana",
            "surnames": "García",
            "email": "ana@example.com",
            "password": "perro-callejero",
            "password_confirmation": confirmation,
        })
    }

    #[test]
    fn matching_passwords_pass() {
        assert!(CreateUserRequest::schema()
            .validate(&body(registration("perro-callejero")))
            .is_ok());
    }

    #[test]
    fn mismatched_confirmation_is_reported_on_confirmation() {
        let errors = CreateUserRequest::schema()
            .validate(&body(registration("gato-callejero")))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password_confirmation");
        assert_eq!(errors[0].rule, "fields_match");
    }

    #[test]
    fn short_password_is_rejected() {
        let mut input = registration("short");
        input["password"] = json!("short");
        let errors = CreateUserRequest::schema().validate(&body(input)).unwrap_err();
        assert_eq!(errors[0].field, "password");
        assert_eq!(errors[0].rule, "min_length");
    }

    #[test]
    fn password_whitespace_is_preserved() {
        let mut input = registration("  perro-callejero ");
        input["password"] = json!("  perro-callejero ");
        input["name"] = json!(" Ana ");
        let out = CreateUserRequest::schema().validate(&body(input)).unwrap();
        assert_eq!(out["body"]["password"], json!("  perro-callejero "));
        assert_eq!(out["body"]["name"], json!("Ana"));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut input = registration("perro-callejero");
        input["email"] = json!("not-an-email");
        let errors = CreateUserRequest::schema().validate(&body(input)).unwrap_err();
        assert_eq!(errors[0].field, "email");
    }
}
