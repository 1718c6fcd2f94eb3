use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    client::{
        error::api::ApiError,
        schema::{Check, FieldSchema, FieldValue, Validate},
    },
    model::payload::{encode_json, IntoRequestBody, RequestBody},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    Vendor,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for a user; `password` is only sent when set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}

const USER_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new(
        "name",
        &[Check::min_len(2, "Name must be at least 2 characters long")],
    ),
    FieldSchema::new("email", &[Check::email("Invalid email address")]),
    FieldSchema::new(
        "password",
        &[Check::min_len(6, "Password must be at least 6 characters")],
    ),
    FieldSchema::new("balance", &[Check::min(0.0, "Balance cannot be negative")]),
];

impl Validate for UserPayload {
    fn schema(&self) -> &'static [FieldSchema] {
        USER_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::Text(&self.email),
            "password" => self
                .password
                .as_deref()
                .map_or(FieldValue::Absent, FieldValue::Text),
            "balance" => self.balance.map_or(FieldValue::Absent, FieldValue::Number),
            _ => FieldValue::Absent,
        }
    }
}

impl IntoRequestBody for UserPayload {
    fn into_body(self) -> Result<RequestBody, ApiError> {
        encode_json(&self)
    }
}
