use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    client::{
        error::api::ApiError,
        schema::{validate_each, Check, FieldSchema, FieldValue, Validate, ValidationError},
    },
    model::{
        game::SeoEntry,
        payload::{encode_with_image, ImageField, IntoRequestBody, RequestBody},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Draft,
    Published,
    Unpublished,
}

/// Kind of offering a service sells; currency services carry a pricing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Currency,
    Item,
    Boosting,
    Account,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: i64,
    pub game_id: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub vendor_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    pub currency: String,
    pub status: ServiceStatus,
    #[serde(default, rename = "type")]
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Category assigned to a service at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub name: String,
    pub slug: String,
}

const SERVICE_CATEGORY_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("name", &[Check::required("Category name is required")]),
    FieldSchema::new("slug", &[Check::required("Category slug is required")]),
];

impl Validate for ServiceCategory {
    fn schema(&self) -> &'static [FieldSchema] {
        SERVICE_CATEGORY_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "slug" => FieldValue::Text(&self.slug),
            _ => FieldValue::Absent,
        }
    }
}

/// Create/update payload for a service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub name: String,
    pub slug: String,
    pub currency: String,
    pub vendor: String,
    pub status: ServiceStatus,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub categories: Vec<ServiceCategory>,
    pub seo: Vec<SeoEntry>,
    #[serde(skip)]
    pub image: Option<ImageField>,
}

const SERVICE_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new(
        "name",
        &[Check::min_len(3, "Name must be at least 3 characters")],
    ),
    FieldSchema::new("slug", &[Check::min_len(3, "Slug is required")]),
    FieldSchema::new("currency", &[Check::required("Currency is required")]),
    FieldSchema::new("vendor", &[Check::required("Vendor is required")]),
];

impl Validate for ServicePayload {
    fn schema(&self) -> &'static [FieldSchema] {
        SERVICE_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "slug" => FieldValue::Text(&self.slug),
            "currency" => FieldValue::Text(&self.currency),
            "vendor" => FieldValue::Text(&self.vendor),
            _ => FieldValue::Absent,
        }
    }

    fn validate_nested(&self) -> Result<(), ValidationError> {
        validate_each("categories", &self.categories)?;
        validate_each("seo", &self.seo)
    }
}

impl IntoRequestBody for ServicePayload {
    fn into_body(mut self) -> Result<RequestBody, ApiError> {
        self.seo = self.seo.iter().map(SeoEntry::normalized).collect();
        let image = self.image.take();
        encode_with_image(&self, image, "service-image")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ServicePayload {
        ServicePayload {
            name: "WoW Gold".to_string(),
            slug: "wow-gold".to_string(),
            currency: "USD".to_string(),
            vendor: "12".to_string(),
            status: ServiceStatus::Draft,
            service_type: ServiceType::Currency,
            categories: vec![ServiceCategory {
                name: "Gold".to_string(),
                slug: String::new(),
            }],
            seo: Vec::new(),
            image: None,
        }
    }

    #[test]
    fn nested_category_errors_name_the_index() {
        let err = payload().validate().unwrap_err();
        assert_eq!(err.path, "categories[0].slug");
        assert_eq!(err.message, "Category slug is required");
    }

    #[test]
    fn json_body_uses_wire_names() {
        let mut payload = payload();
        payload.categories.clear();

        let RequestBody::Json(json) = payload.into_body().unwrap() else {
            panic!("expected json body");
        };
        assert_eq!(json["type"], "CURRENCY");
        assert_eq!(json["status"], "DRAFT");
    }
}
