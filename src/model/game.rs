use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    client::{
        error::api::ApiError,
        schema::{validate_each, Check, FieldSchema, FieldValue, Validate, ValidationError},
    },
    model::payload::{encode_json, encode_with_image, ImageField, IntoRequestBody, RequestBody},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDto>,
    #[serde(default)]
    pub seo: Vec<SeoEntry>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub game_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub name: String,
    pub slug: String,
}

/// SEO keywords as typed by the user: a comma-separated string or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    List(Vec<String>),
    Csv(String),
}

impl Keywords {
    /// Split, trim and drop empty keywords
    pub fn normalized(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Keywords::List(list) => list.iter().map(String::as_str).collect(),
            Keywords::Csv(csv) => csv.split(',').collect(),
        };

        raw.into_iter()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords::List(Vec::new())
    }
}

/// Per-language SEO translation of a game or service page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoEntry {
    pub language: String,
    pub meta_title: String,
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Keywords,
    pub introduction: String,
}

impl SeoEntry {
    /// Copy of this entry with keywords normalized into a list
    pub fn normalized(&self) -> Self {
        Self {
            keywords: Keywords::List(self.keywords.normalized()),
            ..self.clone()
        }
    }
}

const SEO_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("language", &[Check::min_len(2, "Language is required")]),
    FieldSchema::new("metaTitle", &[Check::required("Title is required")]),
    FieldSchema::new(
        "metaDescription",
        &[Check::required("Description is required")],
    ),
    FieldSchema::new(
        "keywords",
        &[Check::min_items(1, "At least one keyword is required")],
    ),
    FieldSchema::new(
        "introduction",
        &[Check::required("Introduction is required")],
    ),
];

impl Validate for SeoEntry {
    fn schema(&self) -> &'static [FieldSchema] {
        SEO_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "language" => FieldValue::Text(&self.language),
            "metaTitle" => FieldValue::Text(&self.meta_title),
            "metaDescription" => FieldValue::Text(&self.meta_description),
            "keywords" => FieldValue::Items(self.keywords.normalized().len()),
            "introduction" => FieldValue::Text(&self.introduction),
            _ => FieldValue::Absent,
        }
    }
}

/// Create/update payload for a game
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePayload {
    pub name: String,
    pub slug: String,
    pub seo: Vec<SeoEntry>,
    #[serde(skip)]
    pub image: Option<ImageField>,
}

impl GamePayload {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            seo: Vec::new(),
            image: None,
        }
    }
}

const GAME_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("name", &[Check::required("Name is required")]),
    FieldSchema::new("slug", &[Check::required("Slug is required")]),
];

impl Validate for GamePayload {
    fn schema(&self) -> &'static [FieldSchema] {
        GAME_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "slug" => FieldValue::Text(&self.slug),
            _ => FieldValue::Absent,
        }
    }

    fn validate_nested(&self) -> Result<(), ValidationError> {
        validate_each("seo", &self.seo)
    }
}

impl IntoRequestBody for GamePayload {
    fn into_body(mut self) -> Result<RequestBody, ApiError> {
        self.seo = self.seo.iter().map(SeoEntry::normalized).collect();
        let image = self.image.take();
        encode_with_image(&self, image, "game-image")
    }
}

/// Payload for adding a category to a game
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

const CATEGORY_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new(
        "name",
        &[Check::min_len(3, "Name must be at least 3 characters")],
    ),
    FieldSchema::new("slug", &[Check::min_len(3, "Slug is required")]),
];

impl Validate for CategoryPayload {
    fn schema(&self) -> &'static [FieldSchema] {
        CATEGORY_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "slug" => FieldValue::Text(&self.slug),
            _ => FieldValue::Absent,
        }
    }
}

impl IntoRequestBody for CategoryPayload {
    fn into_body(self) -> Result<RequestBody, ApiError> {
        encode_json(&self)
    }
}
