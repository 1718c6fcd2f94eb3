use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    client::{
        error::api::ApiError,
        schema::{Check, FieldSchema, FieldValue, Validate},
    },
    model::{
        payload::{encode_with_image, ImageField, IntoRequestBody, RequestBody},
        user::UserDto,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsType {
    Announcement,
    News,
    Notice,
    Update,
    Guide,
    Event,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: Option<UserDto>,
    #[serde(default)]
    pub views: Option<i64>,
    #[serde(rename = "type")]
    pub news_type: NewsType,
    #[serde(default)]
    pub game_id: Option<i64>,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_published() -> bool {
    true
}

/// Create/update payload for a news article
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPayload {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: String,
    #[serde(rename = "type")]
    pub news_type: NewsType,
    pub game_id: Option<i64>,
    pub published: bool,
    pub is_pinned: bool,
    pub tags: Vec<String>,
    #[serde(skip)]
    pub image: Option<ImageField>,
}

impl NewsPayload {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        content: impl Into<String>,
        news_type: NewsType,
    ) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            description: None,
            content: content.into(),
            news_type,
            game_id: None,
            published: true,
            is_pinned: false,
            tags: Vec::new(),
            image: None,
        }
    }
}

const NEWS_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("title", &[Check::required("Title is required")]),
    FieldSchema::new("slug", &[Check::required("Slug is required")]),
    FieldSchema::new("content", &[Check::required("Content is required")]),
];

impl Validate for NewsPayload {
    fn schema(&self) -> &'static [FieldSchema] {
        NEWS_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => FieldValue::Text(&self.title),
            "slug" => FieldValue::Text(&self.slug),
            "content" => FieldValue::Text(&self.content),
            _ => FieldValue::Absent,
        }
    }
}

impl IntoRequestBody for NewsPayload {
    fn into_body(mut self) -> Result<RequestBody, ApiError> {
        let image = self.image.take();
        encode_with_image(&self, image, "news-image")
    }
}
