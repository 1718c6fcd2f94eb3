//! Request bodies for create/update operations.
//!
//! Payloads are encoded into a [`RequestBody`] before they reach the HTTP layer, which
//! keeps the JSON-versus-multipart decision testable without a live client.

use serde::Serialize;
use serde_json::Value;

use crate::client::error::api::ApiError;

/// An image chosen by the user for upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// An image is either a new upload or an already hosted URL that should be kept
#[derive(Debug, Clone, PartialEq)]
pub enum ImageField {
    Upload(ImageUpload),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(ImageUpload),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: FormValue::Text(value.into()),
        }
    }

    pub fn file(name: &str, upload: ImageUpload) -> Self {
        Self {
            name: name.to_string(),
            value: FormValue::File(upload),
        }
    }
}

/// Encoded request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Looks up a text part of a multipart body by name
    pub fn text_part(&self, name: &str) -> Option<&str> {
        match self {
            RequestBody::Multipart(parts) => parts.iter().find_map(|part| match &part.value {
                FormValue::Text(text) if part.name == name => Some(text.as_str()),
                _ => None,
            }),
            RequestBody::Json(_) => None,
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// Encodes a payload for the wire
pub trait IntoRequestBody {
    fn into_body(self) -> Result<RequestBody, ApiError>;
}

fn to_json<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::Validation(format!("Failed to encode request body: {}", e)))
}

/// Encode `payload` as a JSON body
pub fn encode_json<T: Serialize>(payload: &T) -> Result<RequestBody, ApiError> {
    to_json(payload).map(RequestBody::Json)
}

/// Encode `payload` as JSON, or as multipart when an image upload is attached.
///
/// For multipart bodies every top-level JSON field becomes a text part; strings are sent
/// as-is and anything else (arrays, objects, numbers, booleans) as its JSON text. A kept
/// image URL travels as `imageUrl` in both encodings.
///
/// # Arguments
/// - `payload` - Payload that serializes to a JSON object
/// - `image` - Image to upload or keep, if any
/// - `image_part` - Multipart field name of the uploaded file, e.g. `game-image`
///
/// # Returns
/// - `Ok(RequestBody)` - JSON body, or multipart body when `image` is an upload
/// - `Err(ApiError::Validation)` - `payload` failed to serialize or is not a JSON object
pub fn encode_with_image<T: Serialize>(
    payload: &T,
    image: Option<ImageField>,
    image_part: &str,
) -> Result<RequestBody, ApiError> {
    let Value::Object(mut fields) = to_json(payload)? else {
        return Err(ApiError::Validation(
            "Failed to encode request body: expected an object".to_string(),
        ));
    };

    let body = match image {
        Some(ImageField::Upload(upload)) => {
            let mut parts = Vec::new();
            for (name, value) in fields {
                let text = match value {
                    Value::Null => continue,
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                parts.push(FormPart::text(&name, text));
            }
            parts.push(FormPart::file(image_part, upload));
            RequestBody::Multipart(parts)
        }
        Some(ImageField::Url(url)) => {
            fields.insert("imageUrl".to_string(), Value::String(url));
            RequestBody::Json(Value::Object(fields))
        }
        None => RequestBody::Json(Value::Object(fields)),
    };

    Ok(body)
}
