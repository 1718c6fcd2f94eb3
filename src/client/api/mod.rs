//! Typed HTTP client for the marketplace API.
//!
//! [`ApiClient`] performs exactly one attempt per call and normalizes every failure into an
//! [`ApiError`]. Generic CRUD operations are driven by the [`Resource`] trait; endpoints that
//! only exist for one resource live in the per-resource submodules.

pub mod currency;
pub mod game;
pub mod path;
pub mod resource;
pub mod session;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use dioxus_logger::tracing;
use reqwest::{
    multipart::{Form, Part},
    Method, RequestBuilder, Url,
};
use serde::de::DeserializeOwned;

use crate::{
    client::{
        api::{
            path::ApiPath,
            resource::{Operation, Resource},
            session::{SessionStore, StaticSession},
        },
        config::Config,
        error::{api::ApiError, Error},
        schema::Validate,
    },
    model::{
        api::{DataEnvelope, Deleted, ListParams, ListResponse, Page},
        payload::{FormPart, FormValue, IntoRequestBody, RequestBody},
    },
};

/// HTTP client bound to one API base URL and session
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Build a client from configuration, using `api_token` (if any) as a static session
    ///
    /// # Arguments
    /// - `config` - Configuration holding the API base URL, token and request timeout
    ///
    /// # Returns
    /// - `Ok(ApiClient)` - Client ready to send requests
    /// - `Err(Error::ConfigError)` - `api_url` is not an http(s) URL
    /// - `Err(Error::HttpError)` - The underlying HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, Error> {
        let base_url = config.api_base_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url,
            session: Arc::new(StaticSession(config.api_token.clone())),
        })
    }

    /// Replace the session the bearer token is read from
    pub fn with_session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = session;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Start a request to `path`, attaching the bearer token when the session has one.
    ///
    /// Path segments are percent-encoded, so IDs can never alter the route or the query.
    pub(crate) fn request(&self, method: Method, path: &ApiPath) -> Result<RequestBuilder, ApiError> {
        let url = path.join_onto(&self.base_url).ok_or_else(|| {
            ApiError::Validation(format!("Cannot build a request URL for {}", path))
        })?;
        tracing::debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        Ok(match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a request and return the raw body of a successful response
    async fn execute(&self, request: RequestBuilder, fallback: &str) -> Result<String, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, fallback))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e, fallback))?;

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), &body, fallback);
            tracing::debug!("Request failed with status {}: {}", status, err);

            return Err(err);
        }

        Ok(body)
    }

    /// Send a request and decode the JSON body of a successful response
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let body = self.execute(request, fallback).await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Failed to decode response body: {}", e);

            ApiError::Server(format!("{}: unexpected response from server", fallback))
        })
    }

    /// Send a request whose response body is irrelevant
    pub(crate) async fn send_ignoring_body(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<(), ApiError> {
        self.execute(request, fallback).await.map(|_| ())
    }

    /// Fetch one page of `R`.
    ///
    /// For scoped resources a 404 means the parent has no items and yields an empty page.
    ///
    /// # Arguments
    /// - `parent` - Owning game for scoped resources (services), ignored otherwise
    /// - `params` - Page, limit and search term; search is only sent where supported
    ///
    /// # Returns
    /// - `Ok(Page<R>)` - Items with normalized pagination
    /// - `Err(ApiError::Validation)` - `page` or `limit` is 0, or a scoped list has no parent
    /// - `Err(ApiError)` - The request failed; no request is retried
    pub async fn list<R: Resource>(
        &self,
        parent: Option<i64>,
        params: &ListParams,
    ) -> Result<Page<R>, ApiError> {
        let kind = R::KIND;
        let fallback = kind.fallback_message(Operation::List);

        if params.page < 1 {
            return Err(ApiError::Validation("Page must be at least 1".to_string()));
        }
        if params.limit < 1 {
            return Err(ApiError::Validation("Limit must be at least 1".to_string()));
        }
        let path = kind
            .list_path(parent)
            .ok_or_else(|| ApiError::Validation("Game ID is required".to_string()))?;

        let mut request = self.request(Method::GET, &path)?;
        if kind.is_paginated() {
            request = request.query(&[("page", params.page), ("limit", params.limit)]);
        }
        if kind.supports_search() {
            request = request.query(&[("search", params.search_term())]);
        }

        match self.send::<ListResponse<R>>(request, fallback).await {
            Ok(response) => Ok(response.into_page()),
            Err(ApiError::NotFound(_)) if kind.is_scoped() => Ok(Page::empty(params.limit)),
            Err(err) => Err(err),
        }
    }

    /// Fetch a single `R` by ID
    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        let kind = R::KIND;
        let request = self.request(Method::GET, &kind.item_path(id))?;

        let envelope: DataEnvelope<R> = self
            .send(request, kind.fallback_message(Operation::Get))
            .await?;

        Ok(envelope.data)
    }

    /// Validate `payload` and create a new `R`
    ///
    /// # Arguments
    /// - `parent` - Owning game for services, ignored otherwise
    /// - `payload` - Sent as JSON, or as multipart when it carries an image upload
    ///
    /// # Returns
    /// - `Ok(R)` - The created record
    /// - `Err(ApiError::Validation)` - The payload failed its schema (nothing is sent) or the
    ///   server rejected it
    pub async fn create<R: Resource>(
        &self,
        parent: Option<i64>,
        payload: R::Payload,
    ) -> Result<R, ApiError> {
        let kind = R::KIND;
        let fallback = kind.fallback_message(Operation::Create);

        payload.validate()?;
        let path = kind
            .create_path(parent)
            .ok_or_else(|| ApiError::Validation("Game ID is required".to_string()))?;

        let request = with_body(self.request(Method::POST, &path)?, payload.into_body()?)?;
        let envelope: DataEnvelope<R> = self.send(request, fallback).await?;

        Ok(envelope.data)
    }

    /// Validate `payload` and replace the fields of an existing `R`
    pub async fn update<R: Resource>(&self, id: i64, payload: R::Payload) -> Result<R, ApiError> {
        let kind = R::KIND;

        payload.validate()?;
        let request = with_body(
            self.request(kind.update_method(), &kind.item_path(id))?,
            payload.into_body()?,
        )?;

        let envelope: DataEnvelope<R> = self
            .send(request, kind.fallback_message(Operation::Update))
            .await?;

        Ok(envelope.data)
    }

    /// Delete an `R` by ID
    ///
    /// # Returns
    /// - `Ok(Deleted)` - Always `success: true`
    /// - `Err(ApiError::NotFound)` - No record has this ID
    /// - `Err(ApiError::Conflict)` - The server refused because the record is still in use
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<Deleted, ApiError> {
        let kind = R::KIND;
        let request = self.request(Method::DELETE, &kind.item_path(id))?;

        self.send_ignoring_body(request, kind.fallback_message(Operation::Delete))
            .await?;

        Ok(Deleted { success: true })
    }
}

/// Attach an encoded payload to a request
pub(crate) fn with_body(
    request: RequestBuilder,
    body: RequestBody,
) -> Result<RequestBuilder, ApiError> {
    match body {
        RequestBody::Json(json) => Ok(request.json(&json)),
        RequestBody::Multipart(parts) => Ok(request.multipart(into_form(parts)?)),
    }
}

fn into_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();

    for part in parts {
        form = match part.value {
            FormValue::Text(text) => form.text(part.name, text),
            FormValue::File(upload) => {
                let file = Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(&upload.mime_type)
                    .map_err(|_| {
                        ApiError::Validation(format!(
                            "Unsupported image type: {}",
                            upload.mime_type
                        ))
                    })?;
                form.part(part.name, file)
            }
        };
    }

    Ok(form)
}
