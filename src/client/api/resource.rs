//! Per-resource routing table.
//!
//! Every top-level resource shares the same five operations; what differs is the path
//! layout, the update method, whether the list is scoped to a parent game, and the
//! fallback error messages. [`ResourceKind`] captures those differences so the client
//! can stay generic.

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::{
    client::{api::path::ApiPath, schema::Validate},
    model::{
        game::{GameDto, GamePayload},
        news::{NewsDto, NewsPayload},
        payload::IntoRequestBody,
        service::{ServiceDto, ServicePayload},
        user::{UserDto, UserPayload},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Game,
    News,
    Service,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl ResourceKind {
    /// Path of the list endpoint; `None` when a scoped resource is listed without its parent
    pub fn list_path(self, parent: Option<i64>) -> Option<ApiPath> {
        match self {
            ResourceKind::Service => {
                parent.map(|game_id| ApiPath::new("service").push("game").push(game_id))
            }
            ResourceKind::User => Some(ApiPath::new("user").push("all")),
            _ => Some(ApiPath::new(self.segment())),
        }
    }

    /// Path of the create endpoint; services are created under their game
    pub fn create_path(self, parent: Option<i64>) -> Option<ApiPath> {
        match self {
            ResourceKind::Service => parent.map(|game_id| ApiPath::new("service").push(game_id)),
            ResourceKind::User => Some(ApiPath::new("user").push("create")),
            _ => Some(ApiPath::new(self.segment())),
        }
    }

    pub fn item_path(self, id: i64) -> ApiPath {
        ApiPath::new(self.segment()).push(id)
    }

    fn segment(self) -> &'static str {
        match self {
            ResourceKind::Game => "game",
            ResourceKind::News => "news",
            ResourceKind::Service => "service",
            ResourceKind::User => "user",
        }
    }

    pub fn update_method(self) -> Method {
        match self {
            ResourceKind::Game => Method::PATCH,
            _ => Method::PUT,
        }
    }

    /// Scoped lists treat 404 as "no items"
    pub fn is_scoped(self) -> bool {
        matches!(self, ResourceKind::Service)
    }

    pub fn supports_search(self) -> bool {
        matches!(self, ResourceKind::News | ResourceKind::User)
    }

    /// Whether the list endpoint takes `page`/`limit` query parameters
    pub fn is_paginated(self) -> bool {
        !self.is_scoped()
    }

    /// First element of this resource's list cache key
    pub fn list_key(self) -> &'static str {
        match self {
            ResourceKind::Game => "games",
            ResourceKind::News => "news-list",
            ResourceKind::Service => "services-by-game",
            ResourceKind::User => "users",
        }
    }

    /// First element of this resource's detail cache key
    pub fn detail_key(self) -> &'static str {
        match self {
            ResourceKind::Game => "game",
            ResourceKind::News => "news",
            ResourceKind::Service => "service",
            ResourceKind::User => "user",
        }
    }

    /// Message used when the server does not explain a failure
    pub fn fallback_message(self, operation: Operation) -> &'static str {
        use Operation::*;
        use ResourceKind::*;

        match (self, operation) {
            (Game, List) => "Failed to fetch games",
            (Game, Get) => "Failed to fetch game by ID",
            (Game, Create) => "Failed to create game",
            (Game, Update) => "Failed to update game",
            (Game, Delete) => "Failed to delete game",
            (News, List) => "Failed to fetch news",
            (News, Get) => "Failed to fetch news details",
            (News, Create) => "Failed to create news",
            (News, Update) => "Failed to update news",
            (News, Delete) => "Failed to delete news",
            (Service, List) => "Failed to fetch services by game ID",
            (Service, Get) => "Failed to fetch service by ID",
            (Service, Create) => "Failed to create service by game ID",
            (Service, Update) => "Failed to update service by ID",
            (Service, Delete) => "Failed to delete service by ID",
            (User, List) => "Failed to fetch users",
            (User, Get) => "Failed to fetch user",
            (User, Create) => "Failed to create user",
            (User, Update) => "Failed to update user",
            (User, Delete) => "Failed to delete user",
        }
    }
}

/// A record the admin can list, read, create, update and delete
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Create/update payload of this resource
    type Payload: Validate + IntoRequestBody + Send;
}

impl Resource for GameDto {
    const KIND: ResourceKind = ResourceKind::Game;
    type Payload = GamePayload;
}

impl Resource for NewsDto {
    const KIND: ResourceKind = ResourceKind::News;
    type Payload = NewsPayload;
}

impl Resource for ServiceDto {
    const KIND: ResourceKind = ResourceKind::Service;
    type Payload = ServicePayload;
}

impl Resource for UserDto {
    const KIND: ResourceKind = ResourceKind::User;
    type Payload = UserPayload;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_paths_require_a_game() {
        assert_eq!(ResourceKind::Service.list_path(None), None);
        assert_eq!(
            ResourceKind::Service.list_path(Some(4)),
            Some(ApiPath::new("service").push("game").push(4))
        );
        assert_eq!(
            ResourceKind::Service.create_path(Some(4)).map(|path| path.to_string()),
            Some("/service/4".to_string())
        );
    }

    #[test]
    fn only_games_are_patched() {
        assert_eq!(ResourceKind::Game.update_method(), Method::PATCH);
        assert_eq!(ResourceKind::News.update_method(), Method::PUT);
        assert_eq!(ResourceKind::User.item_path(9).to_string(), "/user/9");
    }
}
