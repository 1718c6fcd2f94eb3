//! JSON factories for API records and response envelopes.

use serde_json::{json, Value};

/// Create a game record with a default SEO translation.
///
/// # Arguments
/// - `id` - The game ID
pub fn mock_game(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Game {}", id),
        "slug": format!("game-{}", id),
        "imageUrl": null,
        "categories": [],
        "seo": [{
            "language": "en",
            "metaTitle": format!("Game {}", id),
            "metaDescription": "Buy services",
            "keywords": ["gold"],
            "introduction": "Intro"
        }],
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

/// Create a news record of type `NEWS`
pub fn mock_news(id: i64) -> Value {
    json!({
        "id": id,
        "title": format!("News {}", id),
        "slug": format!("news-{}", id),
        "content": "Content",
        "type": "NEWS",
        "published": true,
        "isPinned": false,
        "tags": []
    })
}

/// Create a currency service record owned by `game_id`
pub fn mock_service(id: i64, game_id: i64) -> Value {
    json!({
        "id": id,
        "gameId": game_id,
        "name": format!("Service {}", id),
        "slug": format!("service-{}", id),
        "currency": "USD",
        "status": "PUBLISHED",
        "type": "CURRENCY",
        "published": true
    })
}

/// Create a customer record
pub fn mock_user(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("User {}", id),
        "email": format!("user{}@example.com", id),
        "role": "CUSTOMER",
        "balance": 0.0
    })
}

/// Create a pricing configuration of "price per 100 Gold" with one regional server.
///
/// `presets` is left empty so the client's default presets apply.
pub fn mock_currency_config(service_id: &str) -> Value {
    json!({
        "id": "cfg-1",
        "serviceId": service_id,
        "amount": 100.0,
        "unit": "Gold",
        "presets": [],
        "servers": [{
            "id": "srv-1",
            "name": "Area 52",
            "price": 2.5,
            "region": { "id": "us", "name": "US" }
        }]
    })
}

/// Create a currency package in the wire shape used for package submission
pub fn mock_package(amount: u64, unit: &str, price: f64, currency: &str) -> Value {
    json!({
        "amount": amount,
        "unit": unit,
        "server": [{
            "country": "US",
            "region": [{
                "name": "West",
                "subregion": [{
                    "name": "California",
                    "price": [{ "price": price, "currency": currency }]
                }]
            }]
        }]
    })
}

/// Wrap a single record in the `{ "data": ... }` envelope
pub fn data_body(data: Value) -> Value {
    json!({ "data": data })
}

/// Wrap records in a paginated list envelope
pub fn list_body(items: Vec<Value>, page: u32, limit: u32, total_items: u64) -> Value {
    let total_pages = total_items.div_ceil(u64::from(limit.max(1)));

    json!({
        "data": items,
        "pagination": {
            "currentPage": page,
            "limit": limit,
            "totalItems": total_items,
            "totalPages": total_pages
        }
    })
}

/// Error body carrying a server-provided message
pub fn error_body(message: &str) -> Value {
    json!({ "message": message })
}
