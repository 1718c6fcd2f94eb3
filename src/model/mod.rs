//! Wire models shared by the resource client, the cache and the editor.
//!
//! Every type here mirrors the JSON the marketplace API speaks (camelCase on the wire).
//! Response DTOs carry the server-assigned `id`; payload types never do.

pub mod api;
pub mod currency;
pub mod game;
pub mod news;
pub mod payload;
pub mod service;
pub mod user;
