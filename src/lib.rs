//! Admin client for a gaming-services marketplace.
//!
//! [`client`] holds the HTTP client, the query cache, the per-resource stores and the currency
//! pricing editor; [`model`] holds the wire types shared by all of them.

pub mod client;
pub mod model;
