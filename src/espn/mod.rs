//! ESPN Fantasy Football upstream integration: URL/view definitions, the
//! cache-fronted client, and typed document schemas.

pub mod client;
pub mod http;
pub mod types;

pub use client::EspnClient;
pub use http::View;
