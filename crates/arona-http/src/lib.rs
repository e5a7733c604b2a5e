//! arona-http - HTTP-backed dashboard API client.

mod api;
mod client;

pub use api::HttpApi;
pub use client::HttpClient;
