//! Core traits at the backend and storage seams.

mod api;
mod store;

pub use api::DashboardApi;
pub use store::TokenStore;
