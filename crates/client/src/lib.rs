//! Client-side data layer for the Dogland API.
//!
//! [`api::ApiClient`] speaks the REST envelope; [`hook::ResourceHook`]
//! caches one list resource, filters it locally and keeps a persisted set
//! of favorites in sync through a [`favorites::FavoritesStore`].

pub mod api;
pub mod config;
pub mod error;
pub mod favorites;
pub mod hook;
pub mod models;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, FavoritesError};
pub use hook::{FetchState, ResourceHook};
