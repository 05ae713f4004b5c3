//! Film review catalog proxied onto the servicedb HTTP API.

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod storage;

pub use catalog::{CatalogError, CatalogService};
pub use domain::{EntityRef, Review, ValidationError};
pub use storage::{ReviewStore, ServiceDbClient, UpstreamError};
