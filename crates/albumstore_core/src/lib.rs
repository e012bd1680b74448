//! Persistence and domain layer for named albums of named images.
//! This crate owns existence, conflict and collection-mutation rules.

pub mod cluster;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use cluster::{bootstrap, ClusterHandle, DbError, Session};
pub use config::{ClusterConfig, ConfigError, LogSettings};
pub use error::{ErrorBody, ErrorKind, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::album::{Album, NameValidationError};
pub use repo::album_repo::{AlbumStore, ClusterAlbumStore};
pub use repo::image_repo::{ClusterImageStore, ImageStore};
pub use service::album_service::AlbumService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
