//! Album and image stores over the cluster.
//!
//! # Responsibility
//! - Define store contracts consumed by the service layer.
//! - Keep SQL and list-column details inside the persistence boundary.
//!
//! # Invariants
//! - Every operation opens its own session and releases it on all paths.
//! - Existence is checked before every mutation; album create/delete are
//!   additionally guarded by conditional writes.
//! - Failures are never retried here.

pub mod album_repo;
pub mod existence;
pub mod image_repo;

use crate::error::{ErrorKind, StoreResult};
use log::{error, info, warn};
use std::time::Instant;

/// Runs one store operation and emits its metadata-only log line.
pub(crate) fn observe<T>(event: &'static str, op: impl FnOnce() -> StoreResult<T>) -> StoreResult<T> {
    let started_at = Instant::now();
    let result = op();
    let duration_ms = started_at.elapsed().as_millis();

    match &result {
        Ok(_) => info!("event={event} module=repo status=ok duration_ms={duration_ms}"),
        Err(err) if err.kind() == ErrorKind::Internal => error!(
            "event={event} module=repo status=error duration_ms={duration_ms} error_code={} error={err}",
            err.kind().as_str()
        ),
        Err(err) => warn!(
            "event={event} module=repo status=rejected duration_ms={duration_ms} error_code={}",
            err.kind().as_str()
        ),
    }

    result
}
