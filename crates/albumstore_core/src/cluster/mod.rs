//! Cluster handle, per-operation sessions and schema bootstrap.
//!
//! # Responsibility
//! - Hold the process-wide, read-only cluster configuration.
//! - Open one session per store operation against the album keyspace.
//! - Create the keyspace and record set once at startup.
//!
//! # Invariants
//! - `ClusterHandle` is never mutated after construction.
//! - Sessions never create a missing keyspace; only `bootstrap` does.
//! - Schema version is tracked via `PRAGMA user_version`.

use crate::config::ClusterConfig;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod migrations;
mod open;

pub use open::bootstrap;

/// Logical namespace holding the album record set.
pub const KEYSPACE: &str = "albumspace";
/// Record set keyed by album name.
pub const ALBUM_TABLE: &str = "albumtable";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    KeyspaceMissing(PathBuf),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "cluster host `{}` is unusable: {source}", path.display())
            }
            Self::KeyspaceMissing(path) => write!(
                f,
                "keyspace `{KEYSPACE}` not found at `{}`; bootstrap has not run",
                path.display()
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "keyspace schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::KeyspaceMissing(_) | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Shared, immutable connection factory for the album cluster.
///
/// Cloning is cheap; all clones share one configuration.
#[derive(Debug, Clone)]
pub struct ClusterHandle {
    config: Arc<ClusterConfig>,
}

impl ClusterHandle {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Path of the keyspace file under the cluster host.
    pub fn keyspace_path(&self) -> PathBuf {
        self.config.host.join(format!("{KEYSPACE}.db"))
    }

    /// Opens a session scoped to the caller; dropping it releases the connection.
    pub fn session(&self) -> DbResult<Session> {
        open::open_session(self)
    }
}

/// One connection to the album keyspace, owned by a single operation.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
}

impl Session {
    fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn keyspace_path(&self) -> Option<&Path> {
        self.conn.path().map(Path::new)
    }
}

impl Deref for Session {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
