//! Session and bootstrap connection setup.
//!
//! # Invariants
//! - Every returned session carries the configured busy timeout.
//! - Bootstrap leaves the keyspace in WAL mode with all migrations applied.

use super::migrations::apply_migrations;
use super::{ClusterHandle, DbError, DbResult, Session};
use log::{debug, error, info};
use rusqlite::{Connection, OpenFlags};
use std::time::Instant;

pub(super) fn open_session(cluster: &ClusterHandle) -> DbResult<Session> {
    let started_at = Instant::now();
    let path = cluster.keyspace_path();

    if !path.is_file() {
        error!(
            "event=session_open module=cluster status=error duration_ms={} error_code=keyspace_missing",
            started_at.elapsed().as_millis()
        );
        return Err(DbError::KeyspaceMissing(path));
    }

    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(&path, flags)
        .and_then(|conn| {
            conn.busy_timeout(cluster.config().query_timeout)?;
            Ok(conn)
        })
        .map_err(|err| {
            error!(
                "event=session_open module=cluster status=error duration_ms={} error_code=session_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            DbError::from(err)
        })?;

    debug!(
        "event=session_open module=cluster status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(Session::new(conn))
}

/// Creates the keyspace and album record set if they do not exist.
///
/// Safe to call repeatedly. Failure here is fatal for the serving process.
///
/// # Side effects
/// - Creates the cluster host directory and keyspace file.
/// - Emits `bootstrap` logging events with duration and status.
pub fn bootstrap(cluster: &ClusterHandle) -> DbResult<()> {
    let started_at = Instant::now();
    info!("event=bootstrap module=cluster status=start");

    match bootstrap_keyspace(cluster) {
        Ok(()) => {
            info!(
                "event=bootstrap module=cluster status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=bootstrap module=cluster status=error duration_ms={} error_code=bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_keyspace(cluster: &ClusterHandle) -> DbResult<()> {
    let host = &cluster.config().host;
    std::fs::create_dir_all(host).map_err(|source| DbError::Io {
        path: host.clone(),
        source,
    })?;

    let mut conn = Connection::open(cluster.keyspace_path())?;
    conn.busy_timeout(cluster.config().query_timeout)?;
    // WAL lets concurrent readers proceed while one writer holds the lock.
    let _mode: String = conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    apply_migrations(&mut conn)
}
