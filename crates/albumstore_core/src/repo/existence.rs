//! Existence predicates and the failure messages built from them.
//!
//! Predicates only answer yes/no. Callers pick the failure helper that
//! matches the operation they are performing.

use crate::error::{StoreError, StoreResult};
use rusqlite::Connection;

/// Returns whether an album record with this key is stored.
pub fn album_exists(conn: &Connection, album: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM albumtable WHERE albname = ?1);",
        [album],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether `image` is a member of `album`'s collection.
///
/// An absent album yields `false`; callers check the album first.
pub fn image_exists(conn: &Connection, album: &str, image: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM albumtable, json_each(albumtable.imagelist)
            WHERE albumtable.albname = ?1 AND json_each.value = ?2
        );",
        [album, image],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub fn album_not_found(album: &str) -> StoreError {
    StoreError::NotFound(format!("Album {album} not found"))
}

pub fn album_conflict(album: &str) -> StoreError {
    StoreError::Conflict(format!("Album {album} already exists"))
}

pub fn image_not_found(album: &str, image: &str) -> StoreError {
    StoreError::NotFound(format!("Image {image} not found in album {album}"))
}

pub fn image_conflict(album: &str, image: &str) -> StoreError {
    StoreError::Conflict(format!("Image {image} already exists in album {album}"))
}
