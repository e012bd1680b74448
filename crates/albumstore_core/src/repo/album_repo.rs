//! Album record store.
//!
//! # Responsibility
//! - List, create and delete album records in `albumtable`.
//!
//! # Invariants
//! - Create is insert-if-absent: of two concurrent creators exactly one wins.
//! - Delete is delete-if-present and removes the embedded image collection
//!   with the record.

use crate::cluster::ClusterHandle;
use crate::error::StoreResult;
use crate::repo::existence::{album_conflict, album_exists, album_not_found};
use crate::repo::observe;

/// Repository interface for album records.
pub trait AlbumStore {
    /// Returns every stored album name in backing iteration order.
    fn list_albums(&self) -> StoreResult<Vec<String>>;
    fn album_exists(&self, album: &str) -> StoreResult<bool>;
    /// Creates an album with an empty image collection.
    fn create_album(&self, album: &str) -> StoreResult<()>;
    /// Deletes an album together with its images.
    fn delete_album(&self, album: &str) -> StoreResult<()>;
}

/// Cluster-backed album store.
#[derive(Debug, Clone)]
pub struct ClusterAlbumStore {
    cluster: ClusterHandle,
}

impl ClusterAlbumStore {
    pub fn new(cluster: ClusterHandle) -> Self {
        Self { cluster }
    }
}

impl AlbumStore for ClusterAlbumStore {
    fn list_albums(&self) -> StoreResult<Vec<String>> {
        observe("album_list", || {
            let session = self.cluster.session()?;
            let mut stmt = session.prepare("SELECT albname FROM albumtable;")?;
            let albums = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(albums)
        })
    }

    fn album_exists(&self, album: &str) -> StoreResult<bool> {
        observe("album_exists", || {
            let session = self.cluster.session()?;
            album_exists(&session, album)
        })
    }

    fn create_album(&self, album: &str) -> StoreResult<()> {
        observe("album_create", || {
            let session = self.cluster.session()?;
            if album_exists(&session, album)? {
                return Err(album_conflict(album));
            }

            let inserted = session.execute(
                "INSERT INTO albumtable (albname, imagelist) VALUES (?1, '[]')
                 ON CONFLICT(albname) DO NOTHING;",
                [album],
            )?;
            // Lost the race to a concurrent creator.
            if inserted == 0 {
                return Err(album_conflict(album));
            }
            Ok(())
        })
    }

    fn delete_album(&self, album: &str) -> StoreResult<()> {
        observe("album_delete", || {
            let session = self.cluster.session()?;
            if !album_exists(&session, album)? {
                return Err(album_not_found(album));
            }

            let deleted = session.execute("DELETE FROM albumtable WHERE albname = ?1;", [album])?;
            if deleted == 0 {
                return Err(album_not_found(album));
            }
            Ok(())
        })
    }
}
