//! Image collection store.
//!
//! # Responsibility
//! - Read and mutate the `imagelist` column nested in an album record.
//!
//! # Invariants
//! - Every operation requires the owning album to be present.
//! - Append is conditional on non-membership at apply time, so concurrent
//!   adds of one name cannot produce duplicates.
//! - Remove deletes every occurrence of the name.

use crate::cluster::ClusterHandle;
use crate::error::{StoreError, StoreResult};
use crate::repo::existence::{
    album_exists, album_not_found, image_conflict, image_exists, image_not_found,
};
use crate::repo::observe;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

/// Repository interface for the image collection of an album.
pub trait ImageStore {
    /// Returns the album's collection as stored.
    fn list_images(&self, album: &str) -> StoreResult<Vec<String>>;
    fn image_exists(&self, album: &str, image: &str) -> StoreResult<bool>;
    /// Returns the matched image name.
    fn get_image(&self, album: &str, image: &str) -> StoreResult<String>;
    fn add_image(&self, album: &str, image: &str) -> StoreResult<()>;
    fn delete_image(&self, album: &str, image: &str) -> StoreResult<()>;
}

/// Cluster-backed image store.
#[derive(Debug, Clone)]
pub struct ClusterImageStore {
    cluster: ClusterHandle,
}

impl ClusterImageStore {
    pub fn new(cluster: ClusterHandle) -> Self {
        Self { cluster }
    }
}

impl ImageStore for ClusterImageStore {
    fn list_images(&self, album: &str) -> StoreResult<Vec<String>> {
        observe("image_list", || {
            let session = self.cluster.session()?;
            load_image_list(&session, album)?.ok_or_else(|| album_not_found(album))
        })
    }

    fn image_exists(&self, album: &str, image: &str) -> StoreResult<bool> {
        observe("image_exists", || {
            let session = self.cluster.session()?;
            image_exists(&session, album, image)
        })
    }

    fn get_image(&self, album: &str, image: &str) -> StoreResult<String> {
        observe("image_get", || {
            let session = self.cluster.session()?;
            if !album_exists(&session, album)? {
                return Err(album_not_found(album));
            }
            if !image_exists(&session, album, image)? {
                return Err(image_not_found(album, image));
            }
            Ok(image.to_string())
        })
    }

    fn add_image(&self, album: &str, image: &str) -> StoreResult<()> {
        observe("image_add", || {
            let session = self.cluster.session()?;
            if !album_exists(&session, album)? {
                return Err(album_not_found(album));
            }
            if image_exists(&session, album, image)? {
                return Err(image_conflict(album, image));
            }

            let appended = session.execute(
                "UPDATE albumtable
                 SET imagelist = json_insert(imagelist, '$[#]', ?2)
                 WHERE albname = ?1
                   AND NOT EXISTS (
                       SELECT 1 FROM json_each(albumtable.imagelist)
                       WHERE json_each.value = ?2
                   );",
                [album, image],
            )?;
            if appended == 0 {
                // Precondition changed between check and apply.
                return Err(if album_exists(&session, album)? {
                    image_conflict(album, image)
                } else {
                    album_not_found(album)
                });
            }
            Ok(())
        })
    }

    fn delete_image(&self, album: &str, image: &str) -> StoreResult<()> {
        observe("image_delete", || {
            let mut session = self.cluster.session()?;
            let tx = session.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let Some(images) = load_image_list(&tx, album)? else {
                return Err(album_not_found(album));
            };
            if !image_exists(&tx, album, image)? {
                return Err(image_not_found(album, image));
            }

            let remaining: Vec<&String> = images.iter().filter(|name| *name != image).collect();
            let encoded = serde_json::to_string(&remaining).map_err(|err| {
                StoreError::internal("failed to encode imagelist", Some(Box::new(err)))
            })?;
            tx.execute(
                "UPDATE albumtable SET imagelist = ?2 WHERE albname = ?1;",
                [album, encoded.as_str()],
            )?;
            tx.commit()?;
            Ok(())
        })
    }
}

/// Reads and decodes the collection; `None` when the album is absent.
fn load_image_list(conn: &Connection, album: &str) -> StoreResult<Option<Vec<String>>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT imagelist FROM albumtable WHERE albname = ?1;",
            [album],
            |row| row.get(0),
        )
        .optional()?;

    raw.map(|text| {
        serde_json::from_str::<Vec<String>>(&text).map_err(|err| {
            StoreError::internal(
                "invalid persisted imagelist in albumtable",
                Some(Box::new(err)),
            )
        })
    })
    .transpose()
}
