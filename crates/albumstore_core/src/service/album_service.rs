//! Album use-case service.
//!
//! # Responsibility
//! - Provide the entry points for every album/image operation.
//! - Reject malformed identifiers before any store call.
//! - Produce confirmation texts for mutating operations.
//!
//! # Invariants
//! - Service APIs never bypass store existence/conflict contracts.
//! - Service layer remains storage-agnostic.

use crate::cluster::ClusterHandle;
use crate::error::StoreResult;
use crate::model::album::{validate_album_name, validate_image_name, Album};
use crate::repo::album_repo::{AlbumStore, ClusterAlbumStore};
use crate::repo::image_repo::{ClusterImageStore, ImageStore};

/// Use-case facade over album and image stores.
pub struct AlbumService<A: AlbumStore, I: ImageStore> {
    albums: A,
    images: I,
}

impl AlbumService<ClusterAlbumStore, ClusterImageStore> {
    /// Wires both stores to one shared cluster handle.
    pub fn from_cluster(cluster: &ClusterHandle) -> Self {
        Self::new(
            ClusterAlbumStore::new(cluster.clone()),
            ClusterImageStore::new(cluster.clone()),
        )
    }
}

impl<A: AlbumStore, I: ImageStore> AlbumService<A, I> {
    pub fn new(albums: A, images: I) -> Self {
        Self { albums, images }
    }

    pub fn list_albums(&self) -> StoreResult<Vec<String>> {
        self.albums.list_albums()
    }

    /// Creates an empty album and returns the confirmation text.
    pub fn create_album(&self, album: &str) -> StoreResult<String> {
        validate_album_name(album)?;
        self.albums.create_album(album)?;
        Ok(format!("Album {album} has been added"))
    }

    /// Deletes an album with all of its images.
    pub fn delete_album(&self, album: &str) -> StoreResult<String> {
        validate_album_name(album)?;
        self.albums.delete_album(album)?;
        Ok(format!("Album {album} has been deleted"))
    }

    pub fn list_images(&self, album: &str) -> StoreResult<Vec<String>> {
        validate_album_name(album)?;
        self.images.list_images(album)
    }

    /// Returns the album together with its collection.
    pub fn get_album(&self, album: &str) -> StoreResult<Album> {
        let images = self.list_images(album)?;
        Ok(Album {
            name: album.to_string(),
            images,
        })
    }

    pub fn get_image(&self, album: &str, image: &str) -> StoreResult<String> {
        validate_album_name(album)?;
        validate_image_name(image)?;
        self.images.get_image(album, image)
    }

    pub fn add_image(&self, album: &str, image: &str) -> StoreResult<String> {
        validate_album_name(album)?;
        validate_image_name(image)?;
        self.images.add_image(album, image)?;
        Ok(format!("Image {image} has been added to album {album}"))
    }

    pub fn delete_image(&self, album: &str, image: &str) -> StoreResult<String> {
        validate_album_name(album)?;
        validate_image_name(image)?;
        self.images.delete_image(album, image)?;
        Ok(format!("Image {image} has been deleted from album {album}"))
    }
}
