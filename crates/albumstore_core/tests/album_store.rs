use albumstore_core::{
    bootstrap, AlbumStore, ClusterAlbumStore, ClusterConfig, ClusterHandle, ClusterImageStore,
    ImageStore, StoreError,
};
use tempfile::TempDir;

fn cluster() -> (TempDir, ClusterHandle) {
    let dir = tempfile::tempdir().unwrap();
    let cluster = ClusterHandle::new(ClusterConfig::new(dir.path()));
    bootstrap(&cluster).unwrap();
    (dir, cluster)
}

#[test]
fn list_is_empty_on_fresh_keyspace() {
    let (_dir, cluster) = cluster();
    let albums = ClusterAlbumStore::new(cluster);

    assert!(albums.list_albums().unwrap().is_empty());
}

#[test]
fn create_then_list_contains_album() {
    let (_dir, cluster) = cluster();
    let albums = ClusterAlbumStore::new(cluster);

    albums.create_album("vacation").unwrap();
    albums.create_album("family").unwrap();

    let mut listed = albums.list_albums().unwrap();
    listed.sort();
    assert_eq!(listed, vec!["family".to_string(), "vacation".to_string()]);
    assert!(albums.album_exists("vacation").unwrap());
    assert!(!albums.album_exists("work").unwrap());
}

#[test]
fn duplicate_create_conflicts_and_keeps_single_entry() {
    let (_dir, cluster) = cluster();
    let albums = ClusterAlbumStore::new(cluster);

    albums.create_album("vacation").unwrap();
    let err = albums.create_album("vacation").unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
    assert_eq!(err.to_string(), "Album vacation already exists");

    let listed = albums.list_albums().unwrap();
    assert_eq!(listed.iter().filter(|name| *name == "vacation").count(), 1);
}

#[test]
fn duplicate_create_keeps_existing_images() {
    let (_dir, cluster) = cluster();
    let albums = ClusterAlbumStore::new(cluster.clone());
    let images = ClusterImageStore::new(cluster);

    albums.create_album("vacation").unwrap();
    images.add_image("vacation", "sunset.jpg").unwrap();
    albums.create_album("vacation").unwrap_err();

    assert_eq!(
        images.list_images("vacation").unwrap(),
        vec!["sunset.jpg".to_string()]
    );
}

#[test]
fn delete_never_created_album_is_not_found() {
    let (_dir, cluster) = cluster();
    let albums = ClusterAlbumStore::new(cluster);

    let err = albums.delete_album("ghost").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "Album ghost not found");
}

#[test]
fn delete_removes_album_and_allows_recreate() {
    let (_dir, cluster) = cluster();
    let albums = ClusterAlbumStore::new(cluster.clone());
    let images = ClusterImageStore::new(cluster);

    albums.create_album("vacation").unwrap();
    images.add_image("vacation", "sunset.jpg").unwrap();
    albums.delete_album("vacation").unwrap();

    assert!(albums.list_albums().unwrap().is_empty());
    assert!(matches!(
        albums.delete_album("vacation").unwrap_err(),
        StoreError::NotFound(_)
    ));

    albums.create_album("vacation").unwrap();
    assert!(images.list_images("vacation").unwrap().is_empty());
}

#[test]
fn names_are_case_sensitive_keys() {
    let (_dir, cluster) = cluster();
    let albums = ClusterAlbumStore::new(cluster);

    albums.create_album("Trip").unwrap();
    albums.create_album("trip").unwrap();
    assert_eq!(albums.list_albums().unwrap().len(), 2);
}
