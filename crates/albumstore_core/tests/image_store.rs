use albumstore_core::{
    bootstrap, AlbumStore, ClusterAlbumStore, ClusterConfig, ClusterHandle, ClusterImageStore,
    ErrorKind, ImageStore, StoreError,
};
use tempfile::TempDir;

fn stores() -> (TempDir, ClusterHandle, ClusterAlbumStore, ClusterImageStore) {
    let dir = tempfile::tempdir().unwrap();
    let cluster = ClusterHandle::new(ClusterConfig::new(dir.path()));
    bootstrap(&cluster).unwrap();
    let albums = ClusterAlbumStore::new(cluster.clone());
    let images = ClusterImageStore::new(cluster.clone());
    (dir, cluster, albums, images)
}

fn set_raw_imagelist(cluster: &ClusterHandle, album: &str, json: &str) {
    let session = cluster.session().unwrap();
    session
        .execute(
            "UPDATE albumtable SET imagelist = ?2 WHERE albname = ?1;",
            [album, json],
        )
        .unwrap();
}

#[test]
fn added_images_are_listed_in_append_order() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("vacation").unwrap();

    images.add_image("vacation", "sunset.jpg").unwrap();
    images.add_image("vacation", "beach.png").unwrap();
    images.add_image("vacation", "arrival.jpg").unwrap();

    assert_eq!(
        images.list_images("vacation").unwrap(),
        vec![
            "sunset.jpg".to_string(),
            "beach.png".to_string(),
            "arrival.jpg".to_string()
        ]
    );
}

#[test]
fn list_images_of_empty_album_is_empty() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("empty").unwrap();

    assert!(images.list_images("empty").unwrap().is_empty());
}

#[test]
fn list_images_of_missing_album_is_not_found() {
    let (_dir, _cluster, _albums, images) = stores();

    let err = images.list_images("nowhere").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn get_image_returns_name_or_not_found() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("vacation").unwrap();
    images.add_image("vacation", "sunset.jpg").unwrap();

    assert_eq!(
        images.get_image("vacation", "sunset.jpg").unwrap(),
        "sunset.jpg"
    );

    let err = images.get_image("vacation", "moon.jpg").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(err.to_string(), "Image moon.jpg not found in album vacation");

    let err = images.get_image("elsewhere", "sunset.jpg").unwrap_err();
    assert_eq!(err.to_string(), "Album elsewhere not found");
}

#[test]
fn adding_existing_image_conflicts_without_duplicating() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("vacation").unwrap();
    images.add_image("vacation", "sunset.jpg").unwrap();

    let err = images.add_image("vacation", "sunset.jpg").unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
    assert_eq!(err.status_code(), 409);
    assert_eq!(images.list_images("vacation").unwrap().len(), 1);
}

#[test]
fn adding_to_missing_album_is_not_found_never_conflict() {
    let (_dir, _cluster, _albums, images) = stores();

    let err = images.add_image("missing-album", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn same_image_name_may_live_in_different_albums() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("a").unwrap();
    albums.create_album("b").unwrap();

    images.add_image("a", "shared.jpg").unwrap();
    images.add_image("b", "shared.jpg").unwrap();

    assert!(images.image_exists("a", "shared.jpg").unwrap());
    assert!(images.image_exists("b", "shared.jpg").unwrap());
}

#[test]
fn delete_image_removes_only_that_name() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("vacation").unwrap();
    images.add_image("vacation", "sunset.jpg").unwrap();
    images.add_image("vacation", "beach.png").unwrap();

    images.delete_image("vacation", "sunset.jpg").unwrap();

    assert_eq!(
        images.list_images("vacation").unwrap(),
        vec!["beach.png".to_string()]
    );
    assert!(matches!(
        images.get_image("vacation", "sunset.jpg").unwrap_err(),
        StoreError::NotFound(_)
    ));
}

#[test]
fn delete_missing_image_or_album_is_not_found() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("vacation").unwrap();

    let err = images.delete_image("vacation", "never.jpg").unwrap_err();
    assert_eq!(err.to_string(), "Image never.jpg not found in album vacation");

    let err = images.delete_image("ghost", "never.jpg").unwrap_err();
    assert_eq!(err.to_string(), "Album ghost not found");
}

#[test]
fn delete_image_removes_every_duplicate_entry() {
    let (_dir, cluster, albums, images) = stores();
    albums.create_album("legacy").unwrap();
    set_raw_imagelist(&cluster, "legacy", r#"["a.jpg","dup.jpg","b.jpg","dup.jpg"]"#);

    assert_eq!(images.list_images("legacy").unwrap().len(), 4);

    images.delete_image("legacy", "dup.jpg").unwrap();
    assert_eq!(
        images.list_images("legacy").unwrap(),
        vec!["a.jpg".to_string(), "b.jpg".to_string()]
    );
}

#[test]
fn deleting_album_cascades_to_images() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("vacation").unwrap();
    images.add_image("vacation", "sunset.jpg").unwrap();

    albums.delete_album("vacation").unwrap();

    assert!(matches!(
        images.list_images("vacation").unwrap_err(),
        StoreError::NotFound(_)
    ));
    assert!(!images.image_exists("vacation", "sunset.jpg").unwrap());
}

#[test]
fn corrupt_imagelist_is_internal_error() {
    let (_dir, cluster, albums, images) = stores();
    albums.create_album("broken").unwrap();
    set_raw_imagelist(&cluster, "broken", r#"{"not":"a list"}"#);

    let err = images.list_images("broken").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[test]
fn names_with_json_metacharacters_are_stored_verbatim() {
    let (_dir, _cluster, albums, images) = stores();
    albums.create_album("quotes").unwrap();

    images.add_image("quotes", "say \"cheese\".jpg").unwrap();
    images.add_image("quotes", "back\\slash.png").unwrap();

    assert!(images.image_exists("quotes", "say \"cheese\".jpg").unwrap());
    assert_eq!(
        images.list_images("quotes").unwrap(),
        vec!["say \"cheese\".jpg".to_string(), "back\\slash.png".to_string()]
    );
    images.delete_image("quotes", "back\\slash.png").unwrap();
    assert_eq!(images.list_images("quotes").unwrap().len(), 1);
}
