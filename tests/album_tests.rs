//! Album flow against a canned Flickr server: populate, paginate, replace.

mod common;

use diesel::prelude::*;
use virtual_tourist::db::repository;
use virtual_tourist::db::schema::photos;
use virtual_tourist::ops::{albums, pins};
use virtual_tourist::Error;

#[tokio::test]
async fn first_album_fetch_persists_metadata_and_advances_the_cursor() {
    let base_url = common::serve_responses(vec![(
        200,
        common::search_body(
            5,
            "123",
            &[
                ("f-1", "Eiffel Tower", "http://example.invalid/f-1.jpg"),
                ("f-2", "Louvre", "http://example.invalid/f-2.jpg"),
            ],
        ),
    )]);
    let env = common::test_env_with_base_url(&base_url);

    let pin = pins::drop_pin(&env.state, 48.86, 2.35).unwrap();
    let album = albums::get_album(&env.state, &pin.id).await.unwrap();

    assert_eq!(album.len(), 2);
    let ids: Vec<&str> = album.iter().map(|p| p.flickr_id.as_str()).collect();
    assert!(ids.contains(&"f-1") && ids.contains(&"f-2"));
    assert!(album.iter().all(|p| p.pin_id == pin.id));

    // Cursor moved from page 1 to page 2.
    let pin = pins::get_pin(&env.state, &pin.id).unwrap().unwrap();
    assert_eq!(pin.flickr_page, 2);
}

#[tokio::test]
async fn second_album_fetch_reads_the_store_not_the_network() {
    // Exactly one reply: a second search would never complete.
    let base_url = common::serve_responses(vec![(
        200,
        common::search_body(2, "1", &[("f-9", "Shibuya", "http://example.invalid/f-9.jpg")]),
    )]);
    let env = common::test_env_with_base_url(&base_url);

    let pin = pins::drop_pin(&env.state, 35.68, 139.69).unwrap();
    let first = albums::get_album(&env.state, &pin.id).await.unwrap();
    let second = albums::get_album(&env.state, &pin.id).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].id, second[0].id);

    // Still page 2: only one search ran.
    let pin = pins::get_pin(&env.state, &pin.id).unwrap().unwrap();
    assert_eq!(pin.flickr_page, 2);
}

#[tokio::test]
async fn a_result_page_is_capped_at_fifteen_photos() {
    let ids: Vec<String> = (0..20).map(|n| format!("cap-{}", n)).collect();
    let urls: Vec<String> = (0..20)
        .map(|n| format!("http://example.invalid/cap-{}.jpg", n))
        .collect();
    let entries: Vec<(&str, &str, &str)> = ids
        .iter()
        .zip(&urls)
        .map(|(id, url)| (id.as_str(), "crowded page", url.as_str()))
        .collect();
    let base_url = common::serve_responses(vec![(200, common::search_body(1, "20", &entries))]);
    let env = common::test_env_with_base_url(&base_url);

    let pin = pins::drop_pin(&env.state, 41.9, 12.5).unwrap();
    let album = albums::get_album(&env.state, &pin.id).await.unwrap();

    assert_eq!(album.len(), 15);
    // The first fifteen entries, in result order.
    assert!(album.iter().all(|p| p.flickr_id.starts_with("cap-")));
    assert!(!album.iter().any(|p| p.flickr_id == "cap-15"));
}

#[tokio::test]
async fn an_out_of_range_cursor_is_clamped_to_the_page_limit() {
    let (base_url, requests) = common::serve_recording(vec![(
        200,
        common::search_body(50, "5000", &[("deep-1", "Deep", "http://example.invalid/deep-1.jpg")]),
    )]);
    let env = common::test_env_with_base_url(&base_url);

    let pin = pins::drop_pin(&env.state, 59.33, 18.07).unwrap();
    let mut conn = env.state.db.get().unwrap();
    repository::set_pin_flickr_page(&mut conn, &pin.id, 99).unwrap();
    drop(conn);

    let pin = pins::get_pin(&env.state, &pin.id).unwrap().unwrap();
    albums::refresh_album(&env.state, &pin).await.unwrap();

    // The stale cursor was clamped to page 40 on the wire...
    let query = requests.recv().unwrap();
    assert!(query.contains("page=40"), "unexpected query: {}", query);

    // ...and the cursor wrapped back to the start of the range.
    let pin = pins::get_pin(&env.state, &pin.id).unwrap().unwrap();
    assert_eq!(pin.flickr_page, 1);
}

#[tokio::test]
async fn a_zero_page_request_is_clamped_up_to_one() {
    let (base_url, requests) =
        common::serve_recording(vec![(200, common::search_body(1, "0", &[]))]);
    let client = virtual_tourist::flickr::FlickrClient::with_base_url("test-key", &base_url);
    let bbox = virtual_tourist::flickr::BoundingBox::around(0.0, 0.0).unwrap();

    client.search(&bbox, 0).await.unwrap();

    let query = requests.recv().unwrap();
    assert!(query.contains("page=1"), "unexpected query: {}", query);
}

#[tokio::test]
async fn an_empty_result_page_is_not_an_error() {
    let base_url = common::serve_responses(vec![(200, common::search_body(0, "0", &[]))]);
    let env = common::test_env_with_base_url(&base_url);

    let pin = pins::drop_pin(&env.state, 0.0, -140.0).unwrap();
    let album = albums::get_album(&env.state, &pin.id).await.unwrap();
    assert!(album.is_empty());

    // Single usable page: cursor wraps back to 1.
    let pin = pins::get_pin(&env.state, &pin.id).unwrap().unwrap();
    assert_eq!(pin.flickr_page, 1);
}

#[tokio::test]
async fn new_collection_replaces_rows_and_purges_artifacts() {
    let base_url = common::serve_responses(vec![
        (
            200,
            common::search_body(3, "40", &[("old-1", "Old", "http://example.invalid/old-1.jpg")]),
        ),
        (
            200,
            common::search_body(3, "40", &[("new-1", "New", "http://example.invalid/new-1.jpg")]),
        ),
    ]);
    let env = common::test_env_with_base_url(&base_url);

    let pin = pins::drop_pin(&env.state, 51.5, -0.12).unwrap();
    let old = albums::get_album(&env.state, &pin.id).await.unwrap();
    assert_eq!(old[0].flickr_id, "old-1");

    // Pretend the old photo was resolved at some point.
    env.state.images.write_to_disk("old-1", &[7, 7]).unwrap();

    let fresh = albums::new_collection(&env.state, &pin.id).await.unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].flickr_id, "new-1");

    // Old row and disk copy are gone.
    let mut conn = env.state.db.get().unwrap();
    let count: i64 = photos::table
        .filter(photos::pin_id.eq(&pin.id))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 1);
    assert!(!env.state.images.disk_path("old-1").exists());

    // Two searches ran: page 1 then page 2, cursor now at 3.
    let pin = pins::get_pin(&env.state, &pin.id).unwrap().unwrap();
    assert_eq!(pin.flickr_page, 3);
}

#[tokio::test]
async fn a_failed_search_surfaces_the_api_message() {
    let body = br#"{"stat": "fail", "code": 100, "message": "Invalid API Key"}"#.to_vec();
    let base_url = common::serve_responses(vec![(200, body)]);
    let env = common::test_env_with_base_url(&base_url);

    let pin = pins::drop_pin(&env.state, 40.71, -74.0).unwrap();
    let err = albums::get_album(&env.state, &pin.id).await.unwrap_err();
    match err {
        Error::FlickrResponse(detail) => assert!(detail.contains("Invalid API Key")),
        other => panic!("expected FlickrResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn fetching_an_album_for_a_missing_pin_is_not_found() {
    let env = common::test_env();
    let err = albums::get_album(&env.state, "ghost").await.unwrap_err();
    assert!(matches!(err, Error::NotFound("pin", _)));
}

#[tokio::test]
async fn entries_without_an_image_url_are_skipped() {
    let body = serde_json::json!({
        "photos": {
            "page": 1, "pages": 1, "perpage": 100, "total": "2",
            "photo": [
                {"id": "has-url", "title": "ok", "url_m": "http://example.invalid/a.jpg"},
                {"id": "no-url", "title": "missing size"}
            ]
        },
        "stat": "ok"
    })
    .to_string()
    .into_bytes();
    let base_url = common::serve_responses(vec![(200, body)]);
    let env = common::test_env_with_base_url(&base_url);

    let pin = pins::drop_pin(&env.state, -33.86, 151.2).unwrap();
    let album = albums::get_album(&env.state, &pin.id).await.unwrap();
    assert_eq!(album.len(), 1);
    assert_eq!(album[0].flickr_id, "has-url");
}

#[test]
fn delete_photos_for_pin_only_touches_that_pin() {
    let env = common::test_env();
    let keep = pins::drop_pin(&env.state, 1.0, 1.0).unwrap();
    let purge = pins::drop_pin(&env.state, 2.0, 2.0).unwrap();

    let mut conn = env.state.db.get().unwrap();
    for (pin_id, flickr_id) in [(&keep.id, "k-1"), (&purge.id, "p-1")] {
        repository::create_photo(
            &mut conn,
            &virtual_tourist::db::models::NewPhoto {
                id: format!("row-{}", flickr_id),
                pin_id: pin_id.clone(),
                flickr_id: flickr_id.to_string(),
                url: format!("http://example.invalid/{}.jpg", flickr_id),
                title: flickr_id.to_string(),
            },
        )
        .unwrap();
    }

    repository::delete_photos_for_pin(&mut conn, &purge.id).unwrap();

    assert_eq!(repository::get_photos_by_pin(&mut conn, &keep.id).unwrap().len(), 1);
    assert!(repository::get_photos_by_pin(&mut conn, &purge.id).unwrap().is_empty());
}
