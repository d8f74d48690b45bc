#![allow(dead_code)]

//! Shared fixtures: a scratch AppState and a canned-response HTTP server
//! standing in for Flickr.

use std::io::Cursor;
use std::sync::mpsc;

use tempfile::TempDir;
use virtual_tourist::{AppState, Config};

pub struct TestEnv {
    pub state: AppState,
    // Keeps the scratch data dir alive for the test's duration.
    _tmp: TempDir,
}

/// AppState over a temp data dir, talking to the real Flickr endpoint
/// (for tests that never touch the network).
pub fn test_env() -> TestEnv {
    test_env_with_base_url(virtual_tourist::flickr::BASE_URL)
}

/// AppState over a temp data dir, with searches pointed at `base_url`.
pub fn test_env_with_base_url(base_url: &str) -> TestEnv {
    virtual_tourist::init_logging();
    let tmp = tempfile::tempdir().expect("create temp dir");
    let mut config = Config::with_data_dir(tmp.path());
    config.api_key = "test-key".to_string();
    config.base_url = base_url.to_string();
    let state = AppState::new(&config).expect("init app state");
    TestEnv { state, _tmp: tmp }
}

/// Serve the given (status, body) replies in order on a local port, then
/// stop answering. Returns the server's base URL.
pub fn serve_responses(replies: Vec<(u16, Vec<u8>)>) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind test server");
    let addr = server.server_addr().to_ip().expect("tcp listen addr");

    std::thread::spawn(move || {
        for (status, body) in replies {
            let request = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let response = tiny_http::Response::from_data(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    format!("http://{}", addr)
}

/// Like [`serve_responses`], but also reports each request's path and query
/// string through the returned channel.
pub fn serve_recording(replies: Vec<(u16, Vec<u8>)>) -> (String, mpsc::Receiver<String>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind test server");
    let addr = server.server_addr().to_ip().expect("tcp listen addr");
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        for (status, body) in replies {
            let request = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let _ = tx.send(request.url().to_string());
            let response = tiny_http::Response::from_data(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    (format!("http://{}", addr), rx)
}

/// A Flickr search response body with the given photo entries.
/// Entries are (id, title, url_m).
pub fn search_body(pages: i32, total: &str, entries: &[(&str, &str, &str)]) -> Vec<u8> {
    let photo: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, title, url)| {
            serde_json::json!({
                "id": id,
                "owner": "tester",
                "title": title,
                "url_m": url,
            })
        })
        .collect();

    serde_json::json!({
        "photos": {
            "page": 1,
            "pages": pages,
            "perpage": 100,
            "total": total,
            "photo": photo,
        },
        "stat": "ok",
    })
    .to_string()
    .into_bytes()
}

/// A small but real PNG, for the paths that validate downloaded bytes.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([210, 80, 40]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode test png");
    buf.into_inner()
}
