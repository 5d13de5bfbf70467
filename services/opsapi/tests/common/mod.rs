#![allow(dead_code)]

use axum::body::Body;
use axum::response::Response;
use http_body_util::BodyExt;

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse json body")
}
