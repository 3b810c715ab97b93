//! Root greeting

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
pub struct RootResponse {
    pub msg: &'static str,
}

/// GET /
async fn root() -> Json<RootResponse> {
    Json(RootResponse { msg: "Hello World" })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
