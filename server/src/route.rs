use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::AppModule;

use self::lesson::LessonRouter;
use self::order::OrderRouter;

mod lesson;
mod order;

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to ActivityHive Backend!" }))
}

pub fn router(app: AppModule, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route_lesson()
        .route_order()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app)
}
