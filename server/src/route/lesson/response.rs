use application::transfer::LessonDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct LessonResponse {
    id: Uuid,
    subject: String,
    title: String,
    location: String,
    price: f64,
    category: String,
    description: String,
    space: i32,
}

impl From<LessonDto> for LessonResponse {
    fn from(value: LessonDto) -> Self {
        Self {
            id: value.id,
            subject: value.subject,
            title: value.title,
            location: value.location,
            price: value.price,
            category: value.category,
            description: value.description,
            space: value.space,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    success: bool,
    message: &'static str,
}

impl IntoResponse for UpdatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<Vec<LessonDto>> for Presenter {
    type To = Json<Vec<LessonResponse>>;
    fn emit(&self, input: Vec<LessonDto>) -> Self::To {
        Json(input.into_iter().map(LessonResponse::from).collect())
    }
}

impl Exhaust<()> for Presenter {
    type To = UpdatedResponse;
    fn emit(&self, _: ()) -> Self::To {
        UpdatedResponse {
            success: true,
            message: "Lesson updated successfully",
        }
    }
}
