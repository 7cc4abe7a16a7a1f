use application::service::{GetLessonService, UpdateLessonService};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::controller::Controller;
use crate::handler::AppModule;

use self::request::*;
use self::response::*;

mod request;
mod response;

pub trait LessonRouter {
    fn route_lesson(self) -> Self;
}

impl LessonRouter for Router<AppModule> {
    fn route_lesson(self) -> Self {
        let router = self
            .route(
                "/lessons",
                get(|State(module): State<AppModule>| async move {
                    Controller::new((), Presenter)
                        .on_failure("Failed to fetch lessons")
                        .bypass(|| async move { module.get_all_lessons().await })
                        .await
                }),
            )
            .route(
                "/lessons/:id",
                put(
                    |State(module): State<AppModule>,
                     Path(id): Path<String>,
                     req: Result<Json<UpdateRequest>, JsonRejection>| async move {
                        let Json(req) = req?;
                        Controller::new(Transformer, Presenter)
                            .on_failure("Failed to update lesson")
                            .intake((id, req))
                            .handle(|dto| async move { module.update_lesson(dto).await })
                            .await
                    },
                ),
            );

        #[cfg(feature = "search")]
        let router = router.route(
            "/lessons/search",
            get(
                |State(module): State<AppModule>,
                 req: Result<
                    axum::extract::Query<SearchRequest>,
                    axum::extract::rejection::QueryRejection,
                >| async move {
                    let axum::extract::Query(req) = req?;
                    Controller::new(Transformer, Presenter)
                        .on_failure("Failed to search lessons")
                        .intake(req)
                        .handle(|dto| async move { module.search_lessons(dto).await })
                        .await
                },
            ),
        );

        router
    }
}
