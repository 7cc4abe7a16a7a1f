use application::service::PlaceOrderService;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::controller::Controller;
use crate::handler::AppModule;

use self::request::*;
use self::response::*;

mod request;
mod response;

pub trait OrderRouter {
    fn route_order(self) -> Self;
}

impl OrderRouter for Router<AppModule> {
    fn route_order(self) -> Self {
        self.route(
            "/orders",
            post(
                |State(module): State<AppModule>,
                 req: Result<Json<CreateRequest>, JsonRejection>| async move {
                    let Json(req) = req?;
                    Controller::new(Transformer, Presenter)
                        .on_failure("Failed to place order")
                        .intake(req)
                        .handle(|dto| async move { module.place_order(dto).await })
                        .await
                },
            ),
        )
    }
}
