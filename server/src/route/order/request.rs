use application::transfer::{CreateOrderDto, OrderItemDto};
use serde::Deserialize;

use crate::controller::Intake;

/// Every field is optional here so that missing ones are reported together.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
    items: Option<Vec<ItemRequest>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    lesson_id: Option<String>,
    quantity: Option<i64>,
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateOrderDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateOrderDto {
            first_name: input.first_name,
            last_name: input.last_name,
            address: input.address,
            city: input.city,
            state: input.state,
            zip: input.zip,
            items: input.items.map(|items| {
                items
                    .into_iter()
                    .map(|item| OrderItemDto {
                        lesson_id: item.lesson_id,
                        quantity: item.quantity,
                    })
                    .collect()
            }),
        }
    }
}
