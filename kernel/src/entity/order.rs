mod customer;
mod id;
mod item;

pub use self::{customer::*, id::*, item::*};
use crate::entity::{CreatedAt, LessonId};
use destructure::Destructure;
use std::collections::BTreeMap;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Order {
    id: OrderId,
    customer: Customer,
    items: Vec<OrderItem>,
    created_at: CreatedAt<Order>,
}

impl Order {
    pub fn new(
        id: OrderId,
        customer: Customer,
        items: Vec<OrderItem>,
        created_at: CreatedAt<Order>,
    ) -> Self {
        Self {
            id,
            customer,
            items,
            created_at,
        }
    }

    /// Seats requested per lesson, with repeated lessons summed.
    ///
    /// Iterates in ascending [`LessonId`] order so that every order touches
    /// lesson rows in the same sequence.
    pub fn seat_demand(&self) -> BTreeMap<LessonId, OrderQuantity> {
        self.items
            .iter()
            .fold(BTreeMap::new(), |mut demand, item| {
                demand
                    .entry(item.lesson_id().clone())
                    .and_modify(|sum: &mut OrderQuantity| *sum = sum.saturating_add(item.quantity()))
                    .or_insert(*item.quantity());
                demand
            })
    }
}
