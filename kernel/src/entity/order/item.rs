use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln, References};

use crate::entity::LessonId;

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct OrderItem {
    lesson_id: LessonId,
    quantity: OrderQuantity,
}

impl OrderItem {
    pub fn new(lesson_id: LessonId, quantity: OrderQuantity) -> Self {
        Self {
            lesson_id,
            quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct OrderQuantity(i32);

impl OrderQuantity {
    pub fn new(quantity: impl Into<i32>) -> Self {
        Self(quantity.into())
    }

    /// Quantities are at least one seat.
    pub fn try_new(quantity: i64) -> Option<Self> {
        i32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity >= 1)
            .map(Self)
    }

    pub fn saturating_add(&self, other: &OrderQuantity) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}
