mod detail;
mod id;
mod patch;
mod price;
mod search;
mod space;

pub use self::{detail::*, id::*, patch::*, price::*, search::*, space::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, PartialEq, References, Destructure, Mutation)]
pub struct Lesson {
    id: LessonId,
    subject: LessonSubject,
    title: LessonTitle,
    location: LessonLocation,
    price: LessonPrice,
    category: LessonCategory,
    description: LessonDescription,
    space: LessonSpace,
}

impl Lesson {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LessonId,
        subject: LessonSubject,
        title: LessonTitle,
        location: LessonLocation,
        price: LessonPrice,
        category: LessonCategory,
        description: LessonDescription,
        space: LessonSpace,
    ) -> Self {
        Self {
            id,
            subject,
            title,
            location,
            price,
            category,
            description,
            space,
        }
    }

    pub fn has_space_for(&self, quantity: &crate::entity::OrderQuantity) -> bool {
        let space: &i32 = self.space.as_ref();
        let quantity: &i32 = quantity.as_ref();
        space >= quantity
    }
}
