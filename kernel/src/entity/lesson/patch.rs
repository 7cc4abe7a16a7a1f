use vodca::References;

use crate::entity::{
    LessonCategory, LessonDescription, LessonLocation, LessonPrice, LessonSpace, LessonSubject,
    LessonTitle,
};

/// Merge-patch over a lesson: only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, References)]
pub struct LessonPatch {
    subject: Option<LessonSubject>,
    title: Option<LessonTitle>,
    location: Option<LessonLocation>,
    price: Option<LessonPrice>,
    category: Option<LessonCategory>,
    description: Option<LessonDescription>,
    space: Option<LessonSpace>,
}

impl LessonPatch {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        subject: Option<LessonSubject>,
        title: Option<LessonTitle>,
        location: Option<LessonLocation>,
        price: Option<LessonPrice>,
        category: Option<LessonCategory>,
        description: Option<LessonDescription>,
        space: Option<LessonSpace>,
    ) -> Self {
        Self {
            subject,
            title,
            location,
            price,
            category,
            description,
            space,
        }
    }

    pub fn space_only(space: LessonSpace) -> Self {
        Self {
            space: Some(space),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.title.is_none()
            && self.location.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.space.is_none()
    }
}
