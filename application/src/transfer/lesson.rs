use error_stack::Report;
use uuid::Uuid;

use kernel::prelude::entity::{
    DestructLesson, Lesson, LessonCategory, LessonDescription, LessonId, LessonLocation,
    LessonPatch, LessonPrice, LessonSpace, LessonSubject, LessonTitle,
};
use kernel::{InvalidField, KernelError};

#[derive(Debug, Clone, PartialEq)]
pub struct LessonDto {
    pub id: Uuid,
    pub subject: String,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub category: String,
    pub description: String,
    pub space: i32,
}

impl From<Lesson> for LessonDto {
    fn from(value: Lesson) -> Self {
        let DestructLesson {
            id,
            subject,
            title,
            location,
            price,
            category,
            description,
            space,
        } = value.into_destruct();
        Self {
            id: id.into(),
            subject: subject.into(),
            title: title.into(),
            location: location.into(),
            price: price.into(),
            category: category.into(),
            description: description.into(),
            space: space.into(),
        }
    }
}

pub struct SearchLessonDto {
    pub query: Option<String>,
}

#[derive(Debug, Default)]
pub struct UpdateLessonDto {
    pub id: String,
    pub subject: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub space: Option<i32>,
}

impl UpdateLessonDto {
    /// Splits into the target id and the patch to merge into it.
    ///
    /// An id that cannot name a lesson is reported as [`KernelError::NotFound`].
    pub fn into_patch(self) -> error_stack::Result<(LessonId, LessonPatch), KernelError> {
        let id = LessonId::parse(&self.id).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("Lesson `{}` does not exist", self.id))
        })?;

        let space = match self.space {
            Some(space) => Some(LessonSpace::try_new(space).ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable(InvalidField::new("space"))
                    .attach_printable(format!("space must not be negative, got {space}"))
            })?),
            None => None,
        };
        let patch = LessonPatch::new(
            self.subject.map(LessonSubject::new),
            self.title.map(LessonTitle::new),
            self.location.map(LessonLocation::new),
            self.price.map(LessonPrice::new),
            self.category.map(LessonCategory::new),
            self.description.map(LessonDescription::new),
            space,
        );
        if patch.is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("No updatable lesson field was provided"));
        }
        Ok((id, patch))
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;
    use uuid::Uuid;

    use super::UpdateLessonDto;

    #[test]
    fn unknown_id_shape_is_not_found() {
        let dto = UpdateLessonDto {
            id: "65b0c0ffee".to_string(),
            space: Some(3),
            ..UpdateLessonDto::default()
        };
        let report = dto.into_patch().unwrap_err();
        assert!(matches!(report.current_context(), KernelError::NotFound));
    }

    #[test]
    fn empty_or_negative_patch_is_invalid() {
        let id = Uuid::new_v4().to_string();
        let empty = UpdateLessonDto {
            id: id.clone(),
            ..UpdateLessonDto::default()
        };
        assert!(matches!(
            empty.into_patch().unwrap_err().current_context(),
            KernelError::Validation
        ));

        let negative = UpdateLessonDto {
            id,
            space: Some(-1),
            ..UpdateLessonDto::default()
        };
        assert!(matches!(
            negative.into_patch().unwrap_err().current_context(),
            KernelError::Validation
        ));
    }
}
