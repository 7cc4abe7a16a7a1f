use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnLessonQuery, LessonQuery};
use kernel::interface::update::{DependOnLessonModifier, LessonModifier};
use kernel::prelude::entity::LessonSearch;
use kernel::KernelError;

use crate::transfer::{LessonDto, SearchLessonDto, UpdateLessonDto};

#[async_trait::async_trait]
pub trait GetLessonService: 'static + Sync + Send + DependOnLessonQuery {
    async fn get_all_lessons(&self) -> error_stack::Result<Vec<LessonDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let lessons = self.lesson_query().find_all(&mut connection).await?;
        connection.commit().await?;

        Ok(lessons.into_iter().map(LessonDto::from).collect())
    }

    async fn search_lessons(
        &self,
        dto: SearchLessonDto,
    ) -> error_stack::Result<Vec<LessonDto>, KernelError> {
        let search = LessonSearch::parse(dto.query.as_deref())?;
        tracing::debug!(keyword = search.keyword(), "searching lessons");

        let mut connection = self.database_connection().transact().await?;
        let lessons = self.lesson_query().search(&mut connection, &search).await?;
        connection.commit().await?;

        Ok(lessons.into_iter().map(LessonDto::from).collect())
    }
}

impl<T> GetLessonService for T where T: DependOnLessonQuery {}

#[async_trait::async_trait]
pub trait UpdateLessonService: 'static + Sync + Send + DependOnLessonModifier {
    async fn update_lesson(&self, dto: UpdateLessonDto) -> error_stack::Result<(), KernelError> {
        let (id, patch) = dto.into_patch()?;

        let mut connection = self.database_connection().transact().await?;
        let matched = self
            .lesson_modifier()
            .patch(&mut connection, &id, &patch)
            .await?;
        if !matched {
            connection.roll_back().await?;
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Lesson `{id}` does not exist")));
        }
        connection.commit().await?;

        tracing::info!(lesson = %id, "lesson updated");
        Ok(())
    }
}

impl<T> UpdateLessonService for T where T: DependOnLessonModifier {}
