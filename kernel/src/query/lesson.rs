use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Lesson, LessonId, LessonSearch};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LessonQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Lesson>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &LessonId,
    ) -> error_stack::Result<Option<Lesson>, KernelError>;
    async fn search(
        &self,
        con: &mut Self::Transaction,
        search: &LessonSearch,
    ) -> error_stack::Result<Vec<Lesson>, KernelError>;
}

pub trait DependOnLessonQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type LessonQuery: LessonQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn lesson_query(&self) -> &Self::LessonQuery;
}
