use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Lesson, LessonId, LessonPatch, OrderQuantity};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LessonModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Seeds a lesson. The HTTP surface never creates lessons; stores are
    /// populated out of band.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        lesson: &Lesson,
    ) -> error_stack::Result<(), KernelError>;
    /// Returns `false` when no lesson has the given id.
    async fn patch(
        &self,
        con: &mut Self::Transaction,
        id: &LessonId,
        patch: &LessonPatch,
    ) -> error_stack::Result<bool, KernelError>;
    /// Takes `quantity` seats only if at least that many remain.
    ///
    /// Returns `false`, leaving the lesson untouched, when the lesson is missing
    /// or has fewer seats left.
    async fn take_space(
        &self,
        con: &mut Self::Transaction,
        id: &LessonId,
        quantity: &OrderQuantity,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnLessonModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type LessonModifier: LessonModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn lesson_modifier(&self) -> &Self::LessonModifier;
}
