use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnLessonQuery, LessonQuery};
use kernel::interface::update::{
    DependOnLessonModifier, DependOnOrderModifier, LessonModifier, OrderModifier,
};
use kernel::prelude::entity::{CreatedAt, Order, OrderId};
use kernel::KernelError;

use crate::retry::DependOnRetryPolicy;
use crate::transfer::CreateOrderDto;

type TransactionOf<T> =
    <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction;

#[async_trait::async_trait]
pub trait PlaceOrderService:
    'static
    + Sync
    + Send
    + DependOnLessonQuery
    + DependOnLessonModifier
    + DependOnOrderModifier
    + DependOnRetryPolicy
{
    /// Records an order and takes its seats in one transaction.
    ///
    /// Either the order is stored and every lesson it names loses exactly the
    /// requested seats, or nothing changes. Transient store conflicts re-run the
    /// whole unit of work from a fresh read.
    async fn place_order(&self, dto: CreateOrderDto) -> error_stack::Result<Uuid, KernelError> {
        let (customer, items) = dto.validate()?;
        let policy = self.retry_policy();

        let mut attempt = 1;
        loop {
            let order = Order::new(
                OrderId::new(Uuid::new_v4()),
                customer.clone(),
                items.clone(),
                CreatedAt::now(),
            );
            match self.commit_order(&order).await {
                Ok(()) => {
                    let id = *order.id().as_ref();
                    tracing::info!(order = %id, items = order.items().len(), "order placed");
                    return Ok(id);
                }
                Err(report)
                    if report.current_context().is_transient()
                        && attempt < policy.max_attempts() =>
                {
                    let delay = policy.delay_for(attempt);
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "order placement conflicted, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(report) => {
                    return Err(report.attach_printable(format!(
                        "Order placement failed after {attempt} attempt(s)"
                    )));
                }
            }
        }
    }

    async fn commit_order(&self, order: &Order) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        match self.reserve_seats(&mut connection, order).await {
            Ok(()) => connection.commit().await,
            Err(report) => {
                if let Err(rollback) = connection.roll_back().await {
                    tracing::error!(error = ?rollback, "failed to roll back order transaction");
                }
                Err(report)
            }
        }
    }

    async fn reserve_seats(
        &self,
        connection: &mut TransactionOf<Self>,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        let demand = order.seat_demand();

        for (lesson_id, quantity) in &demand {
            let lesson = self.lesson_query().find_by_id(connection, lesson_id).await?;
            match lesson {
                Some(lesson) if lesson.has_space_for(quantity) => {}
                Some(lesson) => {
                    return Err(Report::new(KernelError::Capacity).attach_printable(format!(
                        "Lesson `{lesson_id}` has {} seat(s) left, {} requested",
                        lesson.space().as_ref(),
                        quantity.as_ref()
                    )));
                }
                None => {
                    return Err(Report::new(KernelError::Capacity)
                        .attach_printable(format!("Lesson `{lesson_id}` does not exist")));
                }
            }
        }

        self.order_modifier().create(connection, order).await?;

        // A concurrent order may have taken the seats since the check above;
        // the conditional decrement is what keeps space from going negative.
        for (lesson_id, quantity) in &demand {
            let taken = self
                .lesson_modifier()
                .take_space(connection, lesson_id, quantity)
                .await?;
            if !taken {
                return Err(Report::new(KernelError::Capacity).attach_printable(format!(
                    "Lesson `{lesson_id}` ran out of space while placing the order"
                )));
            }
        }
        Ok(())
    }
}

impl<T> PlaceOrderService for T where
    T: DependOnLessonQuery + DependOnLessonModifier + DependOnOrderModifier + DependOnRetryPolicy
{
}
