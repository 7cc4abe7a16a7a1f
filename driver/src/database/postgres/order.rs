use sqlx::{PgConnection, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::OrderQuery;
use kernel::interface::update::OrderModifier;
use kernel::prelude::entity::{
    Address, City, CreatedAt, Customer, FirstName, LastName, LessonId, Order, OrderId, OrderItem,
    OrderQuantity, State, Zip,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        PgOrderInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl OrderModifier for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::create(con, order).await
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    address: String,
    city: String,
    state: String,
    zip: String,
    created_at: OffsetDateTime,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    lesson_id: Uuid,
    quantity: i32,
}

impl From<OrderItemRow> for OrderItem {
    fn from(value: OrderItemRow) -> Self {
        OrderItem::new(
            LessonId::new(value.lesson_id),
            OrderQuantity::new(value.quantity),
        )
    }
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItemRow>) -> Order {
        let customer = Customer::new(
            FirstName::new(self.first_name),
            LastName::new(self.last_name),
            Address::new(self.address),
            City::new(self.city),
            State::new(self.state),
            Zip::new(self.zip),
        );
        Order::new(
            OrderId::new(self.id),
            customer,
            items.into_iter().map(OrderItem::from).collect(),
            CreatedAt::new(self.created_at),
        )
    }
}

pub(in crate::database) struct PgOrderInternal;

impl PgOrderInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        let row = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, last_name, address, city, state, zip, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(&mut *con)
        .await
        .convert_error()?;
        let Some(row) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItemRow>(
            // language=postgresql
            r#"
            SELECT lesson_id, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY position
            "#,
        )
        .bind(id.as_ref())
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        Ok(Some(row.into_order(items)))
    }

    async fn create(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        let customer = order.customer();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO orders (id, first_name, last_name, address, city, state, zip, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.id().as_ref())
        .bind(customer.first_name().as_ref())
        .bind(customer.last_name().as_ref())
        .bind(customer.address().as_ref())
        .bind(customer.city().as_ref())
        .bind(customer.state().as_ref())
        .bind(customer.zip().as_ref())
        .bind(order.created_at().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;

        if order.items().is_empty() {
            return Ok(());
        }
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO order_items (order_id, position, lesson_id, quantity) ",
        );
        builder.push_values(
            order.items().iter().zip(0i32..),
            |mut row, (item, position)| {
                row.push_bind(order.id().as_ref())
                    .push_bind(position)
                    .push_bind(item.lesson_id().as_ref())
                    .push_bind(item.quantity().as_ref());
            },
        );
        builder.build().execute(&mut *con).await.convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::OrderQuery;
    use kernel::interface::update::{LessonModifier, OrderModifier};
    use kernel::prelude::entity::{
        Address, City, CreatedAt, Customer, FirstName, LastName, Lesson, LessonCategory,
        LessonDescription, LessonId, LessonLocation, LessonPrice, LessonSpace, LessonSubject,
        LessonTitle, Order, OrderId, OrderItem, OrderQuantity, State, Zip,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresDatabase, PostgresLessonRepository, PostgresOrderRepository,
    };

    fn lesson(subject: &str) -> Lesson {
        Lesson::new(
            LessonId::new(Uuid::new_v4()),
            LessonSubject::new(subject),
            LessonTitle::new(format!("{subject} workshop")),
            LessonLocation::new("Mill Hill"),
            LessonPrice::new(25.0),
            LessonCategory::new("Science"),
            LessonDescription::new("Hands-on experiments"),
            LessonSpace::new(10),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn order_round_trip() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let chemistry = lesson("Chemistry");
        let physics = lesson("Physics");
        PostgresLessonRepository.create(&mut con, &chemistry).await?;
        PostgresLessonRepository.create(&mut con, &physics).await?;

        // Postgres keeps microseconds; use a whole-second timestamp so it round-trips.
        let created_at = OffsetDateTime::from_unix_timestamp(1_709_287_200).unwrap();
        let order = Order::new(
            OrderId::new(Uuid::new_v4()),
            Customer::new(
                FirstName::new("Rosalind"),
                LastName::new("Franklin"),
                Address::new("Drury Lane"),
                City::new("London"),
                State::new("London"),
                Zip::new("WC2B 5PW"),
            ),
            vec![
                OrderItem::new(physics.id().clone(), OrderQuantity::new(1)),
                OrderItem::new(chemistry.id().clone(), OrderQuantity::new(3)),
            ],
            CreatedAt::new(created_at),
        );
        PostgresOrderRepository.create(&mut con, &order).await?;

        let found = PostgresOrderRepository
            .find_by_id(&mut con, order.id())
            .await?;
        assert_eq!(found, Some(order));

        let missing = OrderId::new(Uuid::new_v4());
        assert!(PostgresOrderRepository
            .find_by_id(&mut con, &missing)
            .await?
            .is_none());

        con.roll_back().await?;
        Ok(())
    }
}
