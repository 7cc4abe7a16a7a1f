use sqlx::{PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use kernel::interface::query::LessonQuery;
use kernel::interface::update::LessonModifier;
use kernel::prelude::entity::{
    FieldMatcher, Lesson, LessonCategory, LessonDescription, LessonId, LessonLocation,
    LessonPatch, LessonPrice, LessonSearch, LessonSpace, LessonSubject, LessonTitle,
    OrderQuantity, SearchField,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresLessonRepository;

#[async_trait::async_trait]
impl LessonQuery for PostgresLessonRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Lesson>, KernelError> {
        PgLessonInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &LessonId,
    ) -> error_stack::Result<Option<Lesson>, KernelError> {
        PgLessonInternal::find_by_id(con, id).await
    }

    async fn search(
        &self,
        con: &mut PostgresTransaction,
        search: &LessonSearch,
    ) -> error_stack::Result<Vec<Lesson>, KernelError> {
        PgLessonInternal::search(con, search).await
    }
}

#[async_trait::async_trait]
impl LessonModifier for PostgresLessonRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        lesson: &Lesson,
    ) -> error_stack::Result<(), KernelError> {
        PgLessonInternal::create(con, lesson).await
    }

    async fn patch(
        &self,
        con: &mut PostgresTransaction,
        id: &LessonId,
        patch: &LessonPatch,
    ) -> error_stack::Result<bool, KernelError> {
        PgLessonInternal::patch(con, id, patch).await
    }

    async fn take_space(
        &self,
        con: &mut PostgresTransaction,
        id: &LessonId,
        quantity: &OrderQuantity,
    ) -> error_stack::Result<bool, KernelError> {
        PgLessonInternal::take_space(con, id, quantity).await
    }
}

#[derive(sqlx::FromRow)]
struct LessonRow {
    id: Uuid,
    subject: String,
    title: String,
    location: String,
    price: f64,
    category: String,
    description: String,
    space: i32,
}

impl From<LessonRow> for Lesson {
    fn from(value: LessonRow) -> Self {
        Lesson::new(
            LessonId::new(value.id),
            LessonSubject::new(value.subject),
            LessonTitle::new(value.title),
            LessonLocation::new(value.location),
            LessonPrice::new(value.price),
            LessonCategory::new(value.category),
            LessonDescription::new(value.description),
            LessonSpace::new(value.space),
        )
    }
}

fn column(field: &SearchField) -> &'static str {
    match field {
        SearchField::Subject => "subject",
        SearchField::Title => "title",
        SearchField::Location => "location",
        SearchField::Category => "category",
        SearchField::Description => "description",
        SearchField::Price => "price",
    }
}

/// Column as text, for substring matching.
fn text_column(field: &SearchField) -> String {
    if field.is_numeric() {
        format!("CAST({} AS TEXT)", column(field))
    } else {
        column(field).to_string()
    }
}

fn text<T: AsRef<String>>(value: &Option<T>) -> Option<&str> {
    value.as_ref().map(|value| value.as_ref().as_str())
}

/// Makes `%`, `_` and `\` match literally inside an `ILIKE` pattern.
fn escape_like(keyword: &str) -> String {
    keyword
        .chars()
        .fold(String::with_capacity(keyword.len()), |mut escaped, c| {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
            escaped
        })
}

pub(in crate::database) struct PgLessonInternal;

impl PgLessonInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Lesson>, KernelError> {
        let rows = sqlx::query_as::<_, LessonRow>(
            // language=postgresql
            r#"
            SELECT id, subject, title, location, price, category, description, space
            FROM lessons
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &LessonId,
    ) -> error_stack::Result<Option<Lesson>, KernelError> {
        let row = sqlx::query_as::<_, LessonRow>(
            // language=postgresql
            r#"
            SELECT id, subject, title, location, price, category, description, space
            FROM lessons
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Lesson::from))
    }

    async fn search(
        con: &mut PgConnection,
        search: &LessonSearch,
    ) -> error_stack::Result<Vec<Lesson>, KernelError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT id, subject, title, location, price, category, description, space
            FROM lessons
            WHERE "#,
        );
        let mut conditions = builder.separated(" OR ");
        for matcher in search.predicate() {
            match matcher {
                FieldMatcher::Contains(field, keyword) => {
                    conditions.push(format!("{} ILIKE ", text_column(&field)));
                    conditions.push_bind_unseparated(format!("%{}%", escape_like(keyword)));
                }
                FieldMatcher::Equals(field, number) => {
                    conditions.push(format!("{} = ", column(&field)));
                    conditions.push_bind_unseparated(number);
                }
            }
        }
        let rows = builder
            .build_query_as::<LessonRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    async fn create(con: &mut PgConnection, lesson: &Lesson) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO lessons (id, subject, title, location, price, category, description, space)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(lesson.id().as_ref())
        .bind(lesson.subject().as_ref())
        .bind(lesson.title().as_ref())
        .bind(lesson.location().as_ref())
        .bind(lesson.price().as_ref())
        .bind(lesson.category().as_ref())
        .bind(lesson.description().as_ref())
        .bind(lesson.space().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn patch(
        con: &mut PgConnection,
        id: &LessonId,
        patch: &LessonPatch,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE lessons
            SET subject     = COALESCE($2, subject),
                title       = COALESCE($3, title),
                location    = COALESCE($4, location),
                price       = COALESCE($5, price),
                category    = COALESCE($6, category),
                description = COALESCE($7, description),
                space       = COALESCE($8, space)
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(text(patch.subject()))
        .bind(text(patch.title()))
        .bind(text(patch.location()))
        .bind(patch.price().map(|price| *price.as_ref()))
        .bind(text(patch.category()))
        .bind(text(patch.description()))
        .bind(patch.space().map(|space| *space.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }

    async fn take_space(
        con: &mut PgConnection,
        id: &LessonId,
        quantity: &OrderQuantity,
    ) -> error_stack::Result<bool, KernelError> {
        // The row lock taken by the UPDATE serializes concurrent decrements, and
        // the predicate is re-checked against the latest committed space.
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE lessons
            SET space = space - $2
            WHERE id = $1 AND space >= $2
            "#,
        )
        .bind(id.as_ref())
        .bind(quantity.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::LessonQuery;
    use kernel::interface::update::LessonModifier;
    use kernel::prelude::entity::{
        Lesson, LessonCategory, LessonDescription, LessonId, LessonLocation, LessonPatch,
        LessonPrice, LessonSearch, LessonSpace, LessonSubject, LessonTitle, OrderQuantity,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresLessonRepository};

    use super::escape_like;

    fn lesson(title: &str, price: f64, space: i32) -> Lesson {
        Lesson::new(
            LessonId::new(Uuid::new_v4()),
            LessonSubject::new("Music"),
            LessonTitle::new(title),
            LessonLocation::new("Golders Green"),
            LessonPrice::new(price),
            LessonCategory::new("Arts"),
            LessonDescription::new("Bring your own instrument"),
            LessonSpace::new(space),
        )
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
        assert_eq!(escape_like("guitar"), "guitar");
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn basic_modification() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let created = lesson("Guitar", 40.0, 3);
        let id = created.id().clone();
        PostgresLessonRepository.create(&mut con, &created).await?;

        let found = PostgresLessonRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(created.clone()));

        let patch = LessonPatch::new(
            None,
            Some(LessonTitle::new("Bass guitar")),
            None,
            None,
            None,
            None,
            None,
        );
        assert!(PostgresLessonRepository.patch(&mut con, &id, &patch).await?);
        let found = PostgresLessonRepository
            .find_by_id(&mut con, &id)
            .await?
            .unwrap();
        assert_eq!(found.title(), &LessonTitle::new("Bass guitar"));
        assert_eq!(found.subject(), created.subject());

        let missing = LessonId::new(Uuid::new_v4());
        assert!(!PostgresLessonRepository.patch(&mut con, &missing, &patch).await?);

        con.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn take_space_never_goes_negative() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let created = lesson("Piano", 55.0, 2);
        let id = created.id().clone();
        PostgresLessonRepository.create(&mut con, &created).await?;

        let repository = PostgresLessonRepository;
        assert!(!repository.take_space(&mut con, &id, &OrderQuantity::new(3)).await?);
        assert!(repository.take_space(&mut con, &id, &OrderQuantity::new(2)).await?);
        assert!(!repository.take_space(&mut con, &id, &OrderQuantity::new(1)).await?);

        let found = repository.find_by_id(&mut con, &id).await?.unwrap();
        assert_eq!(found.space(), &LessonSpace::new(0));

        con.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn negative_space_violates_check() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let created = lesson("Violin", 70.0, 1);
        PostgresLessonRepository.create(&mut con, &created).await?;

        let patch = LessonPatch::space_only(LessonSpace::new(-1));
        let report = PostgresLessonRepository
            .patch(&mut con, created.id(), &patch)
            .await
            .unwrap_err();
        assert!(matches!(report.current_context(), KernelError::Capacity));
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn search_matches_text_and_price() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let marker = Uuid::new_v4().simple().to_string();
        let by_title = lesson(&format!("Drums {marker}"), 30.0, 4);
        let by_price = lesson("Flute", 918_273.5, 4);
        let neither = lesson("Harp", 31.0, 4);
        for lesson in [&by_title, &by_price, &neither] {
            PostgresLessonRepository.create(&mut con, lesson).await?;
        }

        let search = LessonSearch::parse(Some(marker.to_uppercase().as_str()))?;
        let found = PostgresLessonRepository.search(&mut con, &search).await?;
        assert_eq!(found, vec![by_title]);

        let search = LessonSearch::parse(Some("918273.5"))?;
        let found = PostgresLessonRepository.search(&mut con, &search).await?;
        assert!(found.contains(&by_price));
        assert!(!found.contains(&neither));

        con.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn price_text_agrees_with_in_memory_match() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let tiny = lesson("Recorder", 0.000017, 4);
        PostgresLessonRepository.create(&mut con, &tiny).await?;

        let search = LessonSearch::parse(Some("7e-05"))?;
        assert!(search.matches(&tiny));
        let found = PostgresLessonRepository.search(&mut con, &search).await?;
        assert!(found.contains(&tiny));

        con.roll_back().await?;
        Ok(())
    }
}
