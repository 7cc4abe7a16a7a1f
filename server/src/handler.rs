use std::ops::Deref;
use std::sync::Arc;

use application::retry::{DependOnRetryPolicy, RetryPolicy};
use driver::database::{PostgresDatabase, PostgresLessonRepository, PostgresOrderRepository};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::query::DependOnLessonQuery;
use kernel::interface::update::{DependOnLessonModifier, DependOnOrderModifier};
use kernel::KernelError;
use vodca::References;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new(config: &ServerConfig) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(config).await?)))
    }

    pub fn with_database(pgpool: PostgresDatabase, retry: RetryPolicy) -> Self {
        Self(Arc::new(Handler { pgpool, retry }))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    retry: RetryPolicy,
}

impl Handler {
    pub async fn init(config: &ServerConfig) -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;

        Ok(Self {
            pgpool,
            retry: config.retry_policy(),
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnLessonQuery for Handler {
    type LessonQuery = PostgresLessonRepository;
    fn lesson_query(&self) -> &Self::LessonQuery {
        &PostgresLessonRepository
    }
}

impl DependOnLessonModifier for Handler {
    type LessonModifier = PostgresLessonRepository;
    fn lesson_modifier(&self) -> &Self::LessonModifier {
        &PostgresLessonRepository
    }
}

impl DependOnOrderModifier for Handler {
    type OrderModifier = PostgresOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &PostgresOrderRepository
    }
}

impl DependOnRetryPolicy for Handler {
    fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}
