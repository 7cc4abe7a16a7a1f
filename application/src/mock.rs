//! In-memory store used by service tests.
//!
//! A transaction holds the whole store exclusively from `transact` until it is
//! committed or dropped, so concurrent units of work are fully serialized.
//! Writes go to a private copy that only replaces the shared state on commit.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnLessonQuery, LessonQuery};
use kernel::interface::update::{
    DependOnLessonModifier, DependOnOrderModifier, LessonModifier, OrderModifier,
};
use kernel::prelude::entity::{
    Lesson, LessonCategory, LessonDescription, LessonId, LessonLocation, LessonPatch,
    LessonPrice, LessonSearch, LessonSpace, LessonSubject, LessonTitle, Order, OrderQuantity,
};
use kernel::KernelError;

use crate::retry::{DependOnRetryPolicy, RetryPolicy};

pub fn lesson(subject: &str, price: f64, space: i32) -> Lesson {
    Lesson::new(
        LessonId::new(Uuid::new_v4()),
        LessonSubject::new(subject),
        LessonTitle::new(format!("{subject} club")),
        LessonLocation::new("Colindale"),
        LessonPrice::new(price),
        LessonCategory::new("Afterschool"),
        LessonDescription::new("Small groups, all levels"),
        LessonSpace::new(space),
    )
}

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    lessons: Vec<Lesson>,
    orders: Vec<Order>,
}

pub struct MemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
    failing_commits: Arc<AtomicU32>,
    started: AtomicU32,
    retry: RetryPolicy,
    lesson_repository: MemoryLessonRepository,
    order_repository: MemoryOrderRepository,
}

impl MemoryDatabase {
    pub fn with_lessons(lessons: Vec<Lesson>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                lessons,
                orders: Vec::new(),
            })),
            failing_commits: Arc::new(AtomicU32::new(0)),
            started: AtomicU32::new(0),
            retry: RetryPolicy::default(),
            lesson_repository: MemoryLessonRepository,
            order_repository: MemoryOrderRepository,
        }
    }

    pub fn with_retry(self, retry: RetryPolicy) -> Self {
        Self { retry, ..self }
    }

    /// The next `count` commits report a write conflict instead of applying.
    pub fn fail_next_commits(&self, count: u32) {
        self.failing_commits.store(count, Ordering::SeqCst);
    }

    pub fn transactions_started(&self) -> u32 {
        self.started.load(Ordering::SeqCst)
    }

    pub async fn lessons(&self) -> Vec<Lesson> {
        self.state.lock().await.lessons.clone()
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.state.lock().await.orders.clone()
    }
}

pub struct MemoryTransaction {
    shared: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    failing_commits: Arc<AtomicU32>,
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let shared = Arc::clone(&self.state).lock_owned().await;
        let working = shared.clone();
        Ok(MemoryTransaction {
            shared,
            working,
            failing_commits: Arc::clone(&self.failing_commits),
        })
    }
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        let conflicted = self
            .failing_commits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if conflicted {
            return Err(Report::new(KernelError::Concurrency)
                .attach_printable("injected write conflict"));
        }
        *self.shared = self.working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

pub struct MemoryLessonRepository;

#[async_trait::async_trait]
impl LessonQuery for MemoryLessonRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Lesson>, KernelError> {
        Ok(con.working.lessons.clone())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &LessonId,
    ) -> error_stack::Result<Option<Lesson>, KernelError> {
        Ok(con
            .working
            .lessons
            .iter()
            .find(|lesson| lesson.id() == id)
            .cloned())
    }

    async fn search(
        &self,
        con: &mut MemoryTransaction,
        search: &LessonSearch,
    ) -> error_stack::Result<Vec<Lesson>, KernelError> {
        Ok(con
            .working
            .lessons
            .iter()
            .filter(|lesson| search.matches(lesson))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl LessonModifier for MemoryLessonRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        lesson: &Lesson,
    ) -> error_stack::Result<(), KernelError> {
        con.working.lessons.push(lesson.clone());
        Ok(())
    }

    async fn patch(
        &self,
        con: &mut MemoryTransaction,
        id: &LessonId,
        patch: &LessonPatch,
    ) -> error_stack::Result<bool, KernelError> {
        let Some(lesson) = con.working.lessons.iter_mut().find(|lesson| lesson.id() == id) else {
            return Ok(false);
        };
        lesson.substitute(|lesson| {
            if let Some(subject) = patch.subject().clone() {
                *lesson.subject = subject;
            }
            if let Some(title) = patch.title().clone() {
                *lesson.title = title;
            }
            if let Some(location) = patch.location().clone() {
                *lesson.location = location;
            }
            if let Some(price) = *patch.price() {
                *lesson.price = price;
            }
            if let Some(category) = patch.category().clone() {
                *lesson.category = category;
            }
            if let Some(description) = patch.description().clone() {
                *lesson.description = description;
            }
            if let Some(space) = *patch.space() {
                *lesson.space = space;
            }
        });
        Ok(true)
    }

    async fn take_space(
        &self,
        con: &mut MemoryTransaction,
        id: &LessonId,
        quantity: &OrderQuantity,
    ) -> error_stack::Result<bool, KernelError> {
        let Some(lesson) = con.working.lessons.iter_mut().find(|lesson| lesson.id() == id) else {
            return Ok(false);
        };
        if !lesson.has_space_for(quantity) {
            return Ok(false);
        }
        let left = LessonSpace::new(lesson.space().as_ref() - quantity.as_ref());
        lesson.substitute(|lesson| *lesson.space = left);
        Ok(true)
    }
}

pub struct MemoryOrderRepository;

#[async_trait::async_trait]
impl OrderModifier for MemoryOrderRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        con.working.orders.push(order.clone());
        Ok(())
    }
}

impl DependOnLessonQuery for MemoryDatabase {
    type LessonQuery = MemoryLessonRepository;
    fn lesson_query(&self) -> &Self::LessonQuery {
        &self.lesson_repository
    }
}

impl DependOnLessonModifier for MemoryDatabase {
    type LessonModifier = MemoryLessonRepository;
    fn lesson_modifier(&self) -> &Self::LessonModifier {
        &self.lesson_repository
    }
}

impl DependOnOrderModifier for MemoryDatabase {
    type OrderModifier = MemoryOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &self.order_repository
    }
}

impl DependOnRetryPolicy for MemoryDatabase {
    fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}
