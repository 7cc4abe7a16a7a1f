//! Request → use case → response plumbing shared by every route.
//!
//! A route feeds its extracted request through a transformer ([`Intake`]) into
//! the DTO a service expects, runs the service, and hands the outcome to a
//! presenter ([`Exhaust`]) that shapes the HTTP response. Failures become an
//! [`ErrorStatus`] carrying the route's failure message.

use std::future::IntoFuture;
use std::marker::PhantomData;

use error_stack::Report;
use kernel::KernelError;

use crate::error::ErrorStatus;

// Original: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

const DEFAULT_FAILURE: &str = "Failed to process request";

pub struct Controller<T, P, I, D, O> {
    transformer: T,
    presenter: P,
    failure: &'static str,
    _i: PhantomData<I>,
    _d: PhantomData<D>,
    _o: PhantomData<O>,
}

impl<T, P, I, D, O> Controller<T, P, I, D, O> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
            failure: DEFAULT_FAILURE,
            _i: PhantomData,
            _d: PhantomData,
            _o: PhantomData,
        }
    }

    /// Message reported to the caller when the store fails.
    pub fn on_failure(self, failure: &'static str) -> Self {
        Self { failure, ..self }
    }

    fn finish(self, outcome: Result<O, Report<KernelError>>) -> Result<P::To, ErrorStatus>
    where
        P: Exhaust<O>,
    {
        let failure = self.failure;
        outcome
            .map(|output| self.presenter.emit(output))
            .map_err(|report| ErrorStatus::new(report, failure))
    }
}

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: Intake<I, To = D>,
{
    pub fn intake(self, input: I) -> Transformed<T, P, I, D, O> {
        Transformed {
            transformed: self.transformer.emit(input),
            controller: self,
        }
    }
}

impl<P, O> Controller<(), P, (), (), O>
where
    P: Exhaust<O>,
{
    /// Runs a use case that takes no request input.
    pub async fn bypass<F, Fut>(self, f: F) -> Result<P::To, ErrorStatus>
    where
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, Report<KernelError>>>,
    {
        let outcome = f().await;
        self.finish(outcome)
    }
}

pub struct Transformed<T, P, I, D, O> {
    transformed: D,
    controller: Controller<T, P, I, D, O>,
}

impl<T, P, I, D, O> Transformed<T, P, I, D, O>
where
    T: Intake<I, To = D>,
    P: Exhaust<O>,
{
    pub async fn handle<F, Fut>(self, f: F) -> Result<P::To, ErrorStatus>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, Report<KernelError>>>,
    {
        let outcome = f(self.transformed).await;
        self.controller.finish(outcome)
    }
}
