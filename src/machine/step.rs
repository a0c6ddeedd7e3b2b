//! Results of invoking a transition.

use crate::core::State;
use crate::machine::error::MachineError;
use crate::machine::instance::Instance;
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Outcome of [`Instance::transition`].
///
/// Synchronous transitions are `Ready` immediately. Asynchronous ones are
/// `Pending` until awaited; the observer fires only once the pending
/// transition resolves. Both variants can be awaited uniformly.
pub enum Step<D: State> {
    Ready(Instance<D>),
    Pending(PendingTransition<D>),
}

impl<D: State> Step<D> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The new instance of a ready step.
    ///
    /// A pending step is dropped without being polled and reported as
    /// [`MachineError::Deferred`].
    pub fn into_ready(self) -> Result<Instance<D>, MachineError> {
        match self {
            Self::Ready(instance) => Ok(instance),
            Self::Pending(pending) => Err(MachineError::Deferred {
                operation: pending.operation,
            }),
        }
    }
}

impl<D: State> IntoFuture for Step<D> {
    type Output = Result<Instance<D>, MachineError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(instance) => future::ready(Ok(instance)).boxed(),
            Self::Pending(pending) => pending.inner,
        }
    }
}

impl<D: State> fmt::Debug for Step<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(instance) => f.debug_tuple("Ready").field(instance).finish(),
            Self::Pending(pending) => f.debug_tuple("Pending").field(pending).finish(),
        }
    }
}

/// An asynchronous transition that has started but not resolved.
///
/// Dropping it abandons the transition: the observer never fires and no
/// instance is produced.
pub struct PendingTransition<D: State> {
    operation: String,
    inner: BoxFuture<'static, Result<Instance<D>, MachineError>>,
}

impl<D: State> PendingTransition<D> {
    pub(crate) fn new(
        operation: impl Into<String>,
        inner: BoxFuture<'static, Result<Instance<D>, MachineError>>,
    ) -> Self {
        Self {
            operation: operation.into(),
            inner,
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl<D: State> Future for PendingTransition<D> {
    type Output = Result<Instance<D>, MachineError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<D: State> fmt::Debug for PendingTransition<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTransition")
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}
