//! Builder for machine descriptions.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::machine::description::{
    Args, Description, MethodEntry, MethodFn, Next, Observer, TransitionEntry, TransitionFn,
    TransitionMode,
};
use crate::machine::{BoxError, MachineError};
use futures::FutureExt;
use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

/// Builder for constructing descriptions with a fluent API.
///
/// Each operation takes a single argument value: pass `()` for none and a
/// tuple for several. Naming problems are collected while building and
/// reported by [`DescriptionBuilder::build`].
///
/// # Example
///
/// ```rust
/// use machinist::builder::DescriptionBuilder;
/// use machinist::impl_state;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// #[serde(tag = "status", rename_all = "snake_case")]
/// enum Ticket {
///     Open { title: String },
///     Closed { title: String, resolution: String },
/// }
///
/// impl_state!(Ticket {
///     Open => "open",
///     Closed => "closed",
/// });
///
/// let description = DescriptionBuilder::new()
///     .transition("close", |prev: &Ticket, resolution: String| match prev {
///         Ticket::Open { title } | Ticket::Closed { title, .. } => Ticket::Closed {
///             title: title.clone(),
///             resolution,
///         },
///     })
///     .method("title", |state: &Ticket, _: ()| match state {
///         Ticket::Open { title } | Ticket::Closed { title, .. } => title.clone(),
///     })
///     .build()
///     .unwrap();
///
/// assert!(description.has_transition("close"));
/// assert!(description.has_method("title"));
/// ```
pub struct DescriptionBuilder<D: State> {
    transitions: BTreeMap<String, TransitionEntry<D>>,
    methods: BTreeMap<String, MethodEntry<D>>,
    observer: Option<Observer<D>>,
    problem: Option<BuildError>,
}

impl<D: State> DescriptionBuilder<D> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            transitions: BTreeMap::new(),
            methods: BTreeMap::new(),
            observer: None,
            problem: None,
        }
    }

    pub(crate) fn from_description(description: &Description<D>) -> Self {
        Self {
            transitions: description.transitions.clone(),
            methods: description.methods.clone(),
            observer: description.observer.clone(),
            problem: None,
        }
    }

    /// Add a synchronous transition.
    pub fn transition<A, F>(self, name: impl Into<String>, f: F) -> Self
    where
        A: Any + Send,
        F: Fn(&D, A) -> D + Send + Sync + 'static,
    {
        let name = name.into();
        let operation = name.clone();
        let func: TransitionFn<D> = Arc::new(move |prev: &Arc<D>, args: Args| {
            let args = args.take::<A>(&operation)?;
            Ok(Next::Ready(f(prev.as_ref(), args)))
        });

        self.insert_transition(name, TransitionMode::Sync, type_name::<A>(), func)
    }

    /// Add a synchronous transition that may fail.
    ///
    /// The error surfaces unmodified as the source of [`MachineError::Failed`].
    pub fn try_transition<A, E, F>(self, name: impl Into<String>, f: F) -> Self
    where
        A: Any + Send,
        E: Into<BoxError>,
        F: Fn(&D, A) -> Result<D, E> + Send + Sync + 'static,
    {
        let name = name.into();
        let operation = name.clone();
        let func: TransitionFn<D> = Arc::new(move |prev: &Arc<D>, args: Args| {
            let args = args.take::<A>(&operation)?;
            let next = f(prev.as_ref(), args).map_err(|source| MachineError::Failed {
                operation: operation.clone(),
                source: source.into(),
            })?;
            Ok(Next::Ready(next))
        });

        self.insert_transition(name, TransitionMode::Sync, type_name::<A>(), func)
    }

    /// Add an asynchronous transition.
    ///
    /// The function is called as soon as the transition is invoked; the
    /// returned future is awaited by whoever awaits the transition.
    pub fn async_transition<A, F, Fut>(self, name: impl Into<String>, f: F) -> Self
    where
        A: Any + Send,
        F: Fn(Arc<D>, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = D> + Send + 'static,
    {
        let name = name.into();
        let operation = name.clone();
        let func: TransitionFn<D> = Arc::new(move |prev: &Arc<D>, args: Args| {
            let args = args.take::<A>(&operation)?;
            let pending = f(Arc::clone(prev), args);
            Ok(Next::Pending(pending.map(Ok::<D, MachineError>).boxed()))
        });

        self.insert_transition(name, TransitionMode::Async, type_name::<A>(), func)
    }

    /// Add an asynchronous transition whose future may resolve to an error.
    pub fn try_async_transition<A, E, F, Fut>(self, name: impl Into<String>, f: F) -> Self
    where
        A: Any + Send,
        E: Into<BoxError> + 'static,
        F: Fn(Arc<D>, A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<D, E>> + Send + 'static,
    {
        let name = name.into();
        let operation = name.clone();
        let func: TransitionFn<D> = Arc::new(move |prev: &Arc<D>, args: Args| {
            let args = args.take::<A>(&operation)?;
            let pending = f(Arc::clone(prev), args);
            let operation = operation.clone();
            Ok(Next::Pending(
                async move {
                    pending.await.map_err(|source| MachineError::Failed {
                        operation,
                        source: source.into(),
                    })
                }
                .boxed(),
            ))
        });

        self.insert_transition(name, TransitionMode::Async, type_name::<A>(), func)
    }

    /// Add a read-only method.
    ///
    /// Whatever the method returns is handed back as-is, futures included.
    pub fn method<A, R, F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        A: Any + Send,
        R: Any + Send,
        F: Fn(&D, A) -> R + Send + Sync + 'static,
    {
        let name = name.into();
        if !self.accept_name(&name) {
            return self;
        }

        let operation = name.clone();
        let func: MethodFn<D> = Arc::new(move |state: &D, args: Args| {
            let args = args.take::<A>(&operation)?;
            Ok(Box::new(f(state, args)) as Box<dyn Any + Send>)
        });
        self.methods.insert(
            name,
            MethodEntry {
                accepts: type_name::<A>(),
                returns: type_name::<R>(),
                func,
            },
        );
        self
    }

    /// Set the observer, replacing any previous one.
    pub fn on_transition<F>(mut self, observer: F) -> Self
    where
        F: Fn(&D, &D) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Merge the transitions and methods of another description.
    ///
    /// The other description's observer is not carried over. Names already
    /// present in this builder are reported as duplicates.
    pub fn include(mut self, other: &Description<D>) -> Self {
        for (name, entry) in &other.transitions {
            if self.accept_name(name) {
                self.transitions.insert(name.clone(), entry.clone());
            }
        }
        for (name, entry) in &other.methods {
            if self.accept_name(name) {
                self.methods.insert(name.clone(), entry.clone());
            }
        }
        self
    }

    /// Build the description.
    /// Returns the first naming problem encountered, if any.
    pub fn build(self) -> Result<Description<D>, BuildError> {
        if let Some(problem) = self.problem {
            return Err(problem);
        }

        tracing::trace!(
            transitions = self.transitions.len(),
            methods = self.methods.len(),
            observer = self.observer.is_some(),
            "description built"
        );

        Ok(Description {
            transitions: self.transitions,
            methods: self.methods,
            observer: self.observer,
        })
    }

    fn insert_transition(
        mut self,
        name: String,
        mode: TransitionMode,
        accepts: &'static str,
        func: TransitionFn<D>,
    ) -> Self {
        if self.accept_name(&name) {
            self.transitions.insert(name, TransitionEntry { mode, accepts, func });
        }
        self
    }

    /// Check a new operation name, remembering the first problem.
    fn accept_name(&mut self, name: &str) -> bool {
        let problem = if name.is_empty() {
            BuildError::EmptyOperationName
        } else if self.transitions.contains_key(name) || self.methods.contains_key(name) {
            BuildError::DuplicateOperation {
                name: name.to_string(),
            }
        } else {
            return true;
        };

        if self.problem.is_none() {
            self.problem = Some(problem);
        }
        false
    }
}

impl<D: State> Default for DescriptionBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_state;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    #[serde(tag = "status", rename_all = "snake_case")]
    enum TestState {
        Draft { body: String },
        Published { body: String, views: u32 },
    }

    impl_state!(TestState {
        Draft => "draft",
        Published => "published",
    });

    fn publish(prev: &TestState, _: ()) -> TestState {
        match prev {
            TestState::Draft { body } | TestState::Published { body, .. } => {
                TestState::Published {
                    body: body.clone(),
                    views: 0,
                }
            }
        }
    }

    fn views(state: &TestState, _: ()) -> u32 {
        match state {
            TestState::Draft { .. } => 0,
            TestState::Published { views, .. } => *views,
        }
    }

    #[test]
    fn builds_description_with_all_kinds() {
        let description = DescriptionBuilder::new()
            .transition("publish", publish)
            .try_transition("edit", |prev: &TestState, body: String| match prev {
                TestState::Draft { .. } => Ok(TestState::Draft { body }),
                TestState::Published { .. } => Err("published posts are frozen"),
            })
            .async_transition("sync", |prev: Arc<TestState>, _: ()| async move {
                (*prev).clone()
            })
            .method("views", views)
            .on_transition(|_, _| {})
            .build()
            .unwrap();

        assert_eq!(
            description.transition_names().collect::<Vec<_>>(),
            vec!["edit", "publish", "sync"]
        );
        assert_eq!(description.transition_mode("sync"), Some(TransitionMode::Async));
        assert_eq!(description.accepts("edit"), Some(type_name::<String>()));
        assert!(description.has_method("views"));
        assert!(description.has_observer());
    }

    #[test]
    fn rejects_empty_name() {
        let result = DescriptionBuilder::new().transition("", publish).build();

        assert!(matches!(result, Err(BuildError::EmptyOperationName)));
    }

    #[test]
    fn rejects_duplicate_transition() {
        let result = DescriptionBuilder::new()
            .transition("publish", publish)
            .transition("publish", publish)
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateOperation {
                name: "publish".to_string()
            }
        );
    }

    #[test]
    fn rejects_method_shadowing_transition() {
        let result = DescriptionBuilder::new()
            .transition("views", publish)
            .method("views", views)
            .build();

        assert!(matches!(
            result,
            Err(BuildError::DuplicateOperation { name }) if name == "views"
        ));
    }

    #[test]
    fn reports_first_problem() {
        let result = DescriptionBuilder::new()
            .transition("publish", publish)
            .method("", views)
            .transition("publish", publish)
            .build();

        assert!(matches!(result, Err(BuildError::EmptyOperationName)));
    }

    #[test]
    fn include_merges_operations_without_observer() {
        let base = DescriptionBuilder::new()
            .transition("publish", publish)
            .method("views", views)
            .on_transition(|_, _| {})
            .build()
            .unwrap();

        let extended = DescriptionBuilder::new()
            .include(&base)
            .async_transition("sync", |prev: Arc<TestState>, _: ()| async move {
                (*prev).clone()
            })
            .build()
            .unwrap();

        assert!(extended.has_transition("publish"));
        assert!(extended.has_transition("sync"));
        assert!(extended.has_method("views"));
        assert!(!extended.has_observer());
        assert!(!base.has_transition("sync"));
    }

    #[test]
    fn include_reports_collisions() {
        let base = DescriptionBuilder::new()
            .transition("publish", publish)
            .build()
            .unwrap();

        let result = DescriptionBuilder::new()
            .method("publish", views)
            .include(&base)
            .build();

        assert!(matches!(result, Err(BuildError::DuplicateOperation { .. })));
    }

    #[test]
    fn to_builder_keeps_observer_and_operations() {
        let base = DescriptionBuilder::new()
            .transition("publish", publish)
            .on_transition(|_, _| {})
            .build()
            .unwrap();

        let derived = base.to_builder().method("views", views).build().unwrap();

        assert!(derived.has_observer());
        assert!(derived.has_transition("publish"));
        assert!(derived.has_method("views"));
        assert!(!base.has_method("views"));
    }
}
