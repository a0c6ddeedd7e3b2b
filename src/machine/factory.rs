//! The instance factory.

use crate::core::State;
use crate::machine::description::Description;
use crate::machine::instance::Instance;
use std::fmt;
use std::sync::Arc;

/// A description turned into a constructor of instances.
///
/// The description stays reachable for introspection and re-composition.
/// Cloning a machine is cheap and shares the description.
pub struct Machine<D: State> {
    description: Arc<Description<D>>,
}

impl<D: State> Machine<D> {
    pub fn from_description(description: Description<D>) -> Self {
        Self::from_shared(Arc::new(description))
    }

    pub(crate) fn from_shared(description: Arc<Description<D>>) -> Self {
        Self { description }
    }

    /// Wrap initial data in an instance.
    ///
    /// Any variant is accepted. The observer is not notified.
    pub fn new_instance(&self, initial: D) -> Instance<D> {
        Instance::from_parts(Arc::clone(&self.description), Arc::new(initial))
    }

    pub fn description(&self) -> &Description<D> {
        &self.description
    }

    /// A new machine identical to this one except for its observer.
    pub fn with_observer<F>(&self, observer: F) -> Self
    where
        F: Fn(&D, &D) + Send + Sync + 'static,
    {
        Self::from_description(self.description.with_observer(observer))
    }
}

/// Create a machine from a description.
pub fn create_machine<D: State>(description: Description<D>) -> Machine<D> {
    Machine::from_description(description)
}

impl<D: State> From<Description<D>> for Machine<D> {
    fn from(description: Description<D>) -> Self {
        Self::from_description(description)
    }
}

impl<D: State> Clone for Machine<D> {
    fn clone(&self) -> Self {
        Self {
            description: Arc::clone(&self.description),
        }
    }
}

impl<D: State> fmt::Debug for Machine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("description", &self.description)
            .finish()
    }
}
