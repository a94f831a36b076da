//! Explicit registry of test factories
//!
//! Tests are registered under a unique name together with a zero-argument
//! factory. The registry is the "module" a driver hands to the runner: it can
//! instantiate every registered test, or resolve a list of names.

use crate::error::{Error, Result, ResultExt};
use crate::test_unit::PerformanceTest;
use std::fmt;

type Factory<D> = Box<dyn Fn() -> Box<dyn PerformanceTest<D>>>;

struct Entry<D: ?Sized> {
    name: String,
    factory: Factory<D>,
}

/// Ordered collection of named test factories
pub struct TestRegistry<D: ?Sized = ()> {
    entries: Vec<Entry<D>>,
}

impl<D: ?Sized + 'static> TestRegistry<D> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a test type under `name`, constructed with `Default`
    pub fn register<T>(&mut self, name: &str) -> Result<&mut Self>
    where
        T: PerformanceTest<D> + Default + 'static,
    {
        self.register_fn(name, || Box::new(T::default()))
    }

    /// Register a factory closure under `name`
    pub fn register_fn<F>(&mut self, name: &str, factory: F) -> Result<&mut Self>
    where
        F: Fn() -> Box<dyn PerformanceTest<D>> + 'static,
    {
        Self::validate_name(name)
            .and_then(|()| self.ensure_unique(name))
            .with_context(|| format!("cannot register test '{name}'"))?;

        self.entries.push(Entry {
            name: name.to_owned(),
            factory: Box::new(factory),
        });
        Ok(self)
    }

    /// Builder-style registration for chaining during setup
    pub fn with<T>(mut self, name: &str) -> Result<Self>
    where
        T: PerformanceTest<D> + Default + 'static,
    {
        self.register::<T>(name)?;
        Ok(self)
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("test name must not be empty"));
        }
        if name.contains(',') {
            return Err(Error::invalid_argument("test name must not contain ','"));
        }
        Ok(())
    }

    fn ensure_unique(&self, name: &str) -> Result<()> {
        if self.contains(name) {
            Err(Error::invalid_argument("name is already registered"))
        } else {
            Ok(())
        }
    }

    /// Names of all registered tests, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Whether a test is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Number of registered tests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no test is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiate the named tests in the order given.
    ///
    /// Every name is checked before any factory runs, so an unknown name
    /// leaves nothing constructed.
    pub fn resolve<I, S>(&self, names: I) -> Result<Vec<Box<dyn PerformanceTest<D>>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                self.entries
                    .iter()
                    .find(|entry| entry.name == name)
                    .ok_or_else(|| Error::unknown_test(name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(entries.into_iter().map(|entry| (entry.factory)()).collect())
    }

    /// Instantiate every registered test in registration order
    pub fn instantiate_all(&self) -> Vec<Box<dyn PerformanceTest<D>>> {
        self.entries.iter().map(|entry| (entry.factory)()).collect()
    }
}

impl<D: ?Sized + 'static> Default for TestRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ?Sized> fmt::Debug for TestRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.name))
            .finish()
    }
}
