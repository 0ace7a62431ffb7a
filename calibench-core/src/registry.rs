//! Case Registry
//!
//! An ordered, caller-built collection of named callables. Each callable
//! takes no arguments and returns a failure count where 0 means success.
//! The registry is traversed read-only in registration order.

use crate::alloc::{AllocationError, terminate, try_clone_name};
use thiserror::Error;

/// Benchmarked entry point: returns the number of failures of one call
pub type BenchFn = Box<dyn Fn() -> u32>;

/// Errors raised while registering cases
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Case names must be non-empty
    #[error("case name must not be empty")]
    EmptyName,

    /// Case names must be unique within a registry
    #[error("case '{name}' is already registered")]
    DuplicateName {
        /// The conflicting name
        name: String,
    },
}

/// One named benchmarkable callable
pub struct BenchCase {
    name: String,
    entry: BenchFn,
}

impl BenchCase {
    fn new(name: String, entry: BenchFn) -> Self {
        Self { name, entry }
    }

    /// Case name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callable once, returning its failure count
    #[inline(always)]
    pub fn call(&self) -> u32 {
        (self.entry)()
    }
}

impl std::fmt::Debug for BenchCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered set of cases for one session
#[derive(Debug, Default)]
pub struct CaseRegistry {
    cases: Vec<BenchCase>,
}

impl CaseRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a case at the end of the registry.
    ///
    /// Running out of memory while storing the case terminates the process.
    pub fn register<F>(&mut self, name: &str, entry: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn() -> u32 + 'static,
    {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains(name) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }

        let owned = try_clone_name(name).unwrap_or_else(|e| terminate(&e));
        self.cases
            .try_reserve(1)
            .map_err(|source| AllocationError::Registry { source })
            .unwrap_or_else(|e| terminate(&e));
        self.cases.push(BenchCase::new(owned, Box::new(entry)));
        Ok(self)
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<F>(mut self, name: &str, entry: F) -> Result<Self, RegistryError>
    where
        F: Fn() -> u32 + 'static,
    {
        self.register(name, entry)?;
        Ok(self)
    }

    /// Whether a case with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.cases.iter().any(|c| c.name == name)
    }

    /// Keep only the cases matching `keep`, preserving order
    pub fn retain(&mut self, keep: impl FnMut(&BenchCase) -> bool) {
        self.cases.retain(keep);
    }

    /// Case at `index`
    pub fn get(&self, index: usize) -> Option<&BenchCase> {
        self.cases.get(index)
    }

    /// Cases in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, BenchCase> {
        self.cases.iter()
    }

    /// Case names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|c| c.name())
    }

    /// Number of registered cases
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no cases are registered
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<'a> IntoIterator for &'a CaseRegistry {
    type Item = &'a BenchCase;
    type IntoIter = std::slice::Iter<'a, BenchCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
