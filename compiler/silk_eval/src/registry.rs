//! Function and builtin registries.
//!
//! A session keeps two name-keyed tables: user functions, registered when a
//! declaration executes or through the embedding API, and native builtins.
//! Both follow last-registration-wins.
//!
//! Builtins are consulted first on every call, so each call chain keeps a
//! `BuiltinCache` in front of the shared table. The table carries a
//! generation counter that every registration bumps; a cache whose
//! generation no longer matches drops all its entries before answering.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use silk_ir::{FunctionDeclaration, Name};

use crate::shared::SharedMutableRegistry;
use crate::{EvalResult, Value};

/// Signature of a native callable.
pub type BuiltinFn = dyn Fn(&[Value]) -> EvalResult + Send + Sync;

/// A named native callable.
#[derive(Clone)]
pub struct Builtin {
    name: Name,
    func: Arc<BuiltinFn>,
}

impl Builtin {
    pub fn new(
        name: impl Into<Name>,
        func: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        Builtin {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }

    /// Whether both handles wrap the same callable.
    pub fn same_callable(&self, other: &Builtin) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

/// User-defined functions by name.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<Name, Arc<FunctionDeclaration>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decl` under `name`, returning the declaration it replaced.
    pub fn register(
        &mut self,
        name: Name,
        decl: Arc<FunctionDeclaration>,
    ) -> Option<Arc<FunctionDeclaration>> {
        self.functions.insert(name, decl)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<Arc<FunctionDeclaration>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<Name> {
        let mut names: Vec<_> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Native callables by name.
#[derive(Debug, Default)]
pub struct BuiltinRegistry {
    builtins: FxHashMap<Name, Builtin>,
}

impl BuiltinRegistry {
    /// Register `builtin` under its own name, returning the one it replaced.
    pub fn register(&mut self, builtin: Builtin) -> Option<Builtin> {
        self.builtins.insert(builtin.name.clone(), builtin)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name)
    }

    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}

/// Builtin table shared across a session, with its generation counter.
#[derive(Clone, Debug, Default)]
pub struct SharedBuiltins {
    registry: SharedMutableRegistry<BuiltinRegistry>,
    generation: Arc<AtomicU64>,
}

impl SharedBuiltins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `builtin`, replacing any binding of the same name.
    pub fn register(&self, builtin: Builtin) -> Option<Builtin> {
        let mut registry = self.registry.write();
        let previous = registry.register(builtin);
        // Bumped while the write lock is held so a reader holding the read
        // lock always sees a generation that matches the table.
        self.generation.fetch_add(1, Ordering::Release);
        previous
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.registry.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.read().get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Look up `name` together with the generation the answer belongs to.
    fn get_versioned(&self, name: &str) -> (u64, Option<Builtin>) {
        let registry = self.registry.read();
        let generation = self.generation.load(Ordering::Acquire);
        (generation, registry.get(name).cloned())
    }
}

/// Per-call-chain memo of builtin resolution, negative answers included.
#[derive(Debug, Default)]
pub struct BuiltinCache {
    generation: u64,
    entries: FxHashMap<Name, Option<Builtin>>,
}

impl BuiltinCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` against `builtins`, answering from the cache when the
    /// table has not changed since the entry was stored.
    pub fn resolve(&mut self, builtins: &SharedBuiltins, name: &Name) -> Option<Builtin> {
        let current = builtins.generation();
        if current != self.generation {
            self.entries.clear();
            self.generation = current;
        }
        if let Some(hit) = self.entries.get(name.as_str()) {
            return hit.clone();
        }

        let (generation, found) = builtins.get_versioned(name);
        if generation == self.generation {
            tracing::trace!(%name, builtin = found.is_some(), "caching builtin lookup");
            self.entries.insert(name.clone(), found.clone());
        }
        found
    }

    /// Number of cached answers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
