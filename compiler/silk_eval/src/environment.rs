//! Variable frames for the interpreter.
//!
//! The environment is a stack of frames: the base frame holds top-level
//! bindings and each user function call pushes one more. Lookup only ever
//! consults the innermost frame; there is no chaining to outer frames, so a
//! function body sees its parameters and its own assignments and nothing else.
//!
//! Call frames come from a `FramePool` and go back to it on pop, cleared,
//! so hot call paths reuse map allocations instead of rebuilding them.
//!
//! An environment created with [`Environment::isolated`] also journals every
//! name written into its base frame. Parallel children run in such
//! environments and hand the journaled writes back with
//! [`Environment::into_writes`] for merging.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use silk_ir::Name;

use crate::Value;

/// One scope's bindings.
#[derive(Clone, Default, PartialEq)]
pub struct Frame {
    bindings: FxHashMap<Name, Value>,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut bindings = FxHashMap::default();
        bindings.reserve(capacity);
        Frame { bindings }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Bind `name`, returning the value it replaced.
    #[inline]
    pub fn set(&mut self, name: Name, value: Value) -> Option<Value> {
        self.bindings.insert(name, value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.bindings.iter()
    }

    /// Remove every binding, keeping the allocation.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn capacity(&self) -> usize {
        self.bindings.capacity()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.bindings.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_map().entries(entries).finish()
    }
}

/// Free list of retired call frames.
#[derive(Debug)]
pub struct FramePool {
    free: Vec<Frame>,
    max_retained: usize,
    frame_capacity: usize,
}

impl FramePool {
    /// Pool keeping at most `max_retained` frames, each new frame pre-sized
    /// for `frame_capacity` bindings.
    pub fn new(max_retained: usize, frame_capacity: usize) -> Self {
        FramePool {
            free: Vec::new(),
            max_retained,
            frame_capacity,
        }
    }

    /// An empty frame, recycled when one is available.
    pub fn acquire(&mut self) -> Frame {
        match self.free.pop() {
            Some(frame) => {
                tracing::trace!(retained = self.free.len(), "reusing pooled frame");
                frame
            }
            None => Frame::with_capacity(self.frame_capacity),
        }
    }

    /// Clear `frame` and keep it for reuse if the pool has room.
    pub fn release(&mut self, mut frame: Frame) {
        if self.free.len() < self.max_retained {
            frame.clear();
            self.free.push(frame);
        }
    }

    /// Number of frames currently retained.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

impl Default for FramePool {
    fn default() -> Self {
        FramePool::new(64, 8)
    }
}

/// Frame stack of one call chain.
#[derive(Debug)]
pub struct Environment {
    /// Top-level frame, always present.
    base: Frame,
    /// Active call frames, innermost last.
    calls: Vec<Frame>,
    pool: FramePool,
    /// Names written into `base`, tracked for isolated environments only.
    journal: Option<FxHashSet<Name>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_pool(FramePool::default())
    }

    pub fn with_pool(pool: FramePool) -> Self {
        Environment {
            base: Frame::new(),
            calls: Vec::new(),
            pool,
            journal: None,
        }
    }

    /// Environment whose base frame starts as `snapshot` and whose writes to
    /// it are journaled.
    pub fn isolated(snapshot: Frame, pool: FramePool) -> Self {
        Environment {
            base: snapshot,
            calls: Vec::new(),
            pool,
            journal: Some(FxHashSet::default()),
        }
    }

    /// Number of frames on the stack, base included.
    pub fn depth(&self) -> usize {
        self.calls.len() + 1
    }

    /// An empty frame from the pool, to be seeded and then pushed.
    pub fn acquire_frame(&mut self) -> Frame {
        self.pool.acquire()
    }

    /// Make `frame` the innermost frame.
    #[inline]
    pub fn push_frame(&mut self, frame: Frame) {
        self.calls.push(frame);
    }

    /// Discard the innermost call frame. The base frame is never popped.
    #[inline]
    pub fn pop_frame(&mut self) {
        if let Some(frame) = self.calls.pop() {
            self.pool.release(frame);
        }
    }

    /// The innermost frame.
    #[inline]
    pub fn current(&self) -> &Frame {
        self.calls.last().unwrap_or(&self.base)
    }

    pub fn base(&self) -> &Frame {
        &self.base
    }

    /// Look a name up in the innermost frame.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.current().get(name)
    }

    /// Bind `name` in the innermost frame.
    pub fn define(&mut self, name: Name, value: Value) {
        match self.calls.last_mut() {
            Some(frame) => {
                frame.set(name, value);
            }
            None => {
                if let Some(journal) = &mut self.journal {
                    journal.insert(name.clone());
                }
                self.base.set(name, value);
            }
        }
    }

    /// Copy of the innermost frame.
    pub fn snapshot(&self) -> Frame {
        self.current().clone()
    }

    pub fn pool(&self) -> &FramePool {
        &self.pool
    }

    /// Journaled writes with their final values. Empty for environments that
    /// were not created with [`Environment::isolated`].
    pub fn into_writes(self) -> Vec<(Name, Value)> {
        let Environment {
            mut base, journal, ..
        } = self;
        let Some(journal) = journal else {
            return Vec::new();
        };
        journal
            .into_iter()
            .filter_map(|name| {
                let value = base.bindings.remove(&name)?;
                Some((name, value))
            })
            .collect()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
