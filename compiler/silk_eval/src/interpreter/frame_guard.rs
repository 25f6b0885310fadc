//! RAII guard for user function call frames.
//!
//! Entering a call pushes the callee's frame and counts the call; dropping
//! the guard pops the frame back into the pool and uncounts it. The drop
//! runs on every exit path, early returns, errors and unwinding included,
//! so the frame stack can never be left unbalanced.
//!
//! The guard holds `&mut Interpreter` and derefs to it, so the body runs
//! through the guard exactly as it would through the interpreter.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::Frame;

/// An active call frame. Access the interpreter through it.
pub struct CallFrameGuard<'a> {
    interpreter: &'a mut Interpreter,
}

impl Drop for CallFrameGuard<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_frame();
        self.interpreter.call_depth = self.interpreter.call_depth.saturating_sub(1);
    }
}

impl Deref for CallFrameGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Interpreter {
        self.interpreter
    }
}

impl DerefMut for CallFrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut Interpreter {
        self.interpreter
    }
}

impl Interpreter {
    /// Push `frame` as the innermost frame until the guard drops.
    pub fn enter_call(&mut self, frame: Frame) -> CallFrameGuard<'_> {
        self.env.push_frame(frame);
        self.call_depth += 1;
        CallFrameGuard { interpreter: self }
    }

    /// Run `f` with `frame` pushed; the frame is popped when `f` returns.
    pub fn with_call_frame<T, F>(&mut self, frame: Frame, f: F) -> T
    where
        F: FnOnce(&mut CallFrameGuard<'_>) -> T,
    {
        let mut guard = self.enter_call(frame);
        f(&mut guard)
    }
}
