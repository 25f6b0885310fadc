//! Tree-walking interpreter.
//!
//! An `Interpreter` is one execution session: the frame stack of its call
//! chain, handles to the (possibly shared) function and builtin registries,
//! and a builtin lookup cache. Top-level bindings persist across `execute`
//! calls on the same session.
//!
//! Parallel blocks fork child sessions that share the registries but own
//! an isolated copy of the current frame; see `parallel_block`.

mod builder;
mod control;
mod frame_guard;
mod function_call;
mod parallel_block;

pub use builder::{EvalConfig, InterpreterBuilder};
pub use frame_guard::CallFrameGuard;

use std::sync::Arc;

use silk_ir::{BinaryOp, ComparisonOp, FunctionDeclaration, Name, Node};

use crate::environment::{Environment, Frame};
use crate::errors::{
    settle, undefined_variable, unknown_comparison_operator, unknown_operator, ControlAction,
    ExecResult,
};
use crate::operators::{evaluate_binary, evaluate_comparison};
use crate::print_handler::{print_builtin, SharedPrintHandler};
use crate::registry::{Builtin, BuiltinCache, FunctionRegistry, SharedBuiltins};
use crate::shared::SharedMutableRegistry;
use crate::stack::ensure_sufficient_stack;
use crate::{EvalResult, Value};

/// One execution session.
pub struct Interpreter {
    pub(crate) env: Environment,
    functions: SharedMutableRegistry<FunctionRegistry>,
    builtins: SharedBuiltins,
    builtin_cache: BuiltinCache,
    config: EvalConfig,
    /// User function calls currently active on this call chain.
    call_depth: usize,
}

impl Interpreter {
    /// Session with default configuration and empty registries.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Execute `node` against this session.
    ///
    /// Returns the value of the node; for a `Program`, the value of its last
    /// statement. A `return` outside any function ends execution with its
    /// value.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = node.kind_name()))]
    pub fn execute(&mut self, node: &Node) -> EvalResult {
        let result = settle(self.exec(node));
        if let Err(err) = &result {
            tracing::debug!(error = %err, "execution failed");
        }
        result
    }

    /// Register `decl` under `name`, replacing any previous function of that
    /// name. Returns the replaced declaration.
    pub fn register_function(
        &self,
        name: impl Into<Name>,
        decl: impl Into<Arc<FunctionDeclaration>>,
    ) -> Option<Arc<FunctionDeclaration>> {
        let name = name.into();
        tracing::debug!(%name, "registering function");
        self.functions.write().register(name, decl.into())
    }

    /// Register a native callable under `name`, replacing any previous
    /// builtin of that name.
    pub fn register_builtin(
        &self,
        name: impl Into<Name>,
        func: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Option<Builtin> {
        let builtin = Builtin::new(name, func);
        tracing::debug!(name = %builtin.name(), "registering builtin");
        self.builtins.register(builtin)
    }

    /// Register the standard `print` builtin writing to `handler`.
    pub fn register_print(&self, handler: SharedPrintHandler) -> Option<Builtin> {
        self.builtins.register(print_builtin(handler))
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The innermost frame. Outside of a call this is the top-level frame.
    pub fn current_frame(&self) -> &Frame {
        self.env.current()
    }

    /// Read `name` from the current frame.
    pub fn env_value(&self, name: &str) -> EvalResult {
        self.env
            .lookup(name)
            .cloned()
            .ok_or_else(|| undefined_variable(&Name::new(name)))
    }

    /// A top-level binding.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.env.base().get(name).cloned()
    }

    /// Every top-level binding, sorted by name.
    pub fn globals(&self) -> Vec<(Name, Value)> {
        let mut globals: Vec<_> = self
            .env
            .base()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        globals.sort_by(|a, b| a.0.cmp(&b.0));
        globals
    }

    pub fn functions(&self) -> &SharedMutableRegistry<FunctionRegistry> {
        &self.functions
    }

    pub fn builtins(&self) -> &SharedBuiltins {
        &self.builtins
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// User function calls currently active.
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    #[inline]
    fn exec(&mut self, node: &Node) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_node(node))
    }

    fn exec_node(&mut self, node: &Node) -> ExecResult {
        match node {
            Node::Program { body } => self.exec_sequence(body),
            Node::Number(n) => Ok(Value::Number(*n)),
            Node::Str(s) => Ok(Value::Str(Arc::clone(s))),
            Node::Variable(var) => match self.env.lookup(&var.name) {
                Some(value) => Ok(value.clone()),
                None => Err(undefined_variable(&var.name).into()),
            },
            Node::Binary { op, left, right } => {
                let op = BinaryOp::from_symbol(op).ok_or_else(|| unknown_operator(op))?;
                let left = self.exec(left)?;
                let right = self.exec(right)?;
                evaluate_binary(op, &left, &right).map_err(ControlAction::from)
            }
            Node::Comparison { op, left, right } => {
                let op = ComparisonOp::from_symbol(op)
                    .ok_or_else(|| unknown_comparison_operator(op))?;
                let left = self.exec(left)?;
                let right = self.exec(right)?;
                evaluate_comparison(op, &left, &right).map_err(ControlAction::from)
            }
            Node::Assignment { target, value } => {
                let value = self.exec(value)?;
                self.env.define(target.name.clone(), value.clone());
                Ok(value)
            }
            Node::If {
                condition,
                consequent,
                alternate,
            } => self.exec_if(condition, consequent, alternate.as_deref()),
            Node::For {
                init,
                condition,
                post,
                body,
            } => self.exec_for(init, condition, post, body),
            Node::While { condition, body } => self.exec_while(condition, body),
            Node::Parallel { body } => self.exec_parallel(body),
            Node::FunctionDeclaration(decl) => {
                self.declare_function(decl);
                Ok(Value::Void)
            }
            Node::FunctionCall { name, args } => self.eval_call(name, args),
            Node::Return { value } => {
                let value = self.exec(value)?;
                Err(ControlAction::Return(value))
            }
        }
    }

    /// Run statements in order; the value of the last one, `Void` if empty.
    fn exec_sequence(&mut self, body: &[Node]) -> ExecResult {
        let mut last = Value::Void;
        for stmt in body {
            last = self.exec(stmt)?;
        }
        Ok(last)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
