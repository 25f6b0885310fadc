//! Conditionals, loops and function declarations.

use std::sync::Arc;

use silk_ir::{FunctionDeclaration, Node};

use super::Interpreter;
use crate::errors::{non_boolean_condition, ControlAction, ExecResult};
use crate::Value;

impl Interpreter {
    /// Evaluate a condition, which must produce a boolean.
    fn eval_condition(&mut self, condition: &Node) -> Result<bool, ControlAction> {
        let value = self.exec(condition)?;
        value
            .as_bool()
            .ok_or_else(|| non_boolean_condition(&value).into())
    }

    /// Run the taken branch. A false condition with no alternate yields `Void`.
    pub(super) fn exec_if(
        &mut self,
        condition: &Node,
        consequent: &Node,
        alternate: Option<&Node>,
    ) -> ExecResult {
        if self.eval_condition(condition)? {
            self.exec(consequent)
        } else if let Some(alternate) = alternate {
            self.exec(alternate)
        } else {
            Ok(Value::Void)
        }
    }

    /// `init` once, then condition, body, `post` until the condition is false.
    pub(super) fn exec_for(
        &mut self,
        init: &Node,
        condition: &Node,
        post: &Node,
        body: &[Node],
    ) -> ExecResult {
        self.exec(init)?;
        while self.eval_condition(condition)? {
            self.exec_sequence(body)?;
            self.exec(post)?;
        }
        Ok(Value::Void)
    }

    pub(super) fn exec_while(&mut self, condition: &Node, body: &[Node]) -> ExecResult {
        while self.eval_condition(condition)? {
            self.exec_sequence(body)?;
        }
        Ok(Value::Void)
    }

    /// Register a declaration under its own name, replacing any previous one.
    pub(super) fn declare_function(&self, decl: &Arc<FunctionDeclaration>) {
        tracing::debug!(name = %decl.name, arity = decl.arity(), "declaring function");
        let previous = self
            .functions
            .write()
            .register(decl.name.clone(), Arc::clone(decl));
        if previous.is_some() {
            tracing::trace!(name = %decl.name, "replaced earlier declaration");
        }
    }
}
