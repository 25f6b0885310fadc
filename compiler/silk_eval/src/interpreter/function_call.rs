//! Function call protocol.
//!
//! Resolution order is builtins first, then user functions. For a user
//! function the arity is checked before any argument is evaluated, then the
//! arguments are evaluated left to right in the caller's frame and bound by
//! position into a fresh frame. The body runs in that frame until it falls
//! off the end or a `return` reaches the call boundary.

use smallvec::SmallVec;

use silk_ir::{FunctionDeclaration, Name, Node};

use super::Interpreter;
use crate::environment::Frame;
use crate::errors::{
    arity_mismatch, call_depth_exceeded, settle, undefined_function, ControlAction, ExecResult,
};
use crate::{EvalResult, Value};

/// Evaluated call arguments. Most calls pass only a few.
type Args = SmallVec<[Value; 4]>;

impl Interpreter {
    pub(super) fn eval_call(&mut self, name: &Name, args: &[Node]) -> ExecResult {
        if let Some(builtin) = self.builtin_cache.resolve(&self.builtins, name) {
            let values = self.eval_args(args)?;
            return builtin.call(&values).map_err(ControlAction::from);
        }

        let Some(decl) = self.functions.read().get(name) else {
            return Err(undefined_function(name).into());
        };
        if decl.arity() != args.len() {
            return Err(arity_mismatch(name, decl.arity(), args.len()).into());
        }
        if let Some(limit) = self.config.max_call_depth {
            if self.call_depth >= limit {
                return Err(call_depth_exceeded(limit).into());
            }
        }

        let values = self.eval_args(args)?;
        let mut frame = self.env.acquire_frame();
        for (param, value) in decl.params.iter().zip(values) {
            frame.set(param.name.clone(), value);
        }
        self.call_function(name, &decl, frame)
            .map_err(ControlAction::from)
    }

    fn eval_args(&mut self, args: &[Node]) -> Result<Args, ControlAction> {
        args.iter().map(|arg| self.exec(arg)).collect()
    }

    /// Run `decl`'s body in `frame`. A `return` ends the call with its value.
    #[tracing::instrument(level = "trace", skip_all, fields(function = %name))]
    fn call_function(
        &mut self,
        name: &Name,
        decl: &FunctionDeclaration,
        frame: Frame,
    ) -> EvalResult {
        self.with_call_frame(frame, |scoped| settle(scoped.exec_sequence(&decl.body)))
            .map_err(|err| err.unwound_through(name))
    }
}
