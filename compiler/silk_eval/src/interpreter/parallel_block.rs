//! Parallel blocks.
//!
//! Each child statement runs in its own forked session on a worker thread,
//! with at most `max_concurrency` workers per block. A child is forked when
//! a worker picks it up. A fork shares the registries with its parent but
//! gets a private copy of the frame that was current when the block started,
//! so children never observe each other's writes.
//!
//! Once every child has finished, the names each successful child wrote
//! into its copy are merged back into the current frame in child order, so
//! a later child wins a conflict. A failed child contributes no writes. If
//! any child failed the block fails with every collected error, in child
//! order.

use silk_ir::Node;

use super::Interpreter;
use crate::environment::{Environment, Frame};
use crate::errors::{parallel_failures, settle, task_panicked, ExecResult};
use crate::parallel::{panic_message, run_bounded};
use crate::registry::BuiltinCache;
use crate::Value;

impl Interpreter {
    #[tracing::instrument(level = "debug", skip_all, fields(children = body.len()))]
    pub(super) fn exec_parallel(&mut self, body: &[Node]) -> ExecResult {
        if body.is_empty() {
            return Ok(Value::Void);
        }

        let snapshot = self.env.snapshot();
        let parent: &Interpreter = self;
        let parent_span = tracing::Span::current();

        let outcomes = run_bounded(
            body.iter().collect(),
            self.config.max_concurrency,
            |index, stmt: &Node| {
                let _span = tracing::debug_span!(parent: &parent_span, "parallel_child", index)
                    .entered();
                let mut child = parent.fork(snapshot.clone());
                let result = settle(child.exec(stmt));
                (result, child.env.into_writes())
            },
        );

        let mut errors = Vec::new();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok((Ok(_), writes)) => {
                    tracing::trace!(index, writes = writes.len(), "merging child writes");
                    for (name, value) in writes {
                        self.env.define(name, value);
                    }
                }
                Ok((Err(err), _)) => errors.push(err),
                Err(payload) => errors.push(task_panicked(&panic_message(&*payload))),
            }
        }

        if errors.is_empty() {
            Ok(Value::Void)
        } else {
            tracing::debug!(failed = errors.len(), "parallel block failed");
            Err(parallel_failures(errors).into())
        }
    }

    /// Child session for one parallel statement.
    fn fork(&self, snapshot: Frame) -> Interpreter {
        Interpreter {
            env: Environment::isolated(snapshot, self.config.frame_pool()),
            functions: self.functions.clone(),
            builtins: self.builtins.clone(),
            builtin_cache: BuiltinCache::new(),
            config: self.config,
            call_depth: self.call_depth,
        }
    }
}
