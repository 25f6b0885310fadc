//! Silk IR - program tree types for the Silk execution engine.
//!
//! This crate contains the data the evaluator consumes:
//! - `Name` for shared identifiers
//! - `Node`, the closed set of statement/expression variants
//! - `FunctionDeclaration` and `Variable`
//! - `BinaryOp` / `ComparisonOp` symbol resolution
//!
//! There is no lexer or parser: trees are supplied fully built.

mod name;
mod node;
mod operators;

pub use name::Name;
pub use node::{FunctionDeclaration, Node, Variable};
pub use operators::{BinaryOp, ComparisonOp};
