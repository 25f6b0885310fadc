//! Program tree.
//!
//! `Node` is a closed sum type: every construct the engine can execute is a
//! variant here, and the evaluator matches on it exhaustively. Trees are
//! immutable once built; the evaluator only ever borrows them.
//!
//! Function declarations are reference counted so registering one (which
//! happens every time the declaration node executes) shares the body instead
//! of deep-cloning it.

use std::sync::Arc;

use crate::Name;

/// A variable reference, also used as assignment target and parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    pub name: Name,
}

impl Variable {
    pub fn new(name: impl Into<Name>) -> Self {
        Variable { name: name.into() }
    }
}

/// A user-defined function: name, ordered parameters, body statements.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Name,
    pub params: Vec<Variable>,
    pub body: Vec<Node>,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<Name>, params: Vec<Variable>, body: Vec<Node>) -> Self {
        FunctionDeclaration {
            name: name.into(),
            params,
            body,
        }
    }

    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// One node of a program tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Top-level statement sequence.
    Program { body: Vec<Node> },
    /// Numeric literal.
    Number(f64),
    /// String literal.
    Str(Arc<str>),
    /// Variable read.
    Variable(Variable),
    /// Arithmetic on two operands; `op` is the operator symbol.
    Binary {
        op: Box<str>,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Numeric comparison; `op` is the operator symbol.
    Comparison {
        op: Box<str>,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Bind `value` to `target` in the current frame.
    Assignment { target: Variable, value: Box<Node> },
    If {
        condition: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    For {
        init: Box<Node>,
        condition: Box<Node>,
        post: Box<Node>,
        body: Vec<Node>,
    },
    While {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    /// Children run concurrently under a bounded scheduler.
    Parallel { body: Vec<Node> },
    FunctionDeclaration(Arc<FunctionDeclaration>),
    FunctionCall { name: Name, args: Vec<Node> },
    Return { value: Box<Node> },
}

// Constructors. Trees normally come from an external generator; these keep
// hand-built trees (tests, embedders) readable.
impl Node {
    pub fn program(body: Vec<Node>) -> Self {
        Node::Program { body }
    }

    pub fn number(value: f64) -> Self {
        Node::Number(value)
    }

    pub fn string(value: impl AsRef<str>) -> Self {
        Node::Str(Arc::from(value.as_ref()))
    }

    pub fn var(name: impl Into<Name>) -> Self {
        Node::Variable(Variable::new(name))
    }

    pub fn binary(op: &str, left: Node, right: Node) -> Self {
        Node::Binary {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn compare(op: &str, left: Node, right: Node) -> Self {
        Node::Comparison {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assign(target: impl Into<Name>, value: Node) -> Self {
        Node::Assignment {
            target: Variable::new(target),
            value: Box::new(value),
        }
    }

    pub fn if_then(condition: Node, consequent: Node) -> Self {
        Node::If {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternate: None,
        }
    }

    pub fn if_else(condition: Node, consequent: Node, alternate: Node) -> Self {
        Node::If {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternate: Some(Box::new(alternate)),
        }
    }

    pub fn for_loop(init: Node, condition: Node, post: Node, body: Vec<Node>) -> Self {
        Node::For {
            init: Box::new(init),
            condition: Box::new(condition),
            post: Box::new(post),
            body,
        }
    }

    pub fn while_loop(condition: Node, body: Vec<Node>) -> Self {
        Node::While {
            condition: Box::new(condition),
            body,
        }
    }

    pub fn parallel(body: Vec<Node>) -> Self {
        Node::Parallel { body }
    }

    pub fn function(name: impl Into<Name>, params: &[&str], body: Vec<Node>) -> Self {
        let params = params.iter().map(|p| Variable::new(*p)).collect();
        Node::FunctionDeclaration(Arc::new(FunctionDeclaration::new(name, params, body)))
    }

    pub fn call(name: impl Into<Name>, args: Vec<Node>) -> Self {
        Node::FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn ret(value: Node) -> Self {
        Node::Return {
            value: Box::new(value),
        }
    }

    /// Short variant name, used in trace output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Program { .. } => "Program",
            Node::Number(_) => "Number",
            Node::Str(_) => "String",
            Node::Variable(_) => "Variable",
            Node::Binary { .. } => "BinaryExpr",
            Node::Comparison { .. } => "ComparisonExpr",
            Node::Assignment { .. } => "Assignment",
            Node::If { .. } => "IfStatement",
            Node::For { .. } => "ForLoop",
            Node::While { .. } => "WhileLoop",
            Node::Parallel { .. } => "ParallelBlock",
            Node::FunctionDeclaration(_) => "FunctionDeclaration",
            Node::FunctionCall { .. } => "FunctionCall",
            Node::Return { .. } => "ReturnStatement",
        }
    }
}
