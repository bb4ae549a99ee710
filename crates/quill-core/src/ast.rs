//! Function-like declarations as produced by the upstream JavaScript parser.
//!
//! The tree mirrors the subset of ESTree needed to reason about return values:
//! statements that can contain a `return`, and expressions that can contain a
//! call to a promise resolver. Node types that are not modelled deserialize to
//! `Other` and are never considered to return or resolve anything.

use serde::{Deserialize, Serialize};

/// Lines are 1-based and columns are 0-based, as in ESTree `loc`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    #[default]
    Function,
    Method,
    Constructor,
    Arrow,
}

/// A function declaration, function expression, method or arrow function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionNode {
    #[serde(default)]
    pub kind: FunctionKind,
    #[serde(default, rename = "async")]
    pub is_async: bool,
    #[serde(default, rename = "generator")]
    pub is_generator: bool,
    #[serde(default)]
    pub params: Vec<Expression>,
    /// `None` for declarations without a body, e.g. overload signatures.
    #[serde(default)]
    pub body: Option<FunctionBody>,
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionBody {
    Block(BlockStatement),
    /// Concise body of an arrow function, e.g. `x => x + 1`.
    Expression(Box<Expression>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
enum BlockTag {
    #[default]
    BlockStatement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    #[serde(rename = "type")]
    tag: BlockTag,
    #[serde(default)]
    pub body: Vec<Statement>,
}

impl BlockStatement {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { tag: BlockTag::BlockStatement, body }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    #[serde(rename = "BlockStatement")]
    Block {
        #[serde(default)]
        body: Vec<Statement>,
    },
    #[serde(rename = "ReturnStatement")]
    Return {
        #[serde(default)]
        argument: Option<Expression>,
    },
    #[serde(rename = "ExpressionStatement")]
    Expression { expression: Expression },
    #[serde(rename = "IfStatement")]
    If {
        test: Expression,
        consequent: Box<Statement>,
        #[serde(default)]
        alternate: Option<Box<Statement>>,
    },
    #[serde(rename = "ForStatement")]
    For { body: Box<Statement> },
    #[serde(rename = "ForInStatement")]
    ForIn { body: Box<Statement> },
    #[serde(rename = "ForOfStatement")]
    ForOf { body: Box<Statement> },
    #[serde(rename = "WhileStatement")]
    While { body: Box<Statement> },
    #[serde(rename = "DoWhileStatement")]
    DoWhile { body: Box<Statement> },
    #[serde(rename = "LabeledStatement")]
    Labeled { body: Box<Statement> },
    #[serde(rename = "WithStatement")]
    With { body: Box<Statement> },
    #[serde(rename = "TryStatement")]
    Try {
        block: Box<Statement>,
        #[serde(default)]
        handler: Option<CatchClause>,
        #[serde(default)]
        finalizer: Option<Box<Statement>>,
    },
    #[serde(rename = "SwitchStatement")]
    Switch {
        #[serde(default)]
        cases: Vec<SwitchCase>,
    },
    VariableDeclaration {
        #[serde(default)]
        declarations: Vec<VariableDeclarator>,
    },
    FunctionDeclaration(FunctionNode),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    #[serde(default)]
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    #[serde(default)]
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier {
        name: String,
    },
    Literal {
        #[serde(default)]
        value: serde_json::Value,
    },
    #[serde(rename = "CallExpression")]
    Call {
        callee: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    #[serde(rename = "NewExpression")]
    New {
        callee: Box<Expression>,
        /// Textual type arguments, e.g. `["void"]` for `new Promise<void>(...)`.
        #[serde(default, rename = "typeArguments")]
        type_arguments: Vec<String>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    #[serde(rename = "FunctionExpression")]
    Function(FunctionNode),
    #[serde(rename = "ArrowFunctionExpression")]
    Arrow(FunctionNode),
    #[serde(rename = "AwaitExpression")]
    Await { argument: Box<Expression> },
    #[serde(rename = "YieldExpression")]
    Yield {
        #[serde(default)]
        argument: Option<Box<Expression>>,
    },
    #[serde(rename = "UnaryExpression")]
    Unary { argument: Box<Expression> },
    #[serde(rename = "SpreadElement")]
    Spread { argument: Box<Expression> },
    #[serde(rename = "BinaryExpression")]
    Binary {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    #[serde(rename = "LogicalExpression")]
    Logical {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    #[serde(rename = "AssignmentExpression")]
    Assignment {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    #[serde(rename = "ConditionalExpression")]
    Conditional {
        test: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
    },
    #[serde(rename = "SequenceExpression")]
    Sequence {
        #[serde(default)]
        expressions: Vec<Expression>,
    },
    TemplateLiteral {
        #[serde(default)]
        expressions: Vec<Expression>,
    },
    #[serde(rename = "TaggedTemplateExpression")]
    TaggedTemplate { quasi: Box<Expression> },
    #[serde(rename = "ArrayExpression")]
    Array {
        #[serde(default)]
        elements: Vec<Option<Expression>>,
    },
    #[serde(rename = "ObjectExpression")]
    Object {
        #[serde(default)]
        properties: Vec<Expression>,
    },
    Property {
        key: Box<Expression>,
        value: Box<Expression>,
        #[serde(default)]
        computed: bool,
    },
    #[serde(rename = "MemberExpression")]
    Member {
        object: Box<Expression>,
        property: Box<Expression>,
        #[serde(default)]
        computed: bool,
    },
    #[serde(rename = "ChainExpression")]
    Chain { expression: Box<Expression> },
    #[serde(other)]
    Other,
}

impl FunctionNode {
    pub fn new(kind: FunctionKind) -> Self {
        Self { kind, ..Default::default() }
    }

    pub fn with_block(mut self, statements: Vec<Statement>) -> Self {
        self.body = Some(FunctionBody::Block(BlockStatement::new(statements)));
        self
    }

    pub fn with_expression_body(mut self, expression: Expression) -> Self {
        self.body = Some(FunctionBody::Expression(Box::new(expression)));
        self
    }

    pub fn with_params(mut self, names: &[&str]) -> Self {
        self.params = names.iter().map(|name| Expression::ident(name)).collect();
        self
    }

    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    pub fn with_generator(mut self, is_generator: bool) -> Self {
        self.is_generator = is_generator;
        self
    }

    /// Name of the first parameter, if it is a plain identifier.
    pub fn first_param_name(&self) -> Option<&str> {
        self.params.first().and_then(Expression::as_identifier)
    }
}

impl Statement {
    pub fn ret(argument: Expression) -> Self {
        Self::Return { argument: Some(argument) }
    }

    pub fn ret_empty() -> Self {
        Self::Return { argument: None }
    }

    pub fn expr(expression: Expression) -> Self {
        Self::Expression { expression }
    }

    pub fn block(body: Vec<Statement>) -> Self {
        Self::Block { body }
    }
}

impl Expression {
    pub fn ident(name: &str) -> Self {
        Self::Identifier { name: name.to_string() }
    }

    pub fn number(value: i64) -> Self {
        Self::Literal { value: serde_json::Value::from(value) }
    }

    pub fn call(callee: &str, arguments: Vec<Expression>) -> Self {
        Self::Call { callee: Box::new(Self::ident(callee)), arguments }
    }

    /// `new Promise(executor)`
    pub fn new_promise(executor: FunctionNode) -> Self {
        Self::New {
            callee: Box::new(Self::ident("Promise")),
            type_arguments: Vec::new(),
            arguments: vec![Self::Arrow(executor)],
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier { name } => Some(name.as_str()),
            _ => None,
        }
    }

    /// The function node of a function or arrow function expression.
    pub fn as_function(&self) -> Option<&FunctionNode> {
        match self {
            Self::Function(function) | Self::Arrow(function) => Some(function),
            _ => None,
        }
    }
}
