//! Structural queries on function nodes.
//!
//! None of these functions descend into nested function declarations or
//! expressions when looking for `return`: those returns belong to the nested
//! function. The only exception is the executor of a `new Promise(...)`, which
//! is searched for calls to its resolver.

use crate::ast::*;

pub fn is_async(node: &FunctionNode) -> bool {
    node.is_async
}

pub fn is_generator(node: &FunctionNode) -> bool {
    node.is_generator
}

pub fn is_constructor(node: &FunctionNode) -> bool {
    node.kind == FunctionKind::Constructor
}

/// Whether the function returns a value somewhere in its body.
///
/// A bare `return;` does not count. A returned `new Promise(...)` counts when
/// `any_promise_as_return` is true, and otherwise only if it is not a
/// `Promise<void>` and its executor calls the resolver with an argument, e.g.
/// `new Promise(resolve => resolve(1))`.
///
/// An expression-bodied arrow function always produces a value, whatever the
/// expression is.
pub fn produces_return_value(node: &FunctionNode, any_promise_as_return: bool) -> bool {
    match &node.body {
        None => false,
        Some(FunctionBody::Block(block)) => {
            statements_produce_value(&block.body, any_promise_as_return)
        }
        Some(FunctionBody::Expression(_)) => true,
    }
}

fn statements_produce_value(statements: &[Statement], any_promise_as_return: bool) -> bool {
    statements
        .iter()
        .any(|statement| statement_produces_value(statement, any_promise_as_return))
}

fn statement_produces_value(statement: &Statement, any_promise_as_return: bool) -> bool {
    match statement {
        Statement::Block { body } => statements_produce_value(body, any_promise_as_return),
        Statement::Return { argument } => argument
            .as_ref()
            .is_some_and(|argument| returned_expression_counts(argument, any_promise_as_return)),
        Statement::If { consequent, alternate, .. } => {
            statement_produces_value(consequent, any_promise_as_return)
                || alternate
                    .as_deref()
                    .is_some_and(|alternate| statement_produces_value(alternate, any_promise_as_return))
        }
        Statement::For { body }
        | Statement::ForIn { body }
        | Statement::ForOf { body }
        | Statement::While { body }
        | Statement::DoWhile { body }
        | Statement::Labeled { body }
        | Statement::With { body } => statement_produces_value(body, any_promise_as_return),
        Statement::Try { block, handler, finalizer } => {
            statement_produces_value(block, any_promise_as_return)
                || handler
                    .as_ref()
                    .is_some_and(|handler| statement_produces_value(&handler.body, any_promise_as_return))
                || finalizer
                    .as_deref()
                    .is_some_and(|finalizer| statement_produces_value(finalizer, any_promise_as_return))
        }
        Statement::Switch { cases } => cases
            .iter()
            .any(|case| statements_produce_value(&case.consequent, any_promise_as_return)),
        Statement::Expression { .. }
        | Statement::VariableDeclaration { .. }
        | Statement::FunctionDeclaration(_)
        | Statement::Other => false,
    }
}

fn returned_expression_counts(expression: &Expression, any_promise_as_return: bool) -> bool {
    if !is_new_promise(expression) || any_promise_as_return {
        return true;
    }
    promise_resolves_value(expression)
}

/// `new Promise(...)`, with or without type arguments.
pub fn is_new_promise(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::New { callee, .. } if callee.as_identifier() == Some("Promise")
    )
}

/// `new Promise<void>(...)`
pub fn is_void_promise(expression: &Expression) -> bool {
    match expression {
        Expression::New { type_arguments, .. } => type_arguments
            .first()
            .is_some_and(|argument| argument.trim() == "void"),
        _ => false,
    }
}

fn promise_resolves_value(promise: &Expression) -> bool {
    if is_void_promise(promise) {
        return false;
    }

    let Expression::New { arguments, .. } = promise else {
        return false;
    };
    let Some(executor) = arguments.first().and_then(Expression::as_function) else {
        return false;
    };
    let Some(resolver) = executor.first_param_name() else {
        return false;
    };

    body_calls_resolver(executor, resolver)
}

/// Search a function nested in the executor.
fn nested_function_calls_resolver(function: &FunctionNode, resolver: &str) -> bool {
    // A first parameter with the same name shadows the resolver.
    if function.first_param_name() == Some(resolver) {
        return false;
    }
    body_calls_resolver(function, resolver)
}

fn body_calls_resolver(function: &FunctionNode, resolver: &str) -> bool {
    match &function.body {
        None => false,
        Some(FunctionBody::Block(block)) => statements_call_resolver(&block.body, resolver),
        Some(FunctionBody::Expression(expression)) => expression_calls_resolver(expression, resolver),
    }
}

fn statements_call_resolver(statements: &[Statement], resolver: &str) -> bool {
    statements
        .iter()
        .any(|statement| statement_calls_resolver(statement, resolver))
}

fn statement_calls_resolver(statement: &Statement, resolver: &str) -> bool {
    match statement {
        Statement::Block { body } => statements_call_resolver(body, resolver),
        Statement::Expression { expression } => expression_calls_resolver(expression, resolver),
        Statement::Return { argument } => argument
            .as_ref()
            .is_some_and(|argument| expression_calls_resolver(argument, resolver)),
        Statement::If { test, consequent, alternate } => {
            expression_calls_resolver(test, resolver)
                || statement_calls_resolver(consequent, resolver)
                || alternate
                    .as_deref()
                    .is_some_and(|alternate| statement_calls_resolver(alternate, resolver))
        }
        Statement::For { body }
        | Statement::ForIn { body }
        | Statement::ForOf { body }
        | Statement::While { body }
        | Statement::DoWhile { body }
        | Statement::Labeled { body }
        | Statement::With { body } => statement_calls_resolver(body, resolver),
        Statement::Try { block, handler, finalizer } => {
            statement_calls_resolver(block, resolver)
                || handler
                    .as_ref()
                    .is_some_and(|handler| statement_calls_resolver(&handler.body, resolver))
                || finalizer
                    .as_deref()
                    .is_some_and(|finalizer| statement_calls_resolver(finalizer, resolver))
        }
        Statement::Switch { cases } => cases
            .iter()
            .any(|case| statements_call_resolver(&case.consequent, resolver)),
        Statement::VariableDeclaration { declarations } => declarations.iter().any(|declarator| {
            declarator
                .init
                .as_ref()
                .is_some_and(|init| expression_calls_resolver(init, resolver))
        }),
        Statement::FunctionDeclaration(function) => {
            nested_function_calls_resolver(function, resolver)
        }
        Statement::Other => false,
    }
}

fn expression_calls_resolver(expression: &Expression, resolver: &str) -> bool {
    let any = |expressions: &[Expression]| {
        expressions
            .iter()
            .any(|expression| expression_calls_resolver(expression, resolver))
    };

    match expression {
        Expression::Call { callee, arguments } => {
            (callee.as_identifier() == Some(resolver) && !arguments.is_empty()) || any(arguments)
        }
        Expression::Function(function) | Expression::Arrow(function) => {
            nested_function_calls_resolver(function, resolver)
        }
        Expression::Await { argument }
        | Expression::Unary { argument }
        | Expression::Spread { argument } => expression_calls_resolver(argument, resolver),
        Expression::Yield { argument } => argument
            .as_deref()
            .is_some_and(|argument| expression_calls_resolver(argument, resolver)),
        Expression::Binary { left, right }
        | Expression::Logical { left, right }
        | Expression::Assignment { left, right } => {
            expression_calls_resolver(left, resolver) || expression_calls_resolver(right, resolver)
        }
        Expression::Conditional { test, consequent, alternate } => {
            expression_calls_resolver(test, resolver)
                || expression_calls_resolver(consequent, resolver)
                || expression_calls_resolver(alternate, resolver)
        }
        Expression::Sequence { expressions } | Expression::TemplateLiteral { expressions } => {
            any(expressions)
        }
        Expression::TaggedTemplate { quasi } => expression_calls_resolver(quasi, resolver),
        Expression::Array { elements } => elements
            .iter()
            .flatten()
            .any(|element| expression_calls_resolver(element, resolver)),
        Expression::Object { properties } => any(properties),
        Expression::Property { key, value, computed } => {
            (*computed && expression_calls_resolver(key, resolver))
                || expression_calls_resolver(value, resolver)
        }
        Expression::Member { object, property, computed } => {
            expression_calls_resolver(object, resolver)
                || (*computed && expression_calls_resolver(property, resolver))
        }
        Expression::Chain { expression } => expression_calls_resolver(expression, resolver),
        Expression::Identifier { .. }
        | Expression::Literal { .. }
        | Expression::New { .. }
        | Expression::Other => false,
    }
}
