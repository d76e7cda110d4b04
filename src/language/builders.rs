/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     builders.rs
 * Purpose:  Public constructors for single-fragment grammars: functions,
 *           constants, prefix rules, operators, precedence declarations
 *           and variable selectors
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx-eval
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::error::EvalError;
use crate::evaluable::Evaluable;
use crate::language::grammar::{Language, PrefixKey};
use crate::language::operator::{
    Assoc, DirectOperator, InfixOperator, OperatorDef, PostfixOperator, TypedHandler,
};
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::value::Value;

/// Outcome of resolving a leading identifier: either a grammar-registered
/// name took over parsing, or the parsed path is delegated to the
/// variable selector.
pub enum Resolution {
    Resolved(Evaluable),
    Delegate(Vec<Evaluable>),
}

/// Registers a named function.
///
/// A registered function is a closure taking the cancellation token and
/// an ordered list of evaluated argument values. Call parentheses are
/// optional: `now` and `now()` both invoke a zero-argument function.
pub fn function<F>(name: &str, f: F) -> Language
where
    F: Fn(&CancelToken, Vec<Value>) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    let func: Arc<dyn Fn(&CancelToken, Vec<Value>) -> Result<Value, EvalError> + Send + Sync> =
        Arc::new(f);

    let mut language = Language::new();
    language.prefixes.insert(
        PrefixKey::Lexeme(name.to_string()),
        Arc::new(move |p: &mut Parser| {
            let token = p.scan();
            let args = if token.kind == TokenKind::Symbol && token.lexeme == "(" {
                p.parse_arguments()?
            } else {
                p.camouflage("function call", &["("]);
                Vec::new()
            };

            let func = func.clone();
            Ok(Evaluable::new(move |cancel, parameter| {
                let mut values = Vec::with_capacity(args.len());
                for arg in &args {
                    values.push(arg.evaluate(cancel, parameter)?);
                }
                (*func)(cancel, values)
            }))
        }),
    );
    language
}

/// Registers a named constant (e.g. `true`, `pi`).
pub fn constant(name: &str, value: Value) -> Language {
    let mut language = Language::new();
    language.prefixes.insert(
        PrefixKey::Lexeme(name.to_string()),
        Arc::new(move |_: &mut Parser| Ok(Evaluable::constant(value.clone()))),
    );
    language
}

/// Registers a prefix parse rule for a token class or a literal lexeme.
pub fn prefix_extension<F>(key: PrefixKey, ext: F) -> Language
where
    F: Fn(&mut Parser) -> Result<Evaluable, EvalError> + Send + Sync + 'static,
{
    let mut language = Language::new();
    language.prefixes.insert(key, Arc::new(ext));
    language
}

/// Registers a meta-prefix for a token class: the rule first yields a
/// [`Resolution`], letting registered names win over variable lookup
/// while unresolved paths delegate to the selector.
pub fn prefix_meta_prefix<F>(kind: TokenKind, ext: F) -> Language
where
    F: Fn(&mut Parser) -> Result<Resolution, EvalError> + Send + Sync + 'static,
{
    let mut language = Language::new();
    language.prefixes.insert(
        PrefixKey::Kind(kind),
        Arc::new(move |p: &mut Parser| match ext(p)? {
            Resolution::Resolved(eval) => Ok(eval),
            Resolution::Delegate(path) => Ok(p.variable(path)),
        }),
    );
    language
}

/// Registers a prefix unary operator (e.g. `-`, `!`, `~`).
///
/// If the parsed operand is constant the operator is applied at compile
/// time and replaced by a constant evaluable, surfacing evaluation
/// errors immediately.
pub fn prefix_operator<F>(name: &str, f: F) -> Language
where
    F: Fn(&CancelToken, Value) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    let op: Arc<dyn Fn(&CancelToken, Value) -> Result<Value, EvalError> + Send + Sync> =
        Arc::new(f);

    let mut language = Language::new();
    language.prefixes.insert(
        PrefixKey::Lexeme(name.to_string()),
        Arc::new(move |p: &mut Parser| {
            let operand = p.parse_next_expression()?;
            let op = op.clone();
            let inner = operand.clone();

            let eval = Evaluable::new(move |cancel, parameter| {
                let v = inner.evaluate(cancel, parameter)?;
                (*op)(cancel, v)
            });

            if operand.is_const() {
                let folded = eval.evaluate(&CancelToken::new(), &Value::Null)?;
                return Ok(Evaluable::constant(folded));
            }

            Ok(eval)
        }),
    );
    language
}

/// Registers a postfix operator with a custom parse continuation. The
/// continuation receives the parser and the already-parsed left operand
/// and is responsible for whatever syntax follows.
pub fn postfix_operator<F>(name: &str, ext: F) -> Language
where
    F: Fn(&mut Parser, Evaluable) -> Result<Evaluable, EvalError> + Send + Sync + 'static,
{
    new_operator(
        name,
        OperatorDef::Postfix(PostfixOperator {
            precedence: 0,
            assoc: Assoc::Left,
            continuation: Arc::new(ext),
        }),
    )
}

/// Registers a generic infix operator over arbitrary values.
pub fn infix_operator<F>(name: &str, f: F) -> Language
where
    F: Fn(&Value, &Value) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    let mut op = InfixOperator::empty();
    op.arbitrary = Some(Arc::new(f));
    new_operator(name, OperatorDef::Infix(op))
}

/// Registers a numeric infix operator. Operands are coerced to 64-bit
/// floats via [`Value::as_float`].
pub fn infix_number_operator<F>(name: &str, f: F) -> Language
where
    F: Fn(f64, f64) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    let mut op = InfixOperator::empty();
    op.handlers.push(TypedHandler::Number(Arc::new(f)));
    new_operator(name, OperatorDef::Infix(op))
}

/// Registers a textual infix operator over string operands.
pub fn infix_text_operator<F>(name: &str, f: F) -> Language
where
    F: Fn(&str, &str) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    let mut op = InfixOperator::empty();
    op.handlers.push(TypedHandler::Text(Arc::new(f)));
    new_operator(name, OperatorDef::Infix(op))
}

/// Registers a boolean infix operator.
pub fn infix_bool_operator<F>(name: &str, f: F) -> Language
where
    F: Fn(bool, bool) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    let mut op = InfixOperator::empty();
    op.handlers.push(TypedHandler::Bool(Arc::new(f)));
    new_operator(name, OperatorDef::Infix(op))
}

/// Registers a short-circuit predicate for an infix symbol: when the
/// predicate over the evaluated left operand returns a substitute, the
/// right operand is not evaluated (it is still parsed).
pub fn infix_short_circuit<F>(name: &str, f: F) -> Language
where
    F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
{
    let mut op = InfixOperator::empty();
    op.short_circuit = Some(Arc::new(f));
    new_operator(name, OperatorDef::Infix(op))
}

/// Registers an infix operator that builds its evaluable directly from
/// the two unevaluated operands, for operators whose right side must be
/// treated as a literal pattern (e.g. regex matching).
pub fn infix_eval_operator<F>(name: &str, f: F) -> Language
where
    F: Fn(Evaluable, Evaluable) -> Result<Evaluable, EvalError> + Send + Sync + 'static,
{
    new_operator(
        name,
        OperatorDef::Direct(DirectOperator {
            precedence: 0,
            assoc: Assoc::Left,
            builder: Arc::new(f),
        }),
    )
}

/// Declares a symbol's binding power without semantics; a later merge
/// supplies the handler. Left-associative.
pub fn precedence(name: &str, power: u8) -> Language {
    new_operator(
        name,
        OperatorDef::Precedence {
            power,
            assoc: Assoc::Left,
        },
    )
}

/// Like [`precedence`], but right-associative.
pub fn precedence_right(name: &str, power: u8) -> Language {
    new_operator(
        name,
        OperatorDef::Precedence {
            power,
            assoc: Assoc::Right,
        },
    )
}

/// Registers a host-supplied variable selector: a function from the
/// parsed identifier path to an evaluable performing the lookup.
pub fn variable_selector<F>(f: F) -> Language
where
    F: Fn(Vec<Evaluable>) -> Evaluable + Send + Sync + 'static,
{
    let mut language = Language::new();
    language.selector = Some(Arc::new(f));
    language
}

fn new_operator(name: &str, def: OperatorDef) -> Language {
    let mut language = Language::new();
    let key = language.make_infix_key(name);
    language.operators.insert(key, def);
    language
}
