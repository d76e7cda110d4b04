/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     base.rs
 * Purpose:  The base grammar fragment: literals, parentheses, identifier
 *           paths, deep equality, and the shared precedence table
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

use std::sync::OnceLock;

use crate::error::EvalError;
use crate::evaluable::Evaluable;
use crate::language::builders::{
    constant, infix_operator, precedence, prefix_extension, prefix_meta_prefix, prefix_operator,
};
use crate::language::{Language, PrefixKey, Resolution};
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::value::Value;

/// The base grammar every shipped fragment builds on: number and string
/// literals, unary minus, the `true`/`false` constants, deep-equality
/// `==`/`!=`, parentheses, identifier paths, and the precedence table
/// shared by all built-in operators.
pub fn base() -> Language {
    static BASE: OnceLock<Language> = OnceLock::new();
    BASE.get_or_init(build_base).clone()
}

fn build_base() -> Language {
    Language::compose(vec![
        prefix_extension(PrefixKey::Kind(TokenKind::Number), parse_number),
        prefix_operator("-", |_, v| {
            let n = v.as_float().ok_or_else(|| {
                EvalError::type_error(format!("unexpected {} expected number", v.type_name()))
            })?;
            Ok(Value::Number(-n))
        }),
        prefix_extension(PrefixKey::Kind(TokenKind::String), parse_string),
        constant("true", Value::Bool(true)),
        constant("false", Value::Bool(false)),
        // Structural deep equality is the fallback when no type-specific
        // handler matches the operands.
        infix_operator("==", |a, b| Ok(Value::Bool(a == b))),
        infix_operator("!=", |a, b| Ok(Value::Bool(a != b))),
        prefix_extension(PrefixKey::Lexeme("(".to_string()), parse_parentheses),
        precedence("??", 0),
        precedence("||", 20),
        precedence("&&", 21),
        precedence("==", 40),
        precedence("!=", 40),
        precedence(">", 40),
        precedence(">=", 40),
        precedence("<", 40),
        precedence("<=", 40),
        precedence("=~", 40),
        precedence("!~", 40),
        precedence("in", 40),
        precedence("^", 60),
        precedence("&", 60),
        precedence("|", 60),
        precedence("<<", 90),
        precedence(">>", 90),
        precedence("+", 120),
        precedence("-", 120),
        precedence("*", 150),
        precedence("/", 150),
        precedence("%", 150),
        precedence("**", 200),
        prefix_meta_prefix(TokenKind::Identifier, parse_ident),
    ])
}

fn parse_number(p: &mut Parser) -> Result<Evaluable, EvalError> {
    let n: f64 = p
        .token_text()
        .parse()
        .map_err(|_| p.expected("number", &[]))?;
    Ok(Evaluable::constant(Value::Number(n)))
}

fn parse_string(p: &mut Parser) -> Result<Evaluable, EvalError> {
    Ok(Evaluable::constant(Value::String(
        p.token_text().to_string(),
    )))
}

fn parse_parentheses(p: &mut Parser) -> Result<Evaluable, EvalError> {
    let inner = p.parse_expression()?;
    let token = p.scan();
    if token.kind == TokenKind::Symbol && token.lexeme == ")" {
        Ok(inner)
    } else {
        Err(p.expected("parentheses", &[")"]))
    }
}

/// The identifier rule.
///
/// A name registered by a grammar fragment (constant or function) wins
/// outright. Anything else is a variable path: the leading name plus any
/// run of `.field` and `[index]` continuations, delegated to the
/// grammar's variable selector. Calling an unregistered name is a parse
/// error rather than a deferred runtime lookup.
fn parse_ident(p: &mut Parser) -> Result<Resolution, EvalError> {
    let name = p.token_text().to_string();

    if let Some(rule) = p.prefix_for_name(&name) {
        return Ok(Resolution::Resolved((*rule)(p)?));
    }

    let mut path = vec![Evaluable::constant(Value::String(name.clone()))];

    loop {
        let token = p.scan();
        match (token.kind, token.lexeme.as_str()) {
            (TokenKind::Symbol, ".") => {
                let field = p.scan();
                if field.kind != TokenKind::Identifier {
                    return Err(p.expected("field", &["identifier"]));
                }
                path.push(Evaluable::constant(Value::String(field.lexeme)));
            }

            (TokenKind::Symbol, "[") => {
                let key = p.parse_expression()?;
                let close = p.scan();
                if !(close.kind == TokenKind::Symbol && close.lexeme == "]") {
                    return Err(p.expected("index", &["]"]));
                }
                path.push(key);
            }

            (TokenKind::Symbol, "(") => {
                return Err(EvalError::parse_error(
                    format!("unknown function {}", name),
                    token.span,
                ));
            }

            _ => {
                p.camouflage("variable access", &[]);
                return Ok(Resolution::Delegate(path));
            }
        }
    }
}
