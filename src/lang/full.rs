/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     full.rs
 * Purpose:  The complete shipped grammar: every built-in fragment plus
 *           `in`, `??`, the ternary operator, and date()
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

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::cancel::CancelToken;
use crate::error::EvalError;
use crate::evaluable::Evaluable;
use crate::lang::arithmetic::arithmetic;
use crate::lang::bitmask::bitmask;
use crate::lang::json::json;
use crate::lang::logic::propositional_logic;
use crate::lang::text::text;
use crate::language::builders::{
    function, infix_operator, infix_short_circuit, postfix_operator,
};
use crate::language::Language;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::value::Value;

/// The full shipped grammar: arithmetic, bit operations, text, logic,
/// JSON literals, array membership `in`, coalescing `??`, the ternary
/// `? :`, and the `date()` function.
pub fn full() -> Language {
    static FULL: OnceLock<Language> = OnceLock::new();
    FULL.get_or_init(build_full).clone()
}

/// The full grammar extended with additional fragments; with no
/// extensions this is just [`full`].
pub fn full_with<I>(extensions: I) -> Language
where
    I: IntoIterator<Item = Language>,
{
    let mut fragments = vec![full()];
    fragments.extend(extensions);
    Language::compose(fragments)
}

fn build_full() -> Language {
    Language::compose(vec![
        arithmetic(),
        bitmask(),
        text(),
        propositional_logic(),
        json(),
        infix_operator("in", in_array),
        // `a ?? b` keeps a unless it is false or null.
        infix_short_circuit("??", |a| match a {
            Value::Bool(false) | Value::Null => None,
            other => Some(other.clone()),
        }),
        infix_operator("??", |a, b| match a {
            Value::Bool(false) | Value::Null => Ok(b.clone()),
            other => Ok(other.clone()),
        }),
        postfix_operator("?", parse_if),
        function("date", date_function),
    ])
}

fn in_array(a: &Value, b: &Value) -> Result<Value, EvalError> {
    match b {
        Value::Array(items) => Ok(Value::Bool(items.contains(a))),
        other => Err(EvalError::type_error(format!(
            "expected Array on the right of in, got {}",
            other.type_name()
        ))),
    }
}

/// Ternary continuation: `cond ? then : else`. The condition selects
/// the else branch for `false` and `null`, the then branch otherwise;
/// only the selected branch is evaluated.
fn parse_if(p: &mut Parser, condition: Evaluable) -> Result<Evaluable, EvalError> {
    let then_branch = p.parse_expression()?;

    let token = p.scan();
    if !(token.kind == TokenKind::Symbol && token.lexeme == ":") {
        return Err(p.expected("ternary", &[":"]));
    }

    let else_branch = p.parse_expression()?;

    Ok(Evaluable::new(move |cancel, parameter| {
        let branch = match condition.evaluate(cancel, parameter)? {
            Value::Bool(false) | Value::Null => &else_branch,
            _ => &then_branch,
        };
        branch.evaluate(cancel, parameter)
    }))
}

fn date_function(_cancel: &CancelToken, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error(
            "date() expects exactly one string argument",
        ));
    }

    let s = args[0].as_string().ok_or_else(|| {
        EvalError::type_error("date() expects exactly one string argument")
    })?;

    parse_date(s).map(Value::DateTime).ok_or_else(|| {
        EvalError::format_error(format!("date() could not parse {:?}", s))
    })
}

/// Tries a fixed list of timestamp shapes, from fully zoned down to a
/// bare date. Formats without a zone are interpreted in local time.
fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }

    for format in ["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            if let Some(dt) = Local.from_local_datetime(&naive).single() {
                return Some(dt.fixed_offset());
            }
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        if let Some(dt) = Local.from_local_datetime(&naive).single() {
            return Some(dt.fixed_offset());
        }
    }

    None
}
