/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     text.rs
 * Purpose:  String concatenation, ordering comparisons, and the regex
 *           match operators
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

use regex::Regex;

use crate::cancel::CancelToken;
use crate::error::EvalError;
use crate::evaluable::Evaluable;
use crate::lang::base::base;
use crate::language::builders::{infix_eval_operator, infix_text_operator};
use crate::language::Language;
use crate::value::Value;

/// Text operators: `+` concatenation, lexicographic comparisons, and
/// the `=~` / `!~` regex match operators.
pub fn text() -> Language {
    static TEXT: OnceLock<Language> = OnceLock::new();
    TEXT.get_or_init(build_text).clone()
}

fn build_text() -> Language {
    Language::compose(vec![
        infix_text_operator("+", |a, b| Ok(Value::String(format!("{}{}", a, b)))),
        infix_text_operator("<", |a, b| Ok(Value::Bool(a < b))),
        infix_text_operator("<=", |a, b| Ok(Value::Bool(a <= b))),
        infix_text_operator(">", |a, b| Ok(Value::Bool(a > b))),
        infix_text_operator(">=", |a, b| Ok(Value::Bool(a >= b))),
        infix_eval_operator("=~", |a, b| regex_operator(a, b, false)),
        infix_eval_operator("!~", |a, b| regex_operator(a, b, true)),
        base(),
    ])
}

/// Builds the evaluable for `subject =~ pattern` (or `!~`).
///
/// The pattern operand is a literal pattern, not a runtime value, which
/// is why this is a direct operator: a constant pattern is compiled once
/// at parse time, and an invalid one fails the compilation instead of
/// every evaluation.
fn regex_operator(left: Evaluable, pattern: Evaluable, negate: bool) -> Result<Evaluable, EvalError> {
    if pattern.is_const() {
        let v = pattern.evaluate(&CancelToken::new(), &Value::Null)?;
        let re = compile_pattern(&v)?;
        return Ok(Evaluable::new(move |cancel, parameter| {
            let subject = left.evaluate(cancel, parameter)?;
            Ok(Value::Bool(re.is_match(&subject.stringify()) != negate))
        }));
    }

    Ok(Evaluable::new(move |cancel, parameter| {
        let subject = left.evaluate(cancel, parameter)?;
        let v = pattern.evaluate(cancel, parameter)?;
        let re = compile_pattern(&v)?;
        Ok(Value::Bool(re.is_match(&subject.stringify()) != negate))
    }))
}

fn compile_pattern(v: &Value) -> Result<Regex, EvalError> {
    let s = v.as_string().ok_or_else(|| {
        EvalError::type_error(format!(
            "regex pattern must be a String, got {}",
            v.type_name()
        ))
    })?;

    Regex::new(s).map_err(|e| EvalError::format_error(format!("invalid regex pattern: {}", e)))
}
