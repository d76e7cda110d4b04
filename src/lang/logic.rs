/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
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
use crate::lang::base::base;
use crate::language::builders::{infix_bool_operator, infix_short_circuit, prefix_operator};
use crate::language::Language;
use crate::value::Value;

/// Propositional logic: `!`, short-circuiting `&&` / `||`, boolean
/// `==` / `!=`.
///
/// The short-circuit entries decide from the left operand alone:
/// `false && x` never evaluates `x`, and neither does `true || x`.
pub fn propositional_logic() -> Language {
    static LOGIC: OnceLock<Language> = OnceLock::new();
    LOGIC.get_or_init(build_logic).clone()
}

fn build_logic() -> Language {
    Language::compose(vec![
        prefix_operator("!", |_, v| {
            let b = v.as_bool().ok_or_else(|| {
                EvalError::type_error(format!("unexpected {} expected bool", v.type_name()))
            })?;
            Ok(Value::Bool(!b))
        }),
        infix_short_circuit("&&", |a| match a {
            Value::Bool(false) => Some(Value::Bool(false)),
            _ => None,
        }),
        infix_bool_operator("&&", |a, b| Ok(Value::Bool(a && b))),
        infix_short_circuit("||", |a| match a {
            Value::Bool(true) => Some(Value::Bool(true)),
            _ => None,
        }),
        infix_bool_operator("||", |a, b| Ok(Value::Bool(a || b))),
        infix_bool_operator("==", |a, b| Ok(Value::Bool(a == b))),
        infix_bool_operator("!=", |a, b| Ok(Value::Bool(a != b))),
        base(),
    ])
}
