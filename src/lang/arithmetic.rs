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

use crate::lang::base::base;
use crate::language::builders::infix_number_operator;
use crate::language::Language;
use crate::value::Value;

/// Floating-point arithmetic and numeric comparisons.
///
/// Division and remainder follow IEEE 754 semantics (`1 / 0` is
/// infinity, not an error).
pub fn arithmetic() -> Language {
    static ARITHMETIC: OnceLock<Language> = OnceLock::new();
    ARITHMETIC.get_or_init(build_arithmetic).clone()
}

fn build_arithmetic() -> Language {
    Language::compose(vec![
        infix_number_operator("+", |a, b| Ok(Value::Number(a + b))),
        infix_number_operator("-", |a, b| Ok(Value::Number(a - b))),
        infix_number_operator("*", |a, b| Ok(Value::Number(a * b))),
        infix_number_operator("/", |a, b| Ok(Value::Number(a / b))),
        infix_number_operator("%", |a, b| Ok(Value::Number(a % b))),
        infix_number_operator("**", |a, b| Ok(Value::Number(a.powf(b)))),
        infix_number_operator(">", |a, b| Ok(Value::Bool(a > b))),
        infix_number_operator(">=", |a, b| Ok(Value::Bool(a >= b))),
        infix_number_operator("<", |a, b| Ok(Value::Bool(a < b))),
        infix_number_operator("<=", |a, b| Ok(Value::Bool(a <= b))),
        infix_number_operator("==", |a, b| Ok(Value::Bool(a == b))),
        infix_number_operator("!=", |a, b| Ok(Value::Bool(a != b))),
        base(),
    ])
}
