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
use crate::language::builders::{infix_number_operator, prefix_operator};
use crate::language::Language;
use crate::value::Value;

/// Bit operations over numbers, applied to their 64-bit integer parts.
/// Out-of-range shift amounts yield 0.
pub fn bitmask() -> Language {
    static BITMASK: OnceLock<Language> = OnceLock::new();
    BITMASK.get_or_init(build_bitmask).clone()
}

fn build_bitmask() -> Language {
    Language::compose(vec![
        infix_number_operator("^", |a, b| {
            Ok(Value::Number(((a as i64) ^ (b as i64)) as f64))
        }),
        infix_number_operator("&", |a, b| {
            Ok(Value::Number(((a as i64) & (b as i64)) as f64))
        }),
        infix_number_operator("|", |a, b| {
            Ok(Value::Number(((a as i64) | (b as i64)) as f64))
        }),
        infix_number_operator("<<", |a, b| {
            Ok(Value::Number(
                (a as i64).checked_shl(b as u32).unwrap_or(0) as f64,
            ))
        }),
        infix_number_operator(">>", |a, b| {
            Ok(Value::Number(
                (a as i64).checked_shr(b as u32).unwrap_or(0) as f64,
            ))
        }),
        prefix_operator("~", |_, v| {
            let n = v.as_float().ok_or_else(|| {
                EvalError::type_error(format!("unexpected {} expected number", v.type_name()))
            })?;
            Ok(Value::Number(!(n as i64) as f64))
        }),
    ])
}
