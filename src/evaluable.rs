/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     evaluable.rs
 * Purpose:  The compiled representation of a parsed expression
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
use crate::value::Value;

type EvalFn = dyn Fn(&CancelToken, &Value) -> Result<Value, EvalError> + Send + Sync;

/// A compiled expression (or sub-expression).
///
/// An `Evaluable` is a pure closure from (cancellation token, input value)
/// to (result, error). It carries no internal state, so one compiled
/// expression may be evaluated arbitrarily many times, from any number of
/// threads, against different inputs.
///
/// The `constant` flag marks closures that are known not to depend on the
/// input parameter; the parser uses it to fold constant sub-expressions
/// at compile time.
#[derive(Clone)]
pub struct Evaluable {
    func: Arc<EvalFn>,
    constant: bool,
}

impl Evaluable {
    /// Wraps a closure into a non-constant evaluable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&CancelToken, &Value) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(f),
            constant: false,
        }
    }

    /// An evaluable that always yields `value`, flagged as constant.
    pub fn constant(value: Value) -> Self {
        Self {
            func: Arc::new(move |_, _| Ok(value.clone())),
            constant: true,
        }
    }

    /// Whether this evaluable is known not to depend on its input.
    pub fn is_const(&self) -> bool {
        self.constant
    }

    /// Runs the compiled expression against `parameter`.
    pub fn evaluate(&self, cancel: &CancelToken, parameter: &Value) -> Result<Value, EvalError> {
        (*self.func)(cancel, parameter)
    }
}

impl std::fmt::Debug for Evaluable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.constant {
            write!(f, "[Evaluable const]")
        } else {
            write!(f, "[Evaluable]")
        }
    }
}

/// The built-in variable selector, used when the grammar registers none.
///
/// Walks the input parameter along the parsed path: `Object` values are
/// indexed by the stringified key, `Array` values by numeric index. Any
/// miss produces a reference error naming the path walked so far.
pub(crate) fn default_selector(path: Vec<Evaluable>) -> Evaluable {
    Evaluable::new(move |cancel, parameter| {
        let mut current = parameter.clone();
        let mut walked: Vec<String> = Vec::new();

        for key in &path {
            let k = key.evaluate(cancel, parameter)?;
            walked.push(k.stringify());

            current = match &current {
                Value::Object(fields) => match fields.get(&k.stringify()) {
                    Some(v) => v.clone(),
                    None => {
                        return Err(EvalError::reference_error(format!(
                            "unknown parameter {}",
                            walked.join(".")
                        )))
                    }
                },

                Value::Array(items) => {
                    let idx = k.as_float().ok_or_else(|| {
                        EvalError::reference_error(format!(
                            "non-numeric index {} into array parameter {}",
                            k.stringify(),
                            walked.join(".")
                        ))
                    })?;

                    if idx < 0.0 || idx as usize >= items.len() {
                        return Err(EvalError::reference_error(format!(
                            "index {} out of bounds for parameter {}",
                            idx,
                            walked.join(".")
                        )));
                    }

                    items[idx as usize].clone()
                }

                _ => {
                    return Err(EvalError::reference_error(format!(
                        "unknown parameter {}",
                        walked.join(".")
                    )))
                }
            };
        }

        Ok(current)
    })
}
