/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * Crate Root
 *
 * pawx-eval is a small, embeddable, extensible expression engine:
 * declare a grammar out of composable fragments, compile an expression
 * against it once, and evaluate the compiled form against any number of
 * inputs, from any number of threads.
 *
 * --------------------------------------------------------------------------
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

//! An embeddable, extensible expression-language engine.
//!
//! ```
//! use pawx_eval::{evaluate, Value};
//!
//! let result = evaluate("2 + 3 * 4", &Value::Null).unwrap();
//! assert_eq!(result, Value::Number(14.0));
//! ```
//!
//! Grammars are assembled from fragments and compiled expressions are
//! reusable:
//!
//! ```
//! use pawx_eval::{lang, Value};
//!
//! let language = lang::full();
//! let eval = language.compile("foo.bar > 10").unwrap();
//! ```

pub mod cancel;
pub mod diagnostics;
pub mod error;
pub mod evaluable;
pub mod lang;
pub mod language;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod value;

pub use cancel::CancelToken;
pub use diagnostics::DiagnosticPrinter;
pub use error::EvalError;
pub use evaluable::Evaluable;
pub use language::{Assoc, Language, PrefixKey, Resolution};
pub use parser::Parser;
pub use span::Span;
pub use value::Value;

use crate::lang::full;

/// Compiles `expression` under the full built-in grammar.
pub fn compile(expression: &str) -> Result<Evaluable, EvalError> {
    full().compile(expression)
}

/// Compiles `expression` under the full built-in grammar and evaluates
/// it once against `parameter`.
pub fn evaluate(expression: &str, parameter: &Value) -> Result<Value, EvalError> {
    full().evaluate(expression, parameter)
}
