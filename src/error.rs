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

use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone)]
pub struct EvalError {
    /// Stable error code (E_PARSE, E_TYPE, …)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Primary source location
    pub span: Span,

    /// Optional note / help text
    pub help: Option<String>,
}

impl EvalError {
    /// Generic constructor
    pub fn new(code: &'static str, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            help: None,
        }
    }

    /// Parse error (unexpected token, missing token, trailing input)
    pub fn parse_error(message: impl Into<String>, span: Span) -> Self {
        Self::new("E_PARSE", message, span)
    }

    /// Type error (invalid operation / operand types)
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new("E_TYPE", message, Span::default())
    }

    /// Reference error (unknown parameter, failed selector lookup)
    pub fn reference_error(message: impl Into<String>) -> Self {
        Self::new("E_REFERENCE", message, Span::default())
    }

    /// Runtime error (during evaluation, host extension failures)
    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self::new("E_RUNTIME", message, Span::default())
    }

    /// Arity error (wrong number of function arguments)
    pub fn arity_error(message: impl Into<String>) -> Self {
        Self::new("E_ARITY", message, Span::default())
    }

    /// Format error (unparsable literal, bad regex, bad date string)
    pub fn format_error(message: impl Into<String>) -> Self {
        Self::new("E_FORMAT", message, Span::default())
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Attach a source position to the error (builder-style).
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Wraps an evaluation error with the expression it came from,
    /// preserving code, span and help.
    pub(crate) fn annotate(mut self, expression: &str) -> Self {
        self.message = format!("can not evaluate {:?}: {}", expression, self.message);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error[{}]: {} --> {}:{}",
            self.code,
            self.message,
            self.span.line,
            self.span.column + 1
        )?;

        if let Some(help) = &self.help {
            write!(f, "\nhelp: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for EvalError {}
