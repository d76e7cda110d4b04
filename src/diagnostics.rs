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

use crate::error::EvalError;
use crate::span::Span;

/// Responsible for rendering human-friendly, compiler-style diagnostics
/// for expression errors.
///
/// This printer:
/// - Formats errors with line/column information
/// - Displays the offending expression line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a helpful follow-up hint
///
/// The output is intentionally inspired by `rustc` diagnostics, but
/// simplified and designed to remain readable without color.
pub struct DiagnosticPrinter {
    /// Full text of the expression being compiled or evaluated.
    ///
    /// Stored as a single string so we can easily extract specific
    /// lines for error reporting.
    source: String,
}

impl DiagnosticPrinter {
    /// Creates a new diagnostic printer for a given expression.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Renders a formatted error diagnostic into a `String`.
    ///
    /// This function:
    /// 1. Extracts line/column information from the error span
    /// 2. Locates the corresponding line of the expression
    /// 3. Builds a compiler-style error header
    /// 4. Renders the expression line with a caret pointing at the error
    /// 5. Optionally appends a helpful suggestion
    ///
    /// # Output Example
    /// ```text
    /// error[E_PARSE]: unexpected 3 while scanning operator
    ///   --> 1:7
    ///    |
    ///  1 | 1 + 2 3
    ///    |       ^
    /// ```
    pub fn render(&self, error: &EvalError) -> String {
        let Span { line, column } = error.span;

        let lines: Vec<&str> = self.source.lines().collect();

        // Lines are 1-indexed in diagnostics, but vectors are 0-indexed.
        // `saturating_sub` prevents underflow if line == 0.
        let src_line = lines.get(line.saturating_sub(1)).unwrap_or(&"");

        let mut out = format!(
            "error[{}]: {}\n  --> {}:{}\n",
            error.code,
            error.message,
            line,
            column + 1
        );

        out.push_str("   |\n");
        out.push_str(&format!("{:>3} | {}\n", line, src_line));

        // Build a caret underline pointing exactly to the column
        // where the error occurred.
        let mut underline = String::new();
        for _ in 0..column {
            underline.push(' ');
        }
        underline.push('^');

        out.push_str(&format!("   | {}", underline));

        if let Some(help) = &error.help {
            out.push_str(&format!("\n\nhelp: {}", help));
        }

        out
    }

    /// Prints a formatted error diagnostic to stderr.
    pub fn print(&self, error: &EvalError) {
        eprintln!("{}", self.render(error));
    }
}
