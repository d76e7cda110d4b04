/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     grammar.rs
 * Purpose:  The Language table (prefix rules, operators, selector) and
 *           its monoid-like composition, plus compile/evaluate entry
 *           points
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

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::error::EvalError;
use crate::evaluable::Evaluable;
use crate::language::operator::OperatorDef;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::value::Value;

/// A prefix parse rule: given the parser positioned just after the
/// triggering token, produce the evaluable for that construct.
pub type PrefixRule = Arc<dyn Fn(&mut Parser) -> Result<Evaluable, EvalError> + Send + Sync>;

/// Host-supplied resolver mapping an identifier path (a sequence of
/// sub-evaluables, e.g. `a.b[c]`) to an evaluable.
pub type VariableSelector = Arc<dyn Fn(Vec<Evaluable>) -> Evaluable + Send + Sync>;

/// What a prefix rule is keyed on: a whole token class (all numbers,
/// all strings, all identifiers) or one specific lexeme (a punctuation
/// character like `(`, or a registered name like `true` or `date`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrefixKey {
    Kind(TokenKind),
    Lexeme(String),
}

/// An immutable-after-construction grammar.
///
/// A `Language` is a table of prefix rules, operator definitions, the
/// set of characters participating in operator symbols, and an optional
/// variable selector. Fragments produced by the builder functions are
/// merged with [`Language::compose`]; once a language is handed to a
/// parser it is never mutated, which is what makes compiled grammars
/// safely shareable across concurrent parses.
#[derive(Clone, Default)]
pub struct Language {
    pub(crate) prefixes: HashMap<PrefixKey, PrefixRule>,
    pub(crate) operators: HashMap<String, OperatorDef>,
    pub(crate) operator_symbols: HashSet<char>,
    pub(crate) selector: Option<VariableSelector>,
}

impl Language {
    /// An empty grammar: no literals, no operators, no selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges grammar fragments, in order, into one language.
    ///
    /// - Prefix rules: union; on collision the later fragment wins,
    ///   which is what allows extension and override.
    /// - Operators: precedence-aware merge per symbol (see
    ///   [`OperatorDef::merge`]); type-restricted handlers accumulate
    ///   rather than overwrite.
    /// - Operator symbol characters: union.
    /// - Variable selector: the later fragment's selector wins if set.
    pub fn compose<I>(fragments: I) -> Language
    where
        I: IntoIterator<Item = Language>,
    {
        let mut merged = Language::new();

        for base in fragments {
            for (key, rule) in base.prefixes {
                merged.prefixes.insert(key, rule);
            }

            for (name, def) in base.operators {
                let existing = merged.operators.remove(&name);
                merged
                    .operators
                    .insert(name, OperatorDef::merge(existing, def));
            }

            merged.operator_symbols.extend(base.operator_symbols);

            if base.selector.is_some() {
                merged.selector = base.selector;
            }
        }

        log::trace!(
            "composed language: {} prefixes, {} operators",
            merged.prefixes.len(),
            merged.operators.len()
        );

        merged
    }

    /// Compiles `expression` under this grammar into a reusable
    /// [`Evaluable`]. The whole input must form exactly one expression;
    /// trailing tokens are a parse error.
    pub fn compile(&self, expression: &str) -> Result<Evaluable, EvalError> {
        log::trace!("compiling expression {:?}", expression);

        let mut parser = Parser::new(expression, self.clone())?;
        let eval = parser.parse_expression()?;
        parser.finish(eval)
    }

    /// Convenience: compile `expression` and run it once against
    /// `parameter` with a fresh cancellation token.
    pub fn evaluate(&self, expression: &str, parameter: &Value) -> Result<Value, EvalError> {
        let eval = self.compile(expression)?;
        eval.evaluate(&CancelToken::new(), parameter)
            .map_err(|e| e.annotate(expression))
    }

    /// Registers every character of `name` as an operator symbol
    /// character and returns the key for the operator table.
    pub(crate) fn make_infix_key(&mut self, name: &str) -> String {
        for ch in name.chars() {
            self.operator_symbols.insert(ch);
        }
        name.to_string()
    }

    pub(crate) fn prefix(&self, key: &PrefixKey) -> Option<&PrefixRule> {
        self.prefixes.get(key)
    }

    pub(crate) fn operator(&self, name: &str) -> Option<&OperatorDef> {
        self.operators.get(name)
    }

    /// Whether `ch` participates in any registered operator symbol.
    /// Drives maximal-munch tokenization.
    pub(crate) fn is_operator_char(&self, ch: char) -> bool {
        self.operator_symbols.contains(&ch)
    }

    pub(crate) fn has_operator(&self, symbol: &str) -> bool {
        self.operators.contains_key(symbol)
    }

    pub(crate) fn has_operator_prefix(&self, probe: &str) -> bool {
        self.operators.keys().any(|k| k.starts_with(probe))
    }
}
