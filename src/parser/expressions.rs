/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     expressions.rs
 * Purpose:  Implements expression parsing via precedence climbing
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * GitHub:   https://github.com/samwilcox/pawx-eval
 *
 * --------------------------------------------------------------------------
 *  LICENSE
 * --------------------------------------------------------------------------
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * The parsing algorithm is precedence climbing (Pratt parsing):
 *
 *  1. Parse one value via the prefix rule selected by the next token
 *     (literals, unary operators, grouping, function calls, ...).
 *  2. While the next token is a registered operator binding tighter
 *     than the current minimum, consume it and dispatch on its kind:
 *     infix handlers, direct (pattern) builders, or postfix parse
 *     continuations.
 *  3. Anything else is rolled back for the caller to deal with.
 *
 * Operator precedence and associativity come entirely from the grammar;
 * nothing here hardcodes a symbol.
 *
 * ==========================================================================
 */

use crate::error::EvalError;
use crate::evaluable::Evaluable;
use crate::language::operator::{Assoc, OperatorDef};
use crate::lexer::TokenKind;
use crate::parser::parser::Parser;

impl Parser {
    /// Parses one full expression at the lowest binding level.
    pub fn parse_expression(&mut self) -> Result<Evaluable, EvalError> {
        self.parse_expression_with(-1)
    }

    /// Parses one value: the next token's prefix rule, with no operator
    /// continuation. Unary operators use this for their operand so that
    /// `-2 ** 2` binds as `(-2) ** 2`.
    pub fn parse_next_expression(&mut self) -> Result<Evaluable, EvalError> {
        let token = self.scan();

        if token.kind == TokenKind::Eof {
            return Err(self.expected("expression", &[]));
        }

        let rule = match token.kind {
            TokenKind::Symbol => self
                .language()
                .prefix(&crate::language::PrefixKey::Lexeme(token.lexeme.clone()))
                .cloned(),
            kind => self
                .language()
                .prefix(&crate::language::PrefixKey::Kind(kind))
                .cloned(),
        };

        match rule {
            Some(rule) => (*rule)(self),
            None => Err(self.expected("expression", &[])),
        }
    }

    /// The precedence-climbing loop: parse a value, then fold in every
    /// operator binding tighter than `min_power`.
    pub(crate) fn parse_expression_with(&mut self, min_power: i16) -> Result<Evaluable, EvalError> {
        let mut left = self.parse_next_expression()?;

        loop {
            let token = self.scan();

            // Only symbols and identifier-shaped words (like `in`) can
            // be operators; strings and numbers never are.
            let def = match token.kind {
                TokenKind::Symbol | TokenKind::Identifier => {
                    self.language().operator(&token.lexeme).cloned()
                }
                _ => None,
            };

            let def = match def {
                Some(def) if i16::from(def.precedence()) > min_power => def,
                _ => {
                    self.camouflage("operator", &[]);
                    return Ok(left);
                }
            };

            match def {
                OperatorDef::Infix(infix) => {
                    let next_min = match infix.assoc {
                        Assoc::Left => i16::from(infix.precedence),
                        Assoc::Right => i16::from(infix.precedence) - 1,
                    };
                    let right = self.parse_expression_with(next_min)?;
                    left = infix.build(&token.lexeme, left, right);
                }

                OperatorDef::Direct(direct) => {
                    let next_min = match direct.assoc {
                        Assoc::Left => i16::from(direct.precedence),
                        Assoc::Right => i16::from(direct.precedence) - 1,
                    };
                    let right = self.parse_expression_with(next_min)?;
                    left = (*direct.builder)(left, right)?;
                }

                OperatorDef::Postfix(postfix) => {
                    left = (*postfix.continuation)(self, left)?;
                }

                // A bare precedence declaration has no semantics yet;
                // treat the symbol as not-an-operator.
                OperatorDef::Precedence { .. } => {
                    self.camouflage("operator", &[]);
                    return Ok(left);
                }
            }
        }
    }
}
