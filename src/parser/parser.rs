/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * Core Parser Entry Point
 *
 * This file defines the `Parser` structure used to transform one token
 * stream, under one grammar, into a compiled `Evaluable`. The expression
 * grammar itself lives in `expressions.rs`; this file owns the token
 * cursor, the one-token lookahead/rollback ("camouflage") state machine,
 * and the helpers that grammar extensions call.
 *
 * A parser serves exactly one compilation of exactly one expression
 * string and is not reentrant.
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

use crate::error::EvalError;
use crate::evaluable::{default_selector, Evaluable};
use crate::language::{Language, PrefixKey, PrefixRule};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::span::Span;

/// The lookahead/rollback state machine.
///
/// - `Clean`: nothing scanned yet (or a fresh parser).
/// - `Consumed`: the last scanned token has been consumed normally.
/// - `Pending`: the last scanned token was rolled back via
///   [`Parser::camouflage`]; the next scan replays it. The stored error
///   is what the rollback would report if the token turns out to be
///   genuinely unexpected (e.g. trailing input after a full expression).
enum Lookahead {
    Clean,
    Consumed,
    Pending(EvalError),
}

/// A transient, per-compilation expression parser.
pub struct Parser {
    language: Language,
    tokens: Vec<Token>,
    current: usize,
    last_scan: Token,
    lookahead: Lookahead,
}

impl Parser {
    /// Lexes `expression` under `language` and prepares a parser over
    /// the resulting token stream.
    pub(crate) fn new(expression: &str, language: Language) -> Result<Self, EvalError> {
        let mut lexer = Lexer::new(expression, &language);
        lexer.scan_tokens()?;
        let tokens = lexer.tokens;

        Ok(Self {
            language,
            tokens,
            current: 0,
            last_scan: Token::eof(Span::default()),
            lookahead: Lookahead::Clean,
        })
    }

    /// Fetches the next token.
    ///
    /// If the previous token was camouflaged, it is replayed instead of
    /// advancing. The end-of-input token is sticky: scanning past it
    /// keeps returning it.
    pub fn scan(&mut self) -> Token {
        if let Lookahead::Pending(_) = self.lookahead {
            self.lookahead = Lookahead::Consumed;
            return self.last_scan.clone();
        }

        let token = self.tokens[self.current].clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }

        self.last_scan = token.clone();
        self.lookahead = Lookahead::Consumed;
        token
    }

    /// Rolls back the most recent [`Parser::scan`]: the token is marked
    /// "not yet consumed" and the next scan returns it again.
    ///
    /// `unit` and `expected` describe what the caller was looking for;
    /// they become the parse error if the rolled-back token ends up
    /// being trailing input.
    ///
    /// # Panics
    /// Calling this twice in a row, or before any scan, is an internal
    /// invariant violation in a grammar extension and fails fast.
    pub fn camouflage(&mut self, unit: &str, expected: &[&str]) {
        match self.lookahead {
            Lookahead::Pending(_) => {
                panic!("camouflage() called twice without an intervening scan()")
            }
            Lookahead::Clean => panic!("camouflage() called before any scan()"),
            Lookahead::Consumed => {
                let err = self.expected(unit, expected);
                self.lookahead = Lookahead::Pending(err);
            }
        }
    }

    /// The lexeme of the most recently scanned token.
    pub fn token_text(&self) -> &str {
        &self.last_scan.lexeme
    }

    /// Builds the standard "unexpected token" parse error for the last
    /// scanned token: what was being scanned, and which tokens would
    /// have been acceptable.
    pub fn expected(&self, unit: &str, expected: &[&str]) -> EvalError {
        let message = match expected.len() {
            0 => format!("unexpected {} while scanning {}", self.last_scan, unit),
            1 => format!(
                "unexpected {} while scanning {} expected {}",
                self.last_scan, unit, expected[0]
            ),
            _ => {
                let (last, init) = expected.split_last().unwrap();
                format!(
                    "unexpected {} while scanning {} expected {} or {}",
                    self.last_scan,
                    unit,
                    init.join(", "),
                    last
                )
            }
        };

        EvalError::parse_error(message, self.last_scan.span)
    }

    /// Resolves a parsed identifier path through the grammar's variable
    /// selector, falling back to the built-in parameter navigation.
    pub fn variable(&self, path: Vec<Evaluable>) -> Evaluable {
        match &self.language.selector {
            Some(selector) => (**selector)(path),
            None => default_selector(path),
        }
    }

    /// Looks up the prefix rule registered for a *name* (a constant or
    /// function), used by identifier meta-prefix rules to let
    /// registered names win over variable lookup.
    pub fn prefix_for_name(&self, name: &str) -> Option<PrefixRule> {
        self.language
            .prefix(&PrefixKey::Lexeme(name.to_string()))
            .cloned()
    }

    /// Parses a parenthesized, comma-separated argument list. The
    /// opening `(` must already be consumed; this consumes through the
    /// closing `)`.
    pub fn parse_arguments(&mut self) -> Result<Vec<Evaluable>, EvalError> {
        let mut args = Vec::new();

        let first = self.scan();
        if first.kind == TokenKind::Symbol && first.lexeme == ")" {
            return Ok(args);
        }
        self.camouflage("arguments", &[")"]);

        loop {
            args.push(self.parse_expression()?);

            let sep = self.scan();
            match (sep.kind, sep.lexeme.as_str()) {
                (TokenKind::Symbol, ")") => return Ok(args),
                (TokenKind::Symbol, ",") => continue,
                _ => return Err(self.expected("arguments", &[",", ")"])),
            }
        }
    }

    pub(crate) fn language(&self) -> &Language {
        &self.language
    }

    /// Finishes a compilation: the parsed evaluable is only valid if
    /// the whole input was consumed.
    pub(crate) fn finish(mut self, eval: Evaluable) -> Result<Evaluable, EvalError> {
        match std::mem::replace(&mut self.lookahead, Lookahead::Consumed) {
            Lookahead::Pending(err) => {
                if self.last_scan.kind == TokenKind::Eof {
                    Ok(eval)
                } else {
                    Err(err)
                }
            }
            _ => {
                let token = self.scan();
                if token.kind == TokenKind::Eof {
                    Ok(eval)
                } else {
                    Err(self.expected("expression", &[]))
                }
            }
        }
    }
}
