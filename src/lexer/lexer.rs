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
use crate::language::Language;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The expression lexer.
///
/// Converts an expression string into a stream of classified tokens.
/// Unlike a fixed lexer, operator symbols are not hardcoded: the lexer
/// consults the grammar's registered operator table and performs maximal
/// munch, so `<=`, `**`, `??` or any host-registered symbol tokenize as
/// one unit exactly when the grammar defines them.
pub struct Lexer<'a> {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    language: &'a Language,
    pub tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over `source`, scanning under `language`'s
    /// operator table.
    pub fn new(source: &str, language: &'a Language) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 0,
            language,
            tokens: Vec::new(),
        }
    }

    /// Performs complete lexical analysis over the entire input.
    ///
    /// Scans individual tokens until the end of the source is reached,
    /// then appends a final `Eof` token. Results are written into
    /// `self.tokens`. Must be called exactly once per lexer instance.
    pub fn scan_tokens(&mut self) -> Result<(), EvalError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        let span = self.position();
        self.tokens.push(Token::eof(span));
        Ok(())
    }

    /// Scans and emits a single token from the source stream.
    fn scan_token(&mut self) -> Result<(), EvalError> {
        let span = self.position();
        let ch = self.advance();

        match ch {
            // Whitespace
            ' ' | '\r' | '\t' | '\n' => {}

            // Strings
            '"' | '\'' => self.string_with_delimiter(ch, span)?,

            // Numbers
            '0'..='9' => self.number(span),

            // Identifiers
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(span),

            // Punctuation: maximal munch against the registered
            // operator symbols, else a single-character symbol.
            _ => self.operator_symbol(ch, span),
        }

        Ok(())
    }

    /// Emits a punctuation token, greedily extending `first` while the
    /// extension remains a registered operator symbol or a strict prefix
    /// of one. The longest registered symbol wins; if no extension is a
    /// registered operator the single character stands alone.
    fn operator_symbol(&mut self, first: char, span: Span) {
        let mut lexeme = first.to_string();

        if self.language.is_operator_char(first) {
            let mut probe = lexeme.clone();
            let mut pos = self.current;
            let mut best: Option<(String, usize)> = if self.language.has_operator(&probe) {
                Some((probe.clone(), pos))
            } else {
                None
            };

            while pos < self.chars.len() {
                let next = self.chars[pos];
                if !self.language.is_operator_char(next) {
                    break;
                }
                probe.push(next);
                if !self.language.has_operator_prefix(&probe) {
                    break;
                }
                pos += 1;
                if self.language.has_operator(&probe) {
                    best = Some((probe.clone(), pos));
                }
            }

            if let Some((symbol, end)) = best {
                while self.current < end {
                    self.advance();
                }
                lexeme = symbol;
            }
        }

        self.tokens.push(Token {
            kind: TokenKind::Symbol,
            lexeme,
            span,
        });
    }

    /// Parses a string literal using the provided quote delimiter.
    ///
    /// Consumes all characters until the matching closing delimiter,
    /// processing backslash escapes (`\n`, `\t`, `\r`, `\\`, `\'`,
    /// `\"`, `\0`; anything else passes through verbatim). The emitted
    /// lexeme is the unescaped content without the quotes.
    fn string_with_delimiter(&mut self, delimiter: char, span: Span) -> Result<(), EvalError> {
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != delimiter {
            let ch = self.advance();

            if ch == '\\' && !self.is_at_end() {
                let escaped = self.advance();
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    other => other,
                });
            } else {
                value.push(ch);
            }
        }

        if self.is_at_end() {
            return Err(EvalError::parse_error("unterminated string literal", span));
        }

        self.advance(); // closing quote

        self.tokens.push(Token {
            kind: TokenKind::String,
            lexeme: value,
            span,
        });

        Ok(())
    }

    /// Parses an identifier token: `letter | _` followed by any run of
    /// alphanumerics and underscores.
    fn identifier(&mut self, span: Span) {
        let start = self.current - 1;

        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.chars[start..self.current].iter().collect();

        self.tokens.push(Token {
            kind: TokenKind::Identifier,
            lexeme: text,
            span,
        });
    }

    /// Parses an integer, floating-point or exponent-notation numeric
    /// literal.
    fn number(&mut self, span: Span) {
        let start = self.current - 1;

        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // Exponent: e or E, optionally signed
        if self.peek() == 'e' || self.peek() == 'E' {
            let sign = matches!(self.peek_next(), '+' | '-');
            let digits_at = if sign { self.current + 2 } else { self.current + 1 };
            if self.char_at(digits_at).is_ascii_digit() {
                self.advance(); // e / E
                if sign {
                    self.advance();
                }
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
            }
        }

        let value: String = self.chars[start..self.current].iter().collect();

        self.tokens.push(Token {
            kind: TokenKind::Number,
            lexeme: value,
            span,
        });
    }

    /// Advances the lexer cursor by one character, keeping line/column
    /// counters current.
    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        ch
    }

    /// Returns the current character without consuming it, or `'\0'`
    /// at end of input.
    fn peek(&self) -> char {
        self.char_at(self.current)
    }

    /// Returns the character after the current one without consuming
    /// it, or `'\0'` past the end.
    fn peek_next(&self) -> char {
        self.char_at(self.current + 1)
    }

    fn char_at(&self, index: usize) -> char {
        if index >= self.chars.len() {
            '\0'
        } else {
            self.chars[index]
        }
    }

    fn position(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang;

    fn lex(source: &str) -> Vec<String> {
        let language = lang::full();
        let mut lexer = Lexer::new(source, &language);
        lexer.scan_tokens().expect("lexing failed");
        lexer
            .tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.lexeme.clone())
            .collect()
    }

    #[test]
    fn maximal_munch_prefers_longest_registered_symbol() {
        assert_eq!(lex("1<=2"), vec!["1", "<=", "2"]);
        assert_eq!(lex("2**3"), vec!["2", "**", "3"]);
        assert_eq!(lex("a??b"), vec!["a", "??", "b"]);
        assert_eq!(lex("a=~b"), vec!["a", "=~", "b"]);
    }

    #[test]
    fn single_char_fallback_when_no_operator_matches() {
        // '!' participates in `!=`/`!~` but is not itself a registered
        // infix operator, so alone it stays a one-character token.
        assert_eq!(lex("!x"), vec!["!", "x"]);
        assert_eq!(lex("((1))"), vec!["(", "(", "1", ")", ")"]);
    }

    #[test]
    fn adjacent_operators_do_not_overmunch() {
        assert_eq!(lex("1<<2"), vec!["1", "<<", "2"]);
        assert_eq!(lex("a&&!b"), vec!["a", "&&", "!", "b"]);
    }

    #[test]
    fn numbers_with_decimals_and_exponents() {
        assert_eq!(lex("3.14"), vec!["3.14"]);
        assert_eq!(lex("1e3"), vec!["1e3"]);
        assert_eq!(lex("2.5E-1"), vec!["2.5E-1"]);
        // a dot not followed by a digit is punctuation, not a decimal
        assert_eq!(lex("a.b"), vec!["a", ".", "b"]);
    }

    #[test]
    fn string_escapes_are_unescaped() {
        assert_eq!(lex(r#""a\nb""#), vec!["a\nb"]);
        assert_eq!(lex(r#"'it\'s'"#), vec!["it's"]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let language = lang::full();
        let mut lexer = Lexer::new("\"oops", &language);
        let err = lexer.scan_tokens().unwrap_err();
        assert_eq!(err.code, "E_PARSE");
    }
}
