/*
 * ==========================================================================
 * PAWX EVAL - Expressions with Claws!
 * ==========================================================================
 *
 * File:     json.rs
 * Purpose:  JSON-style array and object literal prefixes whose elements,
 *           keys and values are full expressions
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

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::EvalError;
use crate::evaluable::Evaluable;
use crate::language::builders::prefix_extension;
use crate::language::{Language, PrefixKey};
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::value::Value;

/// JSON-style literals. Elements are expressions, so `[1 + 1, x]` and
/// `{"k": a && b}` are valid; object keys are evaluated and stringified.
pub fn json() -> Language {
    static JSON: OnceLock<Language> = OnceLock::new();
    JSON.get_or_init(build_json).clone()
}

fn build_json() -> Language {
    Language::compose(vec![
        prefix_extension(PrefixKey::Lexeme("[".to_string()), parse_json_array),
        prefix_extension(PrefixKey::Lexeme("{".to_string()), parse_json_object),
    ])
}

fn parse_json_array(p: &mut Parser) -> Result<Evaluable, EvalError> {
    let mut items = Vec::new();

    loop {
        let token = p.scan();
        if token.kind == TokenKind::Symbol && token.lexeme == "]" {
            break;
        }
        p.camouflage("JSON array", &["]"]);

        items.push(p.parse_expression()?);

        let sep = p.scan();
        match (sep.kind, sep.lexeme.as_str()) {
            (TokenKind::Symbol, "]") => break,
            (TokenKind::Symbol, ",") => continue,
            _ => return Err(p.expected("JSON array", &[",", "]"])),
        }
    }

    Ok(Evaluable::new(move |cancel, parameter| {
        let mut values = Vec::with_capacity(items.len());
        for item in &items {
            values.push(item.evaluate(cancel, parameter)?);
        }
        Ok(Value::Array(values))
    }))
}

fn parse_json_object(p: &mut Parser) -> Result<Evaluable, EvalError> {
    let mut pairs: Vec<(Evaluable, Evaluable)> = Vec::new();

    loop {
        let token = p.scan();
        if token.kind == TokenKind::Symbol && token.lexeme == "}" {
            break;
        }
        p.camouflage("JSON object", &["}"]);

        let key = p.parse_expression()?;

        let colon = p.scan();
        if !(colon.kind == TokenKind::Symbol && colon.lexeme == ":") {
            return Err(p.expected("JSON object", &[":"]));
        }

        let value = p.parse_expression()?;
        pairs.push((key, value));

        let sep = p.scan();
        match (sep.kind, sep.lexeme.as_str()) {
            (TokenKind::Symbol, "}") => break,
            (TokenKind::Symbol, ",") => continue,
            _ => return Err(p.expected("JSON object", &[",", "}"])),
        }
    }

    Ok(Evaluable::new(move |cancel, parameter| {
        let mut fields = HashMap::with_capacity(pairs.len());
        for (key, value) in &pairs {
            let k = key.evaluate(cancel, parameter)?;
            let v = value.evaluate(cancel, parameter)?;
            fields.insert(k.stringify(), v);
        }
        Ok(Value::Object(fields))
    }))
}
